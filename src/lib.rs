pub mod error;
pub mod pipeline;
pub mod selector;
pub mod staging;
pub mod stats;
pub mod tokenizer;
pub mod vocabulary;

// Re-export main types for convenient access
pub use error::{ExitStatus, LimvocError, Result, WORD_MAX_LEN};
pub use tokenizer::{Token, TokenBuffer, Tokens, Word};

// Re-export the lookup and selection layer
pub use vocabulary::{IndexedVocabulary, SynonymGroup, SynonymTable, Vocabulary};
pub use selector::{process_rng, Resolution, SynonymSelector};

// Re-export the rewrite pipeline
pub use pipeline::{rewrite_file, rewrite_stream, RewriteConfig, ScanSummary};
pub use staging::{CommitStrategy, StagingFile, DEFAULT_STAGING_PATH};
pub use stats::RunStats;
