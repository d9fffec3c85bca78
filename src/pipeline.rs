use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use rand::Rng;
use tracing::{debug, info};

use crate::error::{LimvocError, Result};
use crate::selector::{Resolution, SynonymSelector};
use crate::staging::{ensure_distinct, CommitStrategy, StagingFile, DEFAULT_STAGING_PATH};
use crate::stats::RunStats;
use crate::tokenizer::Tokens;
use crate::vocabulary::{IndexedVocabulary, SynonymTable, Vocabulary};

/// Configuration for a rewrite run
#[derive(Debug, Clone)]
pub struct RewriteConfig {
    /// Where the rewritten document is staged before commit
    pub staging_path: PathBuf,
    /// How the staged document replaces the original
    pub commit: CommitStrategy,
    /// Resolve and keep a final word that has no trailing delimiter
    pub flush_trailing: bool,
    /// Load the vocabulary into memory once instead of rescanning it per word
    pub indexed: bool,
    /// Read buffer size for the input document
    pub buffer_size: usize,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            staging_path: PathBuf::from(DEFAULT_STAGING_PATH),
            commit: CommitStrategy::default(),
            flush_trailing: true,
            indexed: false,
            buffer_size: 8192,
        }
    }
}

/// Counters produced by the scanning phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub words_scanned: u64,
    pub words_matched: u64,
    pub words_replaced: u64,
    pub bytes_written: u64,
    pub trailing_word_flushed: bool,
}

/// Scanning phase: tokenize `input`, resolve every word and write the result to `output`.
///
/// Each resolved word is followed by the exact delimiter that ended it in the
/// input. Empty words (consecutive delimiters) are never looked up.
pub fn rewrite_stream<R, W, V, G>(
    input: R,
    output: &mut W,
    selector: &mut SynonymSelector<V, G>,
    flush_trailing: bool,
) -> Result<ScanSummary>
where
    R: BufRead,
    W: Write,
    V: Vocabulary,
    G: Rng,
{
    let mut summary = ScanSummary::default();
    let write_err = |e: std::io::Error| LimvocError::io("writing staging output", e);

    for token in Tokens::new(input, flush_trailing) {
        let token = token?;

        if !token.word.is_empty() {
            summary.words_scanned += 1;
            let resolution = selector.resolve(&token.word)?;
            if let Resolution::Matched { word, .. } = &resolution {
                summary.words_matched += 1;
                if *word != token.word {
                    summary.words_replaced += 1;
                }
            }
            let word = resolution.into_word();
            output.write_all(word.as_bytes()).map_err(write_err)?;
            summary.bytes_written += word.len() as u64;
        }

        match token.delimiter {
            Some(delimiter) => {
                output.write_all(&[delimiter]).map_err(write_err)?;
                summary.bytes_written += 1;
            }
            None => summary.trailing_word_flushed = true,
        }
    }

    Ok(summary)
}

/// Rewrite the document at `input_path` in place using the vocabulary at `vocabulary_path`.
///
/// The input is read completely into the staging file before the staging file
/// replaces it. Any error ends the run; a data error leaves the staging file behind.
pub fn rewrite_file<G: Rng>(
    input_path: &Path,
    vocabulary_path: &Path,
    config: &RewriteConfig,
    rng: G,
) -> Result<RunStats> {
    let start_time = Instant::now();
    info!(
        "Rewriting {} with vocabulary {}",
        input_path.display(),
        vocabulary_path.display()
    );

    let input = File::open(input_path).map_err(|source| LimvocError::OpenInput {
        path: input_path.to_path_buf(),
        source,
    })?;

    let vocabulary: Box<dyn Vocabulary> = if config.indexed {
        Box::new(IndexedVocabulary::open(vocabulary_path)?)
    } else {
        Box::new(SynonymTable::open(vocabulary_path)?)
    };

    ensure_distinct(&config.staging_path, input_path)?;
    let mut staging = StagingFile::create(&config.staging_path)?;
    let mut selector = SynonymSelector::new(vocabulary, rng);

    let reader = BufReader::with_capacity(config.buffer_size, input);
    let summary = rewrite_stream(reader, &mut staging, &mut selector, config.flush_trailing)?;
    debug!(?summary, "Scan complete");

    // Release the read handles before the document is replaced
    drop(selector);

    let commit = staging.commit(input_path, config.commit)?;

    let stats = RunStats {
        input_path: input_path.display().to_string(),
        vocabulary_path: vocabulary_path.display().to_string(),
        words_scanned: summary.words_scanned,
        words_matched: summary.words_matched,
        words_replaced: summary.words_replaced,
        bytes_written: summary.bytes_written,
        trailing_word_flushed: summary.trailing_word_flushed,
        commit: commit.to_string(),
        processing_time_ms: start_time.elapsed().as_millis() as u64,
    };

    info!(
        "Rewrote {}: {} words, {} matched, {} replaced in {}ms",
        input_path.display(),
        stats.words_scanned,
        stats.words_matched,
        stats.words_replaced,
        stats.processing_time_ms
    );
    Ok(stats)
}
