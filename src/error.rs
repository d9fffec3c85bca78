use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Maximum number of bytes in a single word, in documents and vocabulary tables alike.
pub const WORD_MAX_LEN: usize = 15;

/// Process exit statuses, one per failure mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    BadArguments,
    CannotOpenInput,
    CannotOpenVocabulary,
    CannotOpenStaging,
    CannotCloseInput,
    CannotCloseVocabulary,
    CannotCloseStaging,
    WordTooLong,
    IoFailure,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::BadArguments => -1,
            ExitStatus::CannotOpenInput => -2,
            ExitStatus::CannotOpenVocabulary => -3,
            ExitStatus::CannotOpenStaging => -4,
            ExitStatus::CannotCloseInput => -5,
            ExitStatus::CannotCloseVocabulary => -6,
            ExitStatus::CannotCloseStaging => -7,
            ExitStatus::WordTooLong => -8,
            ExitStatus::IoFailure => -9,
        }
    }
}

/// Every way a run can fail. All of them are terminal.
#[derive(Error, Debug)]
pub enum LimvocError {
    #[error("Couldn't open file at path \"{}\": {source}", path.display())]
    OpenInput { path: PathBuf, source: io::Error },

    #[error("Couldn't open vocabulary at path \"{}\": {source}", path.display())]
    OpenVocabulary { path: PathBuf, source: io::Error },

    #[error("Couldn't create staging file \"{}\": {source}", path.display())]
    OpenStaging { path: PathBuf, source: io::Error },

    #[error("Couldn't close file \"{}\": {source}", path.display())]
    CloseInput { path: PathBuf, source: io::Error },

    #[error("Couldn't close staging file \"{}\": {source}", path.display())]
    CloseStaging { path: PathBuf, source: io::Error },

    /// A document word or vocabulary token exceeded [`WORD_MAX_LEN`].
    #[error("Word too long (more than {limit} bytes): \"{prefix}...\"")]
    WordTooLong { prefix: String, limit: usize },

    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: io::Error,
    },
}

impl LimvocError {
    pub(crate) fn word_too_long(bytes: &[u8]) -> Self {
        LimvocError::WordTooLong {
            prefix: String::from_utf8_lossy(bytes).into_owned(),
            limit: WORD_MAX_LEN,
        }
    }

    pub(crate) fn io(context: &'static str, source: io::Error) -> Self {
        LimvocError::Io { context, source }
    }

    pub fn exit_status(&self) -> ExitStatus {
        match self {
            LimvocError::OpenInput { .. } => ExitStatus::CannotOpenInput,
            LimvocError::OpenVocabulary { .. } => ExitStatus::CannotOpenVocabulary,
            LimvocError::OpenStaging { .. } => ExitStatus::CannotOpenStaging,
            LimvocError::CloseInput { .. } => ExitStatus::CannotCloseInput,
            LimvocError::CloseStaging { .. } => ExitStatus::CannotCloseStaging,
            LimvocError::WordTooLong { .. } => ExitStatus::WordTooLong,
            LimvocError::Io { .. } => ExitStatus::IoFailure,
        }
    }
}

pub type Result<T> = std::result::Result<T, LimvocError>;
