use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NgsQcError {
    #[error("{path}: unknown chromosome '{chrom}' at line {line}")]
    UnknownChromosome {
        path: String,
        chrom: String,
        line: usize,
    },

    #[error("{path}: {expected} columns expected at line {line}")]
    ColumnCount {
        path: String,
        expected: usize,
        line: usize,
    },

    #[error("{path}: invalid number at line {line}")]
    InvalidNumber { path: String, line: usize },

    #[error("{path}: invalid assembly file (line {line})")]
    InvalidChromSizes { path: String, line: usize },

    #[error("{0}: no such file or directory")]
    FileNotFound(String),

    #[error("span must be a non-null positive number, got {0}")]
    InvalidSpan(u32),

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl NgsQcError {
    /// Wrap an io error with the path of the file it came from.
    pub fn io<P: Into<String>>(path: P, source: io::Error) -> Self {
        NgsQcError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for every error raised by malformed or unreadable input, as opposed
    /// to a bad configuration.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, NgsQcError::InvalidSpan(_))
    }
}

pub type Result<T> = std::result::Result<T, NgsQcError>;
