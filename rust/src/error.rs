//! Errors raised while loading a roster and building its search board.

use thiserror::Error;

/// Errors raised before the search starts.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Line {line}: missing value for {directive}")]
    MissingValue { line: usize, directive: String },
    #[error("Line {line}: invalid value {value:?} for {directive}")]
    InvalidValue {
        line: usize,
        directive: String,
        value: String,
    },
    #[error("Line {line}: unknown directive {directive}")]
    UnknownDirective { line: usize, directive: String },
    #[error("Duplicate worker: {0}")]
    DuplicateWorker(String),
    #[error("Conflict names unknown worker: {0}")]
    UnknownWorker(String),
    #[error("Invalid arguments: {0}")]
    Usage(String),
}
