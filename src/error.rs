use std::io;
use thiserror::Error;

/// Errors raised while reading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    /// The input has no header line.
    #[error("empty dataset")]
    EmptyDataset,

    #[error("invalid header line {line:?}: expected \"<transactions> <items>\"")]
    InvalidHeader { line: String },
}

pub type Result<T> = std::result::Result<T, DatasetError>;
