use std::io;

use ndarray::ShapeError;
use ndarray_npy::WriteNpyError;
use thiserror::Error;

/// Error type for ngsqc-io operations.
#[derive(Error, Debug)]
pub enum ExportError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Failed to write a `.npy` array.
    #[error("Failed to write {path}: {source}")]
    Npy {
        path: String,
        #[source]
        source: WriteNpyError,
    },

    /// Wiggle counts could not be laid out as a two column matrix.
    #[error("Invalid wiggle matrix shape: {0}")]
    Shape(#[from] ShapeError),

    /// Failed to serialize the run metadata.
    #[error("Failed to write metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}

/// Result type alias for ngsqc-io operations.
pub type Result<T> = std::result::Result<T, ExportError>;
