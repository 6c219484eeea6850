//! Error types for the simulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid dimensions: {rows}x{cols} (both must be positive)")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Unknown pattern: {0}")]
    UnknownPattern(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
