use std::io;

use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
pub enum PointIndexError {
    #[error("I/O error reading dataset: {0}")]
    Io(#[from] io::Error),
    #[error("malformed dataset header: {0}")]
    MalformedHeader(String),
}

pub type Result<T> = std::result::Result<T, PointIndexError>;
