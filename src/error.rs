use std::io;
use std::path::PathBuf;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum HladlError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid input: {msg}")]
    InvalidInput { msg: String },

    #[error("Unable to read in JSON file '{}': {source}", path.display())]
    ReadJson { path: PathBuf, source: BoxError },

    #[error("Unable to write JSON file '{}': {source}", path.display())]
    WriteJson { path: PathBuf, source: BoxError },

    #[error("No '{pattern}' data file found in '{}'", dir.display())]
    DataNotFound { dir: PathBuf, pattern: String },

    #[error("Sequence and quality lengths don't match (seq: {seq_len}, qual: {qual_len})")]
    LengthMismatch { seq_len: usize, qual_len: usize },
}

impl HladlError {
    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        HladlError::InvalidInput { msg: msg.into() }
    }
}

pub type Result<T> = std::result::Result<T, HladlError>;
