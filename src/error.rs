// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProkkaError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    /// Nothing in the batch looked like a Prokka summary.
    #[error("no Prokka summary reports found in the input")]
    NoUsableInput,

    #[error("could not serialize summary data: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ProkkaError {
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        ProkkaError::Io {
            source,
            path: path.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProkkaError>;

/// Per-file failure after the header gate passed: the summary is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("{field} line is not a count: '{line}'")]
    InvalidHeaderCount { field: &'static str, line: String },
}
