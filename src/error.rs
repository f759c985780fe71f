//! Structural and tool errors
//!
//! These abort a comparison run. They are never a FAIL verdict: a FAIL means
//! the candidate disagrees with the reference, an error means the inputs could
//! not be compared at all.

use crate::line_diff::DiffSide;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompareError>;

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An echoed diff line had no address token.
    #[error("{side} line {line_number} has no address token: {line:?}")]
    MalformedLine {
        side: DiffSide,
        line_number: usize,
        line: String,
    },

    #[error("failed to write report")]
    Write(#[from] std::io::Error),

    #[error("failed to serialize report")]
    Serialize(#[from] serde_json::Error),
}
