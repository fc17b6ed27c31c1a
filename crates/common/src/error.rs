//! Error types shared across Clipzoom crates.

use std::path::PathBuf;

/// Top-level error type for Clipzoom operations.
#[derive(Debug, thiserror::Error)]
pub enum ClipzoomError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ClipzoomError.
pub type ClipzoomResult<T> = Result<T, ClipzoomError>;

impl ClipzoomError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
