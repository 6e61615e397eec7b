use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the Classroom facade, the Drive downloader, and the
/// credential loader. Nothing is retried; every variant propagates to the
/// process boundary.
#[derive(Debug, Error)]
pub enum ClassroomError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("not a regular file: {0}")]
    NotARegularFile(PathBuf),

    #[error("no permission to read {0}")]
    ReadDenied(PathBuf),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("failed to sign token assertion: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("API request failed ({status}): {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("file exceeds the download limit of {limit} bytes")]
    FileTooLarge { limit: u64 },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
