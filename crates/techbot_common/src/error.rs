//! Error types for TechBot.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TechbotError {
    #[error("Cannot read knowledge corpus at {path}: {source}")]
    CorpusUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown issue: {0}")]
    UnknownIssue(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
