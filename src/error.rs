use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("malformed level at row {row}: {message}")]
    MalformedLevel { row: usize, message: String },
    #[error("invalid direction '{0}'")]
    InvalidDirection(String),
    #[error("session has ended; no further moves are accepted")]
    SessionEnded,
    #[error("unknown chaser strategy '{0}'")]
    UnknownStrategy(String),
    #[error("failed to read level file {path}: {source}")]
    LevelIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("terminal i/o failed: {0}")]
    Terminal(#[source] std::io::Error),
}

impl GameError {
    pub(crate) fn malformed(row: usize, message: impl Into<String>) -> Self {
        Self::MalformedLevel {
            row,
            message: message.into(),
        }
    }
}
