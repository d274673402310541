use crate::libs::messages::Message;
use thiserror::Error;

/// Errors returned by the task gateway and its setup.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("{}", not_found(.0))]
    NotFound(i64),
    #[error("{}", Message::TaskTitleEmpty)]
    InvalidTitle,
    #[error("database error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("database migration failed: {0:#}")]
    Migration(anyhow::Error),
    #[error("{0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("database worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

fn not_found(id: &i64) -> Message {
    Message::TaskNotFoundWithId(*id)
}

pub type Result<T, E = TaskError> = std::result::Result<T, E>;
