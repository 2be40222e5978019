//! Error types for stores and the scheduler.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("card not found: {0}")]
    NotFound(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("invalid grade: {0}")]
    InvalidGrade(String),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
