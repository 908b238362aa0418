//! # Scrumline Storage
//!
//! SQLite persistence for projects, sprints, issues and activity logs.
//! One storage struct per entity over a shared [`sqlx::SqlitePool`]; the
//! issue storage carries the transactional batch update used by board moves.

use thiserror::Error;

pub mod activity;
pub mod issues;
pub mod projects;
pub mod sprints;

pub use activity::ActivityLogStorage;
pub use issues::IssueStorage;
pub use projects::ProjectStorage;
pub use sprints::SprintStorage;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Row not found")]
    NotFound,
    #[error("Duplicate name: {0}")]
    DuplicateName(String),
    #[error("Database error: {0}")]
    Database(String),
}

impl StorageError {
    /// Whether `err` is a UNIQUE-constraint violation, which callers may
    /// surface as a retryable conflict.
    pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
        matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
