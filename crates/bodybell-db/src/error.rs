//! Database errors

use bodybell_types::ValidationError;
use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Record not found
    #[error("record not found")]
    NotFound,

    /// Input rejected before reaching the store
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result alias for repository operations
pub type DbResult<T> = Result<T, DbError>;
