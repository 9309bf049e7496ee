//! Error kinds reported by the persistence boundary.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failure of a write against the store.
///
/// Unique-key conflicts get their own kind so callers never inspect
/// driver error codes or messages. Callers match on the kind; there is no
/// conversion into `AppError`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error(transparent)]
    Database(DbErr),
}

impl StoreError {
    /// Sort a raw database error into its kind.
    pub fn classify(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Self::UniqueViolation(detail),
            _ => Self::Database(err),
        }
    }
}
