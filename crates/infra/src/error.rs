//! Store-level errors.
//!
//! SQLx errors are mapped to `StoreError` as follows:
//!
//! | SQLx error | SQLite condition | StoreError | Scenario |
//! |------------|------------------|------------|----------|
//! | Database (unique violation) | `SQLITE_CONSTRAINT_UNIQUE` | `Domain(DuplicateKey)` | part number already taken (mapped by the catalog, which knows the key) |
//! | Database (other) | any other | `Database` | check/foreign-key failures, locked database after busy timeout |
//! | PoolClosed / PoolTimedOut | n/a | `Database` | pool shut down or exhausted |
//! | ColumnDecode / ColumnNotFound | n/a | `Database` | schema drift |

use stockroom_core::DomainError;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Business rule rejection; state is unchanged.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    #[error("export failed: {0}")]
    Export(String),
}

impl StoreError {
    /// The domain rejection, if this is one.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            StoreError::Domain(e) => Some(e),
            _ => None,
        }
    }
}

/// Map SQLx errors to `StoreError`, tagging the failed operation.
pub(crate) fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    let message = match err {
        sqlx::Error::Database(db_err) => match db_err.code() {
            Some(code) => format!("{} (code {})", db_err.message(), code),
            None => db_err.message().to_string(),
        },
        sqlx::Error::PoolClosed => "connection pool closed".to_string(),
        sqlx::Error::PoolTimedOut => "timed out waiting for a pooled connection".to_string(),
        other => other.to_string(),
    };
    StoreError::Database { operation, message }
}

/// Check if an error is a unique constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
