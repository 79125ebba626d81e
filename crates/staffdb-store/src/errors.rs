//! Error handling for staffdb-store
//!
//! Wraps staffdb-core ExError with store-specific helpers

use rusqlite::ErrorCode;
use staffdb_core::errors::{ExError, ExErrorKind, StaffError};
use staffdb_core::Entity;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a database error from rusqlite::Error
///
/// SQLite constraint failures (foreign key, NOT NULL, ...) are classified as
/// `ConstraintViolation`; everything else is `Persistence`. The SQLite
/// message is kept verbatim. No op is set; the repository boundary names it.
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = match &err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            ExErrorKind::ConstraintViolation
        }
        _ => ExErrorKind::Persistence,
    };
    ExError::new(kind).with_message(err.to_string())
}

/// Create a configuration error
pub fn config_error(key: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("config")
        .with_message(format!("{}: {}", key, reason))
}

/// Create an error for an instance that has no row
pub fn not_persisted<T: Entity>() -> ExError {
    ExError::from(StaffError::NotPersisted { entity: T::KIND })
}

/// Create an error for an update that matched no row
pub fn row_missing<T: Entity>(id: i64) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_entity(T::KIND)
        .with_row_id(id)
        .with_message(format!("No row in {} with id {}", T::TABLE, id))
}

/// Create an error for an instance that is already borrowed elsewhere
pub fn instance_borrowed<T: Entity, E: std::fmt::Display>(err: E) -> ExError {
    ExError::from(StaffError::Internal {
        message: format!("{} instance is in use: {}", T::KIND, err),
    })
    .with_entity(T::KIND)
}
