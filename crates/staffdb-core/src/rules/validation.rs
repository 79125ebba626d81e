//! Field validation rules shared by the models
//!
//! Each check returns `Ok(())` or a `StaffError::InvalidField` that names the
//! entity, the field and the reason, so callers can reject a write before any
//! statement reaches the database.

use crate::errors::{Result, StaffError};

/// Earliest year a Review may carry
pub const MIN_REVIEW_YEAR: i64 = 2000;

/// Require a string that is not empty or whitespace-only
///
/// # Errors
///
/// Returns `InvalidField` if `value` is blank.
pub fn require_text(entity: &'static str, field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StaffError::InvalidField {
            entity,
            field,
            reason: "cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Require an integer no smaller than `min`
///
/// # Errors
///
/// Returns `InvalidField` if `value < min`.
pub fn require_at_least(
    entity: &'static str,
    field: &'static str,
    value: i64,
    min: i64,
) -> Result<()> {
    if value < min {
        return Err(StaffError::InvalidField {
            entity,
            field,
            reason: format!("must be at least {}, got {}", min, value),
        });
    }
    Ok(())
}

/// Require a foreign key value that could name a row (SQLite ids start at 1)
///
/// Existence of the parent row is checked by the store against the database.
///
/// # Errors
///
/// Returns `InvalidField` if `value` is zero or negative.
pub fn require_key(entity: &'static str, field: &'static str, value: i64) -> Result<()> {
    if value <= 0 {
        return Err(StaffError::InvalidField {
            entity,
            field,
            reason: format!("must be a positive id, got {}", value),
        });
    }
    Ok(())
}
