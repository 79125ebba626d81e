use thiserror::Error;

/// Result type alias using StaffError
pub type Result<T> = std::result::Result<T, StaffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling and test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    ConstraintViolation,
    /// A foreign key value does not name an existing parent row
    MissingReference,

    // Lifecycle
    /// update/delete called on an instance that was never saved (or was deleted)
    NotPersisted,
    /// save called on an instance that already has a row
    AlreadyPersisted,

    // Storage
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::MissingReference => "ERR_MISSING_REFERENCE",
            ExErrorKind::NotPersisted => "ERR_NOT_PERSISTED",
            ExErrorKind::AlreadyPersisted => "ERR_ALREADY_PERSISTED",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, entity, row id) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<String>,
    row_id: Option<i64>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity: None,
            row_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity context (e.g. "Employee")
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Add row id context
    pub fn with_row_id(mut self, row_id: i64) -> Self {
        self.row_id = Some(row_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity context, if any
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// Get the row id context, if any
    pub fn row_id(&self) -> Option<i64> {
        self.row_id
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity) = &self.entity {
            write!(f, " (entity: {})", entity)?;
        }
        if let Some(row_id) = self.row_id {
            write!(f, " (row_id: {})", row_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for staffdb model operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StaffError {
    /// Instance has no id, so there is no row to update or delete
    #[error("{entity} has not been saved (no id)")]
    NotPersisted { entity: &'static str },

    /// Instance already has a row; use update instead of save
    #[error("{entity} is already saved with id {id}")]
    AlreadyPersisted { entity: &'static str, id: i64 },

    /// A field value failed validation
    #[error("Invalid {entity}.{field}: {reason}")]
    InvalidField {
        entity: &'static str,
        field: &'static str,
        reason: String,
    },

    /// A foreign key does not reference an existing parent row
    #[error("{entity}.{field} references missing row {id}")]
    MissingReference {
        entity: &'static str,
        field: &'static str,
        id: i64,
    },

    /// Lookup by a column the table does not have
    #[error("{entity} has no column named {column}")]
    UnknownColumn { entity: &'static str, column: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from StaffError to ExError
impl From<StaffError> for ExError {
    fn from(err: StaffError) -> Self {
        match err {
            StaffError::NotPersisted { entity } => ExError::new(ExErrorKind::NotPersisted)
                .with_entity(entity)
                .with_message("Instance has no id"),
            StaffError::AlreadyPersisted { entity, id } => {
                ExError::new(ExErrorKind::AlreadyPersisted)
                    .with_entity(entity)
                    .with_row_id(id)
                    .with_message("Instance is already saved")
            }
            StaffError::InvalidField {
                entity,
                field,
                reason,
            } => ExError::new(ExErrorKind::InvalidInput)
                .with_entity(entity)
                .with_message(format!("Invalid {}: {}", field, reason)),
            StaffError::MissingReference { entity, field, id } => {
                ExError::new(ExErrorKind::MissingReference)
                    .with_entity(entity)
                    .with_row_id(id)
                    .with_message(format!("{} does not reference an existing row", field))
            }
            StaffError::UnknownColumn { entity, column } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_entity(entity)
                    .with_message(format!("Unknown column: {}", column))
            }
            StaffError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let kinds = [
            ExErrorKind::InvalidInput,
            ExErrorKind::NotFound,
            ExErrorKind::ConstraintViolation,
            ExErrorKind::MissingReference,
            ExErrorKind::NotPersisted,
            ExErrorKind::AlreadyPersisted,
            ExErrorKind::Persistence,
            ExErrorKind::Internal,
        ];
        let mut codes: Vec<_> = kinds.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::NotPersisted)
            .with_op("update")
            .with_entity("Review")
            .with_message("Instance has no id");

        let text = err.to_string();
        assert!(text.starts_with("[ERR_NOT_PERSISTED]"));
        assert!(text.contains("'update'"));
        assert!(text.contains("Review"));
    }

    #[test]
    fn test_missing_reference_conversion() {
        let err: ExError = StaffError::MissingReference {
            entity: "Employee",
            field: "department_id",
            id: 9,
        }
        .into();

        assert_eq!(err.kind(), ExErrorKind::MissingReference);
        assert_eq!(err.entity(), Some("Employee"));
        assert_eq!(err.row_id(), Some(9));
        assert!(err.message().contains("department_id"));
    }
}
