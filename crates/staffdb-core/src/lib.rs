//! staffdb Core - Entity models and shared facilities
//!
//! This crate provides the foundational pieces of the staffdb ORM layer:
//! - Department, Employee and Review models with field validation
//! - The `Entity` trait shared by every persisted model
//! - The canonical error facility (`StaffError`, `ExError`)
//! - The structured logging facility and its `log_op_*!` macros
//!
//! Persistence lives in `staffdb-store`; nothing here touches SQLite.

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, Result, StaffError};
pub use model::{Department, Employee, Entity, Review, Shared};

#[doc(hidden)]
pub use staffdb_core_types as core_types;
