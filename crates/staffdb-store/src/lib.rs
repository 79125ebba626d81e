//! staffdb Store - SQLite persistence for Departments, Employees and Reviews
//!
//! Provides:
//! - Connection configuration and opening (`config`, `db`)
//! - Per-table DDL and typed row decoding (`tables`)
//! - An identity map keeping one live instance per row (`repo::identity_map`)
//! - Generic and per-entity repositories (`repo`)
//! - `Session`, which owns the connection and the identity maps

pub mod config;
pub mod db;
pub mod errors;
pub mod repo;
pub mod session;
pub mod tables;

// Re-export key types
pub use config::StoreConfig;
pub use errors::Result;
pub use repo::{DepartmentRepo, EmployeeRepo, Repo, ReviewRepo};
pub use session::Session;
pub use tables::Table;
