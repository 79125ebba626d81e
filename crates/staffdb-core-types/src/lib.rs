//! Core types shared across staffdb facilities
//!
//! This crate provides foundational constants used by both the error
//! and logging facilities:
//!
//! - **Schema constants**: Canonical field keys and event names

pub mod schema;
