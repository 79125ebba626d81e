//! Table definitions: DDL, column lists and typed row decoding
//!
//! Each entity owns one table with an `INTEGER PRIMARY KEY` named `id`.
//! Rows are decoded by column name, never by position.

mod department;
mod employee;
mod review;

use rusqlite::types::Value;
use rusqlite::{Connection, Row};
use staffdb_core::Entity;

use crate::errors::Result;

/// SQL mapping for an [`Entity`]
pub trait Table: Entity {
    /// `CREATE TABLE IF NOT EXISTS` statement, including key constraints
    const CREATE_SQL: &'static str;

    /// Non-key columns, in the order [`Table::values`] returns them
    const COLUMNS: &'static [&'static str];

    /// Decode a row that includes `id` and every column in [`Table::COLUMNS`]
    ///
    /// # Errors
    ///
    /// Returns the rusqlite error for a missing column or a type mismatch.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Current non-key field values, in [`Table::COLUMNS`] order
    fn values(&self) -> Vec<Value>;

    /// Verify that foreign keys name existing parent rows
    ///
    /// # Errors
    ///
    /// Returns `MissingReference` for a dangling key, or a persistence error.
    fn check_references(&self, _conn: &Connection) -> Result<()> {
        Ok(())
    }

    /// Overwrite this instance's fields with a freshly decoded row
    fn refresh_from(&mut self, fresh: Self) {
        *self = fresh;
    }

    /// Whether `column` is `id` or one of [`Table::COLUMNS`]
    fn has_column(column: &str) -> bool {
        column == "id" || Self::COLUMNS.contains(&column)
    }

    fn select_sql() -> String {
        format!("SELECT id, {} FROM {}", Self::COLUMNS.join(", "), Self::TABLE)
    }

    fn insert_sql() -> String {
        let placeholders: Vec<String> = (1..=Self::COLUMNS.len())
            .map(|i| format!("?{}", i))
            .collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            Self::TABLE,
            Self::COLUMNS.join(", "),
            placeholders.join(", ")
        )
    }

    /// `UPDATE` binding the columns first and the id last
    fn update_sql() -> String {
        let assignments: Vec<String> = Self::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = ?{}", column, i + 1))
            .collect();
        format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            Self::TABLE,
            assignments.join(", "),
            Self::COLUMNS.len() + 1
        )
    }

    fn delete_sql() -> String {
        format!("DELETE FROM {} WHERE id = ?1", Self::TABLE)
    }

    fn drop_sql() -> String {
        format!("DROP TABLE IF EXISTS {}", Self::TABLE)
    }
}
