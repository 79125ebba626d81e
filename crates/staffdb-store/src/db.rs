//! Database connection management
//!
//! Opening and configuring SQLite connections, plus small catalog queries.

use crate::config::StoreConfig;
use crate::errors::{from_rusqlite, Result};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Open and configure the database described by `config`
pub fn open_with(config: &StoreConfig) -> Result<Connection> {
    config.validate()?;
    let conn = if config.is_in_memory() {
        open_in_memory()?
    } else {
        open(&config.database_path)?
    };
    configure(&conn, config)?;
    Ok(conn)
}

/// Apply connection-level settings
pub fn configure(conn: &Connection, config: &StoreConfig) -> Result<()> {
    let fk = if config.foreign_keys { "ON" } else { "OFF" };
    conn.execute_batch(&format!("PRAGMA foreign_keys = {};", fk))
        .map_err(from_rusqlite)?;

    if let Some(mode) = &config.journal_mode {
        // journal_mode answers with the mode actually in effect
        let active: String = conn
            .pragma_update_and_check(None, "journal_mode", mode.to_ascii_uppercase(), |row| {
                row.get(0)
            })
            .map_err(from_rusqlite)?;
        tracing::debug!(requested = %mode, active = %active, "set journal mode");
    }

    tracing::debug!(
        foreign_keys = config.foreign_keys,
        journal_mode = config.journal_mode.as_deref().unwrap_or("default"),
        "configured connection"
    );
    Ok(())
}

/// Check whether a table exists in the main schema
pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let found: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1",
            [table],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;
    Ok(found.is_some())
}

/// Check whether `table` has a row with primary key `id`
///
/// `table` must be a trusted identifier (it is interpolated into SQL).
pub fn row_exists(conn: &Connection, table: &str, id: i64) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            &format!("SELECT id FROM {} WHERE id = ?1", table),
            [id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;
    Ok(found.is_some())
}
