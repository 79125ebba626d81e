//! Session - a connection plus the identity maps scoped to it
//!
//! All repository access goes through a `Session`. Instances handed out by
//! one session are never shared with another, and closing or dropping the
//! session forgets them.

use std::time::Instant;

use rusqlite::Connection;
use staffdb_core::{log_op_end, log_op_error, log_op_start, Department, Employee, Review};

use crate::config::StoreConfig;
use crate::db;
use crate::errors::{from_rusqlite, Result};
use crate::repo::{Cached, DepartmentRepo, EmployeeRepo, IdentityMaps, Repo, ReviewRepo};

/// Owns the SQLite connection and the per-entity identity maps
#[derive(Debug)]
pub struct Session {
    conn: Connection,
    config: StoreConfig,
    maps: IdentityMaps,
}

impl Session {
    /// Open the database described by `config`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a bad config or `Persistence` if the
    /// database cannot be opened.
    pub fn open(config: StoreConfig) -> Result<Self> {
        log_op_start!("session.open", in_memory = config.is_in_memory());
        let start = Instant::now();
        match db::open_with(&config) {
            Ok(conn) => {
                log_op_end!(
                    "session.open",
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Ok(Self {
                    conn,
                    config,
                    maps: IdentityMaps::default(),
                })
            }
            Err(err) => {
                let err = if err.op().is_none() {
                    err.with_op("session.open")
                } else {
                    err
                };
                log_op_error!(
                    "session.open",
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }

    /// Open a private in-memory database
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self> {
        Self::open(StoreConfig::in_memory())
    }

    /// Wrap an existing connection, applying `config`'s connection settings
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if a PRAGMA fails.
    pub fn from_connection(conn: Connection, config: StoreConfig) -> Result<Self> {
        config.validate()?;
        db::configure(&conn, &config)?;
        Ok(Self {
            conn,
            config,
            maps: IdentityMaps::default(),
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn identity_maps(&self) -> &IdentityMaps {
        &self.maps
    }

    pub fn identity_maps_mut(&mut self) -> &mut IdentityMaps {
        &mut self.maps
    }

    /// Borrow the connection and the maps at the same time
    pub(crate) fn parts(&mut self) -> (&Connection, &mut IdentityMaps) {
        (&self.conn, &mut self.maps)
    }

    /// Repository for any cached entity type
    pub fn repo<T: Cached>(&mut self) -> Repo<'_, T> {
        Repo::new(self)
    }

    pub fn departments(&mut self) -> DepartmentRepo<'_> {
        self.repo::<Department>()
    }

    pub fn employees(&mut self) -> EmployeeRepo<'_> {
        self.repo::<Employee>()
    }

    pub fn reviews(&mut self) -> ReviewRepo<'_> {
        self.repo::<Review>()
    }

    /// Create every table, parents before children
    ///
    /// # Errors
    ///
    /// Returns the first DDL failure.
    pub fn create_all_tables(&mut self) -> Result<()> {
        self.departments().create_table()?;
        self.employees().create_table()?;
        self.reviews().create_table()
    }

    /// Drop every table, children before parents
    ///
    /// # Errors
    ///
    /// Returns the first DDL failure.
    pub fn drop_all_tables(&mut self) -> Result<()> {
        self.reviews().drop_table()?;
        self.employees().drop_table()?;
        self.departments().drop_table()
    }

    /// Forget every cached instance; later lookups build fresh ones
    pub fn clear_identity_maps(&mut self) {
        self.maps.clear();
        tracing::debug!("cleared identity maps");
    }

    /// Close the connection, reporting any error SQLite returns
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if SQLite refuses to close.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| from_rusqlite(err))
    }
}
