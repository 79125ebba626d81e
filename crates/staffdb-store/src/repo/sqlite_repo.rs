//! Generic SQLite repository
//!
//! `Repo<T>` implements the table lifecycle and CRUD operations once for every
//! [`Cached`] entity. Rows always come back through the session's identity
//! map, so repeated lookups of the same row yield the same [`Shared`] handle.
//!
//! ## Logging Ownership
//!
//! Public operations log `start`/`end`/`end_error` under `"<table>.<action>"`.
//! Internal helpers only use `tracing::debug!`.

use std::marker::PhantomData;
use std::rc::Rc;
use std::time::Instant;

use rusqlite::types::{ToSql, Value};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Params};
use staffdb_core::model::shared;
use staffdb_core::{log_op_end, log_op_error, log_op_start, Shared, StaffError};

use super::identity_map::{Cached, IdentityMap};
use crate::db;
use crate::errors::{from_rusqlite, instance_borrowed, not_persisted, row_missing, Result};
use crate::session::Session;
use crate::tables::Table;

/// Repository for one entity type, borrowing a [`Session`]
pub struct Repo<'s, T: Cached> {
    session: &'s mut Session,
    _entity: PhantomData<T>,
}

impl<'s, T: Cached> Repo<'s, T> {
    pub(crate) fn new(session: &'s mut Session) -> Self {
        Self {
            session,
            _entity: PhantomData,
        }
    }

    /// Repository for a related entity over the same session
    pub(crate) fn related<U: Cached>(&mut self) -> Repo<'_, U> {
        Repo::new(&mut *self.session)
    }

    /// The session's connection
    pub fn connection(&self) -> &Connection {
        self.session.connection()
    }

    /// Instance cached for `id`, without touching the database
    pub fn cached(&self, id: i64) -> Option<Shared<T>> {
        T::identity_map(self.session.identity_maps()).get(id)
    }

    /// Number of instances currently cached for this entity
    pub fn cached_count(&self) -> usize {
        T::identity_map(self.session.identity_maps()).len()
    }

    /// Whether the backing table exists
    pub fn table_exists(&self) -> Result<bool> {
        db::table_exists(self.connection(), T::TABLE)
    }

    /// Create the backing table if it does not exist
    pub fn create_table(&mut self) -> Result<()> {
        self.observe("create_table", |repo| {
            repo.connection()
                .execute_batch(T::CREATE_SQL)
                .map_err(from_rusqlite)
        })
    }

    /// Drop the backing table if it exists and forget cached instances
    ///
    /// Sibling tables are left untouched.
    pub fn drop_table(&mut self) -> Result<()> {
        self.observe("drop_table", |repo| {
            let (conn, maps) = repo.session.parts();
            conn.execute_batch(&T::drop_sql()).map_err(from_rusqlite)?;
            T::identity_map_mut(maps).clear();
            Ok(())
        })
    }

    /// Insert a new row for `item`, assign its id and cache it
    ///
    /// Returns the generated id.
    ///
    /// # Errors
    ///
    /// - `AlreadyPersisted`: `item` already has an id (use `update`)
    /// - `InvalidInput`: a field failed validation
    /// - `MissingReference`: a foreign key names no existing row
    /// - `Persistence` / `ConstraintViolation`: SQLite rejected the insert
    pub fn save(&mut self, item: &Shared<T>) -> Result<i64> {
        self.observe("save", |repo| {
            let mut instance = item.try_borrow_mut().map_err(instance_borrowed::<T, _>)?;
            if let Some(id) = instance.id() {
                return Err(StaffError::AlreadyPersisted {
                    entity: T::KIND,
                    id,
                }
                .into());
            }
            instance.validate()?;

            let (conn, maps) = repo.session.parts();
            instance.check_references(conn)?;
            conn.execute(&T::insert_sql(), params_from_iter(instance.values()))
                .map_err(from_rusqlite)?;

            let id = conn.last_insert_rowid();
            instance.set_id(Some(id));
            T::identity_map_mut(maps).insert(id, Rc::clone(item));
            tracing::debug!(table = T::TABLE, row_id = id, "inserted row");
            Ok(id)
        })
    }

    /// Wrap `value` in a handle and save it in one call
    pub fn insert(&mut self, value: T) -> Result<Shared<T>> {
        let item = shared(value);
        self.save(&item)?;
        Ok(item)
    }

    /// Turn a decoded row into the session's instance for that row
    ///
    /// If the row is already cached, the cached instance is refreshed from
    /// `fresh` and returned; otherwise `fresh` becomes the cached instance.
    ///
    /// # Errors
    ///
    /// Returns `NotPersisted` if `fresh` carries no id.
    pub fn instance_from_db(&mut self, fresh: T) -> Result<Shared<T>> {
        self.observe("instance_from_db", |repo| {
            let maps = repo.session.identity_maps_mut();
            hydrate(T::identity_map_mut(maps), fresh)
        })
    }

    /// Look up a row by primary key; `None` if no row matches
    pub fn find_by_id(&mut self, id: i64) -> Result<Option<Shared<T>>> {
        self.observe("find_by_id", |repo| {
            let sql = format!("{} WHERE id = ?1", T::select_sql());
            repo.query_first(&sql, params![id])
        })
    }

    /// First row (lowest id) whose `column` equals `value`; `None` if no row matches
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `column` is not a column of this table.
    pub fn find_by<V: ToSql>(&mut self, column: &str, value: V) -> Result<Option<Shared<T>>> {
        self.observe("find_by", |repo| {
            ensure_column::<T>(column)?;
            let sql = format!(
                "{} WHERE {} = ?1 ORDER BY id LIMIT 1",
                T::select_sql(),
                column
            );
            repo.query_first(&sql, params![value])
        })
    }

    /// Every row whose `column` equals `value`, in row order
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `column` is not a column of this table.
    pub fn find_all_by<V: ToSql>(&mut self, column: &str, value: V) -> Result<Vec<Shared<T>>> {
        self.observe("find_all_by", |repo| {
            ensure_column::<T>(column)?;
            let sql = format!("{} WHERE {} = ?1 ORDER BY id", T::select_sql(), column);
            repo.query_all(&sql, params![value])
        })
    }

    /// Every row in the table, in row order
    pub fn get_all(&mut self) -> Result<Vec<Shared<T>>> {
        self.observe("get_all", |repo| {
            let sql = format!("{} ORDER BY id", T::select_sql());
            repo.query_all(&sql, [])
        })
    }

    /// Write `item`'s current field values to its row
    ///
    /// If `item` is a detached copy, the cached instance for the row is
    /// refreshed with the written values.
    ///
    /// # Errors
    ///
    /// - `NotPersisted`: `item` has no id; nothing is written
    /// - `InvalidInput` / `MissingReference`: validation failed; nothing is written
    /// - `NotFound`: the row no longer exists
    pub fn update(&mut self, item: &Shared<T>) -> Result<()> {
        self.observe("update", |repo| {
            let instance = item.try_borrow().map_err(instance_borrowed::<T, _>)?;
            let id = instance.id().ok_or_else(not_persisted::<T>)?;
            instance.validate()?;

            let (conn, maps) = repo.session.parts();
            instance.check_references(conn)?;

            // The cached instance for this row, when `item` is a detached copy
            let twin = twin_of(T::identity_map_mut(maps), id, item);
            let mut twin_guard = twin
                .as_ref()
                .map(|cached| cached.try_borrow_mut())
                .transpose()
                .map_err(instance_borrowed::<T, _>)?;

            let mut values = instance.values();
            values.push(Value::Integer(id));
            let changed = conn
                .execute(&T::update_sql(), params_from_iter(values))
                .map_err(from_rusqlite)?;
            if changed == 0 {
                return Err(row_missing::<T>(id));
            }

            if let Some(cached) = twin_guard.as_mut() {
                cached.refresh_from(instance.clone());
            }
            Ok(())
        })
    }

    /// Delete `item`'s row, forget it in the identity map and clear its id
    ///
    /// The instance keeps its other field values.
    ///
    /// # Errors
    ///
    /// Returns `NotPersisted` if `item` has no id; nothing is deleted. If the
    /// cached instance for the row is borrowed elsewhere, `Internal` is
    /// returned before the row is touched.
    pub fn delete(&mut self, item: &Shared<T>) -> Result<()> {
        self.observe("delete", |repo| {
            let mut instance = item.try_borrow_mut().map_err(instance_borrowed::<T, _>)?;
            let id = instance.id().ok_or_else(not_persisted::<T>)?;

            let (conn, maps) = repo.session.parts();
            let map = T::identity_map_mut(maps);

            // A cached twin must lose its id too; borrow it before touching the row
            let twin = twin_of(map, id, item);
            let mut twin_guard = twin
                .as_ref()
                .map(|cached| cached.try_borrow_mut())
                .transpose()
                .map_err(instance_borrowed::<T, _>)?;

            let removed = conn
                .execute(&T::delete_sql(), params![id])
                .map_err(from_rusqlite)?;
            tracing::debug!(table = T::TABLE, row_id = id, removed, "deleted row");

            instance.set_id(None);
            if let Some(cached) = twin_guard.as_mut() {
                cached.set_id(None);
            }
            map.remove(id);
            Ok(())
        })
    }

    fn query_first<P: Params>(&mut self, sql: &str, params: P) -> Result<Option<Shared<T>>> {
        let (conn, maps) = self.session.parts();
        let fresh = conn
            .query_row(sql, params, |row| T::from_row(row))
            .optional()
            .map_err(from_rusqlite)?;
        fresh
            .map(|fresh| hydrate(T::identity_map_mut(maps), fresh))
            .transpose()
    }

    fn query_all<P: Params>(&mut self, sql: &str, params: P) -> Result<Vec<Shared<T>>> {
        let (conn, maps) = self.session.parts();
        let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
        let rows = stmt
            .query_map(params, |row| T::from_row(row))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        let map = T::identity_map_mut(maps);
        rows.into_iter()
            .map(|fresh| hydrate(&mut *map, fresh))
            .collect()
    }

    /// Run `action` with boundary logging under `"<table>.<name>"`
    pub(crate) fn observe<R, F>(&mut self, name: &str, action: F) -> Result<R>
    where
        F: FnOnce(&mut Self) -> Result<R>,
    {
        let op = format!("{}.{}", T::TABLE, name);
        log_op_start!(op.as_str(), table = T::TABLE);
        let start = Instant::now();

        match action(self) {
            Ok(value) => {
                log_op_end!(
                    op.as_str(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Ok(value)
            }
            Err(err) => {
                let err = if err.op().is_none() {
                    err.with_op(op.clone())
                } else {
                    err
                };
                log_op_error!(
                    op.as_str(),
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }
}

/// Resolve `fresh` against the identity map
fn hydrate<T: Table>(map: &mut IdentityMap<T>, fresh: T) -> Result<Shared<T>> {
    let id = fresh.id().ok_or_else(not_persisted::<T>)?;
    if let Some(existing) = map.get(id) {
        existing
            .try_borrow_mut()
            .map_err(instance_borrowed::<T, _>)?
            .refresh_from(fresh);
        return Ok(existing);
    }
    let handle = shared(fresh);
    map.insert(id, Rc::clone(&handle));
    Ok(handle)
}

/// The cached handle for `id` when it is a different object from `item`
fn twin_of<T>(map: &IdentityMap<T>, id: i64, item: &Shared<T>) -> Option<Shared<T>> {
    map.get(id).filter(|cached| !Rc::ptr_eq(cached, item))
}

fn ensure_column<T: Table>(column: &str) -> Result<()> {
    if T::has_column(column) {
        Ok(())
    } else {
        Err(StaffError::UnknownColumn {
            entity: T::KIND,
            column: column.to_string(),
        }
        .into())
    }
}
