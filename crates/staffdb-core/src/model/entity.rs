use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::Result;

/// Handle to a live, possibly persisted, entity instance
///
/// The identity map and callers hold clones of the same handle, so a row has
/// exactly one in-memory representative per session. `Rc` keeps this
/// single-threaded.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wrap a freshly constructed entity in a [`Shared`] handle
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Behaviour common to every model backed by a table with an integer key
pub trait Entity: Clone + std::fmt::Debug {
    /// Backing table name
    const TABLE: &'static str;

    /// Display name used in errors and logs
    const KIND: &'static str;

    /// Primary key, `None` until the first save
    fn id(&self) -> Option<i64>;

    /// Set or clear the primary key
    fn set_id(&mut self, id: Option<i64>);

    /// Check field-level rules before a write
    ///
    /// # Errors
    ///
    /// Returns `StaffError::InvalidField` naming the first offending field.
    fn validate(&self) -> Result<()>;

    /// Whether this instance currently has a row
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}
