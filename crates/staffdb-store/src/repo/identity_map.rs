//! Identity map - one live instance per persisted row
//!
//! Each entity type has its own map from row id to the [`Shared`] handle that
//! represents that row. Hydration consults the map first so a row is never
//! represented by two different in-memory objects within a session.

use std::collections::HashMap;
use std::rc::Rc;

use staffdb_core::{Department, Employee, Review, Shared};

use crate::tables::Table;

/// Map from row id to the live instance for that row
#[derive(Debug)]
pub struct IdentityMap<T> {
    entries: HashMap<i64, Shared<T>>,
}

impl<T> Default for IdentityMap<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> IdentityMap<T> {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle cached for `id`, if any
    pub fn get(&self, id: i64) -> Option<Shared<T>> {
        self.entries.get(&id).cloned()
    }

    /// Cache `handle` as the instance for `id`
    ///
    /// Returns the previously cached handle when it was a different object.
    pub fn insert(&mut self, id: i64, handle: Shared<T>) -> Option<Shared<T>> {
        self.entries
            .insert(id, handle.clone())
            .filter(|previous| !Rc::ptr_eq(previous, &handle))
    }

    /// Forget the instance cached for `id`
    pub fn remove(&mut self, id: i64) -> Option<Shared<T>> {
        self.entries.remove(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached ids in ascending order
    pub fn ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// The identity maps of one session, one per entity type
#[derive(Debug, Default)]
pub struct IdentityMaps {
    pub departments: IdentityMap<Department>,
    pub employees: IdentityMap<Employee>,
    pub reviews: IdentityMap<Review>,
}

impl IdentityMaps {
    /// Empty every map
    pub fn clear(&mut self) {
        self.departments.clear();
        self.employees.clear();
        self.reviews.clear();
    }
}

/// A [`Table`] whose instances are cached in [`IdentityMaps`]
pub trait Cached: Table {
    fn identity_map(maps: &IdentityMaps) -> &IdentityMap<Self>;

    fn identity_map_mut(maps: &mut IdentityMaps) -> &mut IdentityMap<Self>;
}

impl Cached for Department {
    fn identity_map(maps: &IdentityMaps) -> &IdentityMap<Self> {
        &maps.departments
    }

    fn identity_map_mut(maps: &mut IdentityMaps) -> &mut IdentityMap<Self> {
        &mut maps.departments
    }
}

impl Cached for Employee {
    fn identity_map(maps: &IdentityMaps) -> &IdentityMap<Self> {
        &maps.employees
    }

    fn identity_map_mut(maps: &mut IdentityMaps) -> &mut IdentityMap<Self> {
        &mut maps.employees
    }
}

impl Cached for Review {
    fn identity_map(maps: &IdentityMaps) -> &IdentityMap<Self> {
        &maps.reviews
    }

    fn identity_map_mut(maps: &mut IdentityMaps) -> &mut IdentityMap<Self> {
        &mut maps.reviews
    }
}
