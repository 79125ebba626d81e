//! Department-specific repository operations

use staffdb_core::{Department, Employee, Entity, Shared};

use super::sqlite_repo::Repo;
use crate::errors::{instance_borrowed, not_persisted, Result};

pub type DepartmentRepo<'s> = Repo<'s, Department>;

impl Repo<'_, Department> {
    /// Construct and save a Department in one call
    pub fn create(&mut self, name: &str, location: &str) -> Result<Shared<Department>> {
        self.insert(Department::new(name, location))
    }

    /// First Department with this exact name
    pub fn find_by_name(&mut self, name: &str) -> Result<Option<Shared<Department>>> {
        self.find_by("name", name)
    }

    /// Every Employee assigned to `department`, in row order
    ///
    /// # Errors
    ///
    /// Returns `NotPersisted` if `department` has no id.
    pub fn employees(&mut self, department: &Shared<Department>) -> Result<Vec<Shared<Employee>>> {
        self.observe("employees", |repo| {
            let id = department
                .try_borrow()
                .map_err(instance_borrowed::<Department, _>)?
                .id()
                .ok_or_else(not_persisted::<Department>)?;
            repo.related::<Employee>().find_all_by("department_id", id)
        })
    }
}
