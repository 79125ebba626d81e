//! Employee-specific repository operations

use staffdb_core::{Department, Employee, Entity, Review, Shared};

use super::sqlite_repo::Repo;
use crate::errors::{instance_borrowed, not_persisted, Result};

pub type EmployeeRepo<'s> = Repo<'s, Employee>;

impl Repo<'_, Employee> {
    /// Construct and save an Employee in one call
    ///
    /// # Errors
    ///
    /// Returns `MissingReference` if `department_id` names no Department.
    pub fn create(
        &mut self,
        name: &str,
        job_title: &str,
        department_id: i64,
    ) -> Result<Shared<Employee>> {
        self.insert(Employee::new(name, job_title, department_id))
    }

    /// First Employee with this exact name
    pub fn find_by_name(&mut self, name: &str) -> Result<Option<Shared<Employee>>> {
        self.find_by("name", name)
    }

    /// Every Review of `employee`, in insertion order
    ///
    /// # Errors
    ///
    /// Returns `NotPersisted` if `employee` has no id.
    pub fn reviews(&mut self, employee: &Shared<Employee>) -> Result<Vec<Shared<Review>>> {
        self.observe("reviews", |repo| {
            let id = employee
                .try_borrow()
                .map_err(instance_borrowed::<Employee, _>)?
                .id()
                .ok_or_else(not_persisted::<Employee>)?;
            repo.related::<Review>().find_all_by("employee_id", id)
        })
    }

    /// The Department `employee` belongs to, if that row still exists
    pub fn department(&mut self, employee: &Shared<Employee>) -> Result<Option<Shared<Department>>> {
        self.observe("department", |repo| {
            let department_id = employee
                .try_borrow()
                .map_err(instance_borrowed::<Employee, _>)?
                .department_id;
            repo.related::<Department>().find_by_id(department_id)
        })
    }
}
