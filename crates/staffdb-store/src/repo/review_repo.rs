//! Review-specific repository operations

use staffdb_core::{Employee, Review, Shared};

use super::sqlite_repo::Repo;
use crate::errors::{instance_borrowed, Result};

pub type ReviewRepo<'s> = Repo<'s, Review>;

impl Repo<'_, Review> {
    /// Construct and save a Review in one call
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a year before 2000 and `MissingReference`
    /// if `employee_id` names no Employee.
    pub fn create(&mut self, year: i64, summary: &str, employee_id: i64) -> Result<Shared<Review>> {
        self.insert(Review::new(year, summary, employee_id))
    }

    /// The Employee `review` is about, if that row still exists
    pub fn employee(&mut self, review: &Shared<Review>) -> Result<Option<Shared<Employee>>> {
        self.observe("employee", |repo| {
            let employee_id = review
                .try_borrow()
                .map_err(instance_borrowed::<Review, _>)?
                .employee_id;
            repo.related::<Employee>().find_by_id(employee_id)
        })
    }
}
