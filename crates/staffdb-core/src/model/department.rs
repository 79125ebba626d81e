use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::errors::Result;
use crate::rules::validation::require_text;

/// Department - an organisational unit that Employees belong to
///
/// Leaf entity with no foreign keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Row id, `None` until saved
    pub id: Option<i64>,

    /// Department name (e.g. "Payroll")
    pub name: String,

    /// Where the department sits (e.g. "Building A, 5th Floor")
    pub location: String,
}

impl Department {
    /// Create an unsaved Department
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            location: location.into(),
        }
    }
}

impl Entity for Department {
    const TABLE: &'static str = "departments";
    const KIND: &'static str = "Department";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "name", &self.name)?;
        require_text(Self::KIND, "location", &self.location)
    }
}
