use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::errors::Result;
use crate::rules::validation::{require_key, require_text};

/// Employee - a person working in a Department
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Row id, `None` until saved
    pub id: Option<i64>,

    pub name: String,

    pub job_title: String,

    /// Id of the owning Department row
    pub department_id: i64,
}

impl Employee {
    /// Create an unsaved Employee
    pub fn new(name: impl Into<String>, job_title: impl Into<String>, department_id: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            job_title: job_title.into(),
            department_id,
        }
    }
}

impl Entity for Employee {
    const TABLE: &'static str = "employees";
    const KIND: &'static str = "Employee";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "name", &self.name)?;
        require_text(Self::KIND, "job_title", &self.job_title)?;
        require_key(Self::KIND, "department_id", self.department_id)
    }
}
