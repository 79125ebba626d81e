use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::errors::Result;
use crate::rules::validation::{require_at_least, require_key, require_text, MIN_REVIEW_YEAR};

/// Review - a yearly performance review of an Employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Row id, `None` until saved
    pub id: Option<i64>,

    pub year: i64,

    pub summary: String,

    /// Id of the reviewed Employee row
    pub employee_id: i64,
}

impl Review {
    /// Create an unsaved Review
    pub fn new(year: i64, summary: impl Into<String>, employee_id: i64) -> Self {
        Self {
            id: None,
            year,
            summary: summary.into(),
            employee_id,
        }
    }
}

impl Entity for Review {
    const TABLE: &'static str = "reviews";
    const KIND: &'static str = "Review";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn validate(&self) -> Result<()> {
        require_at_least(Self::KIND, "year", self.year, MIN_REVIEW_YEAR)?;
        require_text(Self::KIND, "summary", &self.summary)?;
        require_key(Self::KIND, "employee_id", self.employee_id)
    }
}
