use rusqlite::types::Value;
use rusqlite::{Connection, Row};
use staffdb_core::{Employee, Entity, Review, StaffError};

use super::Table;
use crate::db::row_exists;
use crate::errors::Result;

impl Table for Review {
    const CREATE_SQL: &'static str = "
        CREATE TABLE IF NOT EXISTS reviews (
            id INTEGER PRIMARY KEY,
            year INTEGER NOT NULL,
            summary TEXT NOT NULL,
            employee_id INTEGER NOT NULL,
            FOREIGN KEY (employee_id) REFERENCES employees(id)
        )";

    const COLUMNS: &'static [&'static str] = &["year", "summary", "employee_id"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Review {
            id: Some(row.get("id")?),
            year: row.get("year")?,
            summary: row.get("summary")?,
            employee_id: row.get("employee_id")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.year),
            Value::Text(self.summary.clone()),
            Value::Integer(self.employee_id),
        ]
    }

    fn check_references(&self, conn: &Connection) -> Result<()> {
        if !row_exists(conn, Employee::TABLE, self.employee_id)? {
            return Err(StaffError::MissingReference {
                entity: Self::KIND,
                field: "employee_id",
                id: self.employee_id,
            }
            .into());
        }
        Ok(())
    }
}
