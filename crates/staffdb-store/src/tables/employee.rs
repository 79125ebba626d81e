use rusqlite::types::Value;
use rusqlite::{Connection, Row};
use staffdb_core::{Department, Employee, Entity, StaffError};

use super::Table;
use crate::db::row_exists;
use crate::errors::Result;

impl Table for Employee {
    const CREATE_SQL: &'static str = "
        CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            job_title TEXT NOT NULL,
            department_id INTEGER NOT NULL,
            FOREIGN KEY (department_id) REFERENCES departments(id)
        )";

    const COLUMNS: &'static [&'static str] = &["name", "job_title", "department_id"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Employee {
            id: Some(row.get("id")?),
            name: row.get("name")?,
            job_title: row.get("job_title")?,
            department_id: row.get("department_id")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            Value::Text(self.job_title.clone()),
            Value::Integer(self.department_id),
        ]
    }

    fn check_references(&self, conn: &Connection) -> Result<()> {
        if !row_exists(conn, Department::TABLE, self.department_id)? {
            return Err(StaffError::MissingReference {
                entity: Self::KIND,
                field: "department_id",
                id: self.department_id,
            }
            .into());
        }
        Ok(())
    }
}
