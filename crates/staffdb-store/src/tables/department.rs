use rusqlite::types::Value;
use rusqlite::Row;
use staffdb_core::Department;

use super::Table;

impl Table for Department {
    const CREATE_SQL: &'static str = "
        CREATE TABLE IF NOT EXISTS departments (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            location TEXT NOT NULL
        )";

    const COLUMNS: &'static [&'static str] = &["name", "location"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Department {
            id: Some(row.get("id")?),
            name: row.get("name")?,
            location: row.get("location")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            Value::Text(self.location.clone()),
        ]
    }
}
