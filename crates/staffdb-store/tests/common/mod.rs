#![allow(dead_code)]

use rusqlite::params;
use staffdb_core::{Department, Employee, Shared};
use staffdb_store::Session;

/// In-memory session with every table created
pub fn setup_session() -> Session {
    let mut session = Session::open_in_memory().expect("Failed to open in-memory session");
    session
        .create_all_tables()
        .expect("Failed to create tables");
    session
}

/// Save a department through the repository
pub fn seed_department(session: &mut Session, name: &str, location: &str) -> Shared<Department> {
    session
        .departments()
        .create(name, location)
        .expect("Failed to seed department")
}

/// Save an employee through the repository
pub fn seed_employee(
    session: &mut Session,
    name: &str,
    job_title: &str,
    department: &Shared<Department>,
) -> Shared<Employee> {
    let department_id = department.borrow().id.expect("department must be saved");
    session
        .employees()
        .create(name, job_title, department_id)
        .expect("Failed to seed employee")
}

/// Insert a department row directly, bypassing the repository
pub fn insert_department_row(session: &Session, name: &str, location: &str) -> i64 {
    session
        .connection()
        .execute(
            "INSERT INTO departments (name, location) VALUES (?1, ?2)",
            params![name, location],
        )
        .expect("Failed to insert department row");
    session.connection().last_insert_rowid()
}

/// Read a row's non-key columns as text, for comparing against instances
pub fn row_text(session: &Session, table: &str, column: &str, id: i64) -> Option<String> {
    session
        .connection()
        .query_row(
            &format!("SELECT CAST({} AS TEXT) FROM {} WHERE id = ?1", column, table),
            [id],
            |row| row.get(0),
        )
        .ok()
}
