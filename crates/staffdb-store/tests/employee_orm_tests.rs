//! Employee persistence, including the reviews and department relationships

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::rc::Rc;

use common::{row_text, seed_department, seed_employee, setup_session};
use rusqlite::params;
use staffdb_core::model::shared;
use staffdb_core::{Employee, ExErrorKind};
use staffdb_store::{db, Table};

#[test]
fn test_create_table() {
    let mut session = setup_session();
    session.employees().drop_table().unwrap();
    assert!(!session.employees().table_exists().unwrap());

    session.employees().create_table().unwrap();

    assert!(session.employees().table_exists().unwrap());
    assert!(session.employees().get_all().unwrap().is_empty());
}

#[test]
fn test_drop_table_leaves_siblings() {
    let mut session = setup_session();

    session.employees().drop_table().unwrap();

    assert!(!db::table_exists(session.connection(), "employees").unwrap());
    assert!(db::table_exists(session.connection(), "departments").unwrap());
    assert!(db::table_exists(session.connection(), "reviews").unwrap());
}

#[test]
fn test_save_writes_row() {
    let mut session = setup_session();
    let payroll = seed_department(&mut session, "Payroll", "Building A, 5th Floor");
    let raha = shared(Employee::new("Raha", "Accountant", 1));

    let id = session.employees().save(&raha).unwrap();

    assert_eq!(raha.borrow().id, Some(id));
    assert_eq!(row_text(&session, "employees", "name", id).as_deref(), Some("Raha"));
    assert_eq!(
        row_text(&session, "employees", "job_title", id).as_deref(),
        Some("Accountant")
    );
    assert_eq!(
        row_text(&session, "employees", "department_id", id),
        payroll.borrow().id.map(|d| d.to_string())
    );
}

#[test]
fn test_create_rejects_missing_department() {
    let mut session = setup_session();

    let err = session
        .employees()
        .create("Raha", "Accountant", 42)
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::MissingReference);
    assert_eq!(err.op(), Some("employees.save"));
    assert_eq!(err.row_id(), Some(42));
    assert!(session.employees().get_all().unwrap().is_empty());
}

#[test]
fn test_instance_from_db() {
    let mut session = setup_session();
    seed_department(&mut session, "Payroll", "Building A, 5th Floor");
    session
        .connection()
        .execute(
            "INSERT INTO employees (name, job_title, department_id) VALUES (?1, ?2, ?3)",
            params!["Amir", "Accountant", 1],
        )
        .unwrap();

    let fresh = session
        .connection()
        .query_row("SELECT * FROM employees WHERE id = 1", [], |row| {
            Employee::from_row(row)
        })
        .unwrap();
    let amir = session.employees().instance_from_db(fresh).unwrap();

    assert_eq!(
        amir.borrow().clone(),
        Employee {
            id: Some(1),
            name: "Amir".to_string(),
            job_title: "Accountant".to_string(),
            department_id: 1,
        }
    );
}

#[test]
fn test_find_by_id_and_name() {
    let mut session = setup_session();
    let payroll = seed_department(&mut session, "Payroll", "Building A, 5th Floor");
    let raha = seed_employee(&mut session, "Raha", "Accountant", &payroll);
    let tal = seed_employee(&mut session, "Tal", "Benefits Coordinator", &payroll);

    let by_id = session.employees().find_by_id(2).unwrap().unwrap();
    assert!(Rc::ptr_eq(&by_id, &tal));

    let by_name = session.employees().find_by_name("Raha").unwrap().unwrap();
    assert!(Rc::ptr_eq(&by_name, &raha));

    assert!(session.employees().find_by_id(3).unwrap().is_none());
    assert!(session.employees().find_by_name("Nobody").unwrap().is_none());
}

#[test]
fn test_update_moves_employee_between_departments() {
    // Given: Two employees in Payroll
    let mut session = setup_session();
    let payroll = seed_department(&mut session, "Payroll", "Building A, 5th Floor");
    let hr = seed_department(&mut session, "Human Resources", "Building C, East Wing");
    let raha = seed_employee(&mut session, "Raha", "Accountant", &payroll);
    seed_employee(&mut session, "Tal", "Benefits Coordinator", &payroll);

    // When: Raha is renamed, promoted and moved to HR
    {
        let mut employee = raha.borrow_mut();
        employee.name = "Raha Lee".to_string();
        employee.job_title = "Senior Accountant".to_string();
        employee.department_id = hr.borrow().id.unwrap();
    }
    session.employees().update(&raha).unwrap();

    // Then: The stored row reflects every change
    session.clear_identity_maps();
    let reread = session.employees().find_by_id(1).unwrap().unwrap();
    assert_eq!(reread.borrow().name, "Raha Lee");
    assert_eq!(reread.borrow().job_title, "Senior Accountant");
    assert_eq!(reread.borrow().department_id, 2);

    // And: HR now lists Raha, Payroll only Tal
    assert_eq!(session.departments().employees(&hr).unwrap().len(), 1);
    let remaining = session.departments().employees(&payroll).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].borrow().name, "Tal");
}

#[test]
fn test_update_rejects_missing_department() {
    let mut session = setup_session();
    let payroll = seed_department(&mut session, "Payroll", "Building A, 5th Floor");
    let raha = seed_employee(&mut session, "Raha", "Accountant", &payroll);

    raha.borrow_mut().department_id = 99;
    let err = session.employees().update(&raha).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::MissingReference);
    assert_eq!(
        row_text(&session, "employees", "department_id", 1).as_deref(),
        Some("1")
    );
}

#[test]
fn test_delete() {
    let mut session = setup_session();
    let payroll = seed_department(&mut session, "Payroll", "Building A, 5th Floor");
    let raha = seed_employee(&mut session, "Raha", "Accountant", &payroll);
    let tal = seed_employee(&mut session, "Tal", "Benefits Coordinator", &payroll);

    session.employees().delete(&raha).unwrap();

    assert!(session.employees().find_by_id(1).unwrap().is_none());
    assert!(session.employees().cached(1).is_none());
    assert_eq!(
        raha.borrow().clone(),
        Employee::new("Raha", "Accountant", 1)
    );

    let found = session.employees().find_by_id(2).unwrap().unwrap();
    assert!(Rc::ptr_eq(&found, &tal));
}

#[test]
fn test_department_with_employees_cannot_be_deleted() {
    let mut session = setup_session();
    let payroll = seed_department(&mut session, "Payroll", "Building A, 5th Floor");
    seed_employee(&mut session, "Raha", "Accountant", &payroll);

    let err = session.departments().delete(&payroll).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);
    assert_eq!(payroll.borrow().id, Some(1));
    assert!(session.departments().find_by_id(1).unwrap().is_some());
}

#[test]
fn test_get_all_in_insertion_order() {
    let mut session = setup_session();
    let payroll = seed_department(&mut session, "Payroll", "Building A, 5th Floor");
    seed_employee(&mut session, "Raha", "Accountant", &payroll);
    seed_employee(&mut session, "Tal", "Benefits Coordinator", &payroll);

    let names: Vec<String> = session
        .employees()
        .get_all()
        .unwrap()
        .iter()
        .map(|e| e.borrow().name.clone())
        .collect();

    assert_eq!(names, vec!["Raha", "Tal"]);
}

#[test]
fn test_reviews_of_employee() {
    // Given: Reviews for two different employees
    let mut session = setup_session();
    let payroll = seed_department(&mut session, "Payroll", "Building A, 5th Floor");
    let raha = seed_employee(&mut session, "Raha", "Accountant", &payroll);
    let tal = seed_employee(&mut session, "Tal", "Benefits Coordinator", &payroll);

    let first = session
        .reviews()
        .create(2023, "Efficient worker", 1)
        .unwrap();
    session
        .reviews()
        .create(2023, "Great communication", 2)
        .unwrap();
    let second = session
        .reviews()
        .create(2024, "Good leader", 1)
        .unwrap();

    // When: Raha's reviews are listed
    let reviews = session.employees().reviews(&raha).unwrap();

    // Then: Only Raha's, in insertion order, as the cached instances
    assert_eq!(reviews.len(), 2);
    assert!(Rc::ptr_eq(&reviews[0], &first));
    assert!(Rc::ptr_eq(&reviews[1], &second));

    assert_eq!(session.employees().reviews(&tal).unwrap().len(), 1);
}

#[test]
fn test_reviews_of_unsaved_employee() {
    let mut session = setup_session();
    let ghost = shared(Employee::new("Ghost", "Nobody", 1));

    let err = session.employees().reviews(&ghost).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotPersisted);
    assert_eq!(err.op(), Some("employees.reviews"));
}

#[test]
fn test_department_of_employee() {
    let mut session = setup_session();
    let payroll = seed_department(&mut session, "Payroll", "Building A, 5th Floor");
    let raha = seed_employee(&mut session, "Raha", "Accountant", &payroll);

    let department = session.employees().department(&raha).unwrap().unwrap();

    assert!(Rc::ptr_eq(&department, &payroll));
}

#[test]
fn test_manager_example() {
    let mut session = setup_session();
    let payroll = session
        .departments()
        .create("Payroll", "Building A, 5th Floor")
        .unwrap();
    assert_eq!(payroll.borrow().id, Some(1));

    let sasha = session.employees().create("Sasha", "Manager", 1).unwrap();
    assert_eq!(sasha.borrow().id, Some(1));

    session.clear_identity_maps();
    let found = session.employees().find_by_id(1).unwrap().unwrap();
    assert_eq!(found.borrow().name, "Sasha");
    assert_eq!(found.borrow().job_title, "Manager");
    assert_eq!(found.borrow().department_id, 1);

    session
        .reviews()
        .create(2022, "Good coding skills", 1)
        .unwrap();
    assert_eq!(session.employees().reviews(&found).unwrap().len(), 1);
}
