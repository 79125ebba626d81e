#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use staffdb_core::errors::StaffError;
use staffdb_core::rules::validation::MIN_REVIEW_YEAR;
use staffdb_core::{Department, Employee, Entity, Review};

#[test]
fn test_whitespace_only_text_rejected() {
    let department = Department::new("   ", "Building A");
    match department.validate() {
        Err(StaffError::InvalidField { entity, field, .. }) => {
            assert_eq!(entity, "Department");
            assert_eq!(field, "name");
        }
        other => panic!("Expected InvalidField, got {:?}", other),
    }
}

#[test]
fn test_review_year_boundary() {
    assert!(Review::new(MIN_REVIEW_YEAR, "First year", 1).validate().is_ok());
    assert!(Review::new(MIN_REVIEW_YEAR - 1, "Too early", 1)
        .validate()
        .is_err());
}

#[test]
fn test_foreign_keys_must_be_positive() {
    assert!(Employee::new("Kai", "Dev", 0).validate().is_err());
    assert!(Employee::new("Kai", "Dev", -3).validate().is_err());
    assert!(Review::new(2020, "Fine", 0).validate().is_err());
}

#[test]
fn test_set_id_toggles_persisted() {
    let mut employee = Employee::new("Kai", "Dev", 1);
    assert!(!employee.is_persisted());

    employee.set_id(Some(5));
    assert!(employee.is_persisted());
    assert_eq!(employee.id(), Some(5));

    employee.set_id(None);
    assert!(!employee.is_persisted());
    assert_eq!(employee.name, "Kai");
}

proptest! {
    #[test]
    fn prop_non_blank_department_is_valid(
        name in "[A-Za-z][A-Za-z ]{0,20}",
        location in "[A-Za-z0-9][A-Za-z0-9 ,]{0,30}",
    ) {
        prop_assert!(Department::new(name, location).validate().is_ok());
    }

    #[test]
    fn prop_review_year_rule(year in 1900i64..2100) {
        let result = Review::new(year, "Summary", 1).validate();
        prop_assert_eq!(result.is_ok(), year >= MIN_REVIEW_YEAR);
    }
}
