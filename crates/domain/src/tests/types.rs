// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AccessType, DomainError, StudentId, UserAccount, UserRole};

#[test]
fn test_access_type_parses_wire_names() {
    assert_eq!(
        "all_students".parse::<AccessType>().unwrap(),
        AccessType::AllStudents
    );
    assert_eq!(
        "specific_students".parse::<AccessType>().unwrap(),
        AccessType::SpecificStudents
    );
}

#[test]
fn test_access_type_rejects_unknown_choice() {
    let result: Result<AccessType, DomainError> = "everyone".parse();
    assert!(matches!(result, Err(DomainError::InvalidAccessType(_))));
}

#[test]
fn test_access_type_round_trips_through_as_str() {
    for access_type in [AccessType::AllStudents, AccessType::SpecificStudents] {
        assert_eq!(access_type.as_str().parse::<AccessType>().unwrap(), access_type);
    }
}

#[test]
fn test_access_type_display_names() {
    assert_eq!(AccessType::AllStudents.display_name(), "All Students");
    assert_eq!(AccessType::SpecificStudents.display_name(), "Specific Students");
}

#[test]
fn test_role_parses_wire_names() {
    assert_eq!(UserRole::parse("student").unwrap(), UserRole::Student);
    assert_eq!(UserRole::parse("teacher").unwrap(), UserRole::Teacher);
    assert_eq!(UserRole::parse("admin").unwrap(), UserRole::Admin);
}

#[test]
fn test_role_rejects_unknown_classification() {
    let result: Result<UserRole, DomainError> = UserRole::parse("superuser");
    assert!(matches!(result, Err(DomainError::InvalidRole(_))));
}

#[test]
fn test_student_id_trims_whitespace() {
    let id: StudentId = StudentId::new("  42  ");
    assert_eq!(id.value(), "42");
}

#[test]
fn test_student_ids_compare_by_value() {
    assert_eq!(StudentId::new("7"), StudentId::new(" 7 "));
    assert_ne!(StudentId::new("7"), StudentId::new("8"));
}

#[test]
fn test_user_account_new_has_no_id() {
    let account: UserAccount = UserAccount::new(
        String::from("amira"),
        String::from("Amira Khan"),
        UserRole::Student,
    );
    assert_eq!(account.user_id, None);
    assert_eq!(account.role, UserRole::Student);
}

#[test]
fn test_user_account_with_id_keeps_id() {
    let account: UserAccount = UserAccount::with_id(
        7,
        String::from("amira"),
        String::from("Amira Khan"),
        UserRole::Student,
    );
    assert_eq!(account.user_id, Some(7));
}
