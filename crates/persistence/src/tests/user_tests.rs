// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_persistence, register_test_student};
use crate::{PersistenceError, SqlitePersistence};
use proctor_domain::{StudentId, UserAccount, UserRole};
use std::collections::HashSet;

#[test]
fn test_register_user_assigns_id() {
    let persistence: SqlitePersistence = create_test_persistence();

    let account: UserAccount = persistence
        .register_user(&UserAccount::new(
            String::from("amira"),
            String::from("Amira Khan"),
            UserRole::Student,
        ))
        .unwrap();

    assert!(account.user_id.is_some());
    assert_eq!(account.username, "amira");
    assert_eq!(account.role, UserRole::Student);
}

#[test]
fn test_register_user_rejects_duplicate_username() {
    let persistence: SqlitePersistence = create_test_persistence();
    register_test_student(&persistence, "amira");

    let result = persistence.register_user(&UserAccount::new(
        String::from("AMIRA"),
        String::from("Impostor"),
        UserRole::Student,
    ));

    assert!(matches!(result, Err(PersistenceError::DuplicateUsername(_))));
}

#[test]
fn test_list_users_orders_by_username() {
    let persistence: SqlitePersistence = create_test_persistence();
    register_test_student(&persistence, "zoe");
    register_test_student(&persistence, "amira");
    persistence
        .register_user(&UserAccount::new(
            String::from("mallory"),
            String::from("Mallory Oh"),
            UserRole::Teacher,
        ))
        .unwrap();

    let users: Vec<UserAccount> = persistence.list_users().unwrap();
    let usernames: Vec<&str> = users.iter().map(|user| user.username.as_str()).collect();
    assert_eq!(usernames, vec!["amira", "mallory", "zoe"]);
}

#[test]
fn test_count_students_ignores_other_roles() {
    let persistence: SqlitePersistence = create_test_persistence();
    assert_eq!(persistence.count_students().unwrap(), 0);

    register_test_student(&persistence, "amira");
    register_test_student(&persistence, "zoe");
    persistence
        .register_user(&UserAccount::new(
            String::from("mallory"),
            String::from("Mallory Oh"),
            UserRole::Teacher,
        ))
        .unwrap();

    assert_eq!(persistence.count_students().unwrap(), 2);
}

#[test]
fn test_filter_student_ids_keeps_only_registered_students() {
    let persistence: SqlitePersistence = create_test_persistence();
    let student_id: i64 = register_test_student(&persistence, "amira");
    let teacher = persistence
        .register_user(&UserAccount::new(
            String::from("mallory"),
            String::from("Mallory Oh"),
            UserRole::Teacher,
        ))
        .unwrap();

    let mut submitted: HashSet<StudentId> = HashSet::new();
    submitted.insert(StudentId::new(&student_id.to_string()));
    submitted.insert(StudentId::new(&teacher.user_id.unwrap().to_string()));
    submitted.insert(StudentId::new("9999"));
    submitted.insert(StudentId::new("not-a-number"));

    let known: HashSet<StudentId> = persistence.filter_student_ids(&submitted).unwrap();
    assert_eq!(known.len(), 1);
    assert!(known.contains(&StudentId::new(&student_id.to_string())));
}
