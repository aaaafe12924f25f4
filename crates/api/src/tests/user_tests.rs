// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_persistence, register_test_student};
use crate::{ApiError, ListUsersResponse, RegisterUserRequest, UserInfo, list_users, register_user};
use proctor_persistence::SqlitePersistence;

fn create_test_request(username: &str, role: &str) -> RegisterUserRequest {
    RegisterUserRequest {
        username: username.to_string(),
        display_name: String::from("Test User"),
        role: role.to_string(),
    }
}

#[test]
fn test_register_user_returns_assigned_id() {
    let persistence: SqlitePersistence = create_test_persistence();

    let info: UserInfo =
        register_user(&persistence, &create_test_request("amira", "student")).unwrap();
    assert!(info.user_id > 0);
    assert_eq!(info.role, "student");
}

#[test]
fn test_register_user_rejects_blank_username() {
    let persistence: SqlitePersistence = create_test_persistence();

    let result = register_user(&persistence, &create_test_request("   ", "student"));
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "username"
    ));
}

#[test]
fn test_register_user_rejects_unknown_role() {
    let persistence: SqlitePersistence = create_test_persistence();

    let result = register_user(&persistence, &create_test_request("amira", "superuser"));
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "role"
    ));
}

#[test]
fn test_register_user_rejects_taken_username() {
    let persistence: SqlitePersistence = create_test_persistence();
    register_test_student(&persistence, "amira");

    let result = register_user(&persistence, &create_test_request("amira", "teacher"));
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "username"
    ));
}

#[test]
fn test_list_users_orders_by_username() {
    let persistence: SqlitePersistence = create_test_persistence();
    register_test_student(&persistence, "zoe");
    register_test_student(&persistence, "amira");

    let response: ListUsersResponse = list_users(&persistence).unwrap();
    let usernames: Vec<&str> = response
        .users
        .iter()
        .map(|user| user.username.as_str())
        .collect();
    assert_eq!(usernames, vec!["amira", "zoe"]);
}
