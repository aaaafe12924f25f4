// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod exam_tests;
mod user_tests;

use crate::SqlitePersistence;
use proctor_domain::{UserAccount, UserRole};

/// Creates a fresh in-memory persistence layer.
pub fn create_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Registers a student and returns the assigned user id.
pub fn register_test_student(persistence: &SqlitePersistence, username: &str) -> i64 {
    let account = persistence
        .register_user(&UserAccount::new(
            username.to_string(),
            format!("Student {username}"),
            UserRole::Student,
        ))
        .expect("Failed to register student");
    account.user_id.expect("Registered student has no id")
}
