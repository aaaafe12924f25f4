// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use proctor_persistence::SqlitePersistence;

use crate::{ExamFormRequest, RegisterUserRequest, UserInfo, register_user};

pub fn test_zone() -> Tz {
    chrono_tz::America::New_York
}

/// A fixed "now" well before the fixture exam windows.
pub fn test_now() -> DateTime<Tz> {
    test_zone().with_ymd_and_hms(2026, 3, 20, 9, 0, 0).unwrap()
}

pub fn create_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn register_test_student(persistence: &SqlitePersistence, username: &str) -> i64 {
    let info: UserInfo = register_user(
        persistence,
        &RegisterUserRequest {
            username: username.to_string(),
            display_name: format!("Student {username}"),
            role: String::from("student"),
        },
    )
    .expect("Failed to register student");
    info.user_id
}

/// A complete, well-formed submission scheduled for June 1, 2026.
pub fn create_test_form(allowed: &[i64]) -> ExamFormRequest {
    ExamFormRequest {
        title: Some(String::from("Midterm")),
        description: Some(String::from("Covers chapters 1-4")),
        start_date_time: Some(String::from("2026-06-01T09:00")),
        end_date_time: Some(String::from("2026-06-01T11:00")),
        duration_minutes: Some(String::from("60")),
        max_attempts: Some(String::from("2")),
        passing_percentage: Some(String::from("50")),
        access_type: Some(String::from("specific_students")),
        allowed_students: allowed.iter().map(ToString::to_string).collect(),
    }
}
