// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::Connection;
use tracing::info;

use crate::error::PersistenceError;

/// Initializes the database schema.
///
/// # Arguments
///
/// * `conn` - The database connection to initialize
///
/// # Errors
///
/// Returns an error if schema creation fails.
pub fn initialize_schema(conn: &Connection) -> Result<(), PersistenceError> {
    info!("Initializing database schema");

    // Enable foreign key enforcement
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            user_id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE COLLATE NOCASE,
            display_name TEXT NOT NULL,
            role TEXT NOT NULL CHECK(role IN ('student', 'teacher', 'admin')),
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_users_role
            ON users(role);

        CREATE TABLE IF NOT EXISTS exams (
            exam_id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            start_date_time TEXT NOT NULL,
            end_date_time TEXT NOT NULL,
            duration_minutes INTEGER NOT NULL CHECK(duration_minutes >= 1),
            max_attempts INTEGER NOT NULL CHECK(max_attempts >= 1),
            passing_percentage INTEGER NOT NULL
                CHECK(passing_percentage BETWEEN 1 AND 100),
            access_type TEXT NOT NULL
                CHECK(access_type IN ('all_students', 'specific_students')),
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS exam_allowed_students (
            exam_id INTEGER NOT NULL,
            user_id INTEGER NOT NULL,
            PRIMARY KEY (exam_id, user_id),
            FOREIGN KEY(exam_id) REFERENCES exams(exam_id),
            FOREIGN KEY(user_id) REFERENCES users(user_id)
        );

        CREATE INDEX IF NOT EXISTS idx_exam_allowed_students_exam
            ON exam_allowed_students(exam_id);
        ",
    )
    .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;

    Ok(())
}
