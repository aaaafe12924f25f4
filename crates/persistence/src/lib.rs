// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Proctor exam system.
//!
//! This crate provides `SQLite` persistence for user accounts and exams and
//! supplies the Student Registry queries the validation pipeline consumes
//! (`count_students`, student-id existence filtering).
//!
//! `SQLite` requires no external infrastructure: unit and integration tests
//! run against fast in-memory databases, and deployments point at a file.
//! Exam instants are stored as UTC RFC 3339 text.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod exams;
mod schema;
mod users;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use schema::initialize_schema;

use proctor_domain::{Exam, StudentId, UserAccount};
use rusqlite::Connection;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// `SQLite`-backed persistence for users and exams.
///
/// One instance owns one connection; concurrent callers serialize access
/// through their own synchronization (the server wraps this in a mutex).
pub struct SqlitePersistence {
    /// The owned database connection.
    conn: Connection,
}

impl SqlitePersistence {
    /// Creates a persistence layer backed by an in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be opened or the schema
    /// cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open_in_memory()
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;
        schema::initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Creates a persistence layer backed by a database file.
    ///
    /// # Arguments
    ///
    /// * `path` - The database file path (created if absent)
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be opened or the schema
    /// cannot be initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open(path)
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;
        schema::initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Registers a user account and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateUsername` if the username is taken.
    pub fn register_user(&self, account: &UserAccount) -> Result<UserAccount, PersistenceError> {
        let user_id: i64 = users::insert_user(&self.conn, account)?;
        info!(user_id, username = %account.username, "Registered user");
        Ok(UserAccount::with_id(
            user_id,
            account.username.clone(),
            account.display_name.clone(),
            account.role,
        ))
    }

    /// Lists every user account, ordered by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_users(&self) -> Result<Vec<UserAccount>, PersistenceError> {
        users::list_users(&self.conn)
    }

    /// Counts registered users with the student role.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_students(&self) -> Result<u64, PersistenceError> {
        users::count_students(&self.conn)
    }

    /// Filters a submitted identifier set down to registered students.
    ///
    /// # Errors
    ///
    /// Returns an error if a lookup query fails.
    pub fn filter_student_ids(
        &self,
        ids: &HashSet<StudentId>,
    ) -> Result<HashSet<StudentId>, PersistenceError> {
        users::filter_student_ids(&self.conn, ids)
    }

    /// Persists a new exam, returning the stored record with its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_exam(&mut self, exam: &Exam) -> Result<Exam, PersistenceError> {
        let exam_id: i64 = exams::insert_exam(&mut self.conn, exam)?;
        info!(exam_id, title = %exam.title, "Persisted exam");
        exams::get_exam(&self.conn, exam_id)
    }

    /// Overwrites an existing exam, returning the stored record.
    ///
    /// # Errors
    ///
    /// Returns `ExamNotFound` if no exam has the given id.
    pub fn update_exam(&mut self, exam_id: i64, exam: &Exam) -> Result<Exam, PersistenceError> {
        exams::update_exam(&mut self.conn, exam_id, exam)?;
        info!(exam_id, title = %exam.title, "Updated exam");
        exams::get_exam(&self.conn, exam_id)
    }

    /// Retrieves an exam by id.
    ///
    /// # Errors
    ///
    /// Returns `ExamNotFound` if no exam has the given id.
    pub fn get_exam(&self, exam_id: i64) -> Result<Exam, PersistenceError> {
        exams::get_exam(&self.conn, exam_id)
    }

    /// Lists every exam ordered by window start.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_exams(&self) -> Result<Vec<Exam>, PersistenceError> {
        exams::list_exams(&self.conn)
    }
}
