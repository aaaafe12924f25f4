// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use proctor_domain::{StudentId, UserAccount, UserRole};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::HashSet;

use crate::error::PersistenceError;

/// Row shape for user listing queries.
type UserRow = (i64, String, String, String);

/// Inserts a user account and returns its assigned id.
///
/// # Errors
///
/// Returns `DuplicateUsername` if the username is already taken
/// (case-insensitive), or a database error otherwise.
pub fn insert_user(conn: &Connection, account: &UserAccount) -> Result<i64, PersistenceError> {
    let result = conn.execute(
        "INSERT INTO users (username, display_name, role)
             VALUES (?1, ?2, ?3)",
        params![account.username, account.display_name, account.role.as_str()],
    );

    match result {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(err, _))
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(PersistenceError::DuplicateUsername(account.username.clone()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Lists every user account, ordered by username.
///
/// # Errors
///
/// Returns an error if the query fails or a stored role is unrecognized.
pub fn list_users(conn: &Connection) -> Result<Vec<UserAccount>, PersistenceError> {
    let mut stmt = conn.prepare(
        "SELECT user_id, username, display_name, role
             FROM users
             ORDER BY username COLLATE NOCASE",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
    })?;

    let mut users: Vec<UserAccount> = Vec::new();
    for row in rows {
        let (user_id, username, display_name, role): UserRow = row?;
        let role: UserRole = UserRole::parse(&role)
            .map_err(|e| PersistenceError::InvalidStoredValue(e.to_string()))?;
        users.push(UserAccount::with_id(user_id, username, display_name, role));
    }
    Ok(users)
}

/// Counts registered users with the student role.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_students(conn: &Connection) -> Result<u64, PersistenceError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE role = 'student'",
        [],
        |row| row.get(0),
    )?;
    Ok(u64::try_from(count).unwrap_or(0))
}

/// Filters a submitted identifier set down to the identifiers that belong
/// to registered students.
///
/// Identifiers that are not numeric or do not match a student row are
/// silently absent from the result; the caller decides how to treat them.
///
/// # Errors
///
/// Returns an error if a lookup query fails.
pub fn filter_student_ids(
    conn: &Connection,
    ids: &HashSet<StudentId>,
) -> Result<HashSet<StudentId>, PersistenceError> {
    let mut stmt = conn.prepare(
        "SELECT 1 FROM users WHERE user_id = ?1 AND role = 'student'",
    )?;

    let mut known: HashSet<StudentId> = HashSet::new();
    for id in ids {
        let Ok(numeric) = id.value().parse::<i64>() else {
            continue;
        };
        let exists: Option<i64> = stmt
            .query_row(params![numeric], |row| row.get(0))
            .optional()?;
        if exists.is_some() {
            known.insert(id.clone());
        }
    }
    Ok(known)
}
