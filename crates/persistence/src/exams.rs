// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Utc};
use proctor_domain::{AccessType, Exam, StudentId};
use rusqlite::{Connection, params};
use std::collections::HashSet;

use crate::error::PersistenceError;

/// Row shape for exam queries, minus the participant list.
type ExamRow = (
    i64,
    String,
    Option<String>,
    String,
    String,
    u32,
    u32,
    u8,
    String,
);

const EXAM_COLUMNS: &str = "exam_id, title, description, start_date_time, end_date_time,
         duration_minutes, max_attempts, passing_percentage, access_type";

/// Inserts an exam and its participant list, returning the assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails or a participant identifier is not
/// numeric.
pub fn insert_exam(conn: &mut Connection, exam: &Exam) -> Result<i64, PersistenceError> {
    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO exams (title, description, start_date_time, end_date_time,
                                duration_minutes, max_attempts, passing_percentage,
                                access_type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            exam.title,
            exam.description,
            exam.start_at.to_rfc3339(),
            exam.end_at.to_rfc3339(),
            exam.duration_minutes,
            exam.max_attempts,
            exam.passing_percentage,
            exam.access_type.as_str(),
        ],
    )?;
    let exam_id: i64 = tx.last_insert_rowid();

    replace_allowed_students(&tx, exam_id, &exam.allowed_students)?;
    tx.commit()?;
    Ok(exam_id)
}

/// Overwrites an existing exam and its participant list.
///
/// # Errors
///
/// Returns `ExamNotFound` if no exam has the given id, or a database error
/// otherwise.
pub fn update_exam(
    conn: &mut Connection,
    exam_id: i64,
    exam: &Exam,
) -> Result<(), PersistenceError> {
    let tx = conn.transaction()?;
    let updated: usize = tx.execute(
        "UPDATE exams
             SET title = ?1, description = ?2, start_date_time = ?3,
                 end_date_time = ?4, duration_minutes = ?5, max_attempts = ?6,
                 passing_percentage = ?7, access_type = ?8
             WHERE exam_id = ?9",
        params![
            exam.title,
            exam.description,
            exam.start_at.to_rfc3339(),
            exam.end_at.to_rfc3339(),
            exam.duration_minutes,
            exam.max_attempts,
            exam.passing_percentage,
            exam.access_type.as_str(),
            exam_id,
        ],
    )?;
    if updated == 0 {
        return Err(PersistenceError::ExamNotFound(exam_id));
    }

    tx.execute(
        "DELETE FROM exam_allowed_students WHERE exam_id = ?1",
        params![exam_id],
    )?;
    replace_allowed_students(&tx, exam_id, &exam.allowed_students)?;
    tx.commit()?;
    Ok(())
}

/// Retrieves an exam by id, including its participant list.
///
/// # Errors
///
/// Returns `ExamNotFound` if no exam has the given id.
pub fn get_exam(conn: &Connection, exam_id: i64) -> Result<Exam, PersistenceError> {
    let row_result = conn.query_row(
        &format!("SELECT {EXAM_COLUMNS} FROM exams WHERE exam_id = ?1"),
        params![exam_id],
        |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
                row.get(8)?,
            ))
        },
    );

    match row_result {
        Ok(row) => exam_from_row(conn, row),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(PersistenceError::ExamNotFound(exam_id)),
        Err(e) => Err(e.into()),
    }
}

/// Lists every exam ordered by window start.
///
/// # Errors
///
/// Returns an error if a query fails or a stored value is malformed.
pub fn list_exams(conn: &Connection) -> Result<Vec<Exam>, PersistenceError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {EXAM_COLUMNS} FROM exams ORDER BY start_date_time, exam_id"
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
            row.get(6)?,
            row.get(7)?,
            row.get(8)?,
        ))
    })?;

    let mut exams: Vec<Exam> = Vec::new();
    for row in rows {
        exams.push(exam_from_row(conn, row?)?);
    }
    Ok(exams)
}

/// Inserts the participant rows for an exam.
fn replace_allowed_students(
    conn: &Connection,
    exam_id: i64,
    students: &HashSet<StudentId>,
) -> Result<(), PersistenceError> {
    let mut stmt = conn.prepare(
        "INSERT INTO exam_allowed_students (exam_id, user_id) VALUES (?1, ?2)",
    )?;
    for student in students {
        let user_id: i64 = student.value().parse().map_err(|_| {
            PersistenceError::InvalidStoredValue(format!(
                "Student id '{}' is not numeric",
                student.value()
            ))
        })?;
        stmt.execute(params![exam_id, user_id])?;
    }
    Ok(())
}

/// Loads the participant list for an exam.
fn allowed_students_for(
    conn: &Connection,
    exam_id: i64,
) -> Result<HashSet<StudentId>, PersistenceError> {
    let mut stmt = conn.prepare(
        "SELECT user_id FROM exam_allowed_students WHERE exam_id = ?1",
    )?;
    let rows = stmt.query_map(params![exam_id], |row| row.get::<_, i64>(0))?;

    let mut students: HashSet<StudentId> = HashSet::new();
    for row in rows {
        students.insert(StudentId::new(&row?.to_string()));
    }
    Ok(students)
}

/// Assembles a domain exam from a stored row plus its participant list.
fn exam_from_row(conn: &Connection, row: ExamRow) -> Result<Exam, PersistenceError> {
    let (
        exam_id,
        title,
        description,
        start_raw,
        end_raw,
        duration_minutes,
        max_attempts,
        passing_percentage,
        access_raw,
    ) = row;

    let access_type: AccessType = access_raw
        .parse()
        .map_err(|_| PersistenceError::InvalidStoredValue(format!(
            "Unknown access type '{access_raw}'"
        )))?;

    Ok(Exam {
        exam_id: Some(exam_id),
        title,
        description,
        start_at: parse_stored_datetime(&start_raw)?,
        end_at: parse_stored_datetime(&end_raw)?,
        duration_minutes,
        max_attempts,
        passing_percentage,
        access_type,
        allowed_students: allowed_students_for(conn, exam_id)?,
    })
}

/// Parses a stored UTC RFC 3339 timestamp.
fn parse_stored_datetime(raw: &str) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            PersistenceError::InvalidStoredValue(format!("Bad stored datetime '{raw}': {e}"))
        })
}
