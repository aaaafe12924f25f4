// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_persistence, register_test_student};
use crate::{PersistenceError, SqlitePersistence};
use chrono::{DateTime, TimeZone, Utc};
use proctor_domain::{AccessType, Exam, StudentId};
use std::collections::HashSet;

fn instant(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, hour, 0, 0).unwrap()
}

fn student_set(ids: &[i64]) -> HashSet<StudentId> {
    ids.iter()
        .map(|id| StudentId::new(&id.to_string()))
        .collect()
}

fn create_test_exam(allowed: HashSet<StudentId>) -> Exam {
    Exam {
        exam_id: None,
        title: String::from("Midterm"),
        description: Some(String::from("Covers chapters 1-4")),
        start_at: instant(13),
        end_at: instant(15),
        duration_minutes: 60,
        max_attempts: 2,
        passing_percentage: 50,
        access_type: AccessType::SpecificStudents,
        allowed_students: allowed,
    }
}

#[test]
fn test_insert_exam_round_trips() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let amira: i64 = register_test_student(&persistence, "amira");
    let zoe: i64 = register_test_student(&persistence, "zoe");

    let exam: Exam = create_test_exam(student_set(&[amira, zoe]));
    let stored: Exam = persistence.insert_exam(&exam).unwrap();

    assert!(stored.exam_id.is_some());
    assert_eq!(stored.title, exam.title);
    assert_eq!(stored.description, exam.description);
    assert_eq!(stored.start_at, exam.start_at);
    assert_eq!(stored.end_at, exam.end_at);
    assert_eq!(stored.duration_minutes, 60);
    assert_eq!(stored.max_attempts, 2);
    assert_eq!(stored.passing_percentage, 50);
    assert_eq!(stored.access_type, AccessType::SpecificStudents);
    assert_eq!(stored.allowed_students, exam.allowed_students);

    let reloaded: Exam = persistence.get_exam(stored.exam_id.unwrap()).unwrap();
    assert_eq!(reloaded, stored);
}

#[test]
fn test_update_exam_overwrites_participants() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let amira: i64 = register_test_student(&persistence, "amira");
    let zoe: i64 = register_test_student(&persistence, "zoe");

    let stored: Exam = persistence
        .insert_exam(&create_test_exam(student_set(&[amira])))
        .unwrap();
    let exam_id: i64 = stored.exam_id.unwrap();

    let mut revised: Exam = create_test_exam(student_set(&[zoe]));
    revised.title = String::from("Midterm (revised)");
    revised.end_at = instant(16);

    let updated: Exam = persistence.update_exam(exam_id, &revised).unwrap();
    assert_eq!(updated.exam_id, Some(exam_id));
    assert_eq!(updated.title, "Midterm (revised)");
    assert_eq!(updated.end_at, instant(16));
    assert_eq!(updated.allowed_students, student_set(&[zoe]));
}

#[test]
fn test_update_missing_exam_is_not_found() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let amira: i64 = register_test_student(&persistence, "amira");

    let result = persistence.update_exam(42, &create_test_exam(student_set(&[amira])));
    assert!(matches!(result, Err(PersistenceError::ExamNotFound(42))));
}

#[test]
fn test_get_missing_exam_is_not_found() {
    let persistence: SqlitePersistence = create_test_persistence();
    let result = persistence.get_exam(7);
    assert!(matches!(result, Err(PersistenceError::ExamNotFound(7))));
}

#[test]
fn test_list_exams_orders_by_window_start() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let amira: i64 = register_test_student(&persistence, "amira");

    let mut later: Exam = create_test_exam(student_set(&[amira]));
    later.title = String::from("Final");
    later.start_at = instant(18);
    later.end_at = instant(20);
    persistence.insert_exam(&later).unwrap();

    let earlier: Exam = create_test_exam(student_set(&[amira]));
    persistence.insert_exam(&earlier).unwrap();

    let exams: Vec<Exam> = persistence.list_exams().unwrap();
    let titles: Vec<&str> = exams.iter().map(|exam| exam.title.as_str()).collect();
    assert_eq!(titles, vec!["Midterm", "Final"]);
}

#[test]
fn test_all_students_exam_stores_empty_participant_list() {
    let mut persistence: SqlitePersistence = create_test_persistence();

    let mut exam: Exam = create_test_exam(HashSet::new());
    exam.access_type = AccessType::AllStudents;
    let stored: Exam = persistence.insert_exam(&exam).unwrap();

    assert_eq!(stored.access_type, AccessType::AllStudents);
    assert!(stored.allowed_students.is_empty());
}
