// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

pub mod clock;
mod error;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_persistence_error, translate_validation_errors};
pub use request_response::{
    ExamFormRequest, ExamInfo, ListExamsResponse, ListUsersResponse, RegisterUserRequest,
    UserInfo, ValidationIssue,
};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use proctor_domain::{
    Exam, ExamCandidate, RawFields, StudentId, UserAccount, UserRole, ValidationError,
    ValidationErrorKind, normalize_exam_form, validate_exam_candidate,
};
use proctor_persistence::SqlitePersistence;
use std::collections::HashSet;
use tracing::info;

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Validates a raw exam submission without persisting anything.
///
/// Pipeline: normalize the raw fields, resolve the selected participants
/// against the Student Registry, then evaluate the scheduling rules. Any
/// normalization or participant-resolution failure returns before the rule
/// evaluation runs; rule failures accumulate and come back together.
///
/// # Arguments
///
/// * `persistence` - The persistence layer (Student Registry queries only)
/// * `request` - The raw submission
/// * `now` - The current time in the configured local zone
/// * `zone` - The configured local zone
///
/// # Errors
///
/// Returns `ValidationFailed` with the ordered issue list for a rejected
/// submission, or `Internal` if a registry query fails.
pub fn validate_exam(
    persistence: &SqlitePersistence,
    request: &ExamFormRequest,
    now: DateTime<Tz>,
    zone: Tz,
) -> ApiResult<ExamCandidate> {
    let fields: RawFields = request.to_raw_fields();
    let candidate: ExamCandidate = normalize_exam_form(&fields, zone)
        .map_err(|errors| translate_validation_errors(&errors))?;

    // Only registered students are valid selections
    if !candidate.allowed_students.is_empty() {
        let known: HashSet<StudentId> = persistence
            .filter_student_ids(&candidate.allowed_students)
            .map_err(translate_persistence_error)?;
        let mut unknown: Vec<&str> = candidate
            .allowed_students
            .difference(&known)
            .map(StudentId::value)
            .collect();
        if !unknown.is_empty() {
            unknown.sort_unstable();
            let error: ValidationError = ValidationError::with_field(
                ValidationErrorKind::InvalidType,
                "allowed_students",
                format!(
                    "Select a valid choice. {} is not one of the available choices.",
                    unknown[0]
                ),
            );
            return Err(translate_validation_errors(&[error]));
        }
    }

    let student_count: u64 = persistence
        .count_students()
        .map_err(translate_persistence_error)?;
    validate_exam_candidate(&candidate, now, || student_count)
        .map_err(|errors| translate_validation_errors(&errors))?;

    Ok(candidate)
}

/// Validates a raw exam submission and persists the accepted exam.
///
/// # Errors
///
/// Returns `ValidationFailed` for a rejected submission or `Internal` if
/// persistence fails.
pub fn create_exam(
    persistence: &mut SqlitePersistence,
    request: &ExamFormRequest,
    now: DateTime<Tz>,
    zone: Tz,
) -> ApiResult<ExamInfo> {
    let candidate: ExamCandidate = validate_exam(persistence, request, now, zone)?;
    let exam: Exam = build_exam(candidate)?;

    let stored: Exam = persistence
        .insert_exam(&exam)
        .map_err(translate_persistence_error)?;
    info!(exam_id = stored.exam_id, title = %stored.title, "Created exam");
    Ok(ExamInfo::from(&stored))
}

/// Validates a raw exam submission and overwrites an existing exam.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the exam does not exist, `ValidationFailed`
/// for a rejected submission, or `Internal` if persistence fails.
pub fn update_exam(
    persistence: &mut SqlitePersistence,
    exam_id: i64,
    request: &ExamFormRequest,
    now: DateTime<Tz>,
    zone: Tz,
) -> ApiResult<ExamInfo> {
    // Existence first, so edits of a deleted exam fail fast
    persistence
        .get_exam(exam_id)
        .map_err(translate_persistence_error)?;

    let candidate: ExamCandidate = validate_exam(persistence, request, now, zone)?;
    let exam: Exam = build_exam(candidate)?;

    let stored: Exam = persistence
        .update_exam(exam_id, &exam)
        .map_err(translate_persistence_error)?;
    info!(exam_id, title = %stored.title, "Updated exam");
    Ok(ExamInfo::from(&stored))
}

/// Retrieves a stored exam.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the exam does not exist.
pub fn get_exam(persistence: &SqlitePersistence, exam_id: i64) -> ApiResult<ExamInfo> {
    let exam: Exam = persistence
        .get_exam(exam_id)
        .map_err(translate_persistence_error)?;
    Ok(ExamInfo::from(&exam))
}

/// Lists every stored exam, ordered by window start.
///
/// # Errors
///
/// Returns `Internal` if the query fails.
pub fn list_exams(persistence: &SqlitePersistence) -> ApiResult<ListExamsResponse> {
    let exams: Vec<Exam> = persistence
        .list_exams()
        .map_err(translate_persistence_error)?;
    Ok(ListExamsResponse {
        exams: exams.iter().map(ExamInfo::from).collect(),
    })
}

/// Registers a user account.
///
/// # Errors
///
/// Returns `InvalidInput` if a field is blank, the role is unrecognized, or
/// the username is taken.
pub fn register_user(
    persistence: &SqlitePersistence,
    request: &RegisterUserRequest,
) -> ApiResult<UserInfo> {
    let username: &str = request.username.trim();
    if username.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("username"),
            message: String::from("This field is required."),
        });
    }
    let display_name: &str = request.display_name.trim();
    if display_name.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("display_name"),
            message: String::from("This field is required."),
        });
    }
    let role: UserRole = UserRole::parse(request.role.trim()).map_err(|e| {
        ApiError::InvalidInput {
            field: String::from("role"),
            message: e.to_string(),
        }
    })?;

    let account: UserAccount = persistence
        .register_user(&UserAccount::new(
            username.to_string(),
            display_name.to_string(),
            role,
        ))
        .map_err(translate_persistence_error)?;
    Ok(UserInfo::from(&account))
}

/// Lists every registered user account, ordered by username.
///
/// # Errors
///
/// Returns `Internal` if the query fails.
pub fn list_users(persistence: &SqlitePersistence) -> ApiResult<ListUsersResponse> {
    let users: Vec<UserAccount> = persistence
        .list_users()
        .map_err(translate_persistence_error)?;
    Ok(ListUsersResponse {
        users: users.iter().map(UserInfo::from).collect(),
    })
}

/// Converts an accepted candidate into a persistable exam (UTC instants).
fn build_exam(candidate: ExamCandidate) -> ApiResult<Exam> {
    let (Some(start_at), Some(end_at)) = (candidate.start_at, candidate.end_at) else {
        // The validator rejects absent instants; reaching this is a bug
        return Err(ApiError::Internal {
            message: String::from("Accepted candidate is missing its window"),
        });
    };

    Ok(Exam {
        exam_id: None,
        title: candidate.title,
        description: candidate.description,
        start_at: start_at.with_timezone(&Utc),
        end_at: end_at.with_timezone(&Utc),
        duration_minutes: candidate.duration_minutes,
        max_attempts: candidate.max_attempts,
        passing_percentage: candidate.passing_percentage,
        access_type: candidate.access_type,
        allowed_students: candidate.allowed_students,
    })
}
