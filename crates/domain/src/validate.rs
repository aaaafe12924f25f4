// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Exam scheduling validation rules.
//!
//! Evaluates a normalized [`ExamCandidate`] against the cross-field business
//! rules and accumulates every failing rule, in evaluation order. The
//! current time and the student-count capability are explicit parameters:
//! this module never reads a clock or a database.
//!
//! ## Invariants
//!
//! - `start_at < end_at`
//! - `start_at >= now` (no scheduling into the past)
//! - Start and end years lie within `[now.year, now.year + 10]`
//! - `SpecificStudents` requires a non-empty participant selection
//! - `AllStudents` requires at least one registered student

use crate::error::{ValidationError, ValidationErrorKind};
use crate::types::{AccessType, ExamCandidate};
use chrono::{DateTime, Datelike};
use chrono_tz::Tz;

/// Validates a normalized exam candidate against the scheduling rules.
///
/// Every failing rule is accumulated; the returned list preserves
/// evaluation order. Malformed instants never reach this function - the
/// Field Normalizer rejects them upstream, which is what suppresses the
/// remaining checks for type errors.
///
/// The participant rules intentionally test the `AllStudents`/empty-registry
/// condition twice with distinct messages, matching the system's observed
/// behavior. Callers that consider this redundant must not merge the call
/// sites without confirming which message the caller expects.
///
/// # Arguments
///
/// * `candidate` - The normalized candidate
/// * `now` - The current time in the caller's configured local zone
/// * `count_students` - Capability returning the registered-student count
///
/// # Returns
///
/// * `Ok(())` if every rule passed
/// * `Err(Vec<ValidationError>)` with every failing rule, in order
///
/// # Errors
///
/// Returns the accumulated rule violations for a rejected candidate.
pub fn validate_exam_candidate<F>(
    candidate: &ExamCandidate,
    now: DateTime<Tz>,
    count_students: F,
) -> Result<(), Vec<ValidationError>>
where
    F: Fn() -> u64,
{
    let mut errors: Vec<ValidationError> = Vec::new();
    let max_year: i32 = now.year() + 10;

    // Rule: "All Students" requires a non-empty registry
    if candidate.access_type == AccessType::AllStudents && count_students() == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoParticipants,
            "Cannot create exam for \"All Students\" because there are no students \
             registered in the system. Please register students first or change \
             access type to \"Specific Students\".",
        ));
    }

    // Rule: the exam must have participants
    match candidate.access_type {
        AccessType::SpecificStudents => {
            if candidate.allowed_students.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NoParticipants,
                    "This exam has no participants. Please select at least one \
                     student or change access type to \"All Students\".",
                ));
            }
        }
        AccessType::AllStudents => {
            if count_students() == 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NoParticipants,
                    "Cannot create exam because there are no students in the \
                     system. Please register students first.",
                ));
            }
        }
    }

    // The window rules only apply when both instants are present
    if let (Some(start_at), Some(end_at)) = (candidate.start_at, candidate.end_at) {
        // Rule: start must be before end
        if start_at >= end_at {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRange,
                "Start date and time must be before end date and time.",
            ));
        }

        // Rule: years must lie within the scheduling horizon
        if start_at.year() < now.year() || start_at.year() > max_year {
            errors.push(ValidationError::new(
                ValidationErrorKind::OutOfBounds,
                format!("Start date must be between {} and {max_year}.", now.year()),
            ));
        }
        if end_at.year() < now.year() || end_at.year() > max_year {
            errors.push(ValidationError::new(
                ValidationErrorKind::OutOfBounds,
                format!("End date must be between {} and {max_year}.", now.year()),
            ));
        }

        // Rule: start must not be in the past
        if start_at < now {
            errors.push(ValidationError::new(
                ValidationErrorKind::InPast,
                "Start date and time must not be in the past.",
            ));
        }
    } else {
        errors.push(ValidationError::new(
            ValidationErrorKind::Required,
            "Both start and end date/time are required.",
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
