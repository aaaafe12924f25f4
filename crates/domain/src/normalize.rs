// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field normalization for exam submissions.
//!
//! Converts raw submitted values (strings and lists of strings, exactly as
//! an HTML form posts them) into a typed [`ExamCandidate`].
//!
//! ## Invariants
//!
//! - Instants are timezone-aware: already-aware input (RFC 3339) is
//!   converted to the configured local zone; naive `datetime-local` input
//!   is localized to it
//! - An absent or blank datetime normalizes to `None`; a present but
//!   malformed one is an error
//! - Per-field errors accumulate; any error means no candidate is produced

use crate::error::{ValidationError, ValidationErrorKind};
use crate::types::{AccessType, ExamCandidate, StudentId};
use chrono::{DateTime, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use std::collections::{HashMap, HashSet};

/// A raw submitted field value.
///
/// Single-valued inputs post one string; multi-selects post a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// A single-valued input.
    Single(String),
    /// A multi-valued input.
    Many(Vec<String>),
}

impl RawValue {
    /// Returns the single value, or the first value of a list.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value.as_str()),
            Self::Many(values) => values.first().map(String::as_str),
        }
    }

    /// Returns all values.
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Single(value) => vec![value.as_str()],
            Self::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// Raw submitted form data, keyed by field name.
pub type RawFields = HashMap<String, RawValue>;

/// Normalizes raw exam form data into a typed candidate.
///
/// # Arguments
///
/// * `fields` - The raw submitted values
/// * `zone` - The caller's configured local zone
///
/// # Returns
///
/// * `Ok(ExamCandidate)` if every field normalized cleanly
/// * `Err(Vec<ValidationError>)` with one entry per failing field, in field
///   order
///
/// # Errors
///
/// Returns the accumulated per-field errors if any field is missing where
/// required, malformed, or out of range.
pub fn normalize_exam_form(
    fields: &RawFields,
    zone: Tz,
) -> Result<ExamCandidate, Vec<ValidationError>> {
    let mut errors: Vec<ValidationError> = Vec::new();

    let title: String = match single(fields, "title") {
        Some(value) => value.to_string(),
        None => {
            errors.push(ValidationError::with_field(
                ValidationErrorKind::Required,
                "title",
                "This field is required.",
            ));
            String::new()
        }
    };

    let description: Option<String> = single(fields, "description").map(str::to_string);

    let start_at = normalize_datetime(fields, "start_date_time", "Start", zone, &mut errors);
    let end_at = normalize_datetime(fields, "end_date_time", "End", zone, &mut errors);

    let duration_minutes: u32 = required_minimum(fields, "duration_minutes", 1, &mut errors);
    let max_attempts: u32 = required_minimum(fields, "max_attempts", 1, &mut errors);
    let passing_percentage: u8 = required_percentage(fields, "passing_percentage", &mut errors);

    let access_type: AccessType = match single(fields, "access_type") {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            errors.push(ValidationError::with_field(
                ValidationErrorKind::InvalidType,
                "access_type",
                format!("Select a valid choice. {raw} is not one of the available choices."),
            ));
            AccessType::AllStudents
        }),
        None => {
            errors.push(ValidationError::with_field(
                ValidationErrorKind::Required,
                "access_type",
                "This field is required.",
            ));
            AccessType::AllStudents
        }
    };

    let allowed_students: HashSet<StudentId> = fields
        .get("allowed_students")
        .map(|value| {
            value
                .values()
                .into_iter()
                .filter(|entry| !entry.trim().is_empty())
                .map(StudentId::new)
                .collect()
        })
        .unwrap_or_default();

    if errors.is_empty() {
        Ok(ExamCandidate {
            title,
            description,
            start_at,
            end_at,
            duration_minutes,
            max_attempts,
            passing_percentage,
            access_type,
            allowed_students,
        })
    } else {
        Err(errors)
    }
}

/// Returns a field's single trimmed value, treating blank as absent.
fn single<'a>(fields: &'a RawFields, name: &str) -> Option<&'a str> {
    fields
        .get(name)
        .and_then(RawValue::first)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Parses a submitted datetime into an aware instant in `zone`.
///
/// Accepts RFC 3339 (already aware) and the `datetime-local` wire formats
/// `%Y-%m-%dT%H:%M:%S` / `%Y-%m-%dT%H:%M` (naive wall-clock time in `zone`).
/// An ambiguous local time resolves to the earliest instant; a nonexistent
/// one (DST gap) fails.
fn parse_datetime(raw: &str, zone: Tz) -> Option<DateTime<Tz>> {
    if let Ok(aware) = DateTime::parse_from_rfc3339(raw) {
        return Some(aware.with_timezone(&zone));
    }

    let naive: NaiveDateTime = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()?;

    zone.from_local_datetime(&naive).earliest()
}

/// Normalizes one datetime field, recording an error if it is malformed.
fn normalize_datetime(
    fields: &RawFields,
    name: &str,
    label: &str,
    zone: Tz,
    errors: &mut Vec<ValidationError>,
) -> Option<DateTime<Tz>> {
    let raw: &str = single(fields, name)?;
    let parsed: Option<DateTime<Tz>> = parse_datetime(raw, zone);
    if parsed.is_none() {
        errors.push(ValidationError::with_field(
            ValidationErrorKind::InvalidType,
            name,
            format!("{label} date and time is not a valid date/time."),
        ));
    }
    parsed
}

/// Normalizes a required integer field with a lower bound.
fn required_minimum(
    fields: &RawFields,
    name: &str,
    min: u32,
    errors: &mut Vec<ValidationError>,
) -> u32 {
    let Some(raw) = single(fields, name) else {
        errors.push(ValidationError::with_field(
            ValidationErrorKind::Required,
            name,
            "This field is required.",
        ));
        return 0;
    };
    let Ok(value) = raw.parse::<i64>() else {
        errors.push(ValidationError::with_field(
            ValidationErrorKind::InvalidType,
            name,
            "Enter a whole number.",
        ));
        return 0;
    };
    if value < i64::from(min) {
        errors.push(ValidationError::with_field(
            ValidationErrorKind::OutOfBounds,
            name,
            format!("Ensure this value is greater than or equal to {min}."),
        ));
        return 0;
    }
    u32::try_from(value).unwrap_or_else(|_| {
        errors.push(ValidationError::with_field(
            ValidationErrorKind::OutOfBounds,
            name,
            format!("Ensure this value is less than or equal to {}.", u32::MAX),
        ));
        0
    })
}

/// Normalizes the required passing percentage field (1-100).
fn required_percentage(
    fields: &RawFields,
    name: &str,
    errors: &mut Vec<ValidationError>,
) -> u8 {
    let Some(raw) = single(fields, name) else {
        errors.push(ValidationError::with_field(
            ValidationErrorKind::Required,
            name,
            "This field is required.",
        ));
        return 0;
    };
    let Ok(value) = raw.parse::<i64>() else {
        errors.push(ValidationError::with_field(
            ValidationErrorKind::InvalidType,
            name,
            "Enter a whole number.",
        ));
        return 0;
    };
    match u8::try_from(value) {
        Ok(percentage) if (1..=100).contains(&percentage) => percentage,
        _ => {
            errors.push(ValidationError::with_field(
                ValidationErrorKind::OutOfBounds,
                name,
                "Ensure this value is between 1 and 100.",
            ));
            0
        }
    }
}
