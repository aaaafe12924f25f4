// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Represents an exam's access policy.
///
/// An exam is either open to every registered student or restricted to an
/// explicitly selected subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessType {
    /// Every registered student may take the exam.
    AllStudents,
    /// Only the students listed in `allowed_students` may take the exam.
    SpecificStudents,
}

impl FromStr for AccessType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all_students" => Ok(Self::AllStudents),
            "specific_students" => Ok(Self::SpecificStudents),
            _ => Err(DomainError::InvalidAccessType(s.to_string())),
        }
    }
}

impl std::fmt::Display for AccessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AccessType {
    /// Converts this access policy to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AllStudents => "all_students",
            Self::SpecificStudents => "specific_students",
        }
    }

    /// Returns the human-readable label used in messages.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::AllStudents => "All Students",
            Self::SpecificStudents => "Specific Students",
        }
    }
}

/// Represents a user account's role classification.
///
/// Only the `Student` role participates in exams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// A registered student eligible to take exams.
    Student,
    /// A teacher who creates and manages exams.
    Teacher,
    /// A system administrator.
    Admin,
}

impl UserRole {
    /// Parses a role from its wire representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid role.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(format!("Unknown role: {s}"))),
        }
    }

    /// Converts this role to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Admin => "admin",
        }
    }
}

/// Represents an opaque student identifier as submitted by a form.
///
/// HTML multi-selects post identifiers as strings; the Student Registry is
/// responsible for resolving them against persisted student accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId {
    /// The identifier value, whitespace-trimmed.
    value: String,
}

impl StudentId {
    /// Creates a new `StudentId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The identifier value (will be whitespace-trimmed)
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_string(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Represents a registered user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Canonical internal identifier (opaque, stable, immutable).
    /// Optional to support creation before persistence.
    pub user_id: Option<i64>,
    /// The login name (unique, case-insensitive).
    pub username: String,
    /// The display name (informational, not unique).
    pub display_name: String,
    /// The account's role classification.
    pub role: UserRole,
}

impl UserAccount {
    /// Creates a new `UserAccount` without a persisted `user_id`.
    ///
    /// The `user_id` will be assigned by the persistence layer upon first save.
    #[must_use]
    pub const fn new(username: String, display_name: String, role: UserRole) -> Self {
        Self {
            user_id: None,
            username,
            display_name,
            role,
        }
    }

    /// Creates a `UserAccount` with an existing `user_id` (from persistence).
    #[must_use]
    pub const fn with_id(
        user_id: i64,
        username: String,
        display_name: String,
        role: UserRole,
    ) -> Self {
        Self {
            user_id: Some(user_id),
            username,
            display_name,
            role,
        }
    }
}

/// A proposed exam submitted for validation, prior to acceptance.
///
/// A candidate is built by the Field Normalizer, validated once, and
/// discarded; it never outlives the call that constructed it. The start and
/// end instants are optional so a submission that omitted them can still
/// reach the validator's "required" fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamCandidate {
    /// The exam title.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Window start, in the caller's configured local zone.
    pub start_at: Option<DateTime<Tz>>,
    /// Window end, in the caller's configured local zone.
    pub end_at: Option<DateTime<Tz>>,
    /// Exam duration in minutes (at least 1).
    pub duration_minutes: u32,
    /// Maximum number of attempts per student (at least 1).
    pub max_attempts: u32,
    /// Passing threshold in percent (1-100).
    pub passing_percentage: u8,
    /// The access policy for this exam.
    pub access_type: AccessType,
    /// Selected participants; meaningful only for `SpecificStudents`.
    pub allowed_students: HashSet<StudentId>,
}

/// A persisted exam record.
///
/// Instants are stored in UTC; callers convert to the configured local zone
/// for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exam {
    /// Canonical internal identifier (opaque, stable, immutable).
    /// Optional to support creation before persistence.
    pub exam_id: Option<i64>,
    /// The exam title.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Window start (UTC).
    pub start_at: DateTime<Utc>,
    /// Window end (UTC).
    pub end_at: DateTime<Utc>,
    /// Exam duration in minutes.
    pub duration_minutes: u32,
    /// Maximum number of attempts per student.
    pub max_attempts: u32,
    /// Passing threshold in percent.
    pub passing_percentage: u8,
    /// The access policy for this exam.
    pub access_type: AccessType,
    /// Selected participants; empty for `AllStudents` exams.
    pub allowed_students: HashSet<StudentId>,
}
