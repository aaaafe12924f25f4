// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! Exam form values travel as strings and lists of strings, exactly as an
//! HTML form posts them; the Field Normalizer owns all parsing.

use proctor_domain::{Exam, RawFields, RawValue, UserAccount, ValidationError};
use serde::{Deserialize, Serialize};

/// A raw exam submission.
///
/// Every value is the untyped wire form; absent and blank values are
/// equivalent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExamFormRequest {
    /// The exam title.
    pub title: Option<String>,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Window start (`datetime-local` or RFC 3339).
    pub start_date_time: Option<String>,
    /// Window end (`datetime-local` or RFC 3339).
    pub end_date_time: Option<String>,
    /// Exam duration in minutes.
    pub duration_minutes: Option<String>,
    /// Maximum attempts per student.
    pub max_attempts: Option<String>,
    /// Passing threshold in percent.
    pub passing_percentage: Option<String>,
    /// The access policy choice (`all_students` / `specific_students`).
    pub access_type: Option<String>,
    /// Selected student identifiers.
    #[serde(default)]
    pub allowed_students: Vec<String>,
}

impl ExamFormRequest {
    /// Converts this request into the raw field map the normalizer consumes.
    #[must_use]
    pub fn to_raw_fields(&self) -> RawFields {
        let mut fields: RawFields = RawFields::new();
        let singles: [(&str, &Option<String>); 8] = [
            ("title", &self.title),
            ("description", &self.description),
            ("start_date_time", &self.start_date_time),
            ("end_date_time", &self.end_date_time),
            ("duration_minutes", &self.duration_minutes),
            ("max_attempts", &self.max_attempts),
            ("passing_percentage", &self.passing_percentage),
            ("access_type", &self.access_type),
        ];
        for (name, value) in singles {
            if let Some(value) = value {
                fields.insert(name.to_string(), RawValue::Single(value.clone()));
            }
        }
        if !self.allowed_students.is_empty() {
            fields.insert(
                "allowed_students".to_string(),
                RawValue::Many(self.allowed_students.clone()),
            );
        }
        fields
    }
}

/// One rule violation, in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// The violated rule's stable kind name.
    pub kind: String,
    /// The offending field, if the violation is field-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Human-readable description of the violation.
    pub message: String,
}

impl From<&ValidationError> for ValidationIssue {
    fn from(error: &ValidationError) -> Self {
        Self {
            kind: error.kind.as_str().to_string(),
            field: error.field.clone(),
            message: error.message.clone(),
        }
    }
}

/// API request for registering a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    /// The login name (unique, case-insensitive).
    pub username: String,
    /// The display name.
    pub display_name: String,
    /// The role classification (`student` / `teacher` / `admin`).
    pub role: String,
}

/// User account information for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// The canonical user id.
    pub user_id: i64,
    /// The login name.
    pub username: String,
    /// The display name.
    pub display_name: String,
    /// The role classification.
    pub role: String,
}

impl From<&UserAccount> for UserInfo {
    fn from(account: &UserAccount) -> Self {
        Self {
            user_id: account.user_id.unwrap_or_default(),
            username: account.username.clone(),
            display_name: account.display_name.clone(),
            role: account.role.as_str().to_string(),
        }
    }
}

/// API response for listing user accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersResponse {
    /// The registered accounts, ordered by username.
    pub users: Vec<UserInfo>,
}

/// Exam information for responses.
///
/// Instants are UTC RFC 3339; display-zone formatting belongs to the
/// consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamInfo {
    /// The canonical exam id.
    pub exam_id: i64,
    /// The exam title.
    pub title: String,
    /// Optional free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Window start (UTC, RFC 3339).
    pub start_date_time: String,
    /// Window end (UTC, RFC 3339).
    pub end_date_time: String,
    /// Exam duration in minutes.
    pub duration_minutes: u32,
    /// Maximum attempts per student.
    pub max_attempts: u32,
    /// Passing threshold in percent.
    pub passing_percentage: u8,
    /// The access policy wire name.
    pub access_type: String,
    /// Selected student identifiers, sorted.
    pub allowed_students: Vec<String>,
}

impl From<&Exam> for ExamInfo {
    fn from(exam: &Exam) -> Self {
        let mut allowed_students: Vec<String> = exam
            .allowed_students
            .iter()
            .map(|id| id.value().to_string())
            .collect();
        allowed_students.sort();

        Self {
            exam_id: exam.exam_id.unwrap_or_default(),
            title: exam.title.clone(),
            description: exam.description.clone(),
            start_date_time: exam.start_at.to_rfc3339(),
            end_date_time: exam.end_at.to_rfc3339(),
            duration_minutes: exam.duration_minutes,
            max_attempts: exam.max_attempts,
            passing_percentage: exam.passing_percentage,
            access_type: exam.access_type.as_str().to_string(),
            allowed_students,
        }
    }
}

/// API response for listing exams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListExamsResponse {
    /// The stored exams, ordered by window start.
    pub exams: Vec<ExamInfo>,
}
