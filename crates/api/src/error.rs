// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::request_response::ValidationIssue;
use proctor_domain::ValidationError;
use proctor_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the API
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The submission violated one or more validation rules.
    ValidationFailed {
        /// The violations, in evaluation order.
        issues: Vec<ValidationIssue>,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationFailed { issues } => {
                let messages: Vec<&str> =
                    issues.iter().map(|issue| issue.message.as_str()).collect();
                write!(f, "Validation failed: {}", messages.join(" "))
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates accumulated validation errors into the API contract.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_validation_errors(errors: &[ValidationError]) -> ApiError {
    ApiError::ValidationFailed {
        issues: errors.iter().map(ValidationIssue::from).collect(),
    }
}

/// Translates a persistence error into an API error.
///
/// This translation is explicit and ensures persistence errors are not
/// leaked directly.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::ExamNotFound(exam_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Exam"),
            message: format!("Exam {exam_id} does not exist"),
        },
        PersistenceError::DuplicateUsername(username) => ApiError::InvalidInput {
            field: String::from("username"),
            message: format!("A user with username '{username}' already exists."),
        },
        PersistenceError::DatabaseError(_)
        | PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::InvalidStoredValue(_) => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
