// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Classifies the rule a rejected exam submission violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// A submitted value is malformed for its field type.
    InvalidType,
    /// The access policy yields zero eligible participants.
    NoParticipants,
    /// The window start is not before the window end.
    InvalidRange,
    /// A year falls outside the permitted scheduling horizon.
    OutOfBounds,
    /// The window start is before the current time.
    InPast,
    /// A required value is missing.
    Required,
}

impl ValidationErrorKind {
    /// Converts this kind to its stable wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidType => "invalid_type",
            Self::NoParticipants => "no_participants",
            Self::InvalidRange => "invalid_range",
            Self::OutOfBounds => "out_of_bounds",
            Self::InPast => "in_past",
            Self::Required => "required",
        }
    }
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single rule violation produced by the Field Normalizer or the Exam
/// Validator.
///
/// Violations are returned as data, never raised as faults; the web layer
/// renders them back to the submitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The violated rule's classification.
    pub kind: ValidationErrorKind,
    /// The offending field, if the violation is field-scoped.
    pub field: Option<String>,
    /// Human-readable description of the violation.
    pub message: String,
}

impl ValidationError {
    /// Creates a form-level (non-field) violation.
    #[must_use]
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            message: message.into(),
        }
    }

    /// Creates a field-scoped violation.
    #[must_use]
    pub fn with_field(
        kind: ValidationErrorKind,
        field: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            field: Some(field.to_string()),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{field}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors that can occur while constructing domain values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The access policy string is not a recognized choice.
    InvalidAccessType(String),
    /// The role string is not a recognized classification.
    InvalidRole(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAccessType(value) => {
                write!(f, "Invalid access type: {value}")
            }
            Self::InvalidRole(msg) => write!(f, "Invalid role: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
