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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod normalize;
mod types;
mod validate;

#[cfg(test)]
mod tests;

pub use error::{DomainError, ValidationError, ValidationErrorKind};
pub use normalize::{RawFields, RawValue, normalize_exam_form};
pub use types::{AccessType, Exam, ExamCandidate, StudentId, UserAccount, UserRole};
pub use validate::validate_exam_candidate;
