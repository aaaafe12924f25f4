// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wall-clock access for the operation boundary.
//!
//! Handlers read the clock once per request and pass the instant down;
//! domain code never reads it. Keeping the read at the boundary is what
//! makes validation deterministic under test.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// Errors from resolving the configured timezone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    /// The configured timezone name is not a known IANA zone.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Resolves an IANA timezone name.
///
/// # Errors
///
/// Returns an error if the name is not a known zone.
pub fn parse_timezone(name: &str) -> Result<Tz, ClockError> {
    name.parse()
        .map_err(|_| ClockError::UnknownTimezone(name.to_string()))
}

/// Returns the current time in the given zone.
#[must_use]
pub fn now_in(zone: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&zone)
}
