// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use timecard_domain::DomainError;

/// Errors that can occur during workbook transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The command targets a date outside the displayed month.
    OutsideDisplayedMonth {
        /// The offending date key.
        date_key: String,
        /// The displayed year.
        year: i32,
        /// The displayed month.
        month: u8,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::OutsideDisplayedMonth {
                date_key,
                year,
                month,
            } => {
                write!(
                    f,
                    "Date {date_key} is outside the displayed month {year:04}-{month:02}"
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
