// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation and derivation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Month number is outside 1..=12.
    InvalidMonth {
        /// The invalid month value.
        month: u8,
    },
    /// Failed to parse a date key.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Entry type string is not a valid entry type.
    InvalidEntryType(String),
    /// Vacation status string is not a valid status.
    InvalidVacationStatus(String),
    /// A vacation status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is not permitted.
        reason: String,
    },
    /// No vacation record exists for the given date.
    VacationDayNotFound {
        /// The date key of the missing record.
        date_key: String,
    },
    /// The vacation record is approved and cannot be changed by the user.
    VacationDayApproved {
        /// The date key of the approved record.
        date_key: String,
    },
    /// The date is a holiday and cannot be selected as a vacation day.
    DayIsHoliday {
        /// The date key of the holiday.
        date_key: String,
    },
    /// The remaining vacation balance does not cover the requested day.
    InsufficientBalance {
        /// Remaining vacation days before the request.
        remaining: f64,
        /// Vacation-day equivalent of the requested date.
        requested: f64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth { month } => {
                write!(f, "Invalid month: {month}. Must be between 1 and 12")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidEntryType(value) => write!(f, "Invalid entry type: {value}"),
            Self::InvalidVacationStatus(value) => {
                write!(f, "Invalid vacation status: {value}")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition vacation day from {from} to {to}: {reason}")
            }
            Self::VacationDayNotFound { date_key } => {
                write!(f, "No vacation day exists for {date_key}")
            }
            Self::VacationDayApproved { date_key } => {
                write!(
                    f,
                    "Vacation day {date_key} is approved and can no longer be changed"
                )
            }
            Self::DayIsHoliday { date_key } => {
                write!(f, "{date_key} is a holiday and cannot be taken as vacation")
            }
            Self::InsufficientBalance {
                remaining,
                requested,
            } => {
                write!(
                    f,
                    "Insufficient vacation balance: {remaining:.2} days remaining, {requested:.2} requested"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
