// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar and clock-time arithmetic.
//!
//! All cross-entity joins in this system use the canonical date key
//! (`"YYYY-MM-DD"`), never `Date` identity. Clock times are `"HH:MM"`
//! 24-hour strings where the empty string denotes unset.

use crate::error::DomainError;
use time::{Date, Month, Weekday};

/// Hours that equal one vacation-day equivalent.
pub const STANDARD_FULL_DAY_HOURS: f64 = 8.0;

/// Enumerates every calendar day of the given month, in order.
///
/// # Arguments
///
/// * `year` - The calendar year
/// * `month` - The month number (1-12)
///
/// # Returns
///
/// One `Date` per calendar day of the month.
///
/// # Errors
///
/// Returns an error if the month number is invalid or the first day of
/// the month cannot be constructed.
pub fn enumerate_days(year: i32, month: u8) -> Result<Vec<Date>, DomainError> {
    let month: Month =
        Month::try_from(month).map_err(|_| DomainError::InvalidMonth { month })?;

    let first: Date = Date::from_calendar_date(year, month, 1).map_err(|e| {
        DomainError::DateParseError {
            date_string: format!("{year}-{month}-01"),
            error: e.to_string(),
        }
    })?;

    let mut days: Vec<Date> = Vec::with_capacity(31);
    let mut current: Option<Date> = Some(first);
    while let Some(day) = current {
        if day.month() != month {
            break;
        }
        days.push(day);
        current = day.next_day();
    }

    Ok(days)
}

/// Computes the span between two `"HH:MM"` clock times in hours.
///
/// Parsing is total: empty or malformed inputs yield `0.0` rather than
/// an error. A span whose end precedes its start also yields `0.0`;
/// overnight (cross-midnight) segments are not supported.
#[must_use]
pub fn duration(start: &str, end: &str) -> f64 {
    let Some(start_minutes) = parse_clock_minutes(start) else {
        return 0.0;
    };
    let Some(end_minutes) = parse_clock_minutes(end) else {
        return 0.0;
    };

    if end_minutes < start_minutes {
        return 0.0;
    }

    f64::from(end_minutes - start_minutes) / 60.0
}

/// Parses an `"HH:MM"` 24-hour clock string into minutes since midnight.
///
/// Returns `None` for empty or malformed input.
fn parse_clock_minutes(value: &str) -> Option<u32> {
    let (hours_str, minutes_str) = value.split_once(':')?;
    let hours: u32 = hours_str.parse().ok()?;
    let minutes: u32 = minutes_str.parse().ok()?;

    if hours > 23 || minutes > 59 {
        return None;
    }

    Some(hours * 60 + minutes)
}

/// Returns the weekday of a date, the lookup key into the weekly contract.
#[must_use]
pub const fn day_name(date: Date) -> Weekday {
    date.weekday()
}

/// Formats a date as its canonical `"YYYY-MM-DD"` date key.
#[must_use]
pub fn date_key(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parses a canonical `"YYYY-MM-DD"` date key back into a `Date`.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the key is malformed.
pub fn parse_date_key(value: &str) -> Result<Date, DomainError> {
    Date::parse(
        value,
        &time::format_description::well_known::Iso8601::DEFAULT,
    )
    .map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Rounds a value to 2 decimal places.
///
/// Applied to every numeric output exposed by the engine; intermediate
/// accumulations stay unrounded.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
