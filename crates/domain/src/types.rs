// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use time::Date;

/// Classification of a half-day segment.
///
/// The type controls whether a segment counts toward planned and worked
/// hours, and encodes the override priority applied during derivation
/// (`Holiday` > active `Vacation` > persisted raw entry > `Regular`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// Normal work; start/end clock times apply.
    #[default]
    Regular,
    /// Vacation absence backed by an active vacation-day record.
    Vacation,
    /// Global holiday.
    Holiday,
    /// Recuperation (time off in lieu).
    Recuperation,
    /// Sick leave; counts contracted hours rather than clock time.
    Sick,
}

impl EntryType {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Vacation => "vacation",
            Self::Holiday => "holiday",
            Self::Recuperation => "recuperation",
            Self::Sick => "sick",
        }
    }

    /// Parses an entry type from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEntryType` if the string is not a
    /// valid entry type.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "regular" => Ok(Self::Regular),
            "vacation" => Ok(Self::Vacation),
            "holiday" => Ok(Self::Holiday),
            "recuperation" => Ok(Self::Recuperation),
            "sick" => Ok(Self::Sick),
            _ => Err(DomainError::InvalidEntryType(s.to_string())),
        }
    }
}

impl FromStr for EntryType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// One half-day of a daily log entry.
///
/// Invariant: a non-`Regular` segment carries cleared start/end times.
/// `absence` is the only constructor for non-`Regular` segments, so the
/// invariant holds everywhere by construction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeSegment {
    /// Start time, `"HH:MM"` or empty for unset.
    pub start: String,
    /// End time, `"HH:MM"` or empty for unset.
    pub end: String,
    /// Segment classification.
    pub entry_type: EntryType,
}

impl TimeSegment {
    /// Creates a regular segment with the given clock times.
    #[must_use]
    pub const fn regular(start: String, end: String) -> Self {
        Self {
            start,
            end,
            entry_type: EntryType::Regular,
        }
    }

    /// Creates an absence segment of the given type with cleared times.
    #[must_use]
    pub const fn absence(entry_type: EntryType) -> Self {
        Self {
            start: String::new(),
            end: String::new(),
            entry_type,
        }
    }

    /// Whether this segment carries any input: a non-empty start or end
    /// time, or a non-`Regular` type.
    #[must_use]
    pub fn has_input(&self) -> bool {
        !self.start.is_empty() || !self.end.is_empty() || self.entry_type != EntryType::Regular
    }

    /// Worked clock hours of this segment (0 for empty or absence segments).
    #[must_use]
    pub fn clock_hours(&self) -> f64 {
        calendar::duration(&self.start, &self.end)
    }
}

/// The canonical log entry for one calendar day.
///
/// Recreated on every derivation pass; `has_inputs` is derived, never
/// authored directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLogEntry {
    /// Canonical `"YYYY-MM-DD"` identity of this entry.
    pub date_key: String,
    /// The calendar date.
    pub date: Date,
    /// Morning segment.
    pub morning: TimeSegment,
    /// Afternoon segment.
    pub afternoon: TimeSegment,
    /// Whether the contract marks this weekday as working.
    pub is_working_day: bool,
    /// Whether either segment carries input.
    pub has_inputs: bool,
}

impl DailyLogEntry {
    /// Creates an entry for a date, computing `date_key` and `has_inputs`.
    #[must_use]
    pub fn new(
        date: Date,
        morning: TimeSegment,
        afternoon: TimeSegment,
        is_working_day: bool,
    ) -> Self {
        let has_inputs: bool = morning.has_input() || afternoon.has_input();
        Self {
            date_key: calendar::date_key(date),
            date,
            morning,
            afternoon,
            is_working_day,
            has_inputs,
        }
    }

    /// Creates an empty regular entry for a date.
    #[must_use]
    pub fn empty(date: Date, is_working_day: bool) -> Self {
        Self::new(
            date,
            TimeSegment::default(),
            TimeSegment::default(),
            is_working_day,
        )
    }
}

/// A global holiday. Read-only input to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// Canonical `"YYYY-MM-DD"` date of the holiday.
    pub date_key: String,
    /// Display name.
    pub name: String,
    /// Whether the holiday is an official (legal) one.
    pub is_official: bool,
}

impl Holiday {
    /// Creates a new `Holiday`.
    #[must_use]
    pub fn new(date_key: impl Into<String>, name: impl Into<String>, is_official: bool) -> Self {
        Self {
            date_key: date_key.into(),
            name: name.into(),
            is_official,
        }
    }
}

/// The global holiday snapshot, keyed by date key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HolidayCalendar {
    days: BTreeMap<String, Holiday>,
}

impl HolidayCalendar {
    /// Creates an empty calendar.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            days: BTreeMap::new(),
        }
    }

    /// Builds a calendar from a list of holidays.
    #[must_use]
    pub fn from_holidays(holidays: impl IntoIterator<Item = Holiday>) -> Self {
        let days: BTreeMap<String, Holiday> = holidays
            .into_iter()
            .map(|holiday| (holiday.date_key.clone(), holiday))
            .collect();
        Self { days }
    }

    /// Whether a holiday exists for the given date key.
    #[must_use]
    pub fn contains(&self, date_key: &str) -> bool {
        self.days.contains_key(date_key)
    }

    /// Returns the holiday for a date key, if any.
    #[must_use]
    pub fn get(&self, date_key: &str) -> Option<&Holiday> {
        self.days.get(date_key)
    }

    /// Number of holidays in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Default clock times used to prefill raw log edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkTimeDefaults {
    pub morning_start: String,
    pub morning_end: String,
    pub afternoon_start: String,
    pub afternoon_end: String,
}

/// Global, read-only settings supplied by the settings collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Percentage of full-time employment; prorates the annual allowance.
    pub work_rate_percent: f64,
    /// Annual vacation-day entitlement at 100% work rate.
    pub annual_vacation_days_base: f64,
    /// Optional default clock times for raw log edits.
    pub work_time_defaults: Option<WorkTimeDefaults>,
}

impl GlobalSettings {
    /// Creates settings with the given work rate and base allowance.
    #[must_use]
    pub const fn new(work_rate_percent: f64, annual_vacation_days_base: f64) -> Self {
        Self {
            work_rate_percent,
            annual_vacation_days_base,
            work_time_defaults: None,
        }
    }
}
