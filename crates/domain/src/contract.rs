// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly contract model.
//!
//! The weekly contract is the sole source of expected hours per weekday.
//! It maps each of the 7 weekdays to a morning and an afternoon hour
//! value; a half-day value of zero means non-working for that half-day.

use serde::{Deserialize, Serialize};
use time::{Date, Weekday};

/// Expected hours for one weekday, split into half-days.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContractDay {
    /// Contracted morning hours. Zero means the morning is non-working.
    pub morning_hours: f64,
    /// Contracted afternoon hours. Zero means the afternoon is non-working.
    pub afternoon_hours: f64,
}

impl ContractDay {
    /// Creates a new `ContractDay`.
    #[must_use]
    pub const fn new(morning_hours: f64, afternoon_hours: f64) -> Self {
        Self {
            morning_hours,
            afternoon_hours,
        }
    }

    /// Total contracted hours for this weekday.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.morning_hours + self.afternoon_hours
    }

    /// Whether this weekday is a working day (either half-day is non-zero).
    #[must_use]
    pub fn is_working(&self) -> bool {
        self.morning_hours > 0.0 || self.afternoon_hours > 0.0
    }
}

/// A 7-entry mapping from weekday to contracted half-day hours.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeeklyContract {
    pub monday: ContractDay,
    pub tuesday: ContractDay,
    pub wednesday: ContractDay,
    pub thursday: ContractDay,
    pub friday: ContractDay,
    pub saturday: ContractDay,
    pub sunday: ContractDay,
}

impl WeeklyContract {
    /// Returns the contract entry for a weekday.
    #[must_use]
    pub const fn day(&self, weekday: Weekday) -> &ContractDay {
        match weekday {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    /// Returns the expected hours for a specific date via weekday lookup.
    #[must_use]
    pub const fn expected_hours(&self, date: Date) -> &ContractDay {
        self.day(date.weekday())
    }

    /// Whether the given date is a working day under this contract.
    #[must_use]
    pub fn is_working_day(&self, date: Date) -> bool {
        self.expected_hours(date).is_working()
    }

    /// Total contracted hours per week: the sum of all 14 half-day fields.
    #[must_use]
    pub fn weekly_total(&self) -> f64 {
        self.monday.total()
            + self.tuesday.total()
            + self.wednesday.total()
            + self.thursday.total()
            + self.friday.total()
            + self.saturday.total()
            + self.sunday.total()
    }
}
