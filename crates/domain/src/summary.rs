// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monthly hour summary.
//!
//! Rolls the derived daily logs of a month into the hour figures shown
//! in the summary panel: contracted weekly hours, planned monthly hours
//! (expected hours minus absence overrides), worked-plus-sick hours, and
//! the signed overtime/shortfall difference.

use crate::calendar;
use crate::contract::{ContractDay, WeeklyContract};
use crate::error::DomainError;
use crate::types::{DailyLogEntry, EntryType, TimeSegment};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;

/// The monthly hour summary. All values rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryData {
    /// Total contracted hours per week.
    pub contracted_weekly_hours: f64,
    /// Hours planned for the month after absence overrides.
    pub planned_monthly_hours: f64,
    /// Clock hours worked plus contracted hours of sick segments.
    pub worked_plus_sick_hours: f64,
    /// Worked-plus-sick minus planned. Positive means overtime, negative
    /// means shortfall.
    pub overtime_or_missed_hours: f64,
}

/// Rolls the daily logs of a month into a `SummaryData`.
///
/// # Arguments
///
/// * `year` - The target year
/// * `month` - The target month (1-12)
/// * `contract` - The current weekly contract
/// * `daily_logs` - The derived daily log entries of the month
///
/// # Errors
///
/// Returns an error if the month is invalid.
pub fn summarize_month(
    year: i32,
    month: u8,
    contract: &WeeklyContract,
    daily_logs: &[DailyLogEntry],
) -> Result<SummaryData, DomainError> {
    let days: Vec<Date> = calendar::enumerate_days(year, month)?;

    let logs_by_key: BTreeMap<&str, &DailyLogEntry> = daily_logs
        .iter()
        .map(|entry| (entry.date_key.as_str(), entry))
        .collect();

    let mut planned: f64 = 0.0;
    for date in &days {
        let expected: &ContractDay = contract.expected_hours(*date);
        let mut day_planned: f64 = expected.total();

        if let Some(entry) = logs_by_key.get(calendar::date_key(*date).as_str()) {
            if entry.morning.entry_type != EntryType::Regular {
                day_planned -= expected.morning_hours;
            }
            if entry.afternoon.entry_type != EntryType::Regular {
                day_planned -= expected.afternoon_hours;
            }
        }

        planned += day_planned.max(0.0);
    }

    let mut worked: f64 = 0.0;
    for entry in daily_logs {
        let expected: &ContractDay = contract.expected_hours(entry.date);
        worked += segment_worked_hours(&entry.morning, expected.morning_hours);
        worked += segment_worked_hours(&entry.afternoon, expected.afternoon_hours);
    }

    let planned: f64 = calendar::round2(planned);
    let worked: f64 = calendar::round2(worked);

    Ok(SummaryData {
        contracted_weekly_hours: calendar::round2(contract.weekly_total()),
        planned_monthly_hours: planned,
        worked_plus_sick_hours: worked,
        overtime_or_missed_hours: calendar::round2(worked - planned),
    })
}

/// Hours one segment contributes to the worked-plus-sick total.
///
/// Sick counts contracted hours rather than clock time; vacation,
/// holiday and recuperation count nothing.
fn segment_worked_hours(segment: &TimeSegment, contracted_hours: f64) -> f64 {
    match segment.entry_type {
        EntryType::Regular => segment.clock_hours(),
        EntryType::Sick => contracted_hours,
        EntryType::Vacation | EntryType::Holiday | EntryType::Recuperation => 0.0,
    }
}
