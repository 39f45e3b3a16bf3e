// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vacation balance calculation.
//!
//! Pure, deterministic aggregation of the annual vacation allowance and
//! its consumption. A vacation day consumes the contracted hours of its
//! date, expressed in full-day equivalents (hours / 8), so a vacation
//! day on a short weekday costs less than a full day. Vacation dates
//! that coincide with a holiday consume nothing.

use crate::calendar::{self, STANDARD_FULL_DAY_HOURS};
use crate::contract::WeeklyContract;
use crate::error::DomainError;
use crate::types::{GlobalSettings, HolidayCalendar};
use crate::vacation_status::VacationDay;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::Date;

/// Tolerance applied by the selection guard to absorb 2-decimal rounding.
/// Used only here; do not propagate without justification.
const SELECTION_GUARD_TOLERANCE: f64 = -0.001;

/// The annual vacation balance for one user and year.
///
/// `remaining_days` is intentionally unclamped: it may go negative, and
/// presentation layers clamp it for display. Clamping here would corrupt
/// subsequent subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualBalance {
    /// Prorated annual allowance in days.
    pub effective_allowance: f64,
    /// Full-day equivalents consumed by counting vacation records.
    pub effective_days_used: f64,
    /// Allowance minus consumption. May be negative.
    pub remaining_days: f64,
}

/// The per-month day breakdown shown next to the vacation view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    /// Days of the month that are working days under the contract.
    pub workable_days: u32,
    /// Workable days that coincide with a holiday.
    pub holiday_days_counted: u32,
    /// Distinct dates of the month with a counting vacation record.
    pub calendar_vacation_days: u32,
    /// Full-day equivalents of those vacation dates (holidays excluded).
    pub vacation_equivalent_days: f64,
    /// Workable days minus holidays and vacation equivalents.
    pub effective_worked_days: f64,
}

/// Computes the prorated annual allowance in days.
#[must_use]
pub fn effective_allowance(settings: &GlobalSettings) -> f64 {
    calendar::round2(settings.annual_vacation_days_base * settings.work_rate_percent / 100.0)
}

/// Computes the annual vacation balance for a year.
///
/// Every vacation record of the year whose status counts against the
/// balance contributes the contracted hours of its date, unless the date
/// is also a holiday. Records outside the target year are ignored.
///
/// # Errors
///
/// Returns an error if a vacation record carries a malformed date key.
pub fn annual_balance(
    year: i32,
    vacations: &[VacationDay],
    holidays: &HolidayCalendar,
    contract: &WeeklyContract,
    settings: &GlobalSettings,
) -> Result<AnnualBalance, DomainError> {
    let allowance: f64 = effective_allowance(settings);

    let mut consumed_hours: f64 = 0.0;
    for vacation in vacations {
        if !vacation.status.counts_against_balance() {
            continue;
        }
        let date: Date = calendar::parse_date_key(&vacation.date_key)?;
        if date.year() != year {
            continue;
        }
        if holidays.contains(&vacation.date_key) {
            continue;
        }
        consumed_hours += contract.expected_hours(date).total();
    }

    let effective_days_used: f64 = calendar::round2(consumed_hours / STANDARD_FULL_DAY_HOURS);
    let remaining_days: f64 = calendar::round2(allowance - effective_days_used);

    Ok(AnnualBalance {
        effective_allowance: allowance,
        effective_days_used,
        remaining_days,
    })
}

/// Computes the day breakdown for the displayed month.
///
/// # Errors
///
/// Returns an error if the month is invalid or a vacation record carries
/// a malformed date key.
pub fn month_summary(
    year: i32,
    month: u8,
    contract: &WeeklyContract,
    holidays: &HolidayCalendar,
    vacations: &[VacationDay],
) -> Result<MonthSummary, DomainError> {
    let days: Vec<Date> = calendar::enumerate_days(year, month)?;

    let mut workable_days: u32 = 0;
    let mut holiday_days_counted: u32 = 0;
    for date in &days {
        if !contract.is_working_day(*date) {
            continue;
        }
        workable_days += 1;
        if holidays.contains(&calendar::date_key(*date)) {
            holiday_days_counted += 1;
        }
    }

    let month_prefix: String = format!("{year:04}-{month:02}-");
    let counting_dates: BTreeSet<&str> = vacations
        .iter()
        .filter(|day| day.status.counts_against_balance())
        .filter(|day| day.date_key.starts_with(&month_prefix))
        .map(|day| day.date_key.as_str())
        .collect();

    let calendar_vacation_days: u32 = u32::try_from(counting_dates.len()).unwrap_or(0);

    let mut vacation_hours: f64 = 0.0;
    for date_key in &counting_dates {
        if holidays.contains(date_key) {
            continue;
        }
        let date: Date = calendar::parse_date_key(date_key)?;
        vacation_hours += contract.expected_hours(date).total();
    }
    let vacation_equivalent_days: f64 =
        calendar::round2(vacation_hours / STANDARD_FULL_DAY_HOURS);

    let effective_worked_days: f64 = calendar::round2(
        f64::from(workable_days) - f64::from(holiday_days_counted) - vacation_equivalent_days,
    );

    Ok(MonthSummary {
        workable_days,
        holiday_days_counted,
        calendar_vacation_days,
        vacation_equivalent_days,
        effective_worked_days,
    })
}

/// Guard applied before inserting a *new* selected vacation day.
///
/// Existing records being re-evaluated are never passed through this
/// guard. The small negative tolerance absorbs the 2-decimal rounding of
/// the balance.
///
/// # Arguments
///
/// * `balance` - The current annual balance
/// * `day_equivalent` - Full-day equivalent of the date being selected
///
/// # Errors
///
/// Returns `DomainError::InsufficientBalance` if the balance is already
/// exhausted or the request would overdraw it beyond the tolerance.
pub fn check_selection(balance: &AnnualBalance, day_equivalent: f64) -> Result<(), DomainError> {
    if balance.remaining_days <= 0.0
        || balance.remaining_days - day_equivalent < SELECTION_GUARD_TOLERANCE
    {
        return Err(DomainError::InsufficientBalance {
            remaining: balance.remaining_days,
            requested: day_equivalent,
        });
    }
    Ok(())
}
