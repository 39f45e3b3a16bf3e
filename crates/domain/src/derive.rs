// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Canonical daily log derivation for one month.
//!
//! Derivation overlays the holiday snapshot and the active vacation
//! records onto the persisted raw entries, with a fixed override
//! priority per day (first match wins):
//!
//! 1. Holiday → both segments become `Holiday` absences.
//! 2. Active vacation record → both segments become `Vacation` absences.
//! 3. Persisted raw entry → copied verbatim, except segments whose stored
//!    `Vacation`/`Holiday` type is no longer justified are reset to an
//!    empty `Regular` segment.
//! 4. Otherwise → empty `Regular` segments.
//!
//! The result is deterministic and idempotent: deriving twice from the
//! same snapshot yields field-identical entries, so callers can diff the
//! result against the previous set and only persist what changed.

use crate::calendar;
use crate::contract::WeeklyContract;
use crate::error::DomainError;
use crate::types::{DailyLogEntry, EntryType, HolidayCalendar, TimeSegment};
use crate::vacation_status::VacationDay;
use std::collections::{BTreeMap, BTreeSet};
use time::Date;

/// Derives the full ordered set of daily log entries for a month.
///
/// # Arguments
///
/// * `year` - The target year
/// * `month` - The target month (1-12)
/// * `contract` - The current weekly contract
/// * `holidays` - The global holiday snapshot
/// * `vacations` - Vacation-day records (records outside the month are ignored)
/// * `raw_logs` - Previously persisted raw entries for this month
///
/// # Returns
///
/// One `DailyLogEntry` per calendar day of the month, ordered by date.
///
/// # Errors
///
/// Returns an error if the month is invalid.
pub fn derive_month(
    year: i32,
    month: u8,
    contract: &WeeklyContract,
    holidays: &HolidayCalendar,
    vacations: &[VacationDay],
    raw_logs: &[DailyLogEntry],
) -> Result<Vec<DailyLogEntry>, DomainError> {
    let days: Vec<Date> = calendar::enumerate_days(year, month)?;

    let raw_by_key: BTreeMap<&str, &DailyLogEntry> = raw_logs
        .iter()
        .map(|entry| (entry.date_key.as_str(), entry))
        .collect();

    let active_vacations: BTreeSet<&str> = vacations
        .iter()
        .filter(|day| day.status.counts_against_balance())
        .map(|day| day.date_key.as_str())
        .collect();

    let mut entries: Vec<DailyLogEntry> = Vec::with_capacity(days.len());
    for date in days {
        let date_key: String = calendar::date_key(date);
        let is_working_day: bool = contract.is_working_day(date);

        let entry: DailyLogEntry = if holidays.contains(&date_key) {
            DailyLogEntry::new(
                date,
                TimeSegment::absence(EntryType::Holiday),
                TimeSegment::absence(EntryType::Holiday),
                is_working_day,
            )
        } else if active_vacations.contains(date_key.as_str()) {
            DailyLogEntry::new(
                date,
                TimeSegment::absence(EntryType::Vacation),
                TimeSegment::absence(EntryType::Vacation),
                is_working_day,
            )
        } else if let Some(raw) = raw_by_key.get(date_key.as_str()) {
            DailyLogEntry::new(
                date,
                sanitize_segment(&raw.morning),
                sanitize_segment(&raw.afternoon),
                is_working_day,
            )
        } else {
            DailyLogEntry::empty(date, is_working_day)
        };

        entries.push(entry);
    }

    Ok(entries)
}

/// Copies a raw segment, resetting stale overrides.
///
/// A stored `Vacation` or `Holiday` type reaching this point means the
/// record that justified it has since been removed; the segment falls
/// back to an empty `Regular` one.
fn sanitize_segment(segment: &TimeSegment) -> TimeSegment {
    match segment.entry_type {
        EntryType::Vacation | EntryType::Holiday => TimeSegment::default(),
        EntryType::Regular | EntryType::Recuperation | EntryType::Sick => segment.clone(),
    }
}

/// Returns the entries of `next` that differ from their counterpart in
/// `previous`, the write-set forwarded to the log store.
///
/// An entry with no counterpart counts as changed. Entries are compared
/// field-for-field, so an unchanged snapshot produces an empty diff and
/// triggers no persistence writes.
#[must_use]
pub fn diff_entries(previous: &[DailyLogEntry], next: &[DailyLogEntry]) -> Vec<DailyLogEntry> {
    let previous_by_key: BTreeMap<&str, &DailyLogEntry> = previous
        .iter()
        .map(|entry| (entry.date_key.as_str(), entry))
        .collect();

    next.iter()
        .filter(|entry| {
            previous_by_key
                .get(entry.date_key.as_str())
                .is_none_or(|prior| *prior != *entry)
        })
        .cloned()
        .collect()
}
