// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{MonthWorkbook, TransitionResult, WriteSet};
use time::Date;
use timecard_domain::{
    AnnualBalance, DailyLogEntry, DomainError, EntryType, STANDARD_FULL_DAY_HOURS, TimeSegment,
    VacationDay, VacationStatus,
};

/// Applies a command to the workbook, producing the new workbook and
/// the writes to forward to the store.
///
/// Every successful transition re-derives the canonical daily log set
/// and diffs it against the previous one, so the write set only carries
/// entries that actually changed.
///
/// # Arguments
///
/// * `workbook` - The current workbook (immutable)
/// * `command` - The command to apply
///
/// # Errors
///
/// Returns an error if the command violates domain rules or targets a
/// date outside the displayed month.
pub fn apply(workbook: &MonthWorkbook, command: Command) -> Result<TransitionResult, CoreError> {
    let mut next: MonthWorkbook = workbook.clone();
    let mut writes: WriteSet = WriteSet::new();

    match command {
        Command::SetWeeklyContract { contract } => {
            next.contract = contract;
            writes.contract_changed = true;
        }
        Command::SetHolidayCalendar { holidays } => {
            next.holidays = holidays;
        }
        Command::EditLogEntry { entry } => {
            ensure_in_month(workbook, &entry.date_key)?;
            let normalized: DailyLogEntry = normalize_entry(&entry, workbook);
            upsert_raw_log(&mut next, normalized);
        }
        Command::SelectVacationDay { date_key } => {
            ensure_in_month(workbook, &date_key)?;
            writes.vacations_changed = select_vacation_day(workbook, &mut next, &date_key)?;
        }
        Command::DeleteVacationDay { date_key } => {
            ensure_in_month(workbook, &date_key)?;
            delete_vacation_day(&mut next, &date_key)?;
            writes.vacations_changed = true;
        }
        Command::SubmitForApproval => {
            writes.vacations_changed = submit_for_approval(&mut next)?;
        }
        Command::ApproveVacationDay { date_key, comment } => {
            ensure_in_month(workbook, &date_key)?;
            decide_vacation_day(&mut next, &date_key, VacationStatus::Approved, comment)?;
            writes.vacations_changed = true;
        }
        Command::RejectVacationDay { date_key, comment } => {
            ensure_in_month(workbook, &date_key)?;
            decide_vacation_day(&mut next, &date_key, VacationStatus::Rejected, comment)?;
            writes.vacations_changed = true;
        }
    }

    writes.log_entries = next.rederive()?;

    Ok(TransitionResult {
        new_workbook: next,
        writes,
    })
}

/// Rejects commands that target a date outside the displayed month.
fn ensure_in_month(workbook: &MonthWorkbook, date_key: &str) -> Result<(), CoreError> {
    if workbook.contains_date_key(date_key) {
        Ok(())
    } else {
        Err(CoreError::OutsideDisplayedMonth {
            date_key: date_key.to_string(),
            year: workbook.year,
            month: workbook.month,
        })
    }
}

/// Rebuilds an edited entry so the segment invariant holds: non-regular
/// segments carry cleared times, and `has_inputs` is recomputed.
fn normalize_entry(entry: &DailyLogEntry, workbook: &MonthWorkbook) -> DailyLogEntry {
    DailyLogEntry::new(
        entry.date,
        normalize_segment(&entry.morning),
        normalize_segment(&entry.afternoon),
        workbook.contract.is_working_day(entry.date),
    )
}

fn normalize_segment(segment: &TimeSegment) -> TimeSegment {
    if segment.entry_type == EntryType::Regular {
        segment.clone()
    } else {
        TimeSegment::absence(segment.entry_type)
    }
}

/// Replaces or inserts a raw log fragment by date key.
fn upsert_raw_log(workbook: &mut MonthWorkbook, entry: DailyLogEntry) {
    if let Some(existing) = workbook
        .raw_logs
        .iter_mut()
        .find(|raw| raw.date_key == entry.date_key)
    {
        *existing = entry;
    } else {
        workbook.raw_logs.push(entry);
    }
}

/// Toggle-selects a vacation day.
///
/// Returns whether the vacation set changed (always true on success).
fn select_vacation_day(
    workbook: &MonthWorkbook,
    next: &mut MonthWorkbook,
    date_key: &str,
) -> Result<bool, CoreError> {
    if let Some(existing) = workbook.vacation_for(date_key) {
        // Clicking an existing record removes it, except approved ones.
        if existing.status == VacationStatus::Approved {
            return Err(CoreError::DomainViolation(
                DomainError::VacationDayApproved {
                    date_key: date_key.to_string(),
                },
            ));
        }
        next.annual_vacations.retain(|day| day.date_key != date_key);
        return Ok(true);
    }

    if workbook.holidays.contains(date_key) {
        return Err(CoreError::DomainViolation(DomainError::DayIsHoliday {
            date_key: date_key.to_string(),
        }));
    }

    // Balance guard, applied to new selections only.
    let date: Date = timecard_domain::parse_date_key(date_key).map_err(CoreError::from)?;
    let day_equivalent: f64 =
        workbook.contract.expected_hours(date).total() / STANDARD_FULL_DAY_HOURS;
    let balance: AnnualBalance = workbook.annual_balance()?;
    timecard_domain::check_selection(&balance, day_equivalent)?;

    next.annual_vacations.push(VacationDay::selected(date_key));
    Ok(true)
}

/// Deletes a vacation day, provided its status permits user deletion.
fn delete_vacation_day(next: &mut MonthWorkbook, date_key: &str) -> Result<(), CoreError> {
    let Some(existing) = next.vacation_for(date_key) else {
        return Err(CoreError::DomainViolation(
            DomainError::VacationDayNotFound {
                date_key: date_key.to_string(),
            },
        ));
    };

    if !existing.status.is_user_deletable() {
        return Err(CoreError::DomainViolation(
            DomainError::VacationDayApproved {
                date_key: date_key.to_string(),
            },
        ));
    }

    next.annual_vacations.retain(|day| day.date_key != date_key);
    Ok(())
}

/// Advances every selected record of the displayed month to pending
/// approval. Returns whether any record changed.
fn submit_for_approval(next: &mut MonthWorkbook) -> Result<bool, CoreError> {
    let prefix: String = next.month_prefix();
    let mut changed: bool = false;

    for day in &mut next.annual_vacations {
        if !day.date_key.starts_with(&prefix) || day.status != VacationStatus::Selected {
            continue;
        }
        day.status
            .validate_transition(VacationStatus::PendingApproval)?;
        day.status = VacationStatus::PendingApproval;
        changed = true;
    }

    Ok(changed)
}

/// Applies an approver decision to a pending record.
fn decide_vacation_day(
    next: &mut MonthWorkbook,
    date_key: &str,
    decision: VacationStatus,
    comment: Option<String>,
) -> Result<(), CoreError> {
    let Some(day) = next
        .annual_vacations
        .iter_mut()
        .find(|day| day.date_key == date_key)
    else {
        return Err(CoreError::DomainViolation(
            DomainError::VacationDayNotFound {
                date_key: date_key.to_string(),
            },
        ));
    };

    day.status.validate_transition(decision)?;
    day.status = decision;
    day.admin_comment = comment;
    Ok(())
}
