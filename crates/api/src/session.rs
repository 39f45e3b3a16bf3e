// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The per-session workbook service consumed by the UI layer.

use std::collections::BTreeSet;

use tracing::{info, warn};

use timecard::{Command, MonthWorkbook, TransitionResult, WriteSet, apply};
use timecard_domain::{
    DailyLogEntry, GlobalSettings, HolidayCalendar, MonthSummary, SummaryData, VacationDay,
    VacationStatus, WeeklyContract, diff_entries, effective_allowance,
};
use timecard_persistence::Store;

use crate::error::ApiError;

/// The outcome of a batch status operation.
///
/// Batch operations keep going past individual failures and report the
/// aggregate, so a single bad record never blocks the rest of the month.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchOutcome {
    /// Date keys that were processed and persisted.
    pub succeeded: Vec<String>,
    /// Date keys that failed, with the failure message.
    pub failed: Vec<(String, String)>,
}

impl BatchOutcome {
    /// Whether every item in the batch succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A live editing session over one user's displayed month.
///
/// The session owns the store handle and a [`MonthWorkbook`]. Every
/// mutator commits the in-memory transition first and then writes the
/// transition's write set to the store; a store failure is surfaced to
/// the caller but never rolls the in-memory state back. The store catches
/// up on the next successful write of the same rows.
#[derive(Debug)]
pub struct WorkbookSession {
    store: Store,
    workbook: MonthWorkbook,
}

impl WorkbookSession {
    /// Opens a session for one user and displayed month.
    ///
    /// Loads the persisted snapshots, runs the initial derivation, and
    /// persists any entries the derivation changed (for example when the
    /// holiday snapshot moved since the rows were written). Days without
    /// any input and without a stored row stay unpersisted; they are
    /// fully reproducible from the contract on the next open.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the month is invalid.
    pub fn open(
        store: Store,
        user_id: i64,
        year: i32,
        month: u8,
        settings: GlobalSettings,
        holidays: HolidayCalendar,
    ) -> Result<Self, ApiError> {
        let contract: WeeklyContract = store
            .load_weekly_contract(user_id, year, month)?
            .unwrap_or_default();
        let raw_logs: Vec<DailyLogEntry> = store.load_daily_logs_for_month(user_id, year, month)?;
        let annual_vacations: Vec<VacationDay> = store.load_vacations_for_year(user_id, year)?;

        let workbook: MonthWorkbook = MonthWorkbook::new(
            user_id,
            year,
            month,
            contract,
            settings,
            holidays,
            annual_vacations,
            raw_logs.clone(),
        )?;

        let stored_keys: BTreeSet<&str> =
            raw_logs.iter().map(|entry| entry.date_key.as_str()).collect();
        let changed: Vec<DailyLogEntry> = diff_entries(&raw_logs, workbook.daily_logs())
            .into_iter()
            .filter(|entry| entry.has_inputs || stored_keys.contains(entry.date_key.as_str()))
            .collect();
        for entry in &changed {
            store.save_daily_log(user_id, entry)?;
        }

        info!(
            user_id,
            year,
            month,
            reconciled = changed.len(),
            "Opened workbook session"
        );
        Ok(Self { store, workbook })
    }

    /// The weekly contract currently in effect.
    #[must_use]
    pub fn weekly_contract(&self) -> &WeeklyContract {
        &self.workbook.contract
    }

    /// The derived daily log entries of the displayed month.
    #[must_use]
    pub fn daily_logs(&self) -> &[DailyLogEntry] {
        self.workbook.daily_logs()
    }

    /// The vacation records of the displayed month.
    #[must_use]
    pub fn vacations(&self) -> Vec<VacationDay> {
        self.workbook.vacations()
    }

    /// The monthly hour summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the summary cannot be computed.
    pub fn summary_data(&self) -> Result<SummaryData, ApiError> {
        Ok(self.workbook.summary_data()?)
    }

    /// The day breakdown of the displayed month.
    ///
    /// # Errors
    ///
    /// Returns an error if the breakdown cannot be computed.
    pub fn month_summary(&self) -> Result<MonthSummary, ApiError> {
        Ok(self.workbook.month_summary()?)
    }

    /// The remaining annual vacation balance in days. May be negative
    /// when rounding of partial days overdraws the allowance.
    ///
    /// # Errors
    ///
    /// Returns an error if a vacation record carries a malformed date key.
    pub fn remaining_annual_vacation_days(&self) -> Result<f64, ApiError> {
        Ok(self.workbook.annual_balance()?.remaining_days)
    }

    /// The effective annual allowance in days, scaled by the work rate.
    #[must_use]
    pub fn effective_annual_allowance(&self) -> f64 {
        effective_allowance(&self.workbook.settings)
    }

    /// Replaces the weekly contract and re-derives the month.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is rejected or persistence
    /// fails after the in-memory commit.
    pub fn set_weekly_contract(&mut self, contract: WeeklyContract) -> Result<(), ApiError> {
        let writes: WriteSet = self.commit(Command::SetWeeklyContract { contract })?;
        self.persist(&writes)
    }

    /// Replaces the holiday snapshot and re-derives the month.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is rejected or persistence
    /// fails after the in-memory commit.
    pub fn set_holiday_calendar(&mut self, holidays: HolidayCalendar) -> Result<(), ApiError> {
        let writes: WriteSet = self.commit(Command::SetHolidayCalendar { holidays })?;
        self.persist(&writes)
    }

    /// Upserts a raw log entry for one day of the displayed month.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry targets another month or
    /// persistence fails after the in-memory commit.
    pub fn edit_log_entry(&mut self, entry: DailyLogEntry) -> Result<(), ApiError> {
        let writes: WriteSet = self.commit(Command::EditLogEntry { entry })?;
        self.persist(&writes)
    }

    /// Toggles a vacation selection on one day of the displayed month.
    ///
    /// # Errors
    ///
    /// Returns an error if the day is a holiday, the record is approved,
    /// the balance is exhausted, or persistence fails after the
    /// in-memory commit.
    pub fn select_vacation_day(&mut self, date_key: &str) -> Result<(), ApiError> {
        let writes: WriteSet = self.commit(Command::SelectVacationDay {
            date_key: date_key.to_string(),
        })?;
        self.persist(&writes)
    }

    /// Deletes a non-approved vacation record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not exist, is approved, or
    /// persistence fails after the in-memory commit.
    pub fn delete_vacation_day(&mut self, date_key: &str) -> Result<(), ApiError> {
        let writes: WriteSet = self.commit(Command::DeleteVacationDay {
            date_key: date_key.to_string(),
        })?;
        self.persist(&writes)
    }

    /// Submits every selected day of the displayed month for approval.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition itself is rejected. Store
    /// failures after the commit are reported in the outcome instead.
    pub fn submit_for_approval(&mut self) -> Result<BatchOutcome, ApiError> {
        let submitted: Vec<String> = self.month_keys_with_status(VacationStatus::Selected);
        if submitted.is_empty() {
            return Ok(BatchOutcome::default());
        }

        let writes: WriteSet = self.commit(Command::SubmitForApproval)?;
        match self.persist(&writes) {
            Ok(()) => Ok(BatchOutcome {
                succeeded: submitted,
                failed: Vec::new(),
            }),
            Err(err) => {
                warn!(error = %err, "Submitted days were not persisted");
                let message: String = err.to_string();
                Ok(BatchOutcome {
                    succeeded: Vec::new(),
                    failed: submitted
                        .into_iter()
                        .map(|date_key| (date_key, message.clone()))
                        .collect(),
                })
            }
        }
    }

    /// Approves one pending vacation day.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is not pending approval or
    /// persistence fails after the in-memory commit.
    pub fn approve(&mut self, date_key: &str, comment: Option<String>) -> Result<(), ApiError> {
        let writes: WriteSet = self.commit(Command::ApproveVacationDay {
            date_key: date_key.to_string(),
            comment,
        })?;
        self.persist(&writes)
    }

    /// Rejects one pending vacation day.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is not pending approval or
    /// persistence fails after the in-memory commit.
    pub fn reject(&mut self, date_key: &str, comment: Option<String>) -> Result<(), ApiError> {
        let writes: WriteSet = self.commit(Command::RejectVacationDay {
            date_key: date_key.to_string(),
            comment,
        })?;
        self.persist(&writes)
    }

    /// Approves every pending day of the displayed month, continuing
    /// past individual failures. Per-day transition and store failures
    /// are reported in the outcome rather than returned.
    pub fn approve_all_pending(&mut self, comment: Option<String>) -> BatchOutcome {
        let pending: Vec<String> = self.month_keys_with_status(VacationStatus::PendingApproval);
        let mut outcome: BatchOutcome = BatchOutcome::default();
        let mut writes: WriteSet = WriteSet::new();

        for date_key in pending {
            let command: Command = Command::ApproveVacationDay {
                date_key: date_key.clone(),
                comment: comment.clone(),
            };
            match apply(&self.workbook, command) {
                Ok(result) => {
                    self.workbook = result.new_workbook;
                    writes.log_entries.extend(result.writes.log_entries);
                    writes.vacations_changed |= result.writes.vacations_changed;
                    outcome.succeeded.push(date_key);
                }
                Err(err) => {
                    warn!(date_key = %date_key, error = %err, "Skipping day in batch approval");
                    outcome.failed.push((date_key, err.to_string()));
                }
            }
        }

        if let Err(err) = self.persist(&writes) {
            warn!(error = %err, "Approved days were not persisted");
            let message: String = err.to_string();
            outcome.failed.extend(
                std::mem::take(&mut outcome.succeeded)
                    .into_iter()
                    .map(|date_key| (date_key, message.clone())),
            );
        }
        outcome
    }

    /// Applies a command and commits the resulting workbook.
    fn commit(&mut self, command: Command) -> Result<WriteSet, ApiError> {
        let result: TransitionResult = apply(&self.workbook, command)?;
        self.workbook = result.new_workbook;
        Ok(result.writes)
    }

    /// Writes a transition's write set to the store.
    fn persist(&mut self, writes: &WriteSet) -> Result<(), ApiError> {
        let user_id: i64 = self.workbook.user_id;

        if writes.contract_changed {
            self.store.save_weekly_contract(
                user_id,
                self.workbook.year,
                self.workbook.month,
                &self.workbook.contract,
            )?;
        }
        for entry in &writes.log_entries {
            self.store.save_daily_log(user_id, entry)?;
        }
        if writes.vacations_changed {
            let vacations: Vec<VacationDay> = self.workbook.vacations();
            self.store.save_vacations_for_month(
                user_id,
                self.workbook.year,
                self.workbook.month,
                &vacations,
            )?;
        }
        Ok(())
    }

    fn month_keys_with_status(&self, status: VacationStatus) -> Vec<String> {
        self.workbook
            .vacations()
            .into_iter()
            .filter(|day| day.status == status)
            .map(|day| day.date_key)
            .collect()
    }
}
