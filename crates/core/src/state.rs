// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use timecard_domain::{
    AnnualBalance, DailyLogEntry, GlobalSettings, HolidayCalendar, MonthSummary, SummaryData,
    VacationDay, WeeklyContract,
};

/// The complete per-session state for one user and one displayed month.
///
/// The workbook is an explicit aggregate: it is constructed from store
/// snapshots, mutated only through `apply`, and re-derives its canonical
/// daily log set whenever one of its inputs changes. There is no ambient
/// shared state.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthWorkbook {
    /// The user this workbook belongs to.
    pub user_id: i64,
    /// The displayed year.
    pub year: i32,
    /// The displayed month (1-12).
    pub month: u8,
    /// The current weekly contract.
    pub contract: WeeklyContract,
    /// Global settings snapshot.
    pub settings: GlobalSettings,
    /// Global holiday snapshot.
    pub holidays: HolidayCalendar,
    /// All vacation records of the displayed year (the balance reads a
    /// full-year snapshot; the month view is a projection of this set).
    pub annual_vacations: Vec<VacationDay>,
    /// User-authored raw log fragments for the displayed month. Updated
    /// by log edits only, never by derivation output, so removing an
    /// override reverts to the prior authored times within the session.
    pub raw_logs: Vec<DailyLogEntry>,
    /// The derived canonical daily log set, one entry per calendar day.
    daily_logs: Vec<DailyLogEntry>,
}

impl MonthWorkbook {
    /// Creates a workbook from store snapshots and runs the initial
    /// derivation.
    ///
    /// # Errors
    ///
    /// Returns an error if the month is invalid.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: i64,
        year: i32,
        month: u8,
        contract: WeeklyContract,
        settings: GlobalSettings,
        holidays: HolidayCalendar,
        annual_vacations: Vec<VacationDay>,
        raw_logs: Vec<DailyLogEntry>,
    ) -> Result<Self, CoreError> {
        let mut workbook: Self = Self {
            user_id,
            year,
            month,
            contract,
            settings,
            holidays,
            annual_vacations,
            raw_logs,
            daily_logs: Vec::new(),
        };
        workbook.rederive()?;
        Ok(workbook)
    }

    /// The `"YYYY-MM-"` prefix shared by every date key of the
    /// displayed month.
    #[must_use]
    pub fn month_prefix(&self) -> String {
        format!("{:04}-{:02}-", self.year, self.month)
    }

    /// Whether a date key belongs to the displayed month.
    #[must_use]
    pub fn contains_date_key(&self, date_key: &str) -> bool {
        date_key.starts_with(&self.month_prefix())
    }

    /// The derived daily log entries, ordered by date.
    #[must_use]
    pub fn daily_logs(&self) -> &[DailyLogEntry] {
        &self.daily_logs
    }

    /// The vacation records of the displayed month, ordered by date key.
    #[must_use]
    pub fn vacations(&self) -> Vec<VacationDay> {
        let prefix: String = self.month_prefix();
        let mut month_records: Vec<VacationDay> = self
            .annual_vacations
            .iter()
            .filter(|day| day.date_key.starts_with(&prefix))
            .cloned()
            .collect();
        month_records.sort_by(|a, b| a.date_key.cmp(&b.date_key));
        month_records
    }

    /// Returns the vacation record for a date key, if any.
    #[must_use]
    pub fn vacation_for(&self, date_key: &str) -> Option<&VacationDay> {
        self.annual_vacations
            .iter()
            .find(|day| day.date_key == date_key)
    }

    /// Computes the annual vacation balance from the current snapshots.
    ///
    /// # Errors
    ///
    /// Returns an error if a vacation record carries a malformed date key.
    pub fn annual_balance(&self) -> Result<AnnualBalance, CoreError> {
        timecard_domain::annual_balance(
            self.year,
            &self.annual_vacations,
            &self.holidays,
            &self.contract,
            &self.settings,
        )
        .map_err(CoreError::from)
    }

    /// Computes the monthly hour summary from the derived daily logs.
    ///
    /// # Errors
    ///
    /// Returns an error if the month is invalid.
    pub fn summary_data(&self) -> Result<SummaryData, CoreError> {
        timecard_domain::summarize_month(self.year, self.month, &self.contract, &self.daily_logs)
            .map_err(CoreError::from)
    }

    /// Computes the day breakdown for the displayed month.
    ///
    /// # Errors
    ///
    /// Returns an error if the month is invalid or a vacation record
    /// carries a malformed date key.
    pub fn month_summary(&self) -> Result<MonthSummary, CoreError> {
        timecard_domain::month_summary(
            self.year,
            self.month,
            &self.contract,
            &self.holidays,
            &self.annual_vacations,
        )
        .map_err(CoreError::from)
    }

    /// Re-derives the canonical daily log set and returns the entries
    /// that changed relative to the previous derivation.
    ///
    /// # Errors
    ///
    /// Returns an error if the month is invalid.
    pub(crate) fn rederive(&mut self) -> Result<Vec<DailyLogEntry>, CoreError> {
        let next: Vec<DailyLogEntry> = timecard_domain::derive_month(
            self.year,
            self.month,
            &self.contract,
            &self.holidays,
            &self.annual_vacations,
            &self.raw_logs,
        )?;
        let changed: Vec<DailyLogEntry> = timecard_domain::diff_entries(&self.daily_logs, &next);
        self.daily_logs = next;
        Ok(changed)
    }
}

/// The record writes produced by a transition, forwarded to the store.
///
/// Only what actually changed is queued: an apply whose derivation
/// reproduces the previous snapshot contributes no log writes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WriteSet {
    /// Derived daily log entries that differ from the previous set.
    pub log_entries: Vec<DailyLogEntry>,
    /// Whether the vacation set of the displayed month changed.
    pub vacations_changed: bool,
    /// Whether the weekly contract changed.
    pub contract_changed: bool,
}

impl WriteSet {
    /// Creates an empty write set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            log_entries: Vec::new(),
            vacations_changed: false,
            contract_changed: false,
        }
    }

    /// Whether this write set carries no writes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log_entries.is_empty() && !self.vacations_changed && !self.contract_changed
    }
}

/// The result of a successful workbook transition.
///
/// Transitions are pure: they either succeed completely or fail without
/// side effects on the previous workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The new workbook after the transition.
    pub new_workbook: MonthWorkbook,
    /// The writes to forward to the store.
    pub writes: WriteSet,
}
