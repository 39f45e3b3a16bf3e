// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod balance;
mod calendar;
mod contract;
mod derive;
mod error;
mod summary;
mod types;
mod vacation_status;

// Re-export public types
pub use balance::{
    AnnualBalance, MonthSummary, annual_balance, check_selection, effective_allowance,
    month_summary,
};
pub use calendar::{
    STANDARD_FULL_DAY_HOURS, date_key, day_name, duration, enumerate_days, parse_date_key, round2,
};
pub use contract::{ContractDay, WeeklyContract};
pub use derive::{derive_month, diff_entries};
pub use error::DomainError;
pub use summary::{SummaryData, summarize_month};
pub use types::{
    DailyLogEntry, EntryType, GlobalSettings, Holiday, HolidayCalendar, TimeSegment,
    WorkTimeDefaults,
};
pub use vacation_status::{VacationDay, VacationStatus};
