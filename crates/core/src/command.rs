// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use timecard_domain::{DailyLogEntry, HolidayCalendar, WeeklyContract};

/// A command represents user or approver intent as data only.
///
/// Commands are the only way to request workbook changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace the weekly contract.
    SetWeeklyContract {
        /// The new contract.
        contract: WeeklyContract,
    },
    /// Replace the global holiday snapshot (holiday list updated by the
    /// external collaborator).
    SetHolidayCalendar {
        /// The new holiday snapshot.
        holidays: HolidayCalendar,
    },
    /// Edit one raw daily log entry.
    EditLogEntry {
        /// The edited entry. Must belong to the displayed month.
        entry: DailyLogEntry,
    },
    /// Toggle-select a vacation day: inserts a new selected record, or
    /// removes an existing non-approved one.
    SelectVacationDay {
        /// The target date key.
        date_key: String,
    },
    /// Delete a non-approved vacation day.
    DeleteVacationDay {
        /// The target date key.
        date_key: String,
    },
    /// Advance every selected record of the displayed month to
    /// pending approval.
    SubmitForApproval,
    /// Approve a pending vacation day (approver action).
    ApproveVacationDay {
        /// The target date key.
        date_key: String,
        /// Optional approver comment.
        comment: Option<String>,
    },
    /// Reject a pending vacation day (approver action).
    RejectVacationDay {
        /// The target date key.
        date_key: String,
        /// Optional approver comment.
        comment: Option<String>,
    },
}
