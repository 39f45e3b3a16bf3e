// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vacation-day records and their status lifecycle.
//!
//! The lifecycle is `Selected → PendingApproval → {Approved, Rejected}`.
//! `Approved` is terminal for the end user; every other status is
//! user-deletable. Approve and reject are invoked by an external actor,
//! never by the owning user.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Status of a vacation-day record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VacationStatus {
    /// Selected by the user, not yet submitted.
    Selected,
    /// Submitted and awaiting the approver's decision.
    PendingApproval,
    /// Approved by the approver. Terminal for the end user.
    Approved,
    /// Rejected by the approver.
    Rejected,
}

impl VacationStatus {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Selected => "selected",
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidVacationStatus` if the string is not
    /// a valid status.
    pub fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "selected" => Ok(Self::Selected),
            "pending_approval" => Ok(Self::PendingApproval),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidVacationStatus(s.to_string())),
        }
    }

    /// Whether a record in this status consumes vacation balance and
    /// overrides the daily log during derivation.
    #[must_use]
    pub const fn counts_against_balance(&self) -> bool {
        matches!(self, Self::Selected | Self::PendingApproval | Self::Approved)
    }

    /// Whether the owning user may delete a record in this status.
    #[must_use]
    pub const fn is_user_deletable(&self) -> bool {
        !matches!(self, Self::Approved)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        let valid: bool = matches!(
            (self, new_status),
            (Self::Selected, Self::PendingApproval)
                | (Self::PendingApproval, Self::Approved | Self::Rejected)
        );

        if valid {
            Ok(())
        } else {
            let reason: &str = if matches!(self, Self::Approved) {
                "approved is terminal"
            } else {
                "transition not permitted by the status lifecycle"
            };
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: reason.to_string(),
            })
        }
    }
}

impl FromStr for VacationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// A vacation-day request. At most one record exists per (user, date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationDay {
    /// Canonical `"YYYY-MM-DD"` date of the requested day.
    pub date_key: String,
    /// Current lifecycle status.
    pub status: VacationStatus,
    /// Comment attached by the approver on approve/reject.
    pub admin_comment: Option<String>,
}

impl VacationDay {
    /// Creates a freshly selected vacation day.
    #[must_use]
    pub fn selected(date_key: impl Into<String>) -> Self {
        Self {
            date_key: date_key.into(),
            status: VacationStatus::Selected,
            admin_comment: None,
        }
    }
}
