//! Timesheet submission models.
//!
//! This module defines the [`TimesheetRecord`] payload emitted per worker at
//! submit time and the [`SubmissionSummary`] reporting partial-success counts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One persisted timesheet/incentive record, emitted per worker per entry.
///
/// The external timesheet collaborator owns persistence; this is the
/// complete payload it receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetRecord {
    /// The production date of the entry.
    pub date: NaiveDate,
    /// The building code the entry was made against.
    pub building: String,
    /// The production nature code the entry was made against.
    pub nature: String,
    /// The shift code the entry was made against.
    pub shift: String,
    /// The worker's employee code.
    pub emp_code: String,
    /// The worker's display name.
    pub emp_name: String,
    /// The quantity produced.
    pub produced_qty: Decimal,
    /// The hours the worker worked on the entry.
    pub worked_hrs: Decimal,
    /// The target quantity the worker was measured against.
    pub target: Decimal,
    /// The signed incentive amount awarded.
    pub incentive: Decimal,
    /// The manpower value the entry was evaluated with.
    pub manpower: Decimal,
    /// The norms value the entry was evaluated with.
    pub norms: Decimal,
}

/// The outcome of a batch submission.
///
/// Records are submitted sequentially and individual failures do not abort
/// the batch, so a summary can report any mix of success and failure.
///
/// # Example
///
/// ```
/// use incentive_engine::models::SubmissionSummary;
///
/// let summary = SubmissionSummary { submitted: 3, failed: 1 };
/// assert_eq!(summary.total(), 4);
/// assert!(!summary.is_complete());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionSummary {
    /// The number of records accepted by the collaborator.
    pub submitted: usize,
    /// The number of records the collaborator rejected.
    pub failed: usize,
}

impl SubmissionSummary {
    /// Returns the total number of records attempted.
    pub fn total(&self) -> usize {
        self.submitted + self.failed
    }

    /// Returns true when every record was accepted.
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}
