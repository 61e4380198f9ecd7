//! Entry session orchestration for the Production Incentive Engine.
//!
//! This module holds the mutable state of one production entry: the selected
//! building/nature/shift, the live context values, and the worker roster.
//! Every mutation recomputes the affected derived targets and incentives, and
//! submission hands the finished records to the external timesheet
//! collaborator.

mod entry;
mod submit;

pub use entry::{EntrySession, SessionState};
pub use submit::{EmployeeDirectory, InMemoryDirectory, TimesheetSink};
