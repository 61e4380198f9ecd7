//! Core data models for the Production Incentive Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod employee;
mod submission;
mod worker_entry;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, EntryCalculation, EntryTotals, IncentiveCategory,
    IncentiveLine, WorkerIncentive,
};
pub use employee::Employee;
pub use submission::{SubmissionSummary, TimesheetRecord};
pub use worker_entry::WorkerEntry;
