//! Calculation result models for the Production Incentive Engine.
//!
//! This module contains the [`EntryCalculation`] type and its associated
//! structures that capture all outputs from an incentive evaluation,
//! including per-band lines, per-worker results, totals, and audit traces.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the kind of incentive a line item was paid under.
///
/// # Example
///
/// ```
/// use incentive_engine::models::IncentiveCategory;
///
/// let category = IncentiveCategory::Surplus;
/// assert_eq!(format!("{:?}", category), "Surplus");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncentiveCategory {
    /// Flat bonus paid when produced quantity equals the target exactly.
    ExactBonus,
    /// Linear deduction for producing below the comparison target.
    Shortfall,
    /// Banded payout for producing above the comparison target.
    Surplus,
}

/// A single band-level line item in an incentive calculation.
///
/// Each line captures the units attributed to one payout band, the band's
/// rate, and the resulting (unsigned, unscaled) amount. A cascading surplus
/// produces one line per band it touches.
///
/// # Example
///
/// ```
/// use incentive_engine::models::{IncentiveCategory, IncentiveLine};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let line = IncentiveLine {
///     category: IncentiveCategory::Surplus,
///     band_min: Decimal::ZERO,
///     band_max: Some(Decimal::from_str("10").unwrap()),
///     units: Decimal::from_str("10").unwrap(),
///     each: Decimal::ONE,
///     rate: Decimal::ONE,
///     amount: Decimal::from_str("10").unwrap(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentiveLine {
    /// The category of this line.
    pub category: IncentiveCategory,
    /// The lower bound of the band this line was paid under.
    pub band_min: Decimal,
    /// The upper bound of the band, or `None` for the open-ended top band.
    pub band_max: Option<Decimal>,
    /// The number of units attributed to this band.
    pub units: Decimal,
    /// The unit denominator of the band (payout is per `each` units).
    pub each: Decimal,
    /// The payout per `each` units.
    pub rate: Decimal,
    /// The amount this band contributed (units / each * rate).
    pub amount: Decimal,
}

/// The evaluated incentive outcome for one worker on the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerIncentive {
    /// The worker's employee code.
    pub emp_code: String,
    /// The worker's display name.
    pub name: String,
    /// The produced quantity used in the evaluation.
    pub produced_qty: Decimal,
    /// The worked hours used in the evaluation.
    pub worked_hrs: Decimal,
    /// The derived target quantity for this worker.
    pub target: Decimal,
    /// The signed, rounded incentive amount.
    pub incentive: Decimal,
    /// The band-level breakdown behind the incentive.
    pub lines: Vec<IncentiveLine>,
}

/// Aggregated totals for an entry evaluation.
///
/// # Example
///
/// ```
/// use incentive_engine::models::EntryTotals;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let totals = EntryTotals {
///     total_incentive: Decimal::from_str("340.50").unwrap(),
///     total_produced: Decimal::from_str("1200").unwrap(),
///     total_worked_hrs: Decimal::from_str("32").unwrap(),
///     worker_count: 4,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryTotals {
    /// The sum of all workers' signed incentives.
    pub total_incentive: Decimal,
    /// The sum of all workers' produced quantities.
    pub total_produced: Decimal,
    /// The sum of all workers' worked hours.
    pub total_worked_hrs: Decimal,
    /// The number of workers on the entry.
    pub worker_count: usize,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate conditions that don't prevent calculation but may
/// require attention, such as a roster whose hours do not sum to the
/// entry's production hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for an entry evaluation.
///
/// Records every decision made during the calculation process for
/// transparency.
///
/// # Example
///
/// ```
/// use incentive_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of evaluating one production entry.
///
/// This struct captures all outputs from the incentive engine for an entry:
/// per-worker incentives with band breakdowns, totals, and a complete audit
/// trace.
///
/// # Example
///
/// ```
/// use incentive_engine::models::{AuditTrace, EntryCalculation, EntryTotals};
/// use chrono::Utc;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let result = EntryCalculation {
///     calculation_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "1.0.0".to_string(),
///     building: "unit_b".to_string(),
///     nature: "stitching_line_2".to_string(),
///     shift: "general".to_string(),
///     production_type: "group".to_string(),
///     workers: vec![],
///     totals: EntryTotals {
///         total_incentive: Decimal::ZERO,
///         total_produced: Decimal::ZERO,
///         total_worked_hrs: Decimal::ZERO,
///         worker_count: 0,
///     },
///     audit_trace: AuditTrace {
///         steps: vec![],
///         warnings: vec![],
///         duration_us: 0,
///     },
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryCalculation {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced this result.
    pub engine_version: String,
    /// The building code the entry was made against.
    pub building: String,
    /// The production nature code the entry was made against.
    pub nature: String,
    /// The shift code the entry was made against.
    pub shift: String,
    /// The production type ("individual" or "group").
    pub production_type: String,
    /// Per-worker evaluation results.
    pub workers: Vec<WorkerIncentive>,
    /// Aggregated totals across the roster.
    pub totals: EntryTotals,
    /// The complete audit trace.
    pub audit_trace: AuditTrace,
}

impl EntryCalculation {
    /// Returns the worker result for the given employee code, if present.
    pub fn worker(&self, emp_code: &str) -> Option<&WorkerIncentive> {
        self.workers.iter().find(|w| w.emp_code == emp_code)
    }
}
