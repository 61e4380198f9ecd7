//! The entry session state machine.
//!
//! An [`EntrySession`] owns the state of one production entry: the selected
//! building, nature, and shift, the live context values (manpower, norms,
//! production hours), and the worker roster. Derived values are recomputed
//! synchronously on every mutation, so the roster's targets and incentives
//! are always consistent with the currently-entered inputs.

use std::sync::Arc;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    GroupContext, IncentiveInput, calculate_incentive, group_target, individual_target,
    per_head_hour,
};
use crate::config::{ConfigLoader, ProductionNature, ProductionType};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, Employee, EntryCalculation, EntryTotals,
    SubmissionSummary, TimesheetRecord, WorkerEntry, WorkerIncentive,
};

use super::submit::{EmployeeDirectory, TimesheetSink};

/// The lifecycle position of an entry session.
///
/// The state is derived from what has been selected so far; it advances as
/// building, nature, and shift are chosen and a roster is built up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing selected yet.
    Idle,
    /// A building has been selected.
    BuildingSelected,
    /// A production nature has been selected.
    NatureSelected,
    /// A shift has been selected; workers can be added.
    ShiftSelected,
    /// At least one worker is on the roster; the entry can be submitted.
    Ready,
}

/// The mutable state of one production entry.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use incentive_engine::config::ConfigLoader;
/// use incentive_engine::models::Employee;
/// use incentive_engine::session::EntrySession;
/// use rust_decimal::Decimal;
///
/// let config = Arc::new(ConfigLoader::load("./config/site_alpha")?);
/// let mut session = EntrySession::new(config);
/// session.select_building("unit_b")?;
/// session.select_nature("stitching_line_2")?;
/// session.select_shift("general")?;
/// session.add_worker(Employee::new("EMP-0042", "R. Kumar"))?;
/// session.set_worked_hrs("EMP-0042", Decimal::from(8))?;
/// session.set_produced_qty("EMP-0042", Decimal::from(55))?;
/// let worker = session.worker("EMP-0042").unwrap();
/// println!("incentive: {}", worker.incentive);
/// # Ok::<(), incentive_engine::error::EngineError>(())
/// ```
pub struct EntrySession {
    config: Arc<ConfigLoader>,
    building: Option<String>,
    nature_code: Option<String>,
    /// Snapshot of the selected nature; `norms` on it is the live, editable
    /// value, while `manpower` stays the original configured headcount.
    nature: Option<ProductionNature>,
    /// The nature's original headcount, fixed at selection.
    nature_manpower: Decimal,
    /// The live, editable manpower value for the entry.
    manpower: Decimal,
    shift_code: Option<String>,
    shift_hrs: Decimal,
    /// The live "Production Hrs" value for the whole entry.
    production_hrs: Decimal,
    /// Cached per-head-hour rate; refreshed only on nature/shift selection
    /// and norms edits.
    per_head_hour: Decimal,
    workers: Vec<WorkerEntry>,
}

impl EntrySession {
    /// Creates an idle session over the given site configuration.
    pub fn new(config: Arc<ConfigLoader>) -> Self {
        Self {
            config,
            building: None,
            nature_code: None,
            nature: None,
            nature_manpower: Decimal::ZERO,
            manpower: Decimal::ZERO,
            shift_code: None,
            shift_hrs: Decimal::ZERO,
            production_hrs: Decimal::ZERO,
            per_head_hour: Decimal::ZERO,
            workers: Vec::new(),
        }
    }

    /// Returns the session's current lifecycle state.
    pub fn state(&self) -> SessionState {
        if self.building.is_none() {
            SessionState::Idle
        } else if self.nature.is_none() {
            SessionState::BuildingSelected
        } else if self.shift_code.is_none() {
            SessionState::NatureSelected
        } else if self.workers.is_empty() {
            SessionState::ShiftSelected
        } else {
            SessionState::Ready
        }
    }

    /// Selects a building, clearing any nature-dependent state and the
    /// roster: prior targets and incentives are meaningless under a
    /// different quota configuration.
    pub fn select_building(&mut self, code: &str) -> EngineResult<()> {
        self.config.get_building(code)?;
        self.building = Some(code.to_string());
        self.nature_code = None;
        self.nature = None;
        self.nature_manpower = Decimal::ZERO;
        self.manpower = Decimal::ZERO;
        self.per_head_hour = Decimal::ZERO;
        self.workers.clear();
        Ok(())
    }

    /// Selects a production nature within the current building.
    ///
    /// Populates production type, manpower, and norms from the nature,
    /// caches the per-head-hour rate, and resets the roster (the recompute
    /// path is shared with the other mutation paths and runs regardless).
    pub fn select_nature(&mut self, code: &str) -> EngineResult<()> {
        let Some(building) = &self.building else {
            return Err(EngineError::InvalidEntryState {
                operation: "select_nature".to_string(),
                message: "no building selected".to_string(),
            });
        };
        let nature = self.config.get_nature(code)?;
        if &nature.building != building {
            return Err(EngineError::InvalidEntryState {
                operation: "select_nature".to_string(),
                message: format!(
                    "nature '{}' belongs to building '{}'",
                    code, nature.building
                ),
            });
        }

        let nature = nature.clone();
        self.nature_code = Some(code.to_string());
        self.nature_manpower = Decimal::from(nature.manpower);
        self.manpower = Decimal::from(nature.manpower);
        self.nature = Some(nature);
        self.workers.clear();
        self.refresh_per_head_hour();
        self.recompute_all();
        Ok(())
    }

    /// Selects a shift, setting the reference shift hours and defaulting
    /// the entry's production hours to them.
    pub fn select_shift(&mut self, code: &str) -> EngineResult<()> {
        let shift = self.config.get_shift(code)?;
        self.shift_hrs = shift.shift_hrs;
        self.shift_code = Some(code.to_string());
        self.production_hrs = self.shift_hrs;
        self.refresh_per_head_hour();
        self.recompute_all();
        Ok(())
    }

    /// Adds a worker to the roster, computing their initial target and
    /// incentive from the current context.
    ///
    /// Rejects duplicate employee codes.
    pub fn add_worker(&mut self, employee: Employee) -> EngineResult<()> {
        if self.nature.is_none() {
            return Err(EngineError::InvalidEntryState {
                operation: "add_worker".to_string(),
                message: "no nature selected".to_string(),
            });
        }
        if self.workers.iter().any(|w| w.emp_code() == employee.emp_code) {
            return Err(EngineError::DuplicateWorker {
                emp_code: employee.emp_code,
            });
        }
        self.workers.push(WorkerEntry::new(employee));
        let idx = self.workers.len() - 1;
        if let Some(nature) = self.nature.clone() {
            self.recompute_at(idx, &nature);
        }
        Ok(())
    }

    /// Looks a worker up in the directory by code and adds them to the
    /// roster (the search-and-pick flow).
    pub fn add_worker_by_code(
        &mut self,
        emp_code: &str,
        directory: &impl EmployeeDirectory,
    ) -> EngineResult<()> {
        let employee =
            directory
                .find_by_code(emp_code)
                .ok_or_else(|| EngineError::EmployeeNotFound {
                    emp_code: emp_code.to_string(),
                })?;
        self.add_worker(employee)
    }

    /// Removes a worker from the roster.
    pub fn remove_worker(&mut self, emp_code: &str) -> EngineResult<()> {
        let idx = self
            .workers
            .iter()
            .position(|w| w.emp_code() == emp_code)
            .ok_or_else(|| EngineError::WorkerNotFound {
                emp_code: emp_code.to_string(),
            })?;
        self.workers.remove(idx);
        Ok(())
    }

    /// Sets a worker's produced quantity and recomputes the affected rows:
    /// just this worker in individual mode, the whole roster in group mode.
    pub fn set_produced_qty(&mut self, emp_code: &str, qty: Decimal) -> EngineResult<()> {
        let idx = self.worker_index(emp_code)?;
        self.workers[idx].produced_qty = qty;
        self.recompute_after_worker_edit(idx);
        Ok(())
    }

    /// Sets a worker's worked hours and recomputes the affected rows.
    pub fn set_worked_hrs(&mut self, emp_code: &str, hrs: Decimal) -> EngineResult<()> {
        let idx = self.worker_index(emp_code)?;
        self.workers[idx].worked_hrs = hrs;
        self.recompute_after_worker_edit(idx);
        Ok(())
    }

    /// Sets the entry's live manpower value and recomputes the roster.
    ///
    /// The cached per-head-hour rate keeps using the nature's original
    /// headcount; only the group-target formula sees this value.
    pub fn set_manpower(&mut self, manpower: Decimal) {
        self.manpower = manpower;
        self.recompute_all();
    }

    /// Sets the entry's production hours and recomputes the roster.
    pub fn set_production_hrs(&mut self, hrs: Decimal) {
        self.production_hrs = hrs;
        self.recompute_all();
    }

    /// Edits the live norms value, refreshing the per-head-hour rate and
    /// every worker's target and incentive.
    pub fn set_norms(&mut self, norms: Decimal) -> EngineResult<()> {
        let Some(nature) = &mut self.nature else {
            return Err(EngineError::InvalidEntryState {
                operation: "set_norms".to_string(),
                message: "no nature selected".to_string(),
            });
        };
        nature.norms = norms;
        self.refresh_per_head_hour();
        self.recompute_all();
        Ok(())
    }

    /// Returns the current roster.
    pub fn workers(&self) -> &[WorkerEntry] {
        &self.workers
    }

    /// Returns the roster entry for an employee code, if present.
    pub fn worker(&self, emp_code: &str) -> Option<&WorkerEntry> {
        self.workers.iter().find(|w| w.emp_code() == emp_code)
    }

    /// Returns the cached per-head-hour rate.
    pub fn per_head_hour(&self) -> Decimal {
        self.per_head_hour
    }

    /// Returns the entry's live production hours.
    pub fn production_hrs(&self) -> Decimal {
        self.production_hrs
    }

    /// Returns the entry's live manpower value.
    pub fn manpower(&self) -> Decimal {
        self.manpower
    }

    /// Returns the live norms value, or zero when no nature is selected.
    pub fn norms(&self) -> Decimal {
        self.nature.as_ref().map(|n| n.norms).unwrap_or(Decimal::ZERO)
    }

    /// Evaluates the whole entry, producing per-worker results, totals, and
    /// a complete audit trace.
    pub fn calculate(&self) -> EngineResult<EntryCalculation> {
        let start = Instant::now();
        let (building, nature_code, nature, shift_code) = self.context("calculate")?;

        let mut steps: Vec<AuditStep> = Vec::new();
        let mut warnings: Vec<AuditWarning> = Vec::new();
        let mut step_number: u32 = 1;
        let mut workers_out: Vec<WorkerIncentive> = Vec::new();
        let mut total_incentive = Decimal::ZERO;
        let mut total_produced = Decimal::ZERO;
        let mut total_worked = Decimal::ZERO;

        for worker in &self.workers {
            let target_result = match nature.production_type {
                ProductionType::Individual => individual_target(
                    nature.norms,
                    self.shift_hrs,
                    worker.worked_hrs,
                    step_number,
                ),
                ProductionType::Group => group_target(
                    self.per_head_hour,
                    self.manpower,
                    self.production_hrs,
                    step_number,
                ),
            };
            steps.push(target_result.audit_step);
            step_number += 1;

            let result = calculate_incentive(
                &IncentiveInput {
                    nature,
                    target: target_result.target,
                    produced_qty: worker.produced_qty,
                    worked_hrs: worker.worked_hrs,
                    group: self.group_context(nature),
                },
                step_number,
            );
            step_number += result.audit_steps.len() as u32;
            steps.extend(result.audit_steps);

            total_incentive += result.incentive;
            total_produced += worker.produced_qty;
            total_worked += worker.worked_hrs;
            workers_out.push(WorkerIncentive {
                emp_code: worker.employee.emp_code.clone(),
                name: worker.employee.name.clone(),
                produced_qty: worker.produced_qty,
                worked_hrs: worker.worked_hrs,
                target: target_result.target,
                incentive: result.incentive,
                lines: result.lines,
            });
        }

        // The allocation is intentionally non-conserving: shares are priced
        // against the entry's production hours, not the roster's hour sum.
        if nature.production_type == ProductionType::Group
            && !self.workers.is_empty()
            && total_worked != self.production_hrs
        {
            warnings.push(AuditWarning {
                code: "non_conserving_allocation".to_string(),
                message: format!(
                    "Roster hours ({}) do not sum to entry production hours ({}); \
                     worker shares will not total the nominal group amount",
                    total_worked.normalize(),
                    self.production_hrs.normalize()
                ),
                severity: "low".to_string(),
            });
        }

        Ok(EntryCalculation {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            building: building.to_string(),
            nature: nature_code.to_string(),
            shift: shift_code.to_string(),
            production_type: nature.production_type.as_str().to_string(),
            workers: workers_out,
            totals: EntryTotals {
                total_incentive,
                total_produced,
                total_worked_hrs: total_worked,
                worker_count: self.workers.len(),
            },
            audit_trace: AuditTrace {
                steps,
                warnings,
                duration_us: start.elapsed().as_micros() as u64,
            },
        })
    }

    /// Submits one timesheet record per worker to the collaborator,
    /// sequentially, continuing past individual failures.
    ///
    /// On full success the session resets to idle; on partial or total
    /// failure the roster and context are preserved so the entry can be
    /// retried.
    pub async fn submit<S: TimesheetSink>(
        &mut self,
        date: NaiveDate,
        sink: &mut S,
    ) -> EngineResult<SubmissionSummary> {
        let (building, nature_code, nature, shift_code) = self.context("submit")?;
        if self.workers.is_empty() {
            return Err(EngineError::InvalidEntryState {
                operation: "submit".to_string(),
                message: "roster is empty".to_string(),
            });
        }

        let building = building.to_string();
        let nature_code = nature_code.to_string();
        let shift_code = shift_code.to_string();
        let norms = nature.norms;

        let mut submitted = 0usize;
        let mut failed = 0usize;

        for worker in &self.workers {
            let record = TimesheetRecord {
                date,
                building: building.clone(),
                nature: nature_code.clone(),
                shift: shift_code.clone(),
                emp_code: worker.employee.emp_code.clone(),
                emp_name: worker.employee.name.clone(),
                produced_qty: worker.produced_qty,
                worked_hrs: worker.worked_hrs,
                target: worker.target,
                incentive: worker.incentive,
                manpower: self.manpower,
                norms,
            };
            match sink.submit(&record).await {
                Ok(()) => submitted += 1,
                Err(err) => {
                    failed += 1;
                    warn!(
                        emp_code = %record.emp_code,
                        error = %err,
                        "Timesheet record rejected"
                    );
                }
            }
        }

        let summary = SubmissionSummary { submitted, failed };
        if summary.is_complete() {
            info!(
                building = %building,
                nature = %nature_code,
                records = submitted,
                "Entry submitted; session reset"
            );
            self.reset();
        }
        Ok(summary)
    }

    /// Resets the session back to idle with an empty roster.
    pub fn reset(&mut self) {
        self.building = None;
        self.nature_code = None;
        self.nature = None;
        self.nature_manpower = Decimal::ZERO;
        self.manpower = Decimal::ZERO;
        self.shift_code = None;
        self.shift_hrs = Decimal::ZERO;
        self.production_hrs = Decimal::ZERO;
        self.per_head_hour = Decimal::ZERO;
        self.workers.clear();
    }

    fn context(&self, operation: &str) -> EngineResult<(&str, &str, &ProductionNature, &str)> {
        let building = self.building.as_deref().ok_or_else(|| {
            EngineError::InvalidEntryState {
                operation: operation.to_string(),
                message: "no building selected".to_string(),
            }
        })?;
        let nature_code = self.nature_code.as_deref().ok_or_else(|| {
            EngineError::InvalidEntryState {
                operation: operation.to_string(),
                message: "no nature selected".to_string(),
            }
        })?;
        let nature = self.nature.as_ref().ok_or_else(|| {
            EngineError::InvalidEntryState {
                operation: operation.to_string(),
                message: "no nature selected".to_string(),
            }
        })?;
        let shift_code = self.shift_code.as_deref().ok_or_else(|| {
            EngineError::InvalidEntryState {
                operation: operation.to_string(),
                message: "no shift selected".to_string(),
            }
        })?;
        Ok((building, nature_code, nature, shift_code))
    }

    fn worker_index(&self, emp_code: &str) -> EngineResult<usize> {
        self.workers
            .iter()
            .position(|w| w.emp_code() == emp_code)
            .ok_or_else(|| EngineError::WorkerNotFound {
                emp_code: emp_code.to_string(),
            })
    }

    /// Refreshes the cached rate from the live norms, the nature's original
    /// headcount, and the selected shift's hours.
    fn refresh_per_head_hour(&mut self) {
        self.per_head_hour = per_head_hour(self.norms(), self.nature_manpower, self.shift_hrs);
    }

    fn group_context(&self, nature: &ProductionNature) -> Option<GroupContext> {
        (nature.production_type == ProductionType::Group).then_some(GroupContext {
            per_head_hour: self.per_head_hour,
            manpower: self.manpower,
            production_hrs: self.production_hrs,
        })
    }

    fn recompute_after_worker_edit(&mut self, idx: usize) {
        let Some(nature) = self.nature.clone() else {
            return;
        };
        match nature.production_type {
            ProductionType::Individual => self.recompute_at(idx, &nature),
            ProductionType::Group => self.recompute_all(),
        }
    }

    fn recompute_all(&mut self) {
        let Some(nature) = self.nature.clone() else {
            for worker in &mut self.workers {
                worker.target = Decimal::ZERO;
                worker.incentive = Decimal::ZERO;
            }
            return;
        };
        for idx in 0..self.workers.len() {
            self.recompute_at(idx, &nature);
        }
    }

    fn recompute_at(&mut self, idx: usize, nature: &ProductionNature) {
        let worker = &self.workers[idx];
        let target = match nature.production_type {
            ProductionType::Individual => {
                individual_target(nature.norms, self.shift_hrs, worker.worked_hrs, 1).target
            }
            ProductionType::Group => {
                group_target(self.per_head_hour, self.manpower, self.production_hrs, 1).target
            }
        };
        let result = calculate_incentive(
            &IncentiveInput {
                nature,
                target,
                produced_qty: worker.produced_qty,
                worked_hrs: worker.worked_hrs,
                group: self.group_context(nature),
            },
            1,
        );
        let worker = &mut self.workers[idx];
        worker.target = target;
        worker.incentive = result.incentive;
    }
}
