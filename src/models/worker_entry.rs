//! Worker entry model.
//!
//! This module defines the WorkerEntry struct, a session-scoped roster row
//! holding the worker's entered quantities and the derived target/incentive.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Employee;

/// A single worker on the current entry's roster.
///
/// `target` and `incentive` are derived values; they are recomputed by the
/// entry session whenever the worker's own quantities or any upstream
/// configuration field changes. A WorkerEntry only lives as long as the
/// entry it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerEntry {
    /// The employee this entry row belongs to.
    pub employee: Employee,
    /// The quantity this worker (or their group) produced.
    pub produced_qty: Decimal,
    /// The hours this worker actually worked on the entry.
    pub worked_hrs: Decimal,
    /// The derived target quantity for this worker.
    pub target: Decimal,
    /// The derived monetary incentive for this worker.
    pub incentive: Decimal,
}

impl WorkerEntry {
    /// Creates a fresh roster row for an employee with zeroed quantities.
    ///
    /// # Examples
    ///
    /// ```
    /// use incentive_engine::models::{Employee, WorkerEntry};
    /// use rust_decimal::Decimal;
    ///
    /// let entry = WorkerEntry::new(Employee::new("EMP-0042", "R. Kumar"));
    /// assert_eq!(entry.produced_qty, Decimal::ZERO);
    /// assert_eq!(entry.incentive, Decimal::ZERO);
    /// ```
    pub fn new(employee: Employee) -> Self {
        Self {
            employee,
            produced_qty: Decimal::ZERO,
            worked_hrs: Decimal::ZERO,
            target: Decimal::ZERO,
            incentive: Decimal::ZERO,
        }
    }

    /// Returns the employee code for this row.
    pub fn emp_code(&self) -> &str {
        &self.employee.emp_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_is_zeroed() {
        let entry = WorkerEntry::new(Employee::new("EMP-0001", "A. Singh"));
        assert_eq!(entry.produced_qty, Decimal::ZERO);
        assert_eq!(entry.worked_hrs, Decimal::ZERO);
        assert_eq!(entry.target, Decimal::ZERO);
        assert_eq!(entry.incentive, Decimal::ZERO);
    }

    #[test]
    fn test_emp_code_delegates_to_employee() {
        let entry = WorkerEntry::new(Employee::new("EMP-0042", "R. Kumar"));
        assert_eq!(entry.emp_code(), "EMP-0042");
    }

    #[test]
    fn test_worker_entry_serialization_round_trip() {
        let mut entry = WorkerEntry::new(Employee::new("EMP-0042", "R. Kumar"));
        entry.produced_qty = Decimal::new(1205, 1); // 120.5
        entry.worked_hrs = Decimal::new(80, 1); // 8.0

        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: WorkerEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, deserialized);
    }
}
