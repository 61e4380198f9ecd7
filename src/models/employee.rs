//! Employee model.
//!
//! This module defines the Employee struct representing a worker record
//! as supplied by the external employee-search collaborator.

use serde::{Deserialize, Serialize};

/// Represents an employee that can be added to a production entry.
///
/// The engine only needs the identifying fields; payroll master data
/// lives with the external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee code (e.g., "EMP-0042").
    pub emp_code: String,
    /// The employee's display name.
    pub name: String,
    /// The department the employee belongs to, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl Employee {
    /// Creates an employee from its code and name.
    ///
    /// # Examples
    ///
    /// ```
    /// use incentive_engine::models::Employee;
    ///
    /// let emp = Employee::new("EMP-0042", "R. Kumar");
    /// assert_eq!(emp.emp_code, "EMP-0042");
    /// assert!(emp.department.is_none());
    /// ```
    pub fn new(emp_code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            emp_code: emp_code.into(),
            name: name.into(),
            department: None,
        }
    }
}
