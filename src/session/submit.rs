//! Collaborator traits for entry submission and employee lookup.
//!
//! The engine's only outward boundaries are the timesheet collaborator that
//! persists one record per worker and the employee directory behind the
//! search-and-pick flow. Both are traits so the surrounding application can
//! supply its own transport.

use crate::error::EngineResult;
use crate::models::{Employee, TimesheetRecord};

/// Receives one timesheet record per worker at submission time.
///
/// Records are submitted sequentially; a failure on one record must not
/// prevent the caller from submitting the rest, so implementations report
/// failures through the returned result rather than panicking.
pub trait TimesheetSink {
    /// Persists a single timesheet record.
    fn submit(
        &mut self,
        record: &TimesheetRecord,
    ) -> impl std::future::Future<Output = EngineResult<()>> + Send;
}

/// Looks up employees for the search-and-pick flow.
///
/// The production implementation fronts the external employee service; an
/// in-memory snapshot ships for tests and offline use.
pub trait EmployeeDirectory {
    /// Finds an employee by exact code.
    fn find_by_code(&self, emp_code: &str) -> Option<Employee>;

    /// Returns employees whose code or name contains the query,
    /// case-insensitively.
    fn search(&self, query: &str) -> Vec<Employee>;
}

/// An employee directory backed by an in-memory snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    employees: Vec<Employee>,
}

impl InMemoryDirectory {
    /// Creates a directory over a snapshot of employees.
    pub fn new(employees: Vec<Employee>) -> Self {
        Self { employees }
    }
}

impl EmployeeDirectory for InMemoryDirectory {
    fn find_by_code(&self, emp_code: &str) -> Option<Employee> {
        self.employees
            .iter()
            .find(|e| e.emp_code == emp_code)
            .cloned()
    }

    fn search(&self, query: &str) -> Vec<Employee> {
        let query = query.to_lowercase();
        self.employees
            .iter()
            .filter(|e| {
                e.emp_code.to_lowercase().contains(&query)
                    || e.name.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> InMemoryDirectory {
        InMemoryDirectory::new(vec![
            Employee::new("EMP-0001", "A. Singh"),
            Employee::new("EMP-0042", "R. Kumar"),
            Employee::new("EMP-0107", "S. Devi"),
        ])
    }

    #[test]
    fn test_find_by_code_exact() {
        let dir = directory();
        assert_eq!(dir.find_by_code("EMP-0042").unwrap().name, "R. Kumar");
        assert!(dir.find_by_code("EMP-9999").is_none());
    }

    #[test]
    fn test_search_matches_code_fragment() {
        let dir = directory();
        let hits = dir.search("0042");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].emp_code, "EMP-0042");
    }

    #[test]
    fn test_search_matches_name_case_insensitively() {
        let dir = directory();
        let hits = dir.search("kumar");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "R. Kumar");
    }

    #[test]
    fn test_search_no_match_returns_empty() {
        let dir = directory();
        assert!(dir.search("zz").is_empty());
    }
}
