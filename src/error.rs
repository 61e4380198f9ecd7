//! Error types for the Production Incentive Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during incentive calculation
//! and entry submission.

use thiserror::Error;

/// The main error type for the Production Incentive Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use incentive_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Building code was not found in the configuration.
    #[error("Building not found: {code}")]
    BuildingNotFound {
        /// The building code that was not found.
        code: String,
    },

    /// Production nature code was not found in the configuration.
    #[error("Production nature not found: {code}")]
    NatureNotFound {
        /// The nature code that was not found.
        code: String,
    },

    /// Shift code was not found in the configuration.
    #[error("Shift not found: {code}")]
    ShiftNotFound {
        /// The shift code that was not found.
        code: String,
    },

    /// A worker with the same employee code is already on the roster.
    #[error("Worker already on roster: {emp_code}")]
    DuplicateWorker {
        /// The employee code that was already present.
        emp_code: String,
    },

    /// A worker with the given employee code is not on the roster.
    #[error("Worker not on roster: {emp_code}")]
    WorkerNotFound {
        /// The employee code that was not found.
        emp_code: String,
    },

    /// No employee with the given code exists in the directory.
    #[error("Employee not found: {emp_code}")]
    EmployeeNotFound {
        /// The employee code that was not found.
        emp_code: String,
    },

    /// The entry session is missing state required for the operation.
    #[error("Invalid entry state for '{operation}': {message}")]
    InvalidEntryState {
        /// The operation that was attempted.
        operation: String,
        /// A description of what was missing or inconsistent.
        message: String,
    },

    /// A timesheet record could not be submitted to the collaborator.
    #[error("Submission failed for worker '{emp_code}': {message}")]
    SubmissionFailed {
        /// The employee code of the failed record.
        emp_code: String,
        /// A description of the submission failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
