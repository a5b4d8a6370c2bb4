//! Error types for the Overtime Compliance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that can fail while building attendance records,
//! company policies or configuration. Evaluating compliance itself never
//! fails: rule breaches are reported as violations, not errors.

use thiserror::Error;

/// The main error type for the Overtime Compliance Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use overtime_compliance::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/company.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/company.yaml");
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

    /// A break ended before it started.
    #[error("Invalid break time: {message}")]
    InvalidBreakTime {
        /// Which bound was violated.
        message: String,
    },

    /// A working day was inconsistent with itself or with one of its breaks.
    #[error("Invalid working day: {message}")]
    InvalidWorkingDay {
        /// Which bound was violated.
        message: String,
    },

    /// A legal holiday entry was outside the 4-week cycle or the ISO week.
    #[error("Invalid legal holiday: {message}")]
    InvalidHoliday {
        /// A description of the out-of-range value.
        message: String,
    },

    /// An overtime agreement limit exceeded its statutory ceiling.
    #[error("{limit} must be less than or equal to {ceiling}")]
    InvalidAgreementLimit {
        /// The name of the offending limit (e.g. "daily_overtime_limit").
        limit: String,
        /// The statutory ceiling, formatted as `H:MM:SS`.
        ceiling: String,
    },

    /// An overtime agreement's validity window could not be represented.
    #[error("Invalid agreement period: {message}")]
    InvalidAgreementPeriod {
        /// A description of the problem.
        message: String,
    },

    /// A decimal hour value is negative or cannot be represented as a duration.
    #[error("'{field}' of {value} hours must be a non-negative, in-range whole number of seconds")]
    InvalidHours {
        /// The configuration or request field holding the value.
        field: String,
        /// The value as supplied.
        value: String,
    },

    /// The attendance source as a whole could not be read (e.g. a missing
    /// column or an unreadable header).
    #[error("Invalid attendance source: {message}")]
    InvalidAttendanceSource {
        /// A description of the problem.
        message: String,
    },

    /// A row of attendance input could not be turned into a working day.
    #[error("{message}\ncheck line {row}:\n{content}")]
    IngestionError {
        /// The zero-based data row index.
        row: usize,
        /// The raw content of the offending row.
        content: String,
        /// The underlying parse or validation failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
