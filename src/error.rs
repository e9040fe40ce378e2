//! Error types for the provident fund shortfall engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading configuration or
//! computing a shortfall ledger.

use thiserror::Error;

/// The main error type for the shortfall engine.
///
/// All fallible operations in the engine return this error type, so a caller
/// presenting results only has one failure shape to handle.
///
/// # Example
///
/// ```
/// use pf_shortfall::error::EngineError;
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
        /// The path (or source name) of the configuration that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was out of range or inconsistent.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A wage month was not in `M/YYYY` form.
    #[error("Malformed wage month '{value}': {message}")]
    MalformedWageMonth {
        /// The raw value that failed to parse.
        value: String,
        /// A description of the parse failure.
        message: String,
    },

    /// A fiscal year key was not in `YYYY-YY` form.
    #[error("Invalid fiscal year '{value}': expected YYYY-YY")]
    InvalidFiscalYear {
        /// The raw value that failed to parse.
        value: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },

    /// A result could not be serialized for the presentation layer.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// A description of the serialization failure.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an arithmetic overflow while accumulating `what`.
    pub(crate) fn overflow(what: &str) -> Self {
        EngineError::CalculationError {
            message: format!("arithmetic overflow while computing {}", what),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
