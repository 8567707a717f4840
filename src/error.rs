//! Custom error types for the expense tracker
//!
//! This module defines the crate-level error hierarchy using thiserror.
//! Subsystem errors (configuration resolution, database connections) keep
//! their own enums and convert into [`ExpenseError`] at the boundary.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::ConnectionError;

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration resolution errors (local settings or secret store)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection errors
    #[error("Database error: {0}")]
    Connection(#[from] ConnectionError),

    /// Validation errors for command input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Row mapping or persistence errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Operation aborted by the user (e.g. declined confirmation)
    #[error("Operation aborted")]
    Aborted,
}

impl ExpenseError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;
