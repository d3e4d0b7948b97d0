//! Error types for modman.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for modman operations.
///
/// Every variant is caught at the dispatch boundary and rendered as a single
/// status line; none of them terminate the REPL.
#[derive(Error, Debug)]
pub enum ModmanError {
    /// Input validation errors (missing/excess arguments, bad index, name
    /// collision, invalid sort field, etc.)
    #[error("{0}")]
    Validation(String),

    /// The typed token did not resolve to a command in the active set.
    /// Carries the raw token so callers can attempt a secondary lookup.
    #[error("Invalid command '{0}'")]
    UnknownCommand(String),

    /// A profile or item token did not resolve to anything.
    #[error("{0}")]
    NotFound(String),

    /// The operation is blocked by the current on-disk state (duplicate
    /// items, identical source and destination, etc.)
    #[error("{0}")]
    State(String),

    /// The operator declined a confirmation or pressed escape.
    #[error("Aborted")]
    Cancelled,

    /// An underlying filesystem or terminal call failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl ModmanError {
    /// Creates a validation error with the given message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a not-found error with the given message.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Creates a state error with the given message.
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Returns the error category as a string for display and logging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Validation Error",
            Self::UnknownCommand(_) => "Unknown Command",
            Self::NotFound(_) => "Not Found",
            Self::State(_) => "State Error",
            Self::Cancelled => "Cancelled",
            Self::Io(_) => "I/O Error",
        }
    }
}

/// Result type alias using ModmanError.
pub type Result<T> = std::result::Result<T, ModmanError>;
