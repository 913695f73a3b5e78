//! Error types for the intent classifier.
//!
//! All library operations return [`Result`], whose error side is the
//! [`IntentError`] enum. Startup failures (an unreadable training file, an
//! untrainable dataset) surface as [`IntentError::Dataset`] or
//! [`IntentError::Training`]; the binary turns them into a non-zero exit.
//!
//! # Examples
//!
//! ```
//! use intent_classifier::error::{IntentError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(IntentError::training("need at least 2 distinct intents"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for intent classifier operations.
#[derive(Error, Debug)]
pub enum IntentError {
    /// I/O errors (training file, log file, console)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Dataset-related errors (missing columns, empty file, etc.)
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Training errors (degenerate dataset, invalid trainer options)
    #[error("Training error: {0}")]
    Training(String),

    /// Prediction errors
    #[error("Prediction error: {0}")]
    Prediction(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with IntentError.
pub type Result<T> = std::result::Result<T, IntentError>;

impl IntentError {
    /// Create a new dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        IntentError::Dataset(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        IntentError::Analysis(msg.into())
    }

    /// Create a new training error.
    pub fn training<S: Into<String>>(msg: S) -> Self {
        IntentError::Training(msg.into())
    }

    /// Create a new prediction error.
    pub fn prediction<S: Into<String>>(msg: S) -> Self {
        IntentError::Prediction(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        IntentError::Other(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        IntentError::Other(format!("Invalid configuration: {}", msg.into()))
    }
}
