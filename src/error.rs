//! Error types for the Solrine library.
//!
//! All fallible operations return [`SolrineError`] through the crate-wide
//! [`Result`] alias. Soft absences (an unknown facet, an unknown group) are
//! not errors; those accessors return `None` instead.
//!
//! # Examples
//!
//! ```
//! use solrine::error::{Result, SolrineError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SolrineError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use serde_json::Value;
use thiserror::Error;

/// The main error type for Solrine operations.
#[derive(Error, Debug)]
pub enum SolrineError {
    /// I/O errors (config files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The search server payload is not valid JSON.
    ///
    /// The raw payload is kept so callers can inspect what the server sent.
    #[error(
        "Decode error: Solr response does not appear to be valid JSON ({message}), examine the raw response"
    )]
    Decode {
        /// Parser message.
        message: String,
        /// The payload exactly as received.
        raw: String,
    },

    /// A method that no registered extension handled.
    #[error("Call to undefined method ResultSet::{method} ({} argument(s))", .arguments.len())]
    UnknownOperation {
        /// Name of the requested method.
        method: String,
        /// Arguments passed with the call.
        arguments: Vec<Value>,
    },

    /// Index-related errors raised by the persistence hook or an indexer.
    #[error("Index error: {0}")]
    Index(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SolrineError.
pub type Result<T> = std::result::Result<T, SolrineError>;

impl SolrineError {
    /// Create a new decode error keeping the raw payload.
    pub fn decode<S: Into<String>, R: Into<String>>(msg: S, raw: R) -> Self {
        SolrineError::Decode {
            message: msg.into(),
            raw: raw.into(),
        }
    }

    /// Create a new unknown operation error.
    pub fn unknown_operation<S: Into<String>>(method: S, arguments: &[Value]) -> Self {
        SolrineError::UnknownOperation {
            method: method.into(),
            arguments: arguments.to_vec(),
        }
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        SolrineError::Index(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SolrineError::Other(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SolrineError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SolrineError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// The raw payload attached to a decode error.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            SolrineError::Decode { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
