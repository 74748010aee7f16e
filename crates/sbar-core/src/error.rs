//! Error types for the sbar system
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for sbar operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the sbar system
#[derive(Error, Debug)]
pub enum Error {
    /// A metric could not produce its value
    #[error("{0}")]
    Metric(String),

    /// Output sink errors (display connection, stream writes)
    #[error("Sink error: {0}")]
    Sink(String),

    /// The sink's reader went away; no later publish can succeed
    #[error("Sink closed: {0}")]
    SinkClosed(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Lifecycle errors (daemonize, signal registration)
    #[error("Lifecycle error: {0}")]
    Lifecycle(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a metric error
    pub fn metric(msg: impl Into<String>) -> Self {
        Self::Metric(msg.into())
    }

    /// Create a metric error carrying the underlying OS error text
    ///
    /// Renders as `"<context>: <os error>"`.
    pub fn metric_io(context: impl std::fmt::Display, err: &std::io::Error) -> Self {
        Self::Metric(format!("{}: {}", context, err))
    }

    /// Create a sink error
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }

    /// Create a closed-sink error
    pub fn sink_closed(msg: impl Into<String>) -> Self {
        Self::SinkClosed(msg.into())
    }

    /// Whether the sink can never accept another line
    pub fn is_sink_closed(&self) -> bool {
        matches!(self, Self::SinkClosed(_))
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a lifecycle error
    pub fn lifecycle(msg: impl Into<String>) -> Self {
        Self::Lifecycle(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
