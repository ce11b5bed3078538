//! Error types and result aliases for llmtrace-lite.
//!
//! Tracing itself never fails a wrapped call, so [`LlmTraceError`] covers the
//! edges around it: reading typed values out of [`CallArgs`](crate::CallArgs),
//! rendering records as JSON, and a plain message-carrying variant for simple
//! wrapped functions that just need to fail with a message.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmTraceError {
    /// Failure raised by a wrapped function; displays exactly the message.
    #[error("{0}")]
    Call(String),

    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("Invalid argument '{name}': expected {expected}")]
    InvalidArgument { name: String, expected: &'static str },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl LlmTraceError {
    /// Build a [`LlmTraceError::Call`] from any message.
    pub fn call(message: impl Into<String>) -> Self {
        Self::Call(message.into())
    }
}

pub type Result<T> = std::result::Result<T, LlmTraceError>;
