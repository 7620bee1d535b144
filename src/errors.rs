//! Error types for the scatter chart
//!
//! Every fallible operation in the crate returns `ChartError`. The
//! JavaScript-facing API converts it into a `JsValue` string at the boundary.

use thiserror::Error;

/// Top-level chart error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// The container selector matched nothing in the host page
    #[error("Container not found: {0}")]
    MissingContainer(String),

    /// A DOM call failed (element creation, attribute write, listener)
    #[error("DOM operation failed: {0}")]
    Dom(String),

    /// The request could not be issued or the body could not be read
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// The server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    /// The response body is not a recognized commit payload
    #[error("Malformed payload: {0}")]
    Payload(String),

    /// A decoded record carries an unusable value
    #[error("Invalid record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// Chart configuration rejected by validation
    #[error("Invalid chart configuration: {0}")]
    InvalidConfig(String),

    /// An operation needed a drawing surface before `initialize` was called
    #[error("Chart has not been initialized")]
    NotInitialized,
}

impl From<serde_json::Error> for ChartError {
    fn from(e: serde_json::Error) -> Self {
        ChartError::Payload(e.to_string())
    }
}

pub type ChartResult<T> = Result<T, ChartError>;
