//! # Framework Errors
//!
//! Error types shared by the lifecycle engine and the transports.
//!
//! Two kinds of failure are not errors here: a response whose
//! error flag is set (reported through the `bool`/[`WriteOutcome`](crate::framework::WriteOutcome)
//! return values) and a malformed date (reported as `None` by the date accessors).

use crate::framework::Method;

/// Errors raised by a [`RestClient`](crate::framework::RestClient) that could not complete an exchange.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Mock transport: {0}")]
    Mock(String),
}

/// Errors that can occur while driving an instance resource.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// The operation is illegal in the instance's current state.
    ///
    /// This is a programming error: it is raised before any request is sent.
    #[error("{0}")]
    Unsupported(&'static str),

    /// A write response did not carry the id needed for the refetch.
    #[error("{method} response did not contain an id")]
    MissingId { method: Method },

    /// An `id` was present but could not be read as an integer.
    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ResourceError {
    /// Returns true for precondition violations.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, ResourceError::Unsupported(_))
    }
}
