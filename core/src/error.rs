//! Error types for the feed loader.
//!
//! # Design
//! Callers only ever see two outcomes: the network call could not complete
//! (`Connectivity`) or it completed with something unusable (`InvalidData`).
//! Both variants are unit variants so results compare by value in tests.
//! `TransportError` keeps the transport's message around for logging but is
//! collapsed into `Connectivity` before it reaches the caller.

use thiserror::Error;

/// Domain-level failure delivered to `load` callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The request never produced a response (DNS, connection, TLS, timeout).
    #[error("connectivity failure")]
    Connectivity,

    /// A response arrived but its status was not 200 or its body did not
    /// decode into a feed.
    #[error("invalid data")]
    InvalidData,
}

/// Failure reported by an `HttpClient` when no response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport failed: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        Self::new(err.to_string())
    }
}
