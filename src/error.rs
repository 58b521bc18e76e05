//! Error types for backend fetches.
//!
//! Three classes: transport failures, non-success HTTP statuses, and
//! malformed payloads. The dashboard collapses all three into a single error
//! banner; the variants exist so call sites can log the class and tests can
//! assert on it.

use thiserror::Error;

/// A failed fetch against the Watchtower backend.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network/transport failure before any HTTP status was received.
    #[error("{0}")]
    Network(String),

    /// Backend answered with a non-success status.
    #[error("HTTP {0}")]
    Status(u16),

    /// The body arrived but was not the JSON we expected.
    #[error("{0}")]
    Decode(String),
}

impl FetchError {
    /// Short class name used in log lines.
    pub fn class(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::Status(_) => "status",
            FetchError::Decode(_) => "decode",
        }
    }

    /// True when the backend reported 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status(404))
    }
}
