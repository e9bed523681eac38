//! HTTP transport port

use async_trait::async_trait;
use thiserror::Error;

use aegis_domain::{RequestDescriptor, ResponseSpec};

/// Errors from the HTTP transport.
///
/// These cover failures to produce a response at all; an error *status*
/// (4xx/5xx) is a successful transport call and comes back as a
/// [`ResponseSpec`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request did not complete within its timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// The timeout that was exceeded, in milliseconds.
        timeout_ms: u64,
    },

    /// The host could not be resolved.
    #[error("DNS resolution failed for {host}: {message}")]
    DnsError {
        /// The host that failed to resolve.
        host: String,
        /// Resolver error detail.
        message: String,
    },

    /// The server actively refused the connection.
    #[error("connection refused by {host}")]
    ConnectionRefused {
        /// The host that refused.
        host: String,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Other(String),
}

/// Port for executing HTTP requests against the storefront API.
///
/// Implementations resolve the descriptor's path against their configured
/// base URL, attach credentials (cookies) transparently, and return the
/// response whatever its status.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Executes a request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if no response could be obtained.
    async fn execute(&self, request: &RequestDescriptor) -> Result<ResponseSpec, TransportError>;
}
