//! Application error types

use thiserror::Error;

use aegis_domain::{AuthError, DomainError};

use crate::ports::TransportError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The HTTP transport failed before producing a response.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A credential refresh episode failed; the session has been torn down.
    #[error("refresh error: {0}")]
    Refresh(#[from] AuthError),

    /// The API answered with an error status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Error message from the response body, or the reason phrase.
        message: String,
    },

    /// Input failed client-side validation.
    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
