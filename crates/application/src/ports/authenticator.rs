//! Authenticator port

use async_trait::async_trait;

use aegis_domain::AuthError;

/// Port for the remote authentication endpoints.
///
/// The credential itself is an opaque side effect (a cookie set by the
/// server); the application layer only observes whether the calls
/// succeeded.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Calls the refresh endpoint. Success means the next authenticated
    /// call will carry a fresh credential.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the endpoint rejected the call or the
    /// transport failed.
    async fn refresh(&self) -> Result<(), AuthError>;

    /// Tears the session down: clears locally held identity state and
    /// notifies the logout endpoint.
    ///
    /// Must be safe to call when already logged out; never fails.
    async fn log_out(&self);
}
