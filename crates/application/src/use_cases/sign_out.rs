//! Sign-out use case.

use std::sync::Arc;

use crate::error::ApplicationResult;
use crate::ports::Authenticator;

/// Use case for signing out.
///
/// Delegates to the authenticator's teardown, which clears the local
/// session and notifies the logout endpoint. Safe to run when already
/// signed out.
pub struct SignOut<A> {
    authenticator: Arc<A>,
}

impl<A: Authenticator> SignOut<A> {
    /// Creates the use case.
    pub const fn new(authenticator: Arc<A>) -> Self {
        Self { authenticator }
    }

    /// Tears the session down.
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` keeps the signature uniform with the
    /// other use cases.
    pub async fn execute(&self) -> ApplicationResult<()> {
        self.authenticator.log_out().await;
        tracing::info!("signed out");
        Ok(())
    }
}
