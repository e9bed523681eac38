//! Guarded client
//!
//! The storefront-facing client. Every call goes through here; a 401
//! response on a non-exempt, not-yet-retried request triggers the refresh
//! coordinator and one reissue of the original request.

use std::sync::Arc;

use aegis_domain::{RequestDescriptor, ResponseSpec, is_refresh_exempt};

use crate::error::ApplicationResult;
use crate::ports::{Authenticator, HttpTransport};
use crate::refresh::RefreshCoordinator;

/// HTTP client with unauthorized-retry handling.
///
/// Constructed once at startup and cloned into every call site; clones
/// share the transport and the refresh coordinator, so the at-most-one-
/// refresh guarantee holds process-wide.
pub struct GuardedClient<T, A> {
    transport: Arc<T>,
    coordinator: Arc<RefreshCoordinator<A>>,
}

impl<T, A> Clone for GuardedClient<T, A> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            coordinator: Arc::clone(&self.coordinator),
        }
    }
}

impl<T, A> GuardedClient<T, A>
where
    T: HttpTransport,
    A: Authenticator,
{
    /// Creates a client over the given transport and coordinator.
    pub const fn new(transport: Arc<T>, coordinator: Arc<RefreshCoordinator<A>>) -> Self {
        Self {
            transport,
            coordinator,
        }
    }

    /// Executes a request, transparently refreshing the credential and
    /// reissuing the request once if it comes back 401.
    ///
    /// Outcomes, in order of checking:
    /// - transport failures and non-401 responses propagate untouched;
    /// - a 401 on a refresh-exempt route or an already-retried request
    ///   propagates untouched;
    /// - otherwise the request is marked retried, the coordinator refresh
    ///   runs (joining an in-flight episode if there is one), and on
    ///   success the request is reissued exactly once — the caller sees
    ///   the reissued outcome, whatever it is;
    /// - if the refresh episode failed, the caller sees its error, not
    ///   the original 401, and the session has been torn down.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApplicationError::Transport`] for transport
    /// failures and [`crate::ApplicationError::Refresh`] when a refresh
    /// episode fails.
    pub async fn execute(&self, mut request: RequestDescriptor) -> ApplicationResult<ResponseSpec> {
        let response = self.transport.execute(&request).await?;
        if !response.status.is_unauthorized() {
            return Ok(response);
        }
        if is_refresh_exempt(&request.path) || request.is_retried() {
            return Ok(response);
        }

        tracing::debug!(
            request_id = %request.id,
            method = %request.method,
            path = %request.path,
            "unauthorized response, entering refresh"
        );
        request.mark_retried();
        self.coordinator.refresh().await?;

        let reissued = self.transport.execute(&request).await?;
        tracing::debug!(
            request_id = %request.id,
            status = reissued.status.as_u16(),
            "request reissued after refresh"
        );
        Ok(reissued)
    }
}

impl<T, A> std::fmt::Debug for GuardedClient<T, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuardedClient").finish_non_exhaustive()
    }
}
