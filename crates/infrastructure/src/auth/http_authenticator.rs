//! HTTP authenticator adapter.
//!
//! Implements the `Authenticator` port against the storefront's auth
//! endpoints. The refresh call carries no body; on success the server
//! rotates the credential cookie in the shared jar, which this adapter
//! never inspects.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use aegis_application::ports::Authenticator;
use aegis_application::session_store::SessionStore;
use aegis_domain::{
    AuthError, ClientSettings,
    auth::{LOGOUT_ROUTE, REFRESH_ROUTE},
};

/// Authenticator over the remote auth endpoints.
///
/// Construct it with the same `reqwest::Client` as the transport so both
/// see the same cookie store.
pub struct HttpAuthenticator {
    client: Client,
    settings: ClientSettings,
    session: SessionStore,
}

impl HttpAuthenticator {
    /// Creates the authenticator.
    #[must_use]
    pub const fn new(client: Client, settings: ClientSettings, session: SessionStore) -> Self {
        Self {
            client,
            settings,
            session,
        }
    }
}

#[async_trait]
impl Authenticator for HttpAuthenticator {
    async fn refresh(&self) -> Result<(), AuthError> {
        let url = self
            .settings
            .resolve(REFRESH_ROUTE)
            .map_err(|e| AuthError::RefreshFailed {
                message: e.to_string(),
            })?;

        let response = self
            .client
            .post(url)
            .timeout(Duration::from_millis(self.settings.request_timeout_ms))
            .send()
            .await
            .map_err(|e| AuthError::RefreshFailed {
                message: e.to_string(),
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AuthError::RefreshFailed {
                message: format!("refresh endpoint answered {}", response.status()),
            })
        }
    }

    async fn log_out(&self) {
        // Local state goes first: teardown must succeed even when the
        // logout endpoint is unreachable or the session is already gone.
        self.session.clear().await;

        let url = match self.settings.resolve(LOGOUT_ROUTE) {
            Ok(url) => url,
            Err(error) => {
                tracing::debug!(%error, "logout URL could not be built");
                return;
            }
        };

        match self
            .client
            .post(url)
            .timeout(Duration::from_millis(self.settings.request_timeout_ms))
            .send()
            .await
        {
            Ok(response) if !response.status().is_success() => {
                tracing::debug!(status = response.status().as_u16(), "logout endpoint answered with error");
            }
            Ok(_) => {}
            Err(error) => {
                tracing::debug!(%error, "logout notification failed");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticator_creation() {
        let settings = ClientSettings::new("https://shop.example.com").unwrap();
        let _authenticator =
            HttpAuthenticator::new(Client::new(), settings, SessionStore::new());
    }
}
