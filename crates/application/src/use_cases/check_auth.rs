//! Check-auth use case.

use aegis_domain::{Identity, RequestDescriptor, auth::PROFILE_ROUTE};

use crate::client::GuardedClient;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{Authenticator, HttpTransport};
use crate::session_store::SessionStore;
use crate::use_cases::{AccountData, Envelope, error_message};

/// Output from checking the current session.
#[derive(Debug, Clone)]
pub struct CheckAuthOutput {
    /// The identity confirmed by the profile endpoint.
    pub identity: Identity,
}

/// Use case for validating the current session on startup.
///
/// Calls the profile endpoint through the guarded client, so an expired
/// credential gets one transparent refresh-and-reissue before the session
/// is declared dead.
pub struct CheckAuth<T, A> {
    client: GuardedClient<T, A>,
    session: SessionStore,
}

impl<T, A> CheckAuth<T, A>
where
    T: HttpTransport,
    A: Authenticator,
{
    /// Creates the use case.
    pub const fn new(client: GuardedClient<T, A>, session: SessionStore) -> Self {
        Self { client, session }
    }

    /// Fetches the profile and stores the confirmed identity.
    ///
    /// On a non-success response the local session is cleared; a failed
    /// refresh episode has already torn it down.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Api` when the profile endpoint rejects
    /// the session, `ApplicationError::Refresh` when a refresh episode
    /// failed, or a transport/domain error.
    pub async fn execute(&self) -> ApplicationResult<CheckAuthOutput> {
        let request = RequestDescriptor::get(PROFILE_ROUTE)?;

        let response = self.client.execute(request).await?;
        if !response.status.is_success() {
            self.session.clear().await;
            return Err(ApplicationError::Api {
                status: response.status.as_u16(),
                message: error_message(&response),
            });
        }

        let envelope: Envelope<AccountData> = response.json()?;
        let identity = Identity::new(envelope.data.email, envelope.data.name)
            .with_role(envelope.data.role);
        self.session.set(identity.clone()).await;

        Ok(CheckAuthOutput { identity })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::use_cases::testing::{FixedTransport, client_over};
    use aegis_domain::Role;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_check_auth_confirms_identity() {
        let transport = FixedTransport::ok(
            r#"{"data": {"email": "root@example.com", "name": "Root", "role": "admin"}}"#,
        );
        let session = SessionStore::new();
        let use_case = CheckAuth::new(client_over(transport), session.clone());

        let output = use_case.execute().await.unwrap();
        assert_eq!(output.identity.role, Role::Admin);
        assert!(session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_dead_session_is_cleared() {
        // The profile route is not refresh-exempt, so the guarded client
        // has already retried once by the time a 401 reaches us here.
        let transport = FixedTransport::status(401, r#"{"message": "not signed in"}"#);
        let session = SessionStore::new();
        session.set(Identity::new("stale@example.com", "Stale")).await;
        let use_case = CheckAuth::new(client_over(transport), session.clone());

        let result = use_case.execute().await;
        assert!(matches!(result, Err(ApplicationError::Api { status: 401, .. })));
        assert!(!session.is_authenticated().await);
    }
}
