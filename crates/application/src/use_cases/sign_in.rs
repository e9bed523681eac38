//! Sign-in use case.

use serde_json::json;

use aegis_domain::{Identity, RequestDescriptor, auth::LOGIN_ROUTE};

use crate::client::GuardedClient;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{Authenticator, HttpTransport};
use crate::session_store::SessionStore;
use crate::use_cases::{AccountData, Envelope, error_message};

/// Input for signing in.
#[derive(Debug, Clone)]
pub struct SignInInput {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Output from signing in.
#[derive(Debug, Clone)]
pub struct SignInOutput {
    /// The identity now stored in the session.
    pub identity: Identity,
}

/// Use case for signing in with email and password.
pub struct SignIn<T, A> {
    client: GuardedClient<T, A>,
    session: SessionStore,
}

impl<T, A> SignIn<T, A>
where
    T: HttpTransport,
    A: Authenticator,
{
    /// Creates the use case.
    pub const fn new(client: GuardedClient<T, A>, session: SessionStore) -> Self {
        Self { client, session }
    }

    /// Calls the login endpoint and stores the returned identity.
    ///
    /// The credential itself arrives as a cookie set by the server; only
    /// the identity fields are read from the response.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Api` when the endpoint rejects the
    /// credentials, or a transport/domain error.
    pub async fn execute(&self, input: SignInInput) -> ApplicationResult<SignInOutput> {
        let request = RequestDescriptor::post(
            LOGIN_ROUTE,
            json!({ "email": input.email, "password": input.password }),
        )?;

        let response = self.client.execute(request).await?;
        if !response.status.is_success() {
            return Err(ApplicationError::Api {
                status: response.status.as_u16(),
                message: error_message(&response),
            });
        }

        let envelope: Envelope<AccountData> = response.json()?;
        let identity = Identity::new(envelope.data.email, envelope.data.name)
            .with_role(envelope.data.role);
        self.session.set(identity.clone()).await;

        tracing::info!(email = %identity.email, "signed in");
        Ok(SignInOutput { identity })
    }
}
