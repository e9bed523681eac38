//! Sign-up use case.

use serde_json::json;

use aegis_domain::{Identity, RequestDescriptor, auth::SIGNUP_ROUTE};

use crate::client::GuardedClient;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{Authenticator, HttpTransport};
use crate::session_store::SessionStore;
use crate::use_cases::{AccountData, Envelope, error_message};

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct SignUpInput {
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
    /// Password confirmation; must match `password`.
    pub confirm_password: String,
}

/// Output from creating an account.
#[derive(Debug, Clone)]
pub struct SignUpOutput {
    /// The identity now stored in the session.
    pub identity: Identity,
}

/// Use case for creating a new account.
pub struct SignUp<T, A> {
    client: GuardedClient<T, A>,
    session: SessionStore,
}

impl<T, A> SignUp<T, A>
where
    T: HttpTransport,
    A: Authenticator,
{
    /// Creates the use case.
    pub const fn new(client: GuardedClient<T, A>, session: SessionStore) -> Self {
        Self { client, session }
    }

    /// Validates the input, calls the signup endpoint, and stores the
    /// returned identity.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Validation` when the passwords do not
    /// match, `ApplicationError::Api` when the endpoint rejects the
    /// account, or a transport/domain error.
    pub async fn execute(&self, input: SignUpInput) -> ApplicationResult<SignUpOutput> {
        if input.password != input.confirm_password {
            return Err(ApplicationError::Validation(
                "passwords do not match".to_string(),
            ));
        }

        let request = RequestDescriptor::post(
            SIGNUP_ROUTE,
            json!({
                "name": input.name,
                "email": input.email,
                "password": input.password,
            }),
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

        tracing::info!(email = %identity.email, "account created");
        Ok(SignUpOutput { identity })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::use_cases::testing::{FixedTransport, client_over};
    use pretty_assertions::assert_eq;

    fn input() -> SignUpInput {
        SignUpInput {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
            confirm_password: "hunter2".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_stores_identity() {
        let transport = FixedTransport::ok(r#"{"data": {"email": "ada@example.com", "name": "Ada"}}"#);
        let session = SessionStore::new();
        let use_case = SignUp::new(client_over(transport), session.clone());

        let output = use_case.execute(input()).await.unwrap();
        assert_eq!(output.identity.email, "ada@example.com");
        assert!(session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_password_mismatch_never_hits_the_network() {
        let transport = FixedTransport::ok("{}");
        let session = SessionStore::new();
        let use_case = SignUp::new(client_over(transport), session.clone());

        let result = use_case
            .execute(SignUpInput {
                confirm_password: "different".to_string(),
                ..input()
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::Validation(_))));
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_sign_up_surfaces_api_error() {
        let transport = FixedTransport::status(409, r#"{"message": "email already in use"}"#);
        let session = SessionStore::new();
        let use_case = SignUp::new(client_over(transport), session);

        let result = use_case.execute(input()).await;
        match result {
            Err(ApplicationError::Api { status, message }) => {
                assert_eq!(status, 409);
                assert_eq!(message, "email already in use");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
