//! Auth use cases
//!
//! One struct per user-facing operation, each with Input/Output types and
//! an `execute` method: signing up, signing in, signing out, and checking
//! the current session against the profile endpoint.

mod check_auth;
mod sign_in;
mod sign_out;
mod sign_up;

pub use check_auth::{CheckAuth, CheckAuthOutput};
pub use sign_in::{SignIn, SignInInput, SignInOutput};
pub use sign_out::SignOut;
pub use sign_up::{SignUp, SignUpInput, SignUpOutput};

use serde::Deserialize;

use aegis_domain::{ResponseSpec, Role};

/// The API's response envelope: `{ "data": ..., "message": ... }`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    #[allow(dead_code)]
    pub message: Option<String>,
}

/// Account fields the auth endpoints return in `data`.
#[derive(Debug, Deserialize)]
pub(crate) struct AccountData {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

/// Error responses carry `{ "message": ... }`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Extracts the API error message from a response, falling back to the
/// status reason phrase when the body is not the expected shape.
pub(crate) fn error_message(response: &ResponseSpec) -> String {
    response
        .json::<ErrorBody>()
        .map_or_else(|_| response.status.reason_phrase().to_string(), |b| b.message)
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::time::Duration;

    #[test]
    fn test_error_message_from_body() {
        let response = ResponseSpec::new(
            400,
            HashMap::new(),
            br#"{"message": "email already in use"}"#.to_vec(),
            Duration::ZERO,
        );
        assert_eq!(error_message(&response), "email already in use");
    }

    #[test]
    fn test_error_message_falls_back_to_reason_phrase() {
        let response = ResponseSpec::new(500, HashMap::new(), b"<html>".to_vec(), Duration::ZERO);
        assert_eq!(error_message(&response), "Internal Server Error");
    }
}
