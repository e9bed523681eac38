//! Authentication domain types
//!
//! Auth endpoint routes, the refresh-exemption predicate, and the error
//! type a failed refresh episode fans out to every waiting caller.

use thiserror::Error;

/// Path of the login endpoint.
pub const LOGIN_ROUTE: &str = "/auth/login";
/// Path of the signup endpoint.
pub const SIGNUP_ROUTE: &str = "/auth/signup";
/// Path of the logout endpoint.
pub const LOGOUT_ROUTE: &str = "/auth/logout";
/// Path of the credential refresh endpoint.
pub const REFRESH_ROUTE: &str = "/auth/refresh-token";
/// Path of the profile endpoint. Note: this one is *not* refresh-exempt.
pub const PROFILE_ROUTE: &str = "/auth/profile";

/// Routes that must never trigger a credential refresh.
///
/// A 401 from any of these propagates untouched; intercepting them would
/// loop forever on the auth endpoints themselves.
const REFRESH_EXEMPT_ROUTES: [&str; 4] = [LOGIN_ROUTE, SIGNUP_ROUTE, LOGOUT_ROUTE, REFRESH_ROUTE];

/// Returns true if a request to this path must bypass the refresh
/// coordinator. Matching is by path substring.
#[must_use]
pub fn is_refresh_exempt(path: &str) -> bool {
    REFRESH_EXEMPT_ROUTES.iter().any(|route| path.contains(route))
}

/// Errors from a credential refresh episode.
///
/// One refresh failure is shared by every caller waiting on the episode,
/// so this type is `Clone` with string payloads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The refresh endpoint rejected the call.
    #[error("credential refresh failed: {message}")]
    RefreshFailed {
        /// Error detail from the refresh endpoint or transport.
        message: String,
    },

    /// The refresh call did not settle within the configured bound.
    #[error("credential refresh timed out after {timeout_ms} ms")]
    RefreshTimedOut {
        /// The timeout that was exceeded, in milliseconds.
        timeout_ms: u64,
    },

    /// The refresh episode ended without publishing a result.
    ///
    /// Only reachable if the leading task was cancelled mid-refresh;
    /// treated the same as a refresh failure.
    #[error("credential refresh was abandoned")]
    RefreshAbandoned,
}
