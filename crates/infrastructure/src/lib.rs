//! Aegis Infrastructure - External adapters
//!
//! Implementations of the application ports over real collaborators:
//! the reqwest HTTP transport and the HTTP authenticator. Both share one
//! underlying `reqwest::Client` so the credential cookie set by the
//! refresh endpoint is visible to reissued requests.

pub mod adapters;
pub mod auth;

pub use adapters::ReqwestTransport;
pub use auth::HttpAuthenticator;
