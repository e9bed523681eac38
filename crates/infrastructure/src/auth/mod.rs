//! Authentication adapters

mod http_authenticator;

pub use http_authenticator::HttpAuthenticator;
