//! Aegis Application - Client orchestration
//!
//! This crate owns the behavior of the storefront client: the ports to the
//! outside world (HTTP transport, authenticator), the session store, the
//! single-flight refresh coordinator that deduplicates concurrent
//! credential refreshes, the guarded client that retries unauthorized
//! calls, and the auth use cases.

pub mod client;
pub mod error;
pub mod ports;
pub mod refresh;
pub mod session_store;
pub mod use_cases;

pub use client::GuardedClient;
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{Authenticator, HttpTransport, TransportError};
pub use refresh::RefreshCoordinator;
pub use session_store::SessionStore;
pub use use_cases::{
    CheckAuth, CheckAuthOutput, SignIn, SignInInput, SignInOutput, SignOut, SignUp, SignUpInput,
    SignUpOutput,
};
