//! Aegis Domain - Core types for the storefront client
//!
//! This crate defines the domain model for the Aegis storefront API client.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod error;
pub mod id;
pub mod request;
pub mod response;
pub mod session;
pub mod settings;

pub use auth::{AuthError, is_refresh_exempt};
pub use error::{DomainError, DomainResult};
pub use id::generate_id;
pub use request::{Header, Headers, HttpMethod, RequestDescriptor};
pub use response::{ResponseSpec, StatusCode};
pub use session::{Identity, Role};
pub use settings::ClientSettings;
