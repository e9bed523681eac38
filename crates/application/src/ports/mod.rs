//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external
//! systems. Each port is a trait implemented by adapters in the
//! infrastructure layer, or by mocks in tests.

mod authenticator;
mod transport;

pub use authenticator::Authenticator;
pub use transport::{HttpTransport, TransportError};
