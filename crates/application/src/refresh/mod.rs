//! Credential refresh coordination
//!
//! Single-flight deduplication of credential refresh calls: however many
//! requests fail unauthorized at once, one refresh call goes out and every
//! caller shares its outcome.

mod coordinator;

pub use coordinator::RefreshCoordinator;
