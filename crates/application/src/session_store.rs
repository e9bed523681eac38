//! Local session state
//!
//! Thread-safe store for the signed-in identity, in the shape of a small
//! clone-shareable handle around shared state.

use std::sync::Arc;
use tokio::sync::RwLock;

use aegis_domain::Identity;

/// Thread-safe store for the locally held identity.
///
/// Clones share the same underlying state, so one store can be handed to
/// the authenticator, the use cases, and the UI alike.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    identity: Arc<RwLock<Option<Identity>>>,
}

impl SessionStore {
    /// Creates an empty (signed-out) store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            identity: Arc::new(RwLock::new(None)),
        }
    }

    /// Replaces the stored identity.
    pub async fn set(&self, identity: Identity) {
        let mut guard = self.identity.write().await;
        *guard = Some(identity);
    }

    /// Returns the stored identity, if signed in.
    pub async fn get(&self) -> Option<Identity> {
        let guard = self.identity.read().await;
        guard.clone()
    }

    /// Clears the stored identity. Idempotent.
    pub async fn clear(&self) {
        let mut guard = self.identity.write().await;
        *guard = None;
    }

    /// Returns true if an identity is stored.
    pub async fn is_authenticated(&self) -> bool {
        let guard = self.identity.read().await;
        guard.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aegis_domain::Role;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = SessionStore::new();
        assert!(!store.is_authenticated().await);

        store.set(Identity::new("ada@example.com", "Ada")).await;
        assert!(store.is_authenticated().await);

        let identity = store.get().await;
        assert!(identity.is_some_and(|i| i.email == "ada@example.com"));
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let store = SessionStore::new();
        store
            .set(Identity::new("root@example.com", "Root").with_role(Role::Admin))
            .await;

        store.clear().await;
        assert!(!store.is_authenticated().await);

        // Clearing an already-empty store is fine.
        store.clear().await;
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = SessionStore::new();
        let other = store.clone();

        store.set(Identity::new("ada@example.com", "Ada")).await;
        assert!(other.is_authenticated().await);

        other.clear().await;
        assert!(!store.is_authenticated().await);
    }
}
