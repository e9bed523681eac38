//! Session identity types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role attached to an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular storefront customer (default).
    #[default]
    Customer,
    /// Administrator with access to the dashboard endpoints.
    Admin,
}

impl Role {
    /// Returns true for administrator accounts.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Locally held identity of the signed-in user.
///
/// Cleared as a whole on session teardown; the credential itself lives in
/// an HTTP-only cookie the client never inspects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Account email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Account role.
    #[serde(default)]
    pub role: Role,
    /// When this identity was established locally.
    pub authenticated_at: DateTime<Utc>,
}

impl Identity {
    /// Creates an identity established now, with the default role.
    #[must_use]
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            role: Role::default(),
            authenticated_at: Utc::now(),
        }
    }

    /// Sets the role on this identity.
    #[must_use]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}
