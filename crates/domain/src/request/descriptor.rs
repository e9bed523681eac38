//! Request descriptor type
//!
//! A `RequestDescriptor` captures everything needed to issue a call against
//! the storefront API, and to reissue it identically after a credential
//! refresh: method, path, headers, body, and a one-shot retry marker.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::generate_id;
use crate::request::{Header, Headers, HttpMethod};

/// A request against the storefront API, relative to the configured base URL.
///
/// The `retried` marker is one-shot: once set it is never cleared, which is
/// what prevents a request from being reissued more than once per failure
/// episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// Correlation id attached to log events for this request.
    pub id: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute path relative to the base URL (e.g. "/cart").
    pub path: String,
    /// Request headers.
    #[serde(default)]
    pub headers: Headers,
    /// Optional JSON request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    /// Whether this request has already been reissued once.
    #[serde(default)]
    retried: bool,
}

impl RequestDescriptor {
    /// Creates a new descriptor for the given method and path.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPath`] if the path does not start
    /// with `/`.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> DomainResult<Self> {
        let path = path.into();
        if !path.starts_with('/') {
            return Err(DomainError::InvalidPath(path));
        }

        Ok(Self {
            id: generate_id(),
            method,
            path,
            headers: Headers::new(),
            body: None,
            retried: false,
        })
    }

    /// Creates a GET descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPath`] if the path does not start
    /// with `/`.
    pub fn get(path: impl Into<String>) -> DomainResult<Self> {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST descriptor with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPath`] if the path does not start
    /// with `/`.
    pub fn post(path: impl Into<String>, body: serde_json::Value) -> DomainResult<Self> {
        let mut descriptor = Self::new(HttpMethod::Post, path)?;
        descriptor.body = Some(body);
        Ok(descriptor)
    }

    /// Adds a header to this descriptor.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(name, value));
        self
    }

    /// Returns true if this request has already been reissued once.
    #[must_use]
    pub const fn is_retried(&self) -> bool {
        self.retried
    }

    /// Marks this request as reissued. The marker can never be cleared.
    pub const fn mark_retried(&mut self) {
        self.retried = true;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_path_must_be_absolute() {
        let result = RequestDescriptor::get("cart");
        assert_eq!(
            result.unwrap_err(),
            DomainError::InvalidPath("cart".to_string())
        );
    }

    #[test]
    fn test_retry_marker_is_one_shot() {
        let mut descriptor = RequestDescriptor::get("/cart").unwrap();
        assert!(!descriptor.is_retried());

        descriptor.mark_retried();
        assert!(descriptor.is_retried());

        // Marking again is a no-op, never a toggle.
        descriptor.mark_retried();
        assert!(descriptor.is_retried());
    }

    #[test]
    fn test_post_carries_body() {
        let descriptor =
            RequestDescriptor::post("/auth/login", serde_json::json!({"email": "a@b.c"})).unwrap();
        assert_eq!(descriptor.method, HttpMethod::Post);
        assert!(descriptor.body.is_some());
    }

    #[test]
    fn test_descriptors_get_distinct_ids() {
        let a = RequestDescriptor::get("/cart").unwrap();
        let b = RequestDescriptor::get("/cart").unwrap();
        assert_ne!(a.id, b.id);
    }
}
