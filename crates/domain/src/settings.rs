//! Client settings
//!
//! Configuration for the storefront client: where the API lives and how
//! long calls may take.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Default per-request timeout in milliseconds.
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
/// Default bound on the credential refresh call in milliseconds.
const DEFAULT_REFRESH_TIMEOUT_MS: u64 = 30_000;

/// Settings for the storefront client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Base URL of the storefront API.
    pub base_url: Url,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Bound on the credential refresh call in milliseconds. A refresh
    /// that exceeds this is treated as a refresh failure.
    #[serde(default = "default_refresh_timeout_ms")]
    pub refresh_timeout_ms: u64,
    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

const fn default_refresh_timeout_ms() -> u64 {
    DEFAULT_REFRESH_TIMEOUT_MS
}

fn default_user_agent() -> String {
    concat!("Aegis/", env!("CARGO_PKG_VERSION")).to_string()
}

impl ClientSettings {
    /// Creates settings for the given base URL with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] if the base URL cannot be
    /// parsed or is not http(s).
    pub fn new(base_url: &str) -> DomainResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| DomainError::InvalidUrl(format!("{e}: {base_url}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "unsupported scheme: {}",
                base_url.scheme()
            )));
        }

        Ok(Self {
            base_url,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            refresh_timeout_ms: DEFAULT_REFRESH_TIMEOUT_MS,
            user_agent: default_user_agent(),
        })
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_request_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    /// Sets the refresh timeout.
    #[must_use]
    pub const fn with_refresh_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.refresh_timeout_ms = timeout_ms;
        self
    }

    /// Resolves an absolute request path against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPath`] if the path cannot be joined.
    pub fn resolve(&self, path: &str) -> DomainResult<Url> {
        // Url::join treats a leading '/' as root-relative, which is what
        // descriptor paths are.
        self.base_url
            .join(path)
            .map_err(|e| DomainError::InvalidPath(format!("{e}: {path}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let settings = ClientSettings::new("https://shop.example.com").unwrap();
        assert_eq!(settings.request_timeout_ms, 30_000);
        assert_eq!(settings.refresh_timeout_ms, 30_000);
        assert!(settings.user_agent.starts_with("Aegis/"));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let result = ClientSettings::new("ftp://shop.example.com");
        assert!(matches!(result, Err(DomainError::InvalidUrl(_))));
    }

    #[test]
    fn test_resolve_path() {
        let settings = ClientSettings::new("https://shop.example.com/api/v1/").unwrap();
        let url = settings.resolve("/cart").unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/cart");
    }
}
