//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port using the reqwest
//! library. The client carries a cookie store: the session credential is
//! an HTTP-only cookie the server sets, and sharing this client with the
//! authenticator is what makes a refreshed credential visible to reissued
//! requests.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method};

use aegis_application::ports::{HttpTransport, TransportError};
use aegis_domain::{ClientSettings, HttpMethod, RequestDescriptor, ResponseSpec};

/// HTTP transport over `reqwest::Client`.
pub struct ReqwestTransport {
    client: Client,
    settings: ClientSettings,
}

impl ReqwestTransport {
    /// Creates a transport for the given settings.
    ///
    /// The client keeps cookies across requests and follows up to 10
    /// redirects.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(settings: ClientSettings) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client, settings })
    }

    /// Creates a transport around an existing reqwest client.
    #[must_use]
    pub const fn with_client(client: Client, settings: ClientSettings) -> Self {
        Self { client, settings }
    }

    /// Returns a handle to the underlying reqwest client.
    ///
    /// Handles share the connection pool and the cookie store; pass one
    /// to the authenticator so the refreshed credential lands in the same
    /// jar.
    #[must_use]
    pub fn client(&self) -> Client {
        self.client.clone()
    }

    /// Converts the domain method to a reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Maps reqwest errors to the transport port's error type.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            let message = error.to_string();
            let host = error
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_string();
            if message.to_lowercase().contains("dns") || message.to_lowercase().contains("resolve")
            {
                return TransportError::DnsError { host, message };
            }
            if message.to_lowercase().contains("refused") {
                return TransportError::ConnectionRefused { host };
            }
            return TransportError::ConnectionFailed(message);
        }

        TransportError::Other(error.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: &RequestDescriptor) -> Result<ResponseSpec, TransportError> {
        let url = self
            .settings
            .resolve(&request.path)
            .map_err(|e| TransportError::InvalidUrl(e.to_string()))?;
        let timeout_ms = self.settings.request_timeout_ms;

        let start = Instant::now();

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url)
            .timeout(Duration::from_millis(timeout_ms));

        for header in &request.headers {
            builder = builder.header(&header.name, &header.value);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let duration = start.elapsed();
        let status = response.status().as_u16();

        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Other(format!("failed to read body: {e}")))?
            .to_vec();

        tracing::trace!(
            request_id = %request.id,
            method = %request.method,
            path = %request.path,
            status,
            elapsed_ms = duration.as_millis() as u64,
            "request completed"
        );

        Ok(ResponseSpec::new(status, headers, body, duration))
    }
}
