//! Aegis storefront client - Main Entry Point
//!
//! Wires the reqwest adapters to the guarded client and validates the
//! current session against the configured storefront API.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use aegis_application::{CheckAuth, GuardedClient, RefreshCoordinator, SessionStore};
use aegis_domain::ClientSettings;
use aegis_infrastructure::{HttpAuthenticator, ReqwestTransport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Get configuration from environment
    let base_url =
        std::env::var("AEGIS_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());
    let settings = ClientSettings::new(&base_url)?;

    tracing::info!(%base_url, "starting Aegis v{}", env!("CARGO_PKG_VERSION"));

    // One transport, one cookie jar, one coordinator for the process.
    let session = SessionStore::new();
    let transport = Arc::new(ReqwestTransport::new(settings.clone())?);
    let authenticator = Arc::new(HttpAuthenticator::new(
        transport.client(),
        settings.clone(),
        session.clone(),
    ));
    let coordinator = Arc::new(RefreshCoordinator::new(
        Arc::clone(&authenticator),
        Duration::from_millis(settings.refresh_timeout_ms),
    ));
    let client = GuardedClient::new(transport, coordinator);

    let check_auth = CheckAuth::new(client, session);
    match check_auth.execute().await {
        Ok(output) => {
            tracing::info!(
                email = %output.identity.email,
                role = ?output.identity.role,
                "session is valid"
            );
        }
        Err(error) => {
            tracing::warn!(%error, "no valid session");
        }
    }

    Ok(())
}
