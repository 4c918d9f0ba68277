//! # Application State
//!
//! Shared state for the Axum application: the gateway client and server
//! configuration. Built once in `main` and cloned into handlers via axum
//! `State` — there is no process-global gateway configuration.

use dropin_braintree::BraintreeGateway;
use dropin_core::BoxedPaymentGateway;
use std::path::PathBuf;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Directory served under /public
    pub public_dir: PathBuf,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            public_dir: std::env::var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public")),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment gateway client, immutable after startup
    pub gateway: BoxedPaymentGateway,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state with the Braintree gateway configured from environment
    /// variables. A configuration error here aborts startup.
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let gateway = BraintreeGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Braintree: {e}"))?;

        Ok(Self {
            gateway: Arc::new(gateway),
            config,
        })
    }

    /// Create state with an explicit gateway (tests swap in a mock here).
    pub fn with_gateway(gateway: BoxedPaymentGateway, config: AppConfig) -> Self {
        Self { gateway, config }
    }
}
