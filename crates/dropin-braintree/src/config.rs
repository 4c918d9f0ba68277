//! # Braintree Configuration
//!
//! Configuration management for the Braintree integration.
//! All credentials are loaded from environment variables; nothing is
//! hardcoded and nothing mutates after startup.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use dropin_core::PaymentError;
use std::env;
use std::fmt;

/// Gateway environment selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Simulated processing, no real funds move
    Sandbox,
    Production,
}

impl Environment {
    /// GraphQL endpoint for this environment.
    pub fn api_base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://payments.sandbox.braintree-api.com",
            Environment::Production => "https://payments.braintree-api.com",
        }
    }

    pub fn parse(s: &str) -> Result<Self, PaymentError> {
        match s.to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "production" => Ok(Environment::Production),
            other => Err(PaymentError::Configuration(format!(
                "BRAINTREE_ENVIRONMENT must be 'sandbox' or 'production', got {other:?}"
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => write!(f, "sandbox"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Braintree API configuration
#[derive(Debug, Clone)]
pub struct BraintreeConfig {
    /// Sandbox or production
    pub environment: Environment,

    /// Merchant id (identifies the gateway account)
    pub merchant_id: String,

    /// Public API key
    pub public_key: String,

    /// Private API key
    pub private_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// Braintree-Version header value
    pub api_version: String,
}

impl BraintreeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `BRAINTREE_ENVIRONMENT` (`sandbox` or `production`)
    /// - `BRAINTREE_MERCHANT_ID`
    /// - `BRAINTREE_PUBLIC_KEY`
    /// - `BRAINTREE_PRIVATE_KEY`
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let environment = env::var("BRAINTREE_ENVIRONMENT")
            .map_err(|_| PaymentError::Configuration("BRAINTREE_ENVIRONMENT not set".to_string()))
            .and_then(|v| Environment::parse(&v))?;

        let merchant_id = env::var("BRAINTREE_MERCHANT_ID").map_err(|_| {
            PaymentError::Configuration("BRAINTREE_MERCHANT_ID not set".to_string())
        })?;

        let public_key = env::var("BRAINTREE_PUBLIC_KEY").map_err(|_| {
            PaymentError::Configuration("BRAINTREE_PUBLIC_KEY not set".to_string())
        })?;

        let private_key = env::var("BRAINTREE_PRIVATE_KEY").map_err(|_| {
            PaymentError::Configuration("BRAINTREE_PRIVATE_KEY not set".to_string())
        })?;

        Self::new(environment, merchant_id, public_key, private_key)
    }

    /// Create config with explicit values.
    pub fn new(
        environment: Environment,
        merchant_id: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Result<Self, PaymentError> {
        let merchant_id = merchant_id.into();
        let public_key = public_key.into();
        let private_key = private_key.into();

        for (name, value) in [
            ("merchant id", &merchant_id),
            ("public key", &public_key),
            ("private key", &private_key),
        ] {
            if value.trim().is_empty() {
                return Err(PaymentError::Configuration(format!(
                    "Braintree {name} must not be empty"
                )));
            }
        }

        Ok(Self {
            api_base_url: environment.api_base_url().to_string(),
            environment,
            merchant_id,
            public_key,
            private_key,
            api_version: "2019-01-01".to_string(),
        })
    }

    /// Check if pointed at the sandbox
    pub fn is_sandbox(&self) -> bool {
        self.environment == Environment::Sandbox
    }

    /// Get authorization header value: Basic auth over the API key pair.
    pub fn auth_header(&self) -> String {
        let pair = format!("{}:{}", self.public_key, self.private_key);
        format!("Basic {}", BASE64.encode(pair))
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}
