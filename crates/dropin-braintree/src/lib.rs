//! # dropin-braintree
//!
//! Braintree gateway implementation for dropin-pay-rs.
//!
//! Talks to the Braintree GraphQL API (JSON over HTTPS) for the two
//! operations the server needs:
//!
//! 1. **createClientToken** — mint a short-lived token for the browser-side
//!    drop-in widget
//! 2. **chargePaymentMethod** — execute a sale against a payment-method
//!    nonce
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dropin_braintree::BraintreeGateway;
//! use dropin_core::{Amount, PaymentGateway, SaleRequest};
//!
//! // Credentials come from BRAINTREE_* environment variables
//! let gateway = BraintreeGateway::from_env()?;
//!
//! let token = gateway.generate_client_token().await?;
//!
//! let request = SaleRequest::new(Amount::parse("10.00")?, nonce)?;
//! let result = gateway.sale(&request).await?;
//! ```

pub mod config;
pub mod gateway;

// Re-exports
pub use config::{BraintreeConfig, Environment};
pub use gateway::BraintreeGateway;
