//! # Payment Gateway Trait
//!
//! The contract between this server and the hosted payment gateway. The
//! server performs exactly two upstream operations: mint a client token for
//! the browser-side drop-in, and execute a sale against a nonce.
//!
//! Implementations hold immutable configuration only; a gateway built once
//! at startup is shared read-only across all concurrent requests.

use crate::error::PaymentResult;
use crate::sale::{ClientToken, SaleRequest, SaleResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Hosted payment gateway operations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Ask the gateway for a short-lived client authorization token.
    ///
    /// Called once per payment-page render; tokens are never cached across
    /// requests.
    async fn generate_client_token(&self) -> PaymentResult<ClientToken>;

    /// Execute a sale: charge `request.amount` against the payment method
    /// referenced by the nonce.
    ///
    /// A processor decline is a successful call returning
    /// [`SaleResult::Declined`]; `Err` means the gateway could not be
    /// reached or rejected the request outright. Never retried.
    async fn sale(&self, request: &SaleRequest) -> PaymentResult<SaleResult>;

    /// Gateway name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;
