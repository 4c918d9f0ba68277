//! # dropin-core
//!
//! Core types and the gateway trait for dropin-pay-rs.
//!
//! This crate provides:
//! - `PaymentGateway` trait for hosted gateway implementations
//! - `Amount` for validated charge amounts
//! - `SaleRequest`, `SaleResult`, `Transaction` for the sale flow
//! - `ClientToken` for the browser-side drop-in handshake
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use dropin_core::{Amount, PaymentGateway, SaleRequest};
//!
//! // Validate the form input before touching the gateway
//! let amount = Amount::parse("10.00")?;
//! let request = SaleRequest::new(amount, nonce)?;
//!
//! // Execute the sale; a decline comes back as a value, not an Err
//! let result = gateway.sale(&request).await?;
//! if result.is_success() {
//!     println!("charged, txn {}", result.transaction_id().unwrap());
//! }
//! ```

pub mod amount;
pub mod error;
pub mod gateway;
pub mod sale;

// Re-exports for convenience
pub use amount::Amount;
pub use error::{PaymentError, PaymentResult};
pub use gateway::{BoxedPaymentGateway, PaymentGateway};
pub use sale::{
    ClientToken, ProcessorResponse, SaleRequest, SaleResult, Transaction, TransactionStatus,
};
