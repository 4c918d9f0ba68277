//! # Payment Error Types
//!
//! Typed error handling for the drop-in payment server.
//! All gateway operations return `Result<T, PaymentError>`.
//!
//! A processor decline is NOT an error: the gateway processed the request
//! and answered. Declines travel as [`crate::SaleResult::Declined`].

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing credentials, unknown environment)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data (bad amount, empty nonce)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Gateway rejected our credentials
    #[error("Authentication with payment gateway failed: {0}")]
    AuthenticationFailed(String),

    /// Payment gateway API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with the gateway
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Returns true if this error is retryable.
    ///
    /// Note that a sale is never retried automatically even when the error
    /// is retryable: without idempotency keys a retry risks double-charging.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PaymentError::NetworkError(_) | PaymentError::ProviderError { .. }
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Configuration(_) => 500,
            PaymentError::InvalidRequest(_) => 400,
            PaymentError::AuthenticationFailed(_) => 500,
            PaymentError::ProviderError { .. } => 502,
            PaymentError::NetworkError(_) => 503,
            PaymentError::Serialization(_) => 500,
            PaymentError::Internal(_) => 500,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
