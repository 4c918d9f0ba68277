//! # Sale Types
//!
//! Request and result types for the sale flow, plus the client token the
//! browser-side drop-in needs to tokenize card details. Both entities are
//! transient: created per request, discarded after the response.

use crate::amount::Amount;
use crate::error::PaymentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Short-lived credential the gateway issues for one browser session.
///
/// Opaque to this server; it is embedded into the payment page and consumed
/// by the drop-in widget. Never cached across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientToken(String);

impl ClientToken {
    pub fn new(token: impl Into<String>) -> Result<Self, PaymentError> {
        let token = token.into();
        if token.is_empty() {
            return Err(PaymentError::Serialization(
                "gateway returned an empty client token".to_string(),
            ));
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A validated sale request: a positive amount and a single-use
/// payment-method nonce produced client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRequest {
    pub amount: Amount,
    pub payment_method_nonce: String,
}

impl SaleRequest {
    pub fn new(amount: Amount, nonce: impl Into<String>) -> Result<Self, PaymentError> {
        let payment_method_nonce = nonce.into();
        if payment_method_nonce.trim().is_empty() {
            return Err(PaymentError::InvalidRequest(
                "payment_method_nonce must not be empty".to_string(),
            ));
        }
        Ok(Self {
            amount,
            payment_method_nonce,
        })
    }
}

/// Gateway-reported lifecycle state of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Authorized,
    SubmittedForSettlement,
    Settling,
    Settled,
    ProcessorDeclined,
    GatewayRejected,
    Failed,
    Unknown(String),
}

impl TransactionStatus {
    /// Map the gateway's SCREAMING_SNAKE status strings.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "AUTHORIZED" => Self::Authorized,
            "SUBMITTED_FOR_SETTLEMENT" => Self::SubmittedForSettlement,
            "SETTLING" => Self::Settling,
            "SETTLED" => Self::Settled,
            "PROCESSOR_DECLINED" => Self::ProcessorDeclined,
            "GATEWAY_REJECTED" => Self::GatewayRejected,
            "FAILED" => Self::Failed,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// True for states that mean the charge went through.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Self::Authorized | Self::SubmittedForSettlement | Self::Settling | Self::Settled
        )
    }
}

/// Card-processor response attached to a transaction (decline codes etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A transaction as reported back by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Gateway-assigned transaction id
    pub id: String,
    pub status: TransactionStatus,
    /// Charged amount as reported back (string form, gateway-canonical)
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor_response: Option<ProcessorResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Outcome of a sale the gateway actually processed.
///
/// `Declined` is a normal value, not an error: the web layer renders it with
/// HTTP 200 and surfaces the reason in the page body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SaleResult {
    Approved { transaction: Transaction },
    Declined {
        #[serde(skip_serializing_if = "Option::is_none")]
        transaction: Option<Transaction>,
        message: String,
    },
}

impl SaleResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Approved { .. })
    }

    /// Transaction id, if the gateway created a transaction at all.
    pub fn transaction_id(&self) -> Option<&str> {
        match self {
            Self::Approved { transaction } => Some(&transaction.id),
            Self::Declined { transaction, .. } => transaction.as_ref().map(|t| t.id.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;

    #[test]
    fn test_client_token_rejects_empty() {
        assert!(ClientToken::new("").is_err());
        assert_eq!(ClientToken::new("tok_abc").unwrap().as_str(), "tok_abc");
    }

    #[test]
    fn test_sale_request_requires_nonce() {
        let amount = Amount::parse("10.00").unwrap();
        assert!(SaleRequest::new(amount, "").is_err());
        assert!(SaleRequest::new(amount, "   ").is_err());
        assert!(SaleRequest::new(amount, "fake-valid-nonce").is_ok());
    }

    #[test]
    fn test_status_from_wire() {
        assert_eq!(
            TransactionStatus::from_wire("SUBMITTED_FOR_SETTLEMENT"),
            TransactionStatus::SubmittedForSettlement
        );
        assert_eq!(
            TransactionStatus::from_wire("PROCESSOR_DECLINED"),
            TransactionStatus::ProcessorDeclined
        );
        assert_eq!(
            TransactionStatus::from_wire("VOIDED"),
            TransactionStatus::Unknown("VOIDED".to_string())
        );
    }

    #[test]
    fn test_status_success_states() {
        assert!(TransactionStatus::Authorized.is_success());
        assert!(TransactionStatus::SubmittedForSettlement.is_success());
        assert!(TransactionStatus::Settled.is_success());
        assert!(!TransactionStatus::ProcessorDeclined.is_success());
        assert!(!TransactionStatus::GatewayRejected.is_success());
        assert!(!TransactionStatus::Failed.is_success());
    }

    #[test]
    fn test_sale_result_accessors() {
        let txn = Transaction {
            id: "txn_1".to_string(),
            status: TransactionStatus::SubmittedForSettlement,
            amount: "10.00".to_string(),
            currency: Some("USD".to_string()),
            processor_response: None,
            created_at: None,
        };
        let approved = SaleResult::Approved { transaction: txn };
        assert!(approved.is_success());
        assert_eq!(approved.transaction_id(), Some("txn_1"));

        let declined = SaleResult::Declined {
            transaction: None,
            message: "Do Not Honor".to_string(),
        };
        assert!(!declined.is_success());
        assert_eq!(declined.transaction_id(), None);
    }
}
