//! # Braintree Gateway Client
//!
//! Implementation of the two gateway operations over the Braintree GraphQL
//! API (JSON over HTTPS, Basic auth with the public/private key pair).
//!
//! The client is immutable after construction and carries an explicit
//! request timeout. Sales are never retried: without an idempotency key a
//! retried charge can double-bill.

use crate::config::BraintreeConfig;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dropin_core::{
    ClientToken, PaymentError, PaymentGateway, PaymentResult, ProcessorResponse, SaleRequest,
    SaleResult, Transaction, TransactionStatus,
};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info, instrument};

const CREATE_CLIENT_TOKEN_MUTATION: &str = "\
mutation CreateClientToken($input: CreateClientTokenInput!) {
  createClientToken(input: $input) {
    clientToken
  }
}";

const CHARGE_PAYMENT_METHOD_MUTATION: &str = "\
mutation ChargePaymentMethod($input: ChargePaymentMethodInput!) {
  chargePaymentMethod(input: $input) {
    transaction {
      id
      status
      amount { value currencyCode }
      processorResponse { legacyCode message }
      createdAt
    }
  }
}";

/// Braintree implementation of [`PaymentGateway`]
pub struct BraintreeGateway {
    config: BraintreeConfig,
    client: Client,
}

impl BraintreeGateway {
    /// Create a gateway from an already-validated config.
    pub fn new(config: BraintreeConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| PaymentError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables. Fails fast on malformed
    /// credentials so misconfiguration aborts startup, not the first sale.
    pub fn from_env() -> PaymentResult<Self> {
        let config = BraintreeConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &BraintreeConfig {
        &self.config
    }

    /// POST one GraphQL document and return the raw response body.
    async fn execute(&self, query: &str, variables: serde_json::Value) -> PaymentResult<String> {
        let url = format!("{}/graphql", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Braintree-Version", &self.config.api_version)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Braintree API error: status={}, body={}", status, body);
            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(PaymentError::AuthenticationFailed(
                    "gateway rejected API credentials".to_string(),
                ));
            }
            return Err(PaymentError::ProviderError {
                provider: "braintree".to_string(),
                message: format!("HTTP {status}: {body}"),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl PaymentGateway for BraintreeGateway {
    #[instrument(skip(self))]
    async fn generate_client_token(&self) -> PaymentResult<ClientToken> {
        // Empty options set; merchant account defaulting is the gateway's.
        let body = self
            .execute(CREATE_CLIENT_TOKEN_MUTATION, json!({ "input": {} }))
            .await?;

        let envelope: GraphQlResponse<CreateClientTokenData> = serde_json::from_str(&body)
            .map_err(|e| {
                PaymentError::Serialization(format!("Failed to parse token response: {e}"))
            })?;

        if let Some(err) = envelope.errors.first() {
            return Err(map_graphql_error(err));
        }

        let token = envelope
            .data
            .and_then(|d| d.create_client_token)
            .and_then(|t| t.client_token)
            .ok_or_else(|| {
                PaymentError::Serialization("token response missing clientToken".to_string())
            })?;

        debug!("Generated client token ({} bytes)", token.len());
        ClientToken::new(token)
    }

    #[instrument(skip(self, request), fields(amount = %request.amount))]
    async fn sale(&self, request: &SaleRequest) -> PaymentResult<SaleResult> {
        let variables = json!({
            "input": {
                "paymentMethodId": request.payment_method_nonce,
                "transaction": { "amount": request.amount.to_string() }
            }
        });

        let body = self
            .execute(CHARGE_PAYMENT_METHOD_MUTATION, variables)
            .await?;

        let envelope: GraphQlResponse<ChargePaymentMethodData> = serde_json::from_str(&body)
            .map_err(|e| {
                PaymentError::Serialization(format!("Failed to parse sale response: {e}"))
            })?;

        let transaction = envelope
            .data
            .and_then(|d| d.charge_payment_method)
            .and_then(|c| c.transaction)
            .map(TransactionWire::into_transaction);

        // GraphQL-level errors: validation/transaction classes are
        // business-level declines (consumed nonce, amount rules), not
        // transport failures.
        if let Some(err) = envelope.errors.first() {
            return match err.error_class() {
                Some("VALIDATION") | Some("TRANSACTION") | Some("PAYMENT") => {
                    info!("Sale declined by gateway: {}", err.message);
                    Ok(SaleResult::Declined {
                        transaction,
                        message: err.message.clone(),
                    })
                }
                _ => Err(map_graphql_error(err)),
            };
        }

        let transaction = transaction.ok_or_else(|| {
            PaymentError::Serialization("sale response missing transaction".to_string())
        })?;

        if transaction.status.is_success() {
            info!("Sale approved: txn={}", transaction.id);
            Ok(SaleResult::Approved { transaction })
        } else {
            let message = transaction
                .processor_response
                .as_ref()
                .and_then(|p| p.message.clone())
                .unwrap_or_else(|| format!("transaction status {:?}", transaction.status));
            info!("Sale declined: txn={}, reason={}", transaction.id, message);
            Ok(SaleResult::Declined {
                transaction: Some(transaction),
                message,
            })
        }
    }

    fn provider_name(&self) -> &'static str {
        "braintree"
    }
}

fn map_graphql_error(err: &GraphQlError) -> PaymentError {
    match err.error_class() {
        Some("AUTHENTICATION") | Some("AUTHORIZATION") => {
            PaymentError::AuthenticationFailed(err.message.clone())
        }
        _ => PaymentError::ProviderError {
            provider: "braintree".to_string(),
            message: err.message.clone(),
        },
    }
}

// =============================================================================
// Braintree GraphQL Wire Types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct GraphQlResponse<T> {
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(default)]
    extensions: Option<GraphQlErrorExtensions>,
}

impl GraphQlError {
    fn error_class(&self) -> Option<&str> {
        self.extensions
            .as_ref()
            .and_then(|e| e.error_class.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorExtensions {
    #[serde(rename = "errorClass")]
    error_class: Option<String>,
    #[serde(rename = "legacyCode")]
    #[allow(dead_code)]
    legacy_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateClientTokenData {
    #[serde(rename = "createClientToken")]
    create_client_token: Option<CreateClientTokenPayload>,
}

#[derive(Debug, Deserialize)]
struct CreateClientTokenPayload {
    #[serde(rename = "clientToken")]
    client_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChargePaymentMethodData {
    #[serde(rename = "chargePaymentMethod")]
    charge_payment_method: Option<ChargePaymentMethodPayload>,
}

#[derive(Debug, Deserialize)]
struct ChargePaymentMethodPayload {
    transaction: Option<TransactionWire>,
}

#[derive(Debug, Deserialize)]
struct TransactionWire {
    id: String,
    status: String,
    amount: Option<AmountWire>,
    #[serde(rename = "processorResponse")]
    processor_response: Option<ProcessorResponseWire>,
    #[serde(rename = "createdAt")]
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AmountWire {
    value: String,
    #[serde(rename = "currencyCode")]
    currency_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProcessorResponseWire {
    #[serde(rename = "legacyCode")]
    legacy_code: Option<String>,
    message: Option<String>,
}

impl TransactionWire {
    fn into_transaction(self) -> Transaction {
        let (amount, currency) = match self.amount {
            Some(a) => (a.value, a.currency_code),
            None => (String::new(), None),
        };
        Transaction {
            id: self.id,
            status: TransactionStatus::from_wire(&self.status),
            amount,
            currency,
            processor_response: self.processor_response.map(|p| ProcessorResponse {
                code: p.legacy_code,
                message: p.message,
            }),
            created_at: self
                .created_at
                .and_then(|ts| DateTime::parse_from_rfc3339(&ts).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}
