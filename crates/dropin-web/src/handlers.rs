//! # Request Handlers
//!
//! Axum request handlers for the drop-in payment server. Form input is
//! validated into a typed [`SaleRequest`] before any gateway call; a
//! validation failure answers 400 without touching the gateway.

use crate::pages;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use dropin_core::{Amount, PaymentError, SaleRequest};
use serde::Deserialize;
use tracing::{error, info, instrument};

/// Raw sale form as submitted by the browser. Fields are optional here so
/// that a missing field becomes our 400 page rather than an extractor
/// rejection.
#[derive(Debug, Deserialize)]
pub struct SaleForm {
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub payment_method_nonce: Option<String>,
}

impl SaleForm {
    /// Validate into a typed request, or a client error naming the field.
    fn validate(&self) -> Result<SaleRequest, PaymentError> {
        let amount_raw = self
            .amount
            .as_deref()
            .ok_or_else(|| PaymentError::InvalidRequest("missing form field: amount".to_string()))?;
        let nonce = self.payment_method_nonce.as_deref().ok_or_else(|| {
            PaymentError::InvalidRequest("missing form field: payment_method_nonce".to_string())
        })?;

        let amount = Amount::parse(amount_raw)?;
        SaleRequest::new(amount, nonce)
    }
}

fn payment_error_to_response(err: &PaymentError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let title = if status.is_client_error() {
        "Invalid request"
    } else {
        "Payment service unavailable"
    };
    (status, Html(pages::error_page(title, &err.to_string()))).into_response()
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "dropin-pay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// `GET /` — render the payment page with a freshly minted client token.
///
/// Tokens are requested per page load and never cached; a gateway failure
/// here surfaces as a server error.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Response {
    match state.gateway.generate_client_token().await {
        Ok(token) => {
            info!("Rendered payment page with fresh client token");
            Html(pages::payment_page(token.as_str())).into_response()
        }
        Err(e) => {
            error!("Failed to generate client token: {e}");
            payment_error_to_response(&e)
        }
    }
}

/// `POST /proc` — validate the form, execute the sale, render the result.
///
/// Approvals and declines both answer 200: the decline is a business
/// outcome shown in the page, not a transport failure. Only POST is
/// routed; the ancestor of this server also accepted GET for this charge.
#[instrument(skip(state, form))]
pub async fn proc_sale(
    State(state): State<AppState>,
    Form(form): Form<SaleForm>,
) -> Response {
    let request = match form.validate() {
        Ok(request) => request,
        Err(e) => {
            info!("Rejected sale form: {e}");
            return payment_error_to_response(&e);
        }
    };

    let amount_echo = request.amount.to_string();
    let nonce_echo = request.payment_method_nonce.clone();

    match state.gateway.sale(&request).await {
        Ok(result) => {
            info!(
                success = result.is_success(),
                transaction_id = result.transaction_id(),
                "Sale processed"
            );
            Html(pages::result_page(&result, &amount_echo, &nonce_echo)).into_response()
        }
        Err(e) => {
            error!("Sale call failed: {e}");
            payment_error_to_response(&e)
        }
    }
}
