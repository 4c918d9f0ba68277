//! HTTP-surface tests with a mock gateway; verifies the route contracts,
//! validation behavior, and the static asset sandbox.

use async_trait::async_trait;
use axum_test::TestServer;
use dropin_core::{
    ClientToken, PaymentError, PaymentGateway, PaymentResult, SaleRequest, SaleResult,
    Transaction, TransactionStatus,
};
use dropin_web::{create_router, AppConfig, AppState};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone, Copy)]
enum SaleBehavior {
    Approve,
    Decline,
    Unavailable,
}

/// Gateway double that counts `sale` invocations, so tests can assert the
/// upstream is never touched on validation failures.
struct MockGateway {
    token: &'static str,
    token_ok: bool,
    sale_behavior: SaleBehavior,
    sale_calls: AtomicUsize,
}

impl MockGateway {
    fn new(sale_behavior: SaleBehavior) -> Arc<Self> {
        Arc::new(Self {
            token: "tok_sandbox_abc123",
            token_ok: true,
            sale_behavior,
            sale_calls: AtomicUsize::new(0),
        })
    }

    fn with_broken_token() -> Arc<Self> {
        Arc::new(Self {
            token: "",
            token_ok: false,
            sale_behavior: SaleBehavior::Approve,
            sale_calls: AtomicUsize::new(0),
        })
    }

    fn sale_calls(&self) -> usize {
        self.sale_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn generate_client_token(&self) -> PaymentResult<ClientToken> {
        if self.token_ok {
            ClientToken::new(self.token)
        } else {
            Err(PaymentError::NetworkError("connection refused".to_string()))
        }
    }

    async fn sale(&self, request: &SaleRequest) -> PaymentResult<SaleResult> {
        self.sale_calls.fetch_add(1, Ordering::SeqCst);
        match self.sale_behavior {
            SaleBehavior::Approve => Ok(SaleResult::Approved {
                transaction: Transaction {
                    id: "txn_mock_1".to_string(),
                    status: TransactionStatus::SubmittedForSettlement,
                    amount: request.amount.to_string(),
                    currency: Some("USD".to_string()),
                    processor_response: None,
                    created_at: None,
                },
            }),
            SaleBehavior::Decline => Ok(SaleResult::Declined {
                transaction: None,
                message: "Processor declined: Do Not Honor".to_string(),
            }),
            SaleBehavior::Unavailable => {
                Err(PaymentError::NetworkError("connection reset".to_string()))
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

fn test_config(public_dir: PathBuf) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        public_dir,
    }
}

fn server_with(gateway: Arc<MockGateway>) -> TestServer {
    let state = AppState::with_gateway(gateway, test_config(PathBuf::from("does-not-exist")));
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn payment_page_embeds_fresh_token() {
    let server = server_with(MockGateway::new(SaleBehavior::Approve));

    let response = server.get("/").await;
    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("tok_sandbox_abc123"));
    assert!(body.contains("payment_method_nonce"));
}

#[tokio::test]
async fn token_failure_is_a_server_error() {
    let server = server_with(MockGateway::with_broken_token());

    let response = server.get("/").await;
    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn approved_sale_renders_transaction_id() {
    let gateway = MockGateway::new(SaleBehavior::Approve);
    let server = server_with(gateway.clone());

    let response = server
        .post("/proc")
        .form(&[("amount", "10.00"), ("payment_method_nonce", "fake-valid-nonce")])
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("Payment successful"));
    assert!(body.contains("txn_mock_1"));
    assert!(body.contains("10.00"));
    assert_eq!(gateway.sale_calls(), 1);
}

#[tokio::test]
async fn declined_sale_still_answers_200_with_reason() {
    let server = server_with(MockGateway::new(SaleBehavior::Decline));

    let response = server
        .post("/proc")
        .form(&[
            ("amount", "10.00"),
            ("payment_method_nonce", "fake-processor-declined-nonce"),
        ])
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("Payment declined"));
    assert!(body.contains("Do Not Honor"));
}

#[tokio::test]
async fn missing_amount_is_400_and_never_reaches_gateway() {
    let gateway = MockGateway::new(SaleBehavior::Approve);
    let server = server_with(gateway.clone());

    let response = server
        .post("/proc")
        .form(&[("payment_method_nonce", "fake-valid-nonce")])
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(gateway.sale_calls(), 0);
}

#[tokio::test]
async fn malformed_amount_is_400_and_never_reaches_gateway() {
    let gateway = MockGateway::new(SaleBehavior::Approve);
    let server = server_with(gateway.clone());

    for bad in ["abc", "-5.00", "0", "1.005"] {
        let response = server
            .post("/proc")
            .form(&[("amount", bad), ("payment_method_nonce", "fake-valid-nonce")])
            .await;
        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    }
    assert_eq!(gateway.sale_calls(), 0);
}

#[tokio::test]
async fn empty_nonce_is_400() {
    let gateway = MockGateway::new(SaleBehavior::Approve);
    let server = server_with(gateway.clone());

    let response = server
        .post("/proc")
        .form(&[("amount", "10.00"), ("payment_method_nonce", " ")])
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(gateway.sale_calls(), 0);
}

#[tokio::test]
async fn get_on_proc_is_method_not_allowed() {
    let server = server_with(MockGateway::new(SaleBehavior::Approve));

    let response = server.get("/proc").await;
    response.assert_status(axum::http::StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn gateway_outage_during_sale_is_a_server_error() {
    let server = server_with(MockGateway::new(SaleBehavior::Unavailable));

    let response = server
        .post("/proc")
        .form(&[("amount", "10.00"), ("payment_method_nonce", "fake-valid-nonce")])
        .await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn echoed_fields_are_html_escaped() {
    let server = server_with(MockGateway::new(SaleBehavior::Approve));

    let response = server
        .post("/proc")
        .form(&[
            ("amount", "10.00"),
            ("payment_method_nonce", "<script>alert(1)</script>"),
        ])
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(!body.contains("<script>alert(1)</script>"));
    assert!(body.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[tokio::test]
async fn health_reports_service_name() {
    let server = server_with(MockGateway::new(SaleBehavior::Approve));

    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "dropin-pay");
}

#[tokio::test]
async fn static_assets_are_served_and_sandboxed() {
    // public/ holds one stylesheet; secret.txt sits one level above it and
    // must be unreachable through the route.
    let root = tempfile::tempdir().unwrap();
    let public_dir = root.path().join("public");
    std::fs::create_dir(&public_dir).unwrap();
    std::fs::write(public_dir.join("styles.css"), "body { margin: 0; }").unwrap();
    std::fs::write(root.path().join("secret.txt"), "credentials").unwrap();

    let state = AppState::with_gateway(
        MockGateway::new(SaleBehavior::Approve),
        test_config(public_dir),
    );
    let server = TestServer::new(create_router(state)).unwrap();

    let ok = server.get("/public/styles.css").await;
    ok.assert_status_ok();
    assert!(ok.text().contains("margin"));

    let missing = server.get("/public/nope.css").await;
    missing.assert_status(axum::http::StatusCode::NOT_FOUND);

    // Encoded traversal must not escape the public directory.
    let traversal = server.get("/public/%2e%2e/secret.txt").await;
    assert_ne!(traversal.status_code(), axum::http::StatusCode::OK);
    assert!(!traversal.text().contains("credentials"));
}
