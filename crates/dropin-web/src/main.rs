//! # Dropin-Pay RS
//!
//! Demo payment server backed by the Braintree drop-in.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export BRAINTREE_ENVIRONMENT=sandbox
//! export BRAINTREE_MERCHANT_ID=...
//! export BRAINTREE_PUBLIC_KEY=...
//! export BRAINTREE_PRIVATE_KEY=...
//!
//! # Run the server
//! dropin-pay
//! ```

use dropin_web::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Misconfigured credentials abort here, before the first request.
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;

    info!("Gateway: {}", state.gateway.provider_name());
    info!("Serving static assets from {}", state.config.public_dir.display());

    let app = routes::create_router(state);

    info!("dropin-pay listening on http://{}", addr);
    info!("Checkout page: http://{}/", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
