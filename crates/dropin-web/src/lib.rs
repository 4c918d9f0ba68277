//! # dropin-web
//!
//! HTTP layer for dropin-pay-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The payment page, sale endpoint, and static asset service
//! - HTML page rendering
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Payment page embedding a client token |
//! | POST | `/proc` | Execute a sale, render the result |
//! | GET | `/public/<path>` | Static assets |
//! | GET | `/health` | Health check |

pub mod handlers;
pub mod pages;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
