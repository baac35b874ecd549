//! Integration-test relay servlet.
//!
//! # Data Flow
//! ```text
//! GET /status  → "OK"
//! GET /…       → upstream.rs (one GET to the app)
//!                  200   → relay content type + body
//!                  other → 500 "App Test HTTP Error code <..> Response <..>"
//!                  error → 500 "Failed to connect to app: .."
//! ```

pub mod handlers;
pub mod upstream;

use axum::Router;
use std::sync::Arc;

use self::handlers::relay;
use self::upstream::UpstreamClient;

/// State injected into the relay handler.
#[derive(Clone)]
pub struct RelayState {
    pub upstream: Arc<UpstreamClient>,
}

/// Build the relay router. All paths and methods reach [`relay`].
pub fn setup_router(state: RelayState) -> Router {
    Router::new().fallback(relay).with_state(state)
}
