//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the Axum router for either servlet
//! - Wire up middleware (tracing, request ID, metrics)
//! - Serve on a listener until the shutdown signal fires

use axum::{middleware, Router};
use std::fmt;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::app::{self, AppState};
use crate::config::{AppConfig, IntegrationConfig};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::integration::{self, upstream::UpstreamClient, RelayState};
use crate::observability::metrics;
use crate::routing::ContextPath;

/// Which servlet a server hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerKind {
    /// Device demo application.
    App,
    /// Integration-test relay.
    IntegrationTest,
}

impl ServerKind {
    /// Label used for logs and metrics.
    pub fn name(self) -> &'static str {
        match self {
            ServerKind::App => "app",
            ServerKind::IntegrationTest => "integration-test",
        }
    }
}

impl fmt::Display for ServerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// HTTP server hosting one of the servlets.
pub struct HttpServer {
    router: Router,
    kind: ServerKind,
}

impl HttpServer {
    /// Create the device demo application server.
    pub fn app(config: &AppConfig) -> Self {
        let state = AppState {
            context: Arc::new(ContextPath::new(config.context_path.as_str())),
        };

        tracing::debug!(context_path = %config.context_path, "Building app router");
        Self::with_layers(app::setup_router(state), ServerKind::App)
    }

    /// Create the integration-test relay server.
    pub fn integration(config: &IntegrationConfig) -> Self {
        let upstream = UpstreamClient::new(config.upstream.clone());

        tracing::debug!(upstream = %upstream.target().url(), "Building relay router");
        let state = RelayState {
            upstream: Arc::new(upstream),
        };
        Self::with_layers(integration::setup_router(state), ServerKind::IntegrationTest)
    }

    fn with_layers(router: Router, kind: ServerKind) -> Self {
        let router = router
            .layer(propagate_request_id_layer())
            .layer(middleware::from_fn_with_state(kind.name(), metrics::track_requests))
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer());
        Self { router, kind }
    }

    /// Which servlet this server hosts.
    pub fn kind(&self) -> ServerKind {
        self.kind
    }

    /// The fully layered router, for in-process use.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let kind = self.kind;
        tracing::info!(
            server = %kind,
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!(server = %kind, "Shutdown signal received");
            })
            .await?;

        tracing::info!(server = %kind, "HTTP server stopped");
        Ok(())
    }
}
