//! Startup orchestration.
//!
//! # Design Decisions
//! - Fail fast: bind errors are fatal
//! - Configuration is resolved before anything is bound

use tokio::net::TcpListener;

use crate::config::DemoConfig;
use crate::http::{HttpServer, ServerKind};
use crate::lifecycle::{signals, Shutdown};

/// Bind and run one server until SIGINT/SIGTERM.
pub async fn serve(kind: ServerKind, config: &DemoConfig) -> Result<(), std::io::Error> {
    let (bind_address, server) = match kind {
        ServerKind::App => (&config.app.bind_address, HttpServer::app(&config.app)),
        ServerKind::IntegrationTest => (
            &config.integration.bind_address,
            HttpServer::integration(&config.integration),
        ),
    };

    let listener = TcpListener::bind(bind_address.as_str()).await?;
    tracing::info!(
        server = %kind,
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, receiver).await
}
