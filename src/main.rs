//! Device demo servers.
//!
//! ```text
//!   demoapp app                 demoapp integration-test
//!  ┌──────────────────┐        ┌──────────────────────────┐
//!  │ /demoapp/test    │◀───────│ GET /…  → relay app test │◀── client
//!  │ /demoapp/status  │  HTTP  │ GET /status → "OK"       │
//!  │ /demoapp/alerts  │        └──────────────────────────┘
//!  │ /demoapp/report  │
//!  └──────────────────┘
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use demoapp::config::resolve_config;
use demoapp::lifecycle::startup;
use demoapp::observability::{logging, metrics};
use demoapp::ServerKind;

#[derive(Parser)]
#[command(name = "demoapp")]
#[command(about = "Device demo application and integration-test relay", long_about = None)]
struct Cli {
    /// TOML configuration file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the device demo application
    App {
        /// Override the configured bind address
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Serve the integration-test relay
    IntegrationTest {
        /// Override the configured bind address
        #[arg(short, long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = resolve_config(cli.config.as_deref())?;

    logging::init(&config.observability);
    tracing::info!("demoapp v{} starting", env!("CARGO_PKG_VERSION"));

    let kind = match cli.command {
        Commands::App { bind } => {
            if let Some(bind) = bind {
                config.app.bind_address = bind;
            }
            ServerKind::App
        }
        Commands::IntegrationTest { bind } => {
            if let Some(bind) = bind {
                config.integration.bind_address = bind;
            }
            ServerKind::IntegrationTest
        }
    };

    tracing::info!(
        server = %kind,
        app_bind_address = %config.app.bind_address,
        context_path = %config.app.context_path,
        integration_bind_address = %config.integration.bind_address,
        upstream = %config.integration.upstream.url(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    startup::serve(kind, &config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
