//! Device demo application and its integration-test relay.

pub mod app;
pub mod config;
pub mod http;
pub mod integration;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod sensor;

pub use config::DemoConfig;
pub use http::{HttpServer, ServerKind};
pub use lifecycle::Shutdown;
