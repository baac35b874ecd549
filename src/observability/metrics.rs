//! Metrics collection and exposition.
//!
//! # Metrics
//! - `demoapp_requests_total` (counter): requests by server, method, status
//! - `demoapp_request_duration_seconds` (histogram): latency by server

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one finished request.
pub fn record_request(server: &'static str, method: &Method, status: u16, start: Instant) {
    metrics::counter!(
        "demoapp_requests_total",
        "server" => server,
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!("demoapp_request_duration_seconds", "server" => server)
        .record(start.elapsed().as_secs_f64());
}

/// Middleware recording every request passing through a server.
pub async fn track_requests(
    State(server): State<&'static str>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let response = next.run(request).await;
    record_request(server, &method, response.status().as_u16(), start);
    response
}
