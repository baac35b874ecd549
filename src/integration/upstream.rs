//! Upstream test request.
//!
//! # Responsibilities
//! - Send one GET to `http://{host}{url_path}`
//! - Follow same-scheme redirects (301/302/303/307/308) up to [`MAX_REDIRECTS`]
//! - Relay a 200 response's content type and body
//! - Turn connect failures and non-200 statuses into [`ProxyError`]
//!
//! # Design Decisions
//! - Single attempt: no retries, no timeout, no backoff
//! - No connection pooling: every request asks for `Connection: close` and
//!   the client keeps no idle sockets, so an upstream connection never
//!   outlives the exchange that opened it
//! - The exchange is owned by a guard; dropping it closes the connection
//!   on every exit path and nothing about the close is reported

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::error::Error as StdError;
use thiserror::Error;

use crate::config::UpstreamTarget;

/// Redirect hops followed before giving up.
pub const MAX_REDIRECTS: usize = 5;

/// Failure of the upstream test request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The upstream could not be reached.
    #[error("Failed to connect to app: {0}")]
    Connect(String),

    /// The upstream answered with something other than 200.
    #[error("App Test HTTP Error code <{status}> Response <{body}>")]
    UpstreamStatus { status: u16, body: String },

    /// The upstream body could not be read.
    #[error("Failed to read app response: {0}")]
    Body(String),
}

/// A successful upstream answer, ready to be sent back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayedResponse {
    pub content_type: Option<HeaderValue>,
    pub body: String,
}

impl IntoResponse for RelayedResponse {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::OK, self.body).into_response();
        match self.content_type {
            Some(content_type) => {
                response.headers_mut().insert(header::CONTENT_TYPE, content_type);
            }
            None => {
                response.headers_mut().remove(header::CONTENT_TYPE);
            }
        }
        response
    }
}

/// HTTP client bound to the configured upstream target.
pub struct UpstreamClient {
    client: Client<HttpConnector, Body>,
    target: UpstreamTarget,
}

impl UpstreamClient {
    pub fn new(target: UpstreamTarget) -> Self {
        let client = Client::builder(TokioExecutor::new())
            .pool_max_idle_per_host(0)
            .build(HttpConnector::new());
        Self { client, target }
    }

    pub fn target(&self) -> &UpstreamTarget {
        &self.target
    }

    /// Run the test request against the upstream and collect its answer.
    pub async fn fetch(&self) -> Result<RelayedResponse, ProxyError> {
        let url = self.target.url();
        let mut uri: Uri = url
            .parse()
            .map_err(|e| ProxyError::Connect(format!("invalid URL '{url}': {e}")))?;

        let mut exchange = self.send(uri.clone()).await?;
        let mut hops = 0;
        while let Some(next) = exchange.redirect_target(&uri) {
            if hops == MAX_REDIRECTS {
                return Err(ProxyError::Connect(format!(
                    "Server redirected too many times ({MAX_REDIRECTS})"
                )));
            }
            hops += 1;
            tracing::debug!(status = %exchange.status, from = %uri, to = %next, "Following redirect");
            drop(exchange);
            uri = next;
            exchange = self.send(uri.clone()).await?;
        }

        if exchange.status == StatusCode::OK {
            let body = exchange.read_body().await?;
            tracing::info!(response = %body, "Ran tests");
            Ok(RelayedResponse {
                content_type: exchange.content_type.take(),
                body,
            })
        } else {
            let status = exchange.status.as_u16();
            let body = exchange.read_body().await?;
            tracing::warn!(status, response = %body, "App test request failed");
            Err(ProxyError::UpstreamStatus { status, body })
        }
    }

    async fn send(&self, uri: Uri) -> Result<UpstreamExchange, ProxyError> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri.clone())
            .header(header::CONNECTION, "close")
            .body(Body::empty())
            .map_err(|e| ProxyError::Connect(e.to_string()))?;

        tracing::debug!(url = %uri, "Sending app test request");

        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| ProxyError::Connect(error_chain(&e)))?;

        Ok(UpstreamExchange::new(response))
    }
}

/// An upstream response whose connection is closed on drop.
struct UpstreamExchange {
    status: StatusCode,
    content_type: Option<HeaderValue>,
    location: Option<HeaderValue>,
    body: Option<Incoming>,
}

impl UpstreamExchange {
    fn new(response: hyper::Response<Incoming>) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            status: parts.status,
            content_type: parts.headers.get(header::CONTENT_TYPE).cloned(),
            location: parts.headers.get(header::LOCATION).cloned(),
            body: Some(body),
        }
    }

    /// Where a redirect points, resolved against `current`.
    ///
    /// `None` for non-redirect statuses, a missing or unparsable `Location`,
    /// or a switch away from plain HTTP.
    fn redirect_target(&self, current: &Uri) -> Option<Uri> {
        if !matches!(
            self.status,
            StatusCode::MOVED_PERMANENTLY
                | StatusCode::FOUND
                | StatusCode::SEE_OTHER
                | StatusCode::TEMPORARY_REDIRECT
                | StatusCode::PERMANENT_REDIRECT
        ) {
            return None;
        }
        let location = self.location.as_ref()?.to_str().ok()?;
        resolve_location(current, location)
    }

    /// Read the remaining body as text. A missing body reads as empty.
    async fn read_body(&mut self) -> Result<String, ProxyError> {
        let Some(body) = self.body.take() else {
            return Ok(String::new());
        };

        let bytes = axum::body::to_bytes(Body::new(body), usize::MAX)
            .await
            .map_err(|e| ProxyError::Body(error_chain(&e)))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Drop for UpstreamExchange {
    fn drop(&mut self) {
        // An unread body still holds the socket; with pooling off, dropping
        // it shuts the connection down instead of draining it.
        if let Some(body) = self.body.take() {
            tracing::trace!(status = %self.status, "Closing upstream connection with unread body");
            drop(body);
        }
    }
}

/// Resolve a `Location` header value against the request URI.
fn resolve_location(current: &Uri, location: &str) -> Option<Uri> {
    if location.contains("://") {
        let target: Uri = location.parse().ok()?;
        return (target.scheme_str() == Some("http") && target.authority().is_some())
            .then_some(target);
    }

    let authority = current.authority()?;
    let path = if location.starts_with('/') {
        location.to_string()
    } else {
        let base = current.path();
        let dir = &base[..base.rfind('/').map_or(0, |i| i + 1)];
        let dir = if dir.is_empty() { "/" } else { dir };
        format!("{dir}{location}")
    };
    format!("http://{authority}{path}").parse().ok()
}

/// Render an error with all of its sources, e.g.
/// `client error (Connect): tcp connect error: Connection refused`.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
