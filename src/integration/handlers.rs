//! Integration-test relay handlers.
//!
//! Responses produced here (`/status`, errors) are `text/html`, the same as
//! the app server. A relayed 200 carries the upstream's content type instead.

use axum::{
    extract::{Request, State},
    http::Method,
    response::{IntoResponse, Response},
};

use crate::http::request::RequestIdExt;
use crate::http::response::{html, method_not_allowed, ServletError};
use crate::integration::RelayState;

/// `/status` answers locally; every other path runs the app test.
pub async fn relay(State(state): State<RelayState>, request: Request) -> Response {
    if !matches!(*request.method(), Method::GET | Method::HEAD) {
        return method_not_allowed("GET, HEAD");
    }

    if request.uri().path() == "/status" {
        return html("OK".to_string());
    }

    tracing::debug!(
        request_id = %request.request_id(),
        path = %request.uri().path(),
        upstream = %state.upstream.target().url(),
        "Running app test"
    );

    match state.upstream.fetch().await {
        Ok(relayed) => relayed.into_response(),
        Err(err) => {
            tracing::error!(request_id = %request.request_id(), error = %err, "App test failed");
            ServletError::from(err).into_response()
        }
    }
}
