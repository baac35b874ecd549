//! Device demo servlet handlers.

use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::http::request::RequestIdExt;
use crate::http::response::{html, method_not_allowed};
use crate::routing::Route;
use crate::sensor;

/// Summary returned by `/test`.
pub fn test_result() -> &'static str {
    "{ state: 'ok',  pass: true, passed: 1, failed: 0 }"
}

/// Body returned by `/status`.
pub fn status() -> &'static str {
    "OK"
}

/// Body returned by `/alerts`.
pub fn alerts() -> &'static str {
    "alerts: 1"
}

/// Body returned by `/report`.
pub fn run_report() -> String {
    sensor::scan(Some("d1"), Some("floor1"))
}

/// Render the body for a route. Unmatched routes render nothing.
pub fn render(route: Route) -> String {
    match route {
        Route::Test => test_result().to_string(),
        Route::Status => status().to_string(),
        Route::Alerts => alerts().to_string(),
        Route::Report => run_report(),
        Route::Unmatched => String::new(),
    }
}

/// Single entry point for GET and POST (HEAD is answered as GET).
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    if !matches!(*request.method(), Method::GET | Method::HEAD | Method::POST) {
        return method_not_allowed("GET, HEAD, POST");
    }

    let path = request.uri().path();
    let Some(servlet_path) = state.context.servlet_path(path) else {
        tracing::debug!(
            request_id = %request.request_id(),
            path = %path,
            context_path = %state.context.as_str(),
            "Request outside context path"
        );
        return StatusCode::NOT_FOUND.into_response();
    };

    let route = Route::from_servlet_path(servlet_path);
    tracing::debug!(
        request_id = %request.request_id(),
        method = %request.method(),
        servlet_path = %servlet_path,
        route = route.name(),
        "Dispatching request"
    );

    html(render(route))
}
