//! Response construction and error mapping.
//!
//! # Responsibilities
//! - Build servlet-style `text/html` responses
//! - Map handler errors to 500 responses carrying the error message
//! - Reject unsupported methods with 405 and an `Allow` header

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::integration::upstream::ProxyError;

/// Content type written by the servlets.
pub const TEXT_HTML: &str = "text/html";

/// Failure inside a servlet handler.
///
/// Every variant surfaces to the client as `500 Internal Server Error`
/// with the message as the body.
#[derive(Debug, Error)]
pub enum ServletError {
    #[error("{0}")]
    Internal(String),
}

impl From<ProxyError> for ServletError {
    fn from(err: ProxyError) -> Self {
        ServletError::Internal(err.to_string())
    }
}

impl IntoResponse for ServletError {
    fn into_response(self) -> Response {
        let ServletError::Internal(message) = self;
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_HTML))],
            message,
        )
            .into_response()
    }
}

/// `200 OK` with a `text/html` body.
pub fn html(body: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_HTML))],
        body,
    )
        .into_response()
}

/// `405 Method Not Allowed` advertising the accepted methods.
pub fn method_not_allowed(allow: &'static str) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, HeaderValue::from_static(allow))],
    )
        .into_response()
}
