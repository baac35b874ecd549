//! Device demo servlet.
//!
//! Answers four fixed routes under the configured context path; every
//! other servlet path gets an empty `200 text/html` response.

pub mod handlers;

use axum::Router;
use std::sync::Arc;

use crate::routing::ContextPath;
use self::handlers::dispatch;

/// State injected into the servlet handler.
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<ContextPath>,
}

/// Build the servlet router. All paths and methods reach [`dispatch`].
pub fn setup_router(state: AppState) -> Router {
    Router::new().fallback(dispatch).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use tower::ServiceExt;

    use crate::http::response::TEXT_HTML;

    fn router(context: &str) -> Router {
        setup_router(AppState {
            context: Arc::new(ContextPath::new(context)),
        })
    }

    async fn call(router: Router, method: Method, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = router
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_routes_get_and_post() {
        let cases = [
            ("/demoapp/test", "{ state: 'ok',  pass: true, passed: 1, failed: 0 }"),
            ("/demoapp/status", "OK"),
            ("/demoapp/alerts", "alerts: 1"),
            ("/demoapp/report", "d1 at floor1 is running. "),
        ];

        for method in [Method::GET, Method::POST] {
            for (uri, expected) in cases {
                let (status, content_type, body) = call(router("/demoapp"), method.clone(), uri).await;
                assert_eq!(status, StatusCode::OK, "{method} {uri}");
                assert_eq!(content_type.as_deref(), Some(TEXT_HTML));
                assert_eq!(body, expected, "{method} {uri}");
            }
        }
    }

    #[tokio::test]
    async fn test_unknown_path_is_empty_200() {
        for uri in ["/demoapp/unknown", "/demoapp", "/demoapp/", "/demoapp/SimpleServlet"] {
            let (status, content_type, body) = call(router("/demoapp"), Method::GET, uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(content_type.as_deref(), Some(TEXT_HTML));
            assert_eq!(body, "", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_outside_context_is_404() {
        let (status, _, _) = call(router("/demoapp"), Method::GET, "/status").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_root_context() {
        let (status, _, body) = call(router(""), Method::GET, "/alerts").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "alerts: 1");
    }

    #[tokio::test]
    async fn test_query_string_ignored() {
        let (_, _, body) = call(router("/demoapp"), Method::GET, "/demoapp/status?verbose=1").await;
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_other_methods_rejected() {
        for method in [Method::PUT, Method::DELETE, Method::PATCH] {
            let (status, _, _) = call(router("/demoapp"), method, "/demoapp/status").await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        }
    }
}
