//! Servlet route lookup.
//!
//! # Design Decisions
//! - Exact string match on the servlet path, no parameters
//! - Exhaustive `match` with an explicit fallthrough variant
//! - Unknown paths are not an error: they render an empty body

/// Routes answered by the device demo servlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/test`: canned test-run summary.
    Test,
    /// `/status`: liveness.
    Status,
    /// `/alerts`: alert count.
    Alerts,
    /// `/report`: device scan report.
    Report,
    /// Anything else.
    Unmatched,
}

impl Route {
    /// Look up the route for a servlet path.
    pub fn from_servlet_path(path: &str) -> Self {
        match path {
            "/test" => Route::Test,
            "/status" => Route::Status,
            "/alerts" => Route::Alerts,
            "/report" => Route::Report,
            _ => Route::Unmatched,
        }
    }

    /// Label used for logs and metrics.
    pub fn name(self) -> &'static str {
        match self {
            Route::Test => "test",
            Route::Status => "status",
            Route::Alerts => "alerts",
            Route::Report => "report",
            Route::Unmatched => "none",
        }
    }
}
