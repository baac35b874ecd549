//! Context path matching.
//!
//! # Design Decisions
//! - A servlet deployed under `/demoapp` sees `/demoapp/test` as `/test`
//! - The prefix must end on a segment boundary (`/demoappx` is outside)
//! - Matching is case-sensitive
//! - Root deployment ("" or "/") matches every path unchanged

/// The path prefix a servlet is deployed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextPath {
    prefix: String,
}

impl ContextPath {
    /// Create a context path matcher. `"/"` is treated as root.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let prefix = prefix.trim_end_matches('/').to_string();
        Self { prefix }
    }

    /// The context at the server root.
    pub fn root() -> Self {
        Self {
            prefix: String::new(),
        }
    }

    /// The normalized prefix ("" for root).
    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    /// Strip the context from a request path, yielding the servlet path.
    ///
    /// Returns `None` when the path lies outside this context.
    pub fn servlet_path<'a>(&self, path: &'a str) -> Option<&'a str> {
        let rest = path.strip_prefix(self.prefix.as_str())?;
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }
}
