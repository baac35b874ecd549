//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → matcher.rs (strip context path → servlet path, or outside context)
//!     → router.rs (servlet path → Route)
//!     → app handlers render the Route
//! ```
//!
//! # Design Decisions
//! - Route table is fixed at compile time
//! - Deterministic: same path always yields the same route

pub mod matcher;
pub mod router;

pub use matcher::ContextPath;
pub use router::Route;
