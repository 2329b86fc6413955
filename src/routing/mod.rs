//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (path segments)
//!     → router.rs (scan registrations, pick minimum priority)
//!     → matcher.rs (segment-prefix match per registration)
//!     → Resolution: matched handler, or synthetic not-found fallback
//!
//! Registration (at application construction):
//!     (pattern, priority, handler)
//!     → registry.rs (appended in order, order = tie-break)
//!     → Frozen inside the Router
//! ```
//!
//! # Design Decisions
//! - Registrations are append-only and frozen before serving
//! - Lower priority value wins; first-registered wins ties
//! - The not-found fallback is produced here, never surfaced as an error

pub mod matcher;
pub mod registry;
pub mod router;

pub use matcher::PathPattern;
pub use registry::{HandlerRegistry, Registration};
pub use router::{Resolution, Router};
