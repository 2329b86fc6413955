//! Route lookup.
//!
//! # Responsibilities
//! - Resolve a request's path segments to a single handler
//! - Apply the priority rank among all matching registrations
//! - Produce the synthetic not-found resolution when nothing matches
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan over registrations (acceptable for typical handler counts)
//! - Minimum priority wins; strict `<` during the scan keeps the
//!   first-registered handler among equal-minimum-priority candidates.
//!   This tie-break is part of the contract and pinned by tests.
//! - Explicit not-found resolution rather than silent default: priority
//!   `-1` (reserved, never registerable) and pattern = the full request
//!   path, kept for error reporting only

use std::sync::Arc;

use crate::handler::not_found::NotFoundHandler;
use crate::handler::negotiate::ContentFormat;
use crate::handler::Handler;
use crate::routing::matcher::PathPattern;
use crate::routing::registry::HandlerRegistry;

/// Priority carried by the synthetic not-found resolution.
pub const NOT_FOUND_PRIORITY: i64 = -1;

/// Outcome of resolving a request path.
#[derive(Clone)]
pub struct Resolution {
    /// Matched pattern, or the full request path for the not-found case.
    pub pattern: PathPattern,
    /// Winning priority; `-1` iff this is the synthetic not-found resolution.
    pub priority: i64,
    /// Handler to dispatch to.
    pub handler: Arc<dyn Handler>,
}

impl Resolution {
    /// Whether this resolution is the synthetic not-found fallback.
    pub fn is_not_found(&self) -> bool {
        self.priority == NOT_FOUND_PRIORITY
    }
}

impl std::fmt::Debug for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolution")
            .field("pattern", &self.pattern)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// Resolves request paths against a frozen set of registrations.
#[derive(Debug)]
pub struct Router {
    registry: HandlerRegistry,
}

impl Router {
    /// Create a router over a finished registry.
    pub fn new(registry: HandlerRegistry) -> Self {
        Self { registry }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Resolve a request path to a handler.
    ///
    /// Scans every registration whose pattern matches and keeps the one
    /// with the minimum priority, first-registered winning ties. When no
    /// pattern matches, returns the synthetic not-found resolution bound
    /// to `application/json`.
    pub fn resolve(&self, path_parts: &[String]) -> Resolution {
        let mut best: Option<&crate::routing::registry::Registration> = None;
        for registration in self.registry.iter() {
            if !registration.pattern().matches(path_parts) {
                continue;
            }
            let better = match best {
                None => true,
                Some(current) => registration.priority() < current.priority(),
            };
            if better {
                best = Some(registration);
            }
        }

        match best {
            Some(registration) => {
                tracing::debug!(
                    pattern = %registration.pattern(),
                    priority = registration.priority(),
                    "route resolved"
                );
                Resolution {
                    pattern: registration.pattern().clone(),
                    priority: i64::from(registration.priority()),
                    handler: Arc::clone(registration.handler()),
                }
            }
            None => {
                let requested = PathPattern::new(path_parts.to_vec());
                tracing::warn!(path = %requested, "no handler matched");
                Resolution {
                    pattern: requested,
                    priority: NOT_FOUND_PRIORITY,
                    handler: Arc::new(NotFoundHandler::new(ContentFormat::Json)),
                }
            }
        }
    }
}
