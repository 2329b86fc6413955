//! Handler registration.
//!
//! # Responsibilities
//! - Store `(pattern, priority, handler)` registrations in order
//! - Preserve registration order (it is the resolution tie-break)
//!
//! # Design Decisions
//! - Append-only: registrations happen during application construction,
//!   the set is immutable once the application serves traffic
//! - Priorities are `u32` at registration; the reserved `-1` sentinel of
//!   the synthetic not-found resolution is unrepresentable here

use std::sync::Arc;

use crate::handler::Handler;
use crate::routing::matcher::PathPattern;

/// One registered handler with its pattern and priority.
#[derive(Clone)]
pub struct Registration {
    pattern: PathPattern,
    priority: u32,
    handler: Arc<dyn Handler>,
}

impl Registration {
    /// The path pattern this handler is bound to.
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Priority rank among matching handlers. Lower value wins.
    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// The registered handler.
    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("pattern", &self.pattern)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// Ordered collection of handler registrations owned by one application.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    entries: Vec<Registration>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a registration. Order is preserved.
    pub fn register(&mut self, pattern: PathPattern, priority: u32, handler: Arc<dyn Handler>) {
        self.entries.push(Registration {
            pattern,
            priority,
            handler,
        });
    }

    /// Iterate registrations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.entries.iter()
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{Args, Handler, RequestHeaders, Response};
    use async_trait::async_trait;

    struct Fixed;

    #[async_trait]
    impl Handler for Fixed {
        async fn handle(
            &self,
            _path_parts: &[String],
            _args: &Args,
            _headers: &RequestHeaders,
        ) -> Response {
            Response::ok(Vec::new())
        }
    }

    #[test]
    fn registration_order_is_preserved() {
        let mut registry = HandlerRegistry::new();
        registry.register(PathPattern::from_segments(["b"]), 2, Arc::new(Fixed));
        registry.register(PathPattern::from_segments(["a"]), 1, Arc::new(Fixed));

        let patterns: Vec<String> = registry.iter().map(|r| r.pattern().to_string()).collect();
        assert_eq!(patterns, vec!["b", "a"]);
        assert_eq!(registry.len(), 2);
    }
}
