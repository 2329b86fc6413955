//! Path segment matching.
//!
//! # Responsibilities
//! - Match a request's path segments against a registered pattern
//! - Prefix semantics: a pattern matches any request it is a prefix of
//!
//! # Design Decisions
//! - Segments are compared with exact string equality (case-sensitive)
//! - No normalization: callers pre-split the path and keep it as-is
//! - Empty pattern = zero-length prefix, matches every request
//! - No wildcards or regex to guarantee O(n) matching

/// An ordered sequence of path segments registered for a handler.
///
/// Patterns carry no wildcards; matching is plain prefix comparison.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathPattern {
    segments: Vec<String>,
}

impl PathPattern {
    /// Create a pattern from pre-split segments.
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// The empty pattern, matching every request.
    pub fn root() -> Self {
        Self::default()
    }

    /// Convenience constructor for literal segment lists.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(segments.into_iter().map(Into::into).collect())
    }

    /// Returns true if this pattern is a prefix of the request segments.
    ///
    /// Fails iff the pattern is longer than the request, or any pattern
    /// segment differs from the request segment at the same index.
    pub fn matches(&self, request: &[String]) -> bool {
        if self.segments.len() > request.len() {
            return false;
        }
        self.segments.iter().zip(request).all(|(p, r)| p == r)
    }

    /// The registered segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments in the pattern.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether this is the empty (match-everything) pattern.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl std::fmt::Display for PathPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}
