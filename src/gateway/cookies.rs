//! Per-application cookie store.
//!
//! # Responsibilities
//! - Hold forwarded-session cookie name/value pairs
//! - Fold `Set-Cookie` response headers into the store
//!
//! # Design Decisions
//! - Last write wins, within one response and across responses
//! - Backed by a concurrent map: in-flight forwards on the same
//!   application merge without holding an application-wide lock
//! - The simplified `Set-Cookie` grammar splits the value on `,` and does
//!   not special-case commas inside `Expires=` attributes (known
//!   limitation of the wire contract)
//! - Cookies are collected but never re-attached to outbound calls

use std::collections::HashMap;

use dashmap::DashMap;

/// Mapping of cookie name to value owned by one forwarder.
#[derive(Debug, Default)]
pub struct CookieJar {
    cookies: DashMap<String, String>,
}

impl CookieJar {
    /// Create an empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cookie, replacing any previous value for the name.
    pub fn add(&self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    /// Current value for a cookie name.
    pub fn get(&self, name: &str) -> Option<String> {
        self.cookies.get(name).map(|entry| entry.value().clone())
    }

    /// Number of stored cookies.
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Whether the jar holds nothing.
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.cookies
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Merge every cookie from another collection, last write wins.
    pub fn merge<I>(&self, cookies: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in cookies {
            self.add(name, value);
        }
    }

    /// Scan response headers for `Set-Cookie` (case-insensitive) and merge
    /// every cookie found.
    pub fn merge_response_headers(&self, headers: &HashMap<String, String>) {
        for (key, value) in headers {
            if key.eq_ignore_ascii_case("set-cookie") {
                let cookies = parse_set_cookie(value);
                if !cookies.is_empty() {
                    tracing::debug!(count = cookies.len(), "merging cookies");
                }
                self.merge(cookies);
            }
        }
    }
}

/// Parse a `Set-Cookie` header value into name/value pairs.
///
/// The value is a comma-joined cookie list; each candidate keeps only the
/// part before its first `;`, strips one leading space on either side of
/// the split, and must contain a `=` to count.
pub fn parse_set_cookie(value: &str) -> Vec<(String, String)> {
    value
        .split(',')
        .filter_map(|raw_cookie| {
            let raw_cookie = raw_cookie.strip_prefix(' ').unwrap_or(raw_cookie);
            let pair = raw_cookie.split(';').next().unwrap_or_default();
            let pair = pair.strip_prefix(' ').unwrap_or(pair);
            pair.split_once('=')
                .map(|(name, value)| (name.to_string(), value.to_string()))
        })
        .collect()
}
