//! Handler surface.
//!
//! # Data Flow
//! ```text
//! Resolution (from routing)
//!     → Handler::handle(path_parts, args, headers)
//!     → Response (status, headers, body)
//!     → Application stamps the negotiated Content-Type
//! ```
//!
//! # Design Decisions
//! - One async `handle` entry point; the host decides how verbs map to it
//! - Handlers are trait objects shared via `Arc`, cheap to resolve per request
//! - Content negotiation is a plain function over a supported-format set,
//!   not inheritance-based overriding

pub mod gateway;
pub mod negotiate;
pub mod not_found;

use std::collections::HashMap;

use async_trait::async_trait;

pub use gateway::GatewayHandler;
pub use negotiate::{ContentFormat, FormatUnsupported, SupportedFormats};
pub use not_found::NotFoundHandler;

/// Request arguments, keyed by name.
pub type Args = HashMap<String, String>;

/// Inbound request headers, keyed by name.
pub type RequestHeaders = HashMap<String, String>;

/// Response produced by a handler.
#[derive(Debug, Clone, Default)]
pub struct Response {
    /// Status code, e.g. `200`.
    pub status: u16,
    /// Reason phrase, e.g. `OK`.
    pub reason: String,
    /// Response headers in emission order.
    pub headers: Vec<(String, String)>,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl Response {
    /// A `200 OK` response with the given body.
    pub fn ok(body: Vec<u8>) -> Self {
        Self::with_status(200, "OK", body)
    }

    /// A response with an explicit status line and body.
    pub fn with_status(status: u16, reason: &str, body: Vec<u8>) -> Self {
        Self {
            status,
            reason: reason.to_string(),
            headers: Vec::new(),
            body,
        }
    }

    /// Append a header.
    pub fn push_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    /// Set a header, replacing every existing occurrence of the name.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
    }

    /// First value of a header, if present (name compared case-insensitively).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A unit bound to a path pattern that produces a response for matching
/// requests.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Produce a response for a resolved request.
    async fn handle(
        &self,
        path_parts: &[String],
        args: &Args,
        headers: &RequestHeaders,
    ) -> Response;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_header_replaces_all_occurrences() {
        let mut response = Response::ok(Vec::new());
        response.push_header("Content-Type", "text/plain");
        response.push_header("content-type", "text/html");
        response.set_header("Content-Type", "application/json");

        let values: Vec<&str> = response
            .headers
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(values, vec!["application/json"]);
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut response = Response::ok(Vec::new());
        response.push_header("Error Code", "404");
        assert_eq!(response.header("error code"), Some("404"));
        assert_eq!(response.header("missing"), None);
    }
}
