//! Raw HTTP response splitting.
//!
//! # Responsibilities
//! - Split raw response bytes at the transport-reported header length
//! - Parse the status line and the header block
//! - Support continuation lines spilling a value across multiple lines
//!
//! # Design Decisions
//! - The header/body boundary is supplied by the transport, never searched
//!   for here
//! - Header keys keep their original case; the first occurrence of a key
//!   wins and later duplicates are ignored
//! - A line with no `:` at all extends the most recent header's value;
//!   anything else that fails the `": "` split is skipped
//! - A status line with fewer than two fields falls back to
//!   `HTTP/1.0 200 OK`; a missing reason phrase stays empty

use std::collections::HashMap;

/// Parsed status line of a backend response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub protocol: String,
    pub code: String,
    pub reason: String,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            protocol: "HTTP/1.0".to_string(),
            code: "200".to_string(),
            reason: "OK".to_string(),
        }
    }
}

/// A backend response split into status, headers, and body.
#[derive(Debug, Clone, Default)]
pub struct ParsedResponse {
    pub status: StatusLine,
    /// Header map, keys case-preserved.
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl ParsedResponse {
    /// Look up a header value, comparing names case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

fn parse_status_line(line: &str) -> Option<StatusLine> {
    let mut fields = line.splitn(3, ' ');
    let protocol = fields.next().filter(|p| !p.is_empty())?;
    let code = fields.next().filter(|c| !c.is_empty())?;
    let reason = fields.next().unwrap_or("");
    Some(StatusLine {
        protocol: protocol.to_string(),
        code: code.to_string(),
        reason: reason.to_string(),
    })
}

/// Split raw response bytes into status line, header map, and body.
///
/// `header_len` is the byte length of the header block as reported by the
/// transport; it is clamped to the response length.
pub fn parse_response(raw: &[u8], header_len: usize) -> ParsedResponse {
    let header_len = header_len.min(raw.len());
    let header_text = String::from_utf8_lossy(&raw[..header_len]);
    let body = raw[header_len..].to_vec();

    let mut lines = header_text.split("\r\n");
    let status = lines
        .next()
        .and_then(parse_status_line)
        .unwrap_or_default();

    let mut headers: HashMap<String, String> = HashMap::new();
    let mut last_key: Option<String> = None;
    for line in lines {
        if let Some((key, value)) = line.split_once(": ") {
            if !headers.contains_key(key) {
                headers.insert(key.to_string(), value.to_string());
            }
            last_key = Some(key.to_string());
        } else if !line.contains(':') {
            // pseudo support for multi-line headers
            if let Some(key) = &last_key {
                if let Some(value) = headers.get_mut(key) {
                    value.push_str(line);
                }
            }
        }
    }

    ParsedResponse {
        status,
        headers,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_status_headers_and_body() {
        let raw = b"HTTP/1.1 404 Not Found\r\nContent-Type: text/html\r\n\r\n<h1>gone</h1>";
        let header_len = raw.len() - "<h1>gone</h1>".len();
        let parsed = parse_response(raw, header_len);

        assert_eq!(parsed.status.protocol, "HTTP/1.1");
        assert_eq!(parsed.status.code, "404");
        assert_eq!(parsed.status.reason, "Not Found");
        assert_eq!(parsed.header("content-type"), Some("text/html"));
        assert_eq!(parsed.body, b"<h1>gone</h1>");
    }

    #[test]
    fn missing_status_line_defaults() {
        let parsed = parse_response(b"", 0);
        assert_eq!(parsed.status, StatusLine::default());
    }

    #[test]
    fn short_status_line_defaults() {
        let parsed = parse_response(b"garbage\r\n\r\n", 11);
        assert_eq!(parsed.status, StatusLine::default());
    }

    #[test]
    fn missing_reason_is_kept_empty() {
        let parsed = parse_response(b"HTTP/1.1 204\r\n\r\n", 16);
        assert_eq!(parsed.status.code, "204");
        assert_eq!(parsed.status.reason, "");
    }

    #[test]
    fn first_duplicate_key_wins() {
        let raw = b"HTTP/1.1 200 OK\r\nX-Tag: one\r\nX-Tag: two\r\n\r\n";
        let parsed = parse_response(raw, raw.len());
        assert_eq!(parsed.header("X-Tag"), Some("one"));
    }

    #[test]
    fn continuation_line_extends_previous_value() {
        let raw = b"HTTP/1.1 200 OK\r\nX-Note: first\r\n and second\r\n\r\n";
        let parsed = parse_response(raw, raw.len());
        assert_eq!(parsed.header("X-Note"), Some("first and second"));
    }

    #[test]
    fn line_with_bare_colon_is_skipped() {
        let raw = b"HTTP/1.1 200 OK\r\nX-Note: first\r\nodd:line\r\n\r\n";
        let parsed = parse_response(raw, raw.len());
        assert_eq!(parsed.header("X-Note"), Some("first"));
        assert_eq!(parsed.headers.len(), 1);
    }

    #[test]
    fn header_len_is_clamped() {
        let parsed = parse_response(b"HTTP/1.1 200 OK\r\n\r\n", 1000);
        assert_eq!(parsed.status.code, "200");
        assert!(parsed.body.is_empty());
    }

    #[test]
    fn body_offset_preserves_bytes() {
        let raw = b"HTTP/1.0 200 OK\r\n\r\n\x00\x01\x02";
        let parsed = parse_response(raw, 19);
        assert_eq!(parsed.body, vec![0u8, 1, 2]);
    }
}
