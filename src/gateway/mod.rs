//! Outbound forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! OutboundRequest (path, body, content type, files)
//!     → outbound.rs (encoding decision, header assembly)
//!     → multipart.rs (form-data framing when files are present)
//!     → transport (one call, deadline enforced)
//!     → response.rs (status line / header map / body split)
//!     → cookies.rs (fold Set-Cookie values into the jar)
//!     → ParsedResponse returned to the handler
//! ```
//!
//! # Design Decisions
//! - One outbound call per forward; no retries, no redirect following
//! - Encoding failures are reported before any network I/O
//! - The cookie jar is per-application state, merged only after a
//!   successfully parsed response

pub mod cookies;
pub mod forwarder;
pub mod multipart;
pub mod outbound;
pub mod response;

pub use cookies::CookieJar;
pub use forwarder::{ForwardError, ForwardResult, GatewayForwarder};
pub use multipart::MultipartEncoder;
pub use outbound::{
    build_wire_request, EncodeError, FileSet, Method, OutboundBody, OutboundRequest, RawFile,
    WireRequest,
};
pub use response::{parse_response, ParsedResponse, StatusLine};
