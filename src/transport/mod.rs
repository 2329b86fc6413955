//! Outbound transport abstraction.
//!
//! # Data Flow
//! ```text
//! WireRequest (method, target, headers, body)
//!     → Transport::send (deadline enforced)
//!     → WireReply (raw response bytes + header byte length)
//!     → gateway::response::parse_response
//! ```
//!
//! # Design Decisions
//! - The forwarder never touches sockets; it talks to this trait only
//! - Every call carries an explicit deadline; an unbounded outbound call
//!   is an availability risk
//! - The transport reports where the header block ends; the parser does
//!   not search for the boundary itself

pub mod tcp;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use tcp::TcpTransport;

pub use crate::gateway::outbound::{Method, WireRequest};

/// Raw reply from the transport.
#[derive(Debug, Clone)]
pub struct WireReply {
    /// Complete response bytes, header block included.
    pub raw: Vec<u8>,
    /// Byte length of the header block within `raw`.
    pub header_len: usize,
}

/// Errors an outbound call can fail with.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The target URL could not be interpreted.
    #[error("invalid target '{0}'")]
    InvalidTarget(String),

    /// Establishing the connection failed.
    #[error("connect failed: {0}")]
    Connect(#[source] std::io::Error),

    /// Reading or writing the stream failed.
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// No complete response arrived within the deadline.
    #[error("no response within {0:?}")]
    Timeout(Duration),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// One-shot outbound HTTP call.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue the request and return the raw reply.
    ///
    /// Implementations must resolve (or fail) within `deadline` and must
    /// release any connection they open on every exit path.
    async fn send(&self, request: &WireRequest, deadline: Duration) -> TransportResult<WireReply>;
}
