//! Plain-TCP transport.
//!
//! # Responsibilities
//! - Open one connection per call, write the request, read the reply
//! - Enforce the caller's deadline around the whole exchange
//! - Locate the header/body boundary and report its byte offset
//!
//! # Design Decisions
//! - HTTP/1.0-style exchange with `Connection: close`: the response ends
//!   at EOF, so no transfer-encoding handling is needed
//! - The stream is owned by the call; dropping it on any exit path
//!   (timeout, connect failure, short read) releases the connection

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use url::Url;

use crate::gateway::outbound::WireRequest;
use crate::transport::{Transport, TransportError, TransportResult, WireReply};

/// Default transport: one TCP connection per forwarded request.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpTransport;

impl TcpTransport {
    /// Create a transport.
    pub fn new() -> Self {
        Self
    }

    async fn exchange(&self, request: &WireRequest) -> TransportResult<WireReply> {
        let url = Url::parse(&request.target)
            .map_err(|_| TransportError::InvalidTarget(request.target.clone()))?;
        let host = url
            .host_str()
            .ok_or_else(|| TransportError::InvalidTarget(request.target.clone()))?
            .to_string();
        let port = url.port_or_known_default().unwrap_or(80);

        let mut path = url.path().to_string();
        if let Some(query) = url.query() {
            path.push('?');
            path.push_str(query);
        }

        let mut stream = TcpStream::connect((host.as_str(), port))
            .await
            .map_err(TransportError::Connect)?;

        let mut head = format!("{} {} HTTP/1.0\r\n", request.method.as_str(), path);
        head.push_str(&format!("Host: {host}\r\n"));
        for (name, value) in &request.headers {
            head.push_str(&format!("{name}: {value}\r\n"));
        }
        head.push_str("Connection: close\r\n\r\n");

        stream.write_all(head.as_bytes()).await?;
        if !request.body.is_empty() {
            stream.write_all(&request.body).await?;
        }
        stream.flush().await?;

        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await?;

        let header_len = find_header_end(&raw).unwrap_or(raw.len());
        Ok(WireReply { raw, header_len })
    }
}

/// Byte offset just past the first `\r\n\r\n`, if any.
fn find_header_end(raw: &[u8]) -> Option<usize> {
    raw.windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|idx| idx + 4)
}

#[async_trait]
impl Transport for TcpTransport {
    async fn send(&self, request: &WireRequest, deadline: Duration) -> TransportResult<WireReply> {
        match tokio::time::timeout(deadline, self.exchange(request)).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout(deadline)),
        }
    }
}
