//! Gateway handler: answers by forwarding to the backend.
//!
//! # Responsibilities
//! - Turn a resolved inbound request into an outbound forward
//! - Reconstruct the backend's status, headers, and body as the response
//! - Degrade transport failures to `502 Bad Gateway`
//!
//! # Design Decisions
//! - Inbound arguments travel as a form-field body; an argument-free
//!   request forwards as a bare GET
//! - The full inbound path is forwarded; prefix rewriting is the host's
//!   concern

use std::sync::Arc;

use async_trait::async_trait;

use crate::gateway::forwarder::GatewayForwarder;
use crate::gateway::outbound::{OutboundBody, OutboundRequest};
use crate::gateway::response::ParsedResponse;
use crate::handler::{Args, Handler, RequestHeaders, Response};

/// Handler that forwards matching requests to the backend.
pub struct GatewayHandler {
    forwarder: Arc<GatewayForwarder>,
}

impl GatewayHandler {
    /// Create a handler forwarding through the given forwarder.
    pub fn new(forwarder: Arc<GatewayForwarder>) -> Self {
        Self { forwarder }
    }

    fn reconstruct(parsed: ParsedResponse) -> Response {
        let status = parsed.status.code.parse::<u16>().unwrap_or(200);
        let mut response = Response::with_status(status, &parsed.status.reason, parsed.body);
        for (name, value) in parsed.headers {
            response.push_header(&name, &value);
        }
        response
    }
}

impl std::fmt::Debug for GatewayHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayHandler")
            .field("forwarder", &self.forwarder)
            .finish()
    }
}

#[async_trait]
impl Handler for GatewayHandler {
    async fn handle(
        &self,
        path_parts: &[String],
        args: &Args,
        _headers: &RequestHeaders,
    ) -> Response {
        let body = if args.is_empty() {
            OutboundBody::Empty
        } else {
            let mut fields: Vec<(String, String)> =
                args.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            fields.sort();
            OutboundBody::Fields(fields)
        };

        let outbound = OutboundRequest {
            path: path_parts.join("/"),
            body,
            content_type: None,
            files: Vec::new(),
        };

        match self.forwarder.forward(outbound).await {
            Ok(parsed) => Self::reconstruct(parsed),
            Err(err) => {
                tracing::error!(error = %err, "upstream request failed");
                Response::with_status(502, "Bad Gateway", b"Upstream request failed".to_vec())
            }
        }
    }
}
