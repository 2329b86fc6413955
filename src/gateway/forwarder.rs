//! Gateway forwarding.
//!
//! # Responsibilities
//! - Compose request assembly, the transport call, response parsing, and
//!   the cookie merge into one forwarding operation
//! - Surface transport failures as typed errors carrying the attempted path
//!
//! # Design Decisions
//! - Encoding errors fail fast, before any network I/O
//! - The cookie jar is only touched after a fully parsed response; a
//!   transport failure never leaves a partial merge behind
//! - No retries here: one inbound request maps to one outbound call

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::gateway::cookies::CookieJar;
use crate::gateway::outbound::{build_wire_request, EncodeError, OutboundRequest};
use crate::gateway::response::{parse_response, ParsedResponse};
use crate::transport::{Transport, TransportError};

/// Errors a forwarding operation can fail with.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The outbound request could not be encoded.
    #[error("request encoding failed: {0}")]
    Encode(#[from] EncodeError),

    /// The outbound call failed.
    #[error("transport failure for '{path}': {source}")]
    Transport {
        /// Path the forward was attempting to reach.
        path: String,
        #[source]
        source: TransportError,
    },
}

/// Result type for forwarding operations.
pub type ForwardResult<T> = Result<T, ForwardError>;

/// Forwards outbound requests to a backend and reconstructs its responses.
///
/// Owned by one application; the cookie jar (when enabled) lives exactly
/// as long as the forwarder.
pub struct GatewayForwarder {
    base_url: Url,
    transport: Arc<dyn Transport>,
    jar: Option<CookieJar>,
    auto_form_fields: bool,
    request_timeout: Duration,
}

impl GatewayForwarder {
    /// Create a forwarder without a cookie store.
    pub fn new(base_url: Url, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url,
            transport,
            jar: None,
            auto_form_fields: true,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Enable the per-application cookie store.
    pub fn with_cookie_jar(mut self) -> Self {
        self.jar = Some(CookieJar::new());
        self
    }

    /// Toggle flattening of field-map bodies into multipart parts.
    pub fn auto_form_fields(mut self, enabled: bool) -> Self {
        self.auto_form_fields = enabled;
        self
    }

    /// Deadline applied to every outbound call.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// The cookie store, if this forwarder is cookie-aware.
    pub fn cookie_jar(&self) -> Option<&CookieJar> {
        self.jar.as_ref()
    }

    /// Base URL outbound paths are appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Forward one request and reconstruct the backend's response.
    pub async fn forward(&self, request: OutboundRequest) -> ForwardResult<ParsedResponse> {
        let wire = build_wire_request(&self.base_url, &request, self.auto_form_fields)?;

        tracing::debug!(
            path = %request.path,
            method = wire.method.as_str(),
            body_len = wire.body.len(),
            "forwarding request"
        );

        let reply = self
            .transport
            .send(&wire, self.request_timeout)
            .await
            .map_err(|source| {
                tracing::warn!(path = %request.path, error = %source, "forward failed");
                ForwardError::Transport {
                    path: request.path.clone(),
                    source,
                }
            })?;

        let parsed = parse_response(&reply.raw, reply.header_len);
        if let Some(jar) = &self.jar {
            jar.merge_response_headers(&parsed.headers);
        }

        Ok(parsed)
    }
}

impl std::fmt::Debug for GatewayForwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayForwarder")
            .field("base_url", &self.base_url.as_str())
            .field("cookie_aware", &self.jar.is_some())
            .field("auto_form_fields", &self.auto_form_fields)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}
