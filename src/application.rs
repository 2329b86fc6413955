//! Application composition and dispatch.
//!
//! # Responsibilities
//! - Own the handler registrations and the negotiated content type
//! - Resolve and dispatch inbound requests
//! - Own the gateway forwarder (and with it the cookie jar) for gateway
//!   applications
//!
//! # Design Decisions
//! - Handlers are registered during construction only; the application is
//!   immutable once it serves traffic
//! - The response `Content-Type` always carries the application's format,
//!   not the handler's
//! - All per-application state lives here; nothing is process-global

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::gateway::forwarder::GatewayForwarder;
use crate::handler::negotiate::ContentFormat;
use crate::handler::{Args, Handler, RequestHeaders, Response};
use crate::routing::matcher::PathPattern;
use crate::routing::registry::HandlerRegistry;
use crate::routing::router::{Resolution, Router};
use crate::transport::{TcpTransport, Transport};

/// One application: a frozen handler set, a negotiated content type, and
/// (for gateway applications) the forwarder with its cookie jar.
#[derive(Debug)]
pub struct Application {
    router: Router,
    format: ContentFormat,
    forwarder: Option<Arc<GatewayForwarder>>,
}

impl Application {
    /// Start building an application.
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::new()
    }

    /// Build an application skeleton from a validated configuration.
    ///
    /// Handlers are registered on the returned builder; the forwarder is
    /// wired with the default TCP transport.
    pub fn from_config(config: &GatewayConfig) -> Result<ApplicationBuilder, Vec<ValidationError>> {
        validate_config(config)?;

        let base_url = Url::parse(&config.backend.base_url).map_err(|_| {
            vec![ValidationError::InvalidBaseUrl(
                config.backend.base_url.clone(),
            )]
        })?;
        let format = ContentFormat::from_mime(&config.content.default_type).ok_or_else(|| {
            vec![ValidationError::UnknownContentType(
                config.content.default_type.clone(),
            )]
        })?;

        let transport: Arc<dyn Transport> = Arc::new(TcpTransport::new());
        let mut forwarder = GatewayForwarder::new(base_url, transport)
            .auto_form_fields(config.backend.auto_form_fields)
            .request_timeout(Duration::from_secs(config.timeouts.request_secs));
        if config.backend.cookie_jar {
            forwarder = forwarder.with_cookie_jar();
        }

        Ok(ApplicationBuilder::new()
            .content_format(format)
            .forwarder(forwarder))
    }

    /// Resolve a path without dispatching.
    pub fn resolve(&self, path_parts: &[String]) -> Resolution {
        self.router.resolve(path_parts)
    }

    /// Resolve and dispatch one inbound request.
    pub async fn handle(
        &self,
        path_parts: &[String],
        args: &Args,
        headers: &RequestHeaders,
    ) -> Response {
        let resolution = self.router.resolve(path_parts);
        tracing::debug!(
            path = %path_parts.join("/"),
            pattern = %resolution.pattern,
            not_found = resolution.is_not_found(),
            "dispatching request"
        );

        let mut response = resolution.handler.handle(path_parts, args, headers).await;
        // The content type is the application's, never the handler's.
        response.set_header("Content-Type", self.format.as_mime());
        response
    }

    /// The application's negotiated content format.
    pub fn format(&self) -> ContentFormat {
        self.format
    }

    /// The gateway forwarder, if this is a gateway application.
    pub fn forwarder(&self) -> Option<&Arc<GatewayForwarder>> {
        self.forwarder.as_ref()
    }
}

/// Builder collecting registrations before the application freezes.
#[derive(Debug, Default)]
pub struct ApplicationBuilder {
    registry: HandlerRegistry,
    format: Option<ContentFormat>,
    forwarder: Option<Arc<GatewayForwarder>>,
}

impl ApplicationBuilder {
    /// Start with no handlers and the plain-text default format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Registration order is the resolution tie-break.
    pub fn handler(
        mut self,
        pattern: PathPattern,
        priority: u32,
        handler: Arc<dyn Handler>,
    ) -> Self {
        self.registry.register(pattern, priority, handler);
        self
    }

    /// Set the application's negotiated content format.
    pub fn content_format(mut self, format: ContentFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Attach a gateway forwarder, making this a gateway application.
    pub fn forwarder(mut self, forwarder: GatewayForwarder) -> Self {
        self.forwarder = Some(Arc::new(forwarder));
        self
    }

    /// Handle to the attached forwarder, for handlers that forward.
    pub fn forwarder_handle(&self) -> Option<Arc<GatewayForwarder>> {
        self.forwarder.as_ref().map(Arc::clone)
    }

    /// Freeze the application.
    pub fn build(self) -> Application {
        Application {
            router: Router::new(self.registry),
            format: self.format.unwrap_or(ContentFormat::Plain),
            forwarder: self.forwarder,
        }
    }
}
