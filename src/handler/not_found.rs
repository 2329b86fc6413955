//! Not-found fallback handler.
//!
//! # Responsibilities
//! - Build the fixed structured 404 error record
//! - Render it as plain text, JSON, or HTML
//! - Emit the diagnostic headers carried by the plain variant
//!
//! # Design Decisions
//! - Rendering sits behind a trait so hosts can swap the body generator;
//!   the default implementation covers the three supported formats
//! - The record's wording is part of the external contract and is kept
//!   byte-for-byte stable

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::handler::negotiate::{ContentFormat, SupportedFormats};
use crate::handler::{Args, Handler, RequestHeaders, Response};

/// Structured error record rendered by every 404 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub guilty: &'static str,
    pub name: &'static str,
    pub msg: String,
    pub code: u16,
}

impl ErrorBody {
    /// The 404 record for a request path that matched nothing.
    pub fn not_found(path: &str) -> Self {
        Self {
            guilty: "programmer",
            name: "404 Not Found",
            msg: format!("Cannot Found '{path}'"),
            code: 404,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    ok: u8,
    error: ErrorBody,
}

/// Renders the negotiated-format 404 body.
pub trait NotFoundRenderer: Send + Sync {
    /// Produce the response body for the given request path and format.
    fn render(&self, path: &str, format: ContentFormat) -> Vec<u8>;
}

/// Built-in renderer for the three supported formats.
#[derive(Debug, Default)]
pub struct DefaultNotFoundRenderer;

impl NotFoundRenderer for DefaultNotFoundRenderer {
    fn render(&self, path: &str, format: ContentFormat) -> Vec<u8> {
        let error = ErrorBody::not_found(path);
        match format {
            ContentFormat::Plain => format!("{}:{}", error.name, error.msg).into_bytes(),
            ContentFormat::Json => {
                let envelope = ErrorEnvelope { ok: 1, error };
                // Serialization of a derive-only struct cannot fail.
                serde_json::to_vec(&envelope).unwrap_or_default()
            }
            ContentFormat::Html => format!(
                "<h1>{}</h1><p>{}</p>Error Code: {} - Guilty: {}",
                error.name, error.msg, error.code, error.guilty
            )
            .into_bytes(),
        }
    }
}

/// Synthetic handler answering requests that matched no registration.
pub struct NotFoundHandler {
    format: ContentFormat,
    renderer: Arc<dyn NotFoundRenderer>,
}

impl NotFoundHandler {
    /// Create a handler fixed to the given format, using the built-in
    /// renderer.
    pub fn new(format: ContentFormat) -> Self {
        Self::with_renderer(format, Arc::new(DefaultNotFoundRenderer))
    }

    /// Create a handler with a host-supplied renderer.
    pub fn with_renderer(format: ContentFormat, renderer: Arc<dyn NotFoundRenderer>) -> Self {
        Self { format, renderer }
    }

    /// Formats this handler can render.
    pub fn supported_formats() -> SupportedFormats {
        SupportedFormats::new([
            ContentFormat::Plain,
            ContentFormat::Json,
            ContentFormat::Html,
        ])
    }
}

impl std::fmt::Debug for NotFoundHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotFoundHandler")
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Handler for NotFoundHandler {
    async fn handle(
        &self,
        path_parts: &[String],
        _args: &Args,
        _headers: &RequestHeaders,
    ) -> Response {
        let path = path_parts.join("/");
        let mut response =
            Response::with_status(404, "Not Found", self.renderer.render(&path, self.format));
        if self.format == ContentFormat::Plain {
            let error = ErrorBody::not_found(&path);
            response.push_header("Error Code", &error.code.to_string());
            response.push_header("Guilty", error.guilty);
        }
        response
    }
}
