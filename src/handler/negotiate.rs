//! Content format negotiation.
//!
//! # Design Decisions
//! - Negotiation returns an explicit result instead of throwing: callers
//!   branch on `Ok`/`Err` rather than catching control-flow exceptions
//! - A handler that cannot serve the requested format falls back to its
//!   first supported format; having no supported format at all is a
//!   programming defect, not a runtime error path

use thiserror::Error;

/// Response format negotiated for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Plain,
    Json,
    Html,
}

impl ContentFormat {
    /// MIME type for this format.
    pub fn as_mime(&self) -> &'static str {
        match self {
            ContentFormat::Plain => "text/plain",
            ContentFormat::Json => "application/json",
            ContentFormat::Html => "text/html",
        }
    }

    /// Parse a MIME type into a format, if it is one of the known three.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "text/plain" => Some(ContentFormat::Plain),
            "application/json" => Some(ContentFormat::Json),
            "text/html" => Some(ContentFormat::Html),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_mime())
    }
}

/// The requested format is not in the handler's supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("format '{requested}' is unsupported")]
pub struct FormatUnsupported {
    /// The MIME type that was asked for.
    pub requested: String,
}

/// Ordered set of formats a handler can render.
///
/// The first entry doubles as the fallback when negotiation fails.
#[derive(Debug, Clone)]
pub struct SupportedFormats {
    formats: Vec<ContentFormat>,
}

impl SupportedFormats {
    /// Build a set from the given formats, order preserved.
    pub fn new<I>(formats: I) -> Self
    where
        I: IntoIterator<Item = ContentFormat>,
    {
        Self {
            formats: formats.into_iter().collect(),
        }
    }

    /// Whether the set contains the given format.
    pub fn contains(&self, format: ContentFormat) -> bool {
        self.formats.contains(&format)
    }

    /// The fallback format (first registered), if any.
    pub fn default_format(&self) -> Option<ContentFormat> {
        self.formats.first().copied()
    }

    /// Negotiate a requested MIME type against this set.
    pub fn negotiate(&self, requested: &str) -> Result<ContentFormat, FormatUnsupported> {
        ContentFormat::from_mime(requested)
            .filter(|format| self.contains(*format))
            .ok_or_else(|| FormatUnsupported {
                requested: requested.to_string(),
            })
    }

    /// Negotiate, falling back to the first supported format on failure.
    ///
    /// Returns `None` only for an empty set, which no shipped handler has.
    pub fn negotiate_or_default(&self, requested: &str) -> Option<ContentFormat> {
        match self.negotiate(requested) {
            Ok(format) => Some(format),
            Err(unsupported) => {
                tracing::debug!(
                    requested = %unsupported.requested,
                    "falling back to default format"
                );
                self.default_format()
            }
        }
    }
}
