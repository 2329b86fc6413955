//! Outbound request assembly.
//!
//! # Responsibilities
//! - Model the outbound request a gateway handler wants to send
//! - Decide between raw-body and multipart encoding
//! - Assemble the wire-level method, target, headers, and body
//! - Reject malformed file parts before any network I/O
//!
//! # Design Decisions
//! - Multipart is used iff files are present; the auto-flatten policy then
//!   turns a field-map body into form-data parts
//! - A raw body travelling alongside files is appended after the closing
//!   boundary line, matching the backend-observable behavior this gateway
//!   has always produced
//! - Field-map bodies sent without files are url-encoded and carry no
//!   `Content-Type` unless one was given explicitly

use thiserror::Error;
use url::Url;

use crate::gateway::multipart::MultipartEncoder;

/// An in-memory file attached to an outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    /// Form field name.
    pub name: String,
    /// File name reported in the disposition.
    pub filename: String,
    /// File content bytes.
    pub content: Vec<u8>,
}

impl RawFile {
    /// Create a file part.
    pub fn new(name: impl Into<String>, filename: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            filename: filename.into(),
            content,
        }
    }
}

/// A file argument: one file or an arbitrarily nested group of files.
///
/// Groups flatten depth-first, preserving order, before encoding.
#[derive(Debug, Clone)]
pub enum FileSet {
    File(RawFile),
    Group(Vec<FileSet>),
}

impl FileSet {
    /// Flatten into the ordered file list the encoder consumes.
    pub fn flatten(&self) -> Vec<RawFile> {
        let mut files = Vec::new();
        self.collect(&mut files);
        files
    }

    fn collect(&self, out: &mut Vec<RawFile>) {
        match self {
            FileSet::File(file) => out.push(file.clone()),
            FileSet::Group(children) => {
                for child in children {
                    child.collect(out);
                }
            }
        }
    }
}

/// Request body variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutboundBody {
    /// No body at all.
    #[default]
    Empty,
    /// Opaque bytes, sent unmodified.
    Raw(Vec<u8>),
    /// Named form fields, in insertion order.
    Fields(Vec<(String, String)>),
}

impl OutboundBody {
    /// Whether there is anything to send.
    pub fn is_empty(&self) -> bool {
        match self {
            OutboundBody::Empty => true,
            OutboundBody::Raw(bytes) => bytes.is_empty(),
            OutboundBody::Fields(fields) => fields.is_empty(),
        }
    }
}

/// The outbound request a gateway handler hands to the forwarder.
#[derive(Debug, Clone, Default)]
pub struct OutboundRequest {
    /// Path appended to the forwarder's base URL.
    pub path: String,
    /// Body payload.
    pub body: OutboundBody,
    /// Explicit `Content-Type`, overriding the negotiated one.
    pub content_type: Option<String>,
    /// Files to encode as multipart parts.
    pub files: Vec<RawFile>,
}

impl OutboundRequest {
    /// A bodyless request for the given path.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// HTTP method chosen for the outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Wire-level request handed to the transport.
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub method: Method,
    /// Full target URL.
    pub target: String,
    /// Headers in emission order.
    pub headers: Vec<(String, String)>,
    /// Encoded body bytes.
    pub body: Vec<u8>,
}

/// A request could not be encoded for the wire.
///
/// Raised before any network I/O happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// A file part has an empty field name.
    #[error("file part '{filename}' is missing a field name")]
    MissingName { filename: String },

    /// A file part has an empty file name.
    #[error("file part '{name}' is missing a filename")]
    MissingFilename { name: String },

    /// Form fields could not be url-encoded.
    #[error("form fields could not be encoded: {0}")]
    Fields(String),
}

/// Decide the encoding and assemble the wire request.
pub fn build_wire_request(
    base_url: &Url,
    request: &OutboundRequest,
    auto_form_fields: bool,
) -> Result<WireRequest, EncodeError> {
    let target = format!(
        "{}/{}",
        base_url.as_str().trim_end_matches('/'),
        request.path
    );

    if !request.files.is_empty() {
        return build_multipart(target, request, auto_form_fields);
    }

    let mut headers = Vec::new();
    let body = match &request.body {
        OutboundBody::Empty => Vec::new(),
        OutboundBody::Raw(bytes) => bytes.clone(),
        OutboundBody::Fields(fields) => serde_urlencoded::to_string(fields)
            .map_err(|err| EncodeError::Fields(err.to_string()))?
            .into_bytes(),
    };

    if body.is_empty() {
        return Ok(WireRequest {
            method: Method::Get,
            target,
            headers,
            body,
        });
    }

    if let Some(content_type) = &request.content_type {
        headers.push(("Content-Type".to_string(), content_type.clone()));
    }
    headers.push(("Content-Length".to_string(), body.len().to_string()));

    Ok(WireRequest {
        method: Method::Post,
        target,
        headers,
        body,
    })
}

fn build_multipart(
    target: String,
    request: &OutboundRequest,
    auto_form_fields: bool,
) -> Result<WireRequest, EncodeError> {
    for file in &request.files {
        if file.name.is_empty() {
            return Err(EncodeError::MissingName {
                filename: file.filename.clone(),
            });
        }
        if file.filename.is_empty() {
            return Err(EncodeError::MissingFilename {
                name: file.name.clone(),
            });
        }
    }

    let mut encoder = MultipartEncoder::new();
    let mut trailing: Vec<u8> = Vec::new();

    match &request.body {
        OutboundBody::Empty => {}
        OutboundBody::Fields(fields) if auto_form_fields => {
            for (name, value) in fields {
                encoder.add_field(name, value);
            }
        }
        OutboundBody::Fields(fields) => {
            trailing = serde_urlencoded::to_string(fields)
                .map_err(|err| EncodeError::Fields(err.to_string()))?
                .into_bytes();
        }
        OutboundBody::Raw(bytes) => trailing = bytes.clone(),
    }

    for file in &request.files {
        encoder.add_file(file);
    }

    let content_type = match &request.content_type {
        Some(explicit) => format!("{}; boundary={}", explicit, encoder.boundary()),
        None => encoder.content_type(),
    };

    let mut body = encoder.finish();
    body.extend_from_slice(&trailing);

    let headers = vec![
        ("Content-Type".to_string(), content_type),
        ("Content-Length".to_string(), body.len().to_string()),
    ];

    Ok(WireRequest {
        method: Method::Post,
        target,
        headers,
        body,
    })
}
