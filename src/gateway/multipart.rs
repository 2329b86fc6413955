//! multipart/form-data body construction.
//!
//! # Responsibilities
//! - Frame form fields and files as multipart parts
//! - Generate a collision-resistant boundary per encoder
//! - Produce the matching `Content-Type` value
//!
//! # Design Decisions
//! - Boundary tokens come from a fresh UUID v4 per encoder, so concurrent
//!   forwards never need to coordinate and never collide
//! - Parts are framed with CRLF throughout; the closing line is
//!   `--<boundary>--\r\n`

use uuid::Uuid;

use crate::gateway::outbound::RawFile;

/// Builds a `multipart/form-data` body part by part.
#[derive(Debug)]
pub struct MultipartEncoder {
    boundary: String,
    buf: Vec<u8>,
}

impl MultipartEncoder {
    /// Create an encoder with a fresh boundary.
    pub fn new() -> Self {
        Self {
            boundary: format!("-------------{}", Uuid::new_v4().simple()),
            buf: Vec::new(),
        }
    }

    /// The boundary token separating parts.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// `Content-Type` value announcing this body.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Append one form field part.
    pub fn add_field(&mut self, name: &str, value: &str) {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n",
                self.boundary, name
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(value.as_bytes());
        self.buf.extend_from_slice(b"\r\n");
    }

    /// Append one file part.
    pub fn add_file(&mut self, file: &RawFile) {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\r\n",
                self.boundary, file.name, file.filename
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(&file.content);
        self.buf.extend_from_slice(b"\r\n");
    }

    /// Terminate the body and return its bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.buf
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.buf
    }
}

impl Default for MultipartEncoder {
    fn default() -> Self {
        Self::new()
    }
}
