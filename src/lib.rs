//! Minimal HTTP gateway framework.
//!
//! An inbound request arrives already split into path segments, arguments,
//! and headers. The framework resolves it to a registered handler by
//! longest-registered-prefix match with a priority tie-break, and, for
//! gateway handlers, forwards it to a backend over HTTP, reconstructing
//! the backend's status, headers, and body and folding `Set-Cookie` values
//! into a per-application cookie store.
//!
//! # Architecture Overview
//!
//! ```text
//! inbound (path parts, args, headers)
//!     → application.rs (dispatch, content-type stamping)
//!     → routing/ (prefix match, priority tie-break, 404 fallback)
//!     → handler/ (terminal handlers, negotiation, gateway handler)
//!     → gateway/ (body encoding, response split, cookie merge)
//!     → transport/ (one outbound call, deadline enforced)
//! ```
//!
//! Binding the inbound socket, TLS, authentication, and retry policy are
//! the host's concern; this crate stops at the `Transport` seam.

// Core subsystems
pub mod application;
pub mod gateway;
pub mod handler;
pub mod routing;
pub mod transport;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use application::{Application, ApplicationBuilder};
pub use config::GatewayConfig;
pub use gateway::{CookieJar, ForwardError, GatewayForwarder, OutboundRequest, ParsedResponse};
pub use handler::{ContentFormat, Handler, Response};
pub use routing::{PathPattern, Router};
pub use transport::{Transport, TransportError};
