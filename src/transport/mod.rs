//! Transport module
//!
//! The request/response exchange a cursor drives.
//!
//! # Overview
//!
//! - [`Transport`] is the seam: one request in, one response out, no retries
//! - [`TransportContext`] binds credential, endpoint, method and timeout
//! - [`HttpTransport`] implements the seam over reqwest

mod client;
mod types;

pub use client::{HttpTransport, TransportConfig, TransportConfigBuilder};
pub use types::{
    Credential, Transport, TransportContext, TransportContextBuilder, TransportRequest,
    TransportResponse, DEFAULT_TIMEOUT,
};
