//! # Query Cursor
//!
//! A client-side cursor over server-driven, continuation-token paginated
//! query APIs.
//!
//! ## Features
//!
//! - **Typed Queries**: Select-style text, raw, or resumed-from-token descriptors
//! - **Transparent Pagination**: `has_next` fetches follow-up pages on demand
//! - **Kind Checking**: Pages tagged with the wrong result kind are rejected
//! - **Resumable**: Persist a continuation token, feed it back in later
//! - **Pluggable Seams**: Swap the transport or page decoder
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use query_cursor::{Credential, HttpTransport, QueryCursor, QueryDescriptor,
//!     ResultKind, TransportContext, Method, Result};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let query = QueryDescriptor::from_text("select * from devices", 100, ResultKind::Twin)?;
//!     let context = TransportContext::builder()
//!         .credential(Credential::shared_access_signature("SharedAccessSignature sr=..."))
//!         .endpoint("https://my-hub.example.com/devices/query")
//!         .method(Method::POST)
//!         .build()?;
//!
//!     let mut cursor = QueryCursor::new(query, Arc::new(HttpTransport::new()?));
//!     cursor.send_query_request(context, None).await?;
//!     while cursor.has_next().await? {
//!         println!("{}", cursor.next().await?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       QueryCursor                        │
//! │  send_query_request()  has_next()  continuation_token()  │
//! └──────────────────────────────────────────────────────────┘
//!          │                    │                    │
//! ┌────────┴───────┬────────────┴───────┬────────────┴───────┐
//! │     Query      │     Transport      │       Page         │
//! ├────────────────┼────────────────────┼────────────────────┤
//! │ Descriptor     │ Bound context      │ PageBuffer         │
//! │ Options        │ HttpTransport      │ JSON array decoder │
//! │ Request body   │ No retries         │                    │
//! └────────────────┴────────────────────┴────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Query descriptors and request bodies
pub mod query;

/// Transport contract and HTTP implementation
pub mod transport;

/// Page buffers and decoders
pub mod page;

/// Pagination engine
pub mod cursor;

/// Query configuration files
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::{load_config, load_config_from_str, QueryConfig};
pub use cursor::{PageState, QueryCursor};
pub use page::{JsonPageDecoder, PageBuffer, PageDecoder};
pub use query::{NonTextBody, QueryDescriptor, QueryOptions};
pub use transport::{Credential, HttpTransport, Transport, TransportContext};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
