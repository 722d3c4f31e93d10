//! Query module
//!
//! Immutable query descriptors and the request bodies built from them.
//!
//! # Overview
//!
//! A [`QueryDescriptor`] is one of three shapes:
//! - text-based: a select-style query string sent in the request body
//! - non-text: a raw query driven only by page size and result kind
//! - resumed: a query continued from an externally persisted token

mod descriptor;
mod types;

pub use descriptor::{QueryDescriptor, QuerySource};
pub use types::{serialize_query, NonTextBody, QueryOptions, SELECT_ALL_DEVICES};
