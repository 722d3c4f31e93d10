//! Paginated query cursor
//!
//! Drives a [`QueryDescriptor`](crate::query::QueryDescriptor) against a
//! [`Transport`](crate::transport::Transport), one page at a time.
//!
//! # Page states
//!
//! ```text
//!  Unfetched ──send_query_request──▶ RowsRemaining ◀──────────┐
//!                                        │ next()             │ rows
//!                                        ▼                    │
//!                      ┌──────── page exhausted ────────┐     │
//!                      │ token                 no token │     │
//!                      ▼                                ▼     │
//!            ExhaustedWithToken ──fetch──────────▶ Terminal   │
//!                      └──────────────────────────────────────┘
//! ```

mod engine;
mod headers;

pub use engine::{FetchReason, PageState, QueryCursor};
pub use headers::{CONTINUATION_TOKEN_HEADER, ITEM_TYPE_HEADER, PAGE_SIZE_HEADER};
