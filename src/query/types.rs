//! Query option and request body types

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Legacy body sent by non-text queries in [`NonTextBody::SelectAllDevices`] mode
pub const SELECT_ALL_DEVICES: &str = "select * from devices";

/// Options for resuming or continuing a query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Continuation token from a previous page
    #[serde(default)]
    pub continuation_token: Option<String>,
    /// Page size to request when resuming
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl QueryOptions {
    /// Create empty query options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the continuation token
    #[must_use]
    pub fn with_continuation_token(mut self, token: impl Into<String>) -> Self {
        self.continuation_token = Some(token.into());
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// The continuation token, if set and non-empty
    pub fn token(&self) -> Option<&str> {
        self.continuation_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}

/// Body sent by queries that carry no query text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonTextBody {
    /// Send an empty body
    #[default]
    Empty,
    /// Send `{"query":"select * from devices"}` for compatibility with older clients
    SelectAllDevices,
}

impl NonTextBody {
    /// Render the body bytes
    pub fn render(&self) -> Result<Vec<u8>> {
        match self {
            NonTextBody::Empty => Ok(Vec::new()),
            NonTextBody::SelectAllDevices => serialize_query(SELECT_ALL_DEVICES),
        }
    }
}

#[derive(Serialize)]
struct QueryRequestBody<'a> {
    query: &'a str,
}

/// Serialize query text into a `{"query": "<text>"}` payload
pub fn serialize_query(text: &str) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&QueryRequestBody { query: text })?)
}
