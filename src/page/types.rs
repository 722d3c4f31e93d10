//! Page buffer traits

use crate::error::Result;
use crate::types::JsonValue;
use std::fmt;

/// Rows of the most recently fetched page
pub trait PageBuffer: fmt::Debug + Send + Sync {
    /// Whether a row is available
    fn has_unread_row(&self) -> bool;

    /// Take the next row
    fn pop_row(&mut self) -> Option<JsonValue>;

    /// Token the service returned with this page
    fn continuation_token(&self) -> Option<&str>;

    /// Number of unread rows
    fn remaining(&self) -> usize;
}

/// Builds page buffers from response bodies
pub trait PageDecoder: Send + Sync {
    /// Decode a response body into a page
    fn decode(
        &self,
        body: &[u8],
        continuation_token: Option<String>,
    ) -> Result<Box<dyn PageBuffer>>;
}
