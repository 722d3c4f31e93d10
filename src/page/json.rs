//! JSON array page buffer

use super::types::{PageBuffer, PageDecoder};
use crate::error::{Error, Result};
use crate::types::JsonValue;
use std::collections::VecDeque;

/// Page backed by the elements of a JSON array
#[derive(Debug, Clone, Default)]
pub struct JsonPage {
    rows: VecDeque<JsonValue>,
    continuation_token: Option<String>,
}

impl JsonPage {
    /// Create a page from decoded rows
    pub fn new(rows: Vec<JsonValue>, continuation_token: Option<String>) -> Self {
        Self {
            rows: rows.into(),
            continuation_token,
        }
    }
}

impl PageBuffer for JsonPage {
    fn has_unread_row(&self) -> bool {
        !self.rows.is_empty()
    }

    fn pop_row(&mut self) -> Option<JsonValue> {
        self.rows.pop_front()
    }

    fn continuation_token(&self) -> Option<&str> {
        self.continuation_token.as_deref()
    }

    fn remaining(&self) -> usize {
        self.rows.len()
    }
}

/// Decodes response bodies holding a JSON array of rows
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPageDecoder;

impl JsonPageDecoder {
    /// Create a new JSON page decoder
    pub fn new() -> Self {
        Self
    }
}

impl PageDecoder for JsonPageDecoder {
    fn decode(
        &self,
        body: &[u8],
        continuation_token: Option<String>,
    ) -> Result<Box<dyn PageBuffer>> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Box::new(JsonPage::new(Vec::new(), continuation_token)));
        }

        let value: JsonValue = serde_json::from_slice(body)
            .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;

        match value {
            JsonValue::Array(rows) => Ok(Box::new(JsonPage::new(rows, continuation_token))),
            other => Err(Error::decode(format!(
                "expected a JSON array of rows, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
