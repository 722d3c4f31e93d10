//! Wire headers read and written by the cursor

use crate::types::{ResultKind, StringMap};

/// Opaque pagination cursor, sent and received
pub const CONTINUATION_TOKEN_HEADER: &str = "x-ms-continuation";

/// Result kind tag on every response page
pub const ITEM_TYPE_HEADER: &str = "x-ms-item-type";

/// Requested page size, decimal
pub const PAGE_SIZE_HEADER: &str = "x-ms-max-item-count";

/// Typed view of the response headers the cursor cares about
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ResponseHeaders {
    pub continuation_token: Option<String>,
    pub result_kind: ResultKind,
}

type ApplyHeader = fn(&mut ResponseHeaders, &str);

static RESPONSE_FIELDS: [(&str, ApplyHeader); 2] = [
    (CONTINUATION_TOKEN_HEADER, apply_continuation_token),
    (ITEM_TYPE_HEADER, apply_item_type),
];

fn apply_continuation_token(headers: &mut ResponseHeaders, value: &str) {
    // An empty token ends pagination just like a missing one.
    if !value.is_empty() {
        headers.continuation_token = Some(value.to_string());
    }
}

fn apply_item_type(headers: &mut ResponseHeaders, value: &str) {
    headers.result_kind = ResultKind::from_tag(value);
}

impl ResponseHeaders {
    /// Extract the known fields from a raw header map
    pub fn parse(raw: &StringMap) -> Self {
        let mut headers = Self::default();
        for (name, apply) in &RESPONSE_FIELDS {
            if let Some(value) = raw.get(*name) {
                apply(&mut headers, value);
            }
        }
        headers
    }
}

/// Headers for one outgoing query request
pub(crate) fn request_headers(page_size: Option<u32>, continuation_token: Option<&str>) -> StringMap {
    let mut headers = StringMap::new();
    if let Some(page_size) = page_size {
        headers.insert(PAGE_SIZE_HEADER.to_string(), page_size.to_string());
    }
    if let Some(token) = continuation_token {
        headers.insert(CONTINUATION_TOKEN_HEADER.to_string(), token.to_string());
    }
    headers
}
