//! Common types used throughout the query cursor
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    GET,
    #[default]
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl Method {
    /// Method name as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

// ============================================================================
// Result Kind
// ============================================================================

/// Semantic category of a query result set.
///
/// The service tags every page with one of these; a cursor only accepts pages
/// whose tag matches the kind it asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResultKind {
    /// Device twin documents
    Twin,
    /// Per-device job records
    DeviceJob,
    /// Job responses
    JobResponse,
    /// Arbitrary projections
    Raw,
    /// Missing or unrecognised tag
    #[default]
    Unknown,
}

impl ResultKind {
    /// Every kind a query may request
    pub const REQUESTABLE: [ResultKind; 4] = [
        ResultKind::Twin,
        ResultKind::DeviceJob,
        ResultKind::JobResponse,
        ResultKind::Raw,
    ];

    /// Wire tag for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::Twin => "twin",
            ResultKind::DeviceJob => "deviceJob",
            ResultKind::JobResponse => "jobResponse",
            ResultKind::Raw => "raw",
            ResultKind::Unknown => "unknown",
        }
    }

    /// Parse a wire tag, ignoring ASCII case. Unmatched tags become `Unknown`.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        Self::REQUESTABLE
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(tag))
            .unwrap_or(ResultKind::Unknown)
    }

    /// Check if this is the unknown sentinel
    pub fn is_unknown(&self) -> bool {
        matches!(self, ResultKind::Unknown)
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
