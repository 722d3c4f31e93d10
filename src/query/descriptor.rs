//! Query descriptor construction and validation

use super::types::{serialize_query, NonTextBody, QueryOptions};
use crate::error::{Error, Result};
use crate::types::ResultKind;
use regex::Regex;
use std::num::NonZeroU32;
use std::sync::LazyLock;

/// Select-style shape: `select` followed somewhere by `from`, both whole words
static SELECT_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\bselect\b.*\bfrom\b").unwrap());

/// Where the query's content comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySource {
    /// Select-style query text
    Text(String),
    /// No text; the service decides from page size and kind
    Raw,
    /// Continued from an externally persisted continuation token
    Resume(String),
}

/// Immutable request parameters for one logical query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    source: QuerySource,
    page_size: Option<NonZeroU32>,
    kind: ResultKind,
}

impl QueryDescriptor {
    /// Create a text-based query
    pub fn from_text(text: impl Into<String>, page_size: i32, kind: ResultKind) -> Result<Self> {
        let text = text.into();
        validate_query_text(&text)?;
        Ok(Self {
            source: QuerySource::Text(text),
            page_size: Some(validate_page_size(page_size)?),
            kind: validate_kind(kind)?,
        })
    }

    /// Create a query without text
    pub fn without_text(page_size: i32, kind: ResultKind) -> Result<Self> {
        Ok(Self {
            source: QuerySource::Raw,
            page_size: Some(validate_page_size(page_size)?),
            kind: validate_kind(kind)?,
        })
    }

    /// Create a query that resumes from `options.continuation_token`.
    ///
    /// The page size is left unset unless `options.page_size` carries one.
    pub fn resume(options: &QueryOptions, kind: ResultKind) -> Result<Self> {
        let token = options
            .token()
            .ok_or_else(|| Error::invalid_argument("continuation token cannot be null or empty"))?
            .to_string();
        let page_size = match options.page_size {
            Some(size) => Some(
                NonZeroU32::new(size)
                    .ok_or_else(|| Error::invalid_argument("page size cannot be zero"))?,
            ),
            None => None,
        };
        Ok(Self {
            source: QuerySource::Resume(token),
            page_size,
            kind: validate_kind(kind)?,
        })
    }

    /// Where the query comes from
    pub fn source(&self) -> &QuerySource {
        &self.source
    }

    /// The query text, for text-based queries
    pub fn text(&self) -> Option<&str> {
        match &self.source {
            QuerySource::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Whether the request body carries query text
    pub fn is_text_based(&self) -> bool {
        matches!(self.source, QuerySource::Text(_))
    }

    /// Token this query was resumed from
    pub fn resume_token(&self) -> Option<&str> {
        match &self.source {
            QuerySource::Resume(token) => Some(token),
            _ => None,
        }
    }

    /// Requested page size; `None` when unset
    pub fn page_size(&self) -> Option<u32> {
        self.page_size.map(NonZeroU32::get)
    }

    /// Requested result kind
    pub fn kind(&self) -> ResultKind {
        self.kind
    }

    /// Build the request body
    pub fn request_body(&self, non_text: NonTextBody) -> Result<Vec<u8>> {
        match &self.source {
            QuerySource::Text(text) => serialize_query(text),
            QuerySource::Raw | QuerySource::Resume(_) => non_text.render(),
        }
    }
}

fn validate_query_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(Error::invalid_argument("query cannot be null or empty"));
    }
    if !SELECT_SHAPE.is_match(text) {
        return Err(Error::invalid_argument(format!(
            "query must contain select and from: {text}"
        )));
    }
    Ok(())
}

fn validate_page_size(page_size: i32) -> Result<NonZeroU32> {
    u32::try_from(page_size)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or_else(|| Error::invalid_argument("page size cannot be zero or negative"))
}

fn validate_kind(kind: ResultKind) -> Result<ResultKind> {
    if kind.is_unknown() {
        return Err(Error::invalid_argument("cannot process an unknown type query"));
    }
    Ok(kind)
}
