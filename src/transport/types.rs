//! Transport types and traits

use crate::error::{Error, Result};
use crate::types::{Method, StringMap};
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Timeout applied when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Credential
// ============================================================================

/// Credential presented on every request
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credential {
    /// Pre-signed shared access signature, sent verbatim as `Authorization`
    SharedAccessSignature {
        /// The signature token
        token: String,
    },
    /// Bearer token
    Bearer {
        /// The bearer token
        token: String,
    },
    /// API key in a named header
    ApiKey {
        /// Header name
        header: String,
        /// The API key value
        value: String,
    },
}

impl Credential {
    /// Create a shared access signature credential
    pub fn shared_access_signature(token: impl Into<String>) -> Self {
        Self::SharedAccessSignature {
            token: token.into(),
        }
    }

    /// Create a bearer token credential
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Create an API key credential
    pub fn api_key(header: impl Into<String>, value: impl Into<String>) -> Self {
        Self::ApiKey {
            header: header.into(),
            value: value.into(),
        }
    }

    /// Header name and value carrying this credential
    pub fn header(&self) -> (String, String) {
        match self {
            Credential::SharedAccessSignature { token } => {
                ("authorization".to_string(), token.clone())
            }
            Credential::Bearer { token } => ("authorization".to_string(), format!("Bearer {token}")),
            Credential::ApiKey { header, value } => (header.clone(), value.clone()),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Credential::SharedAccessSignature { token } | Credential::Bearer { token } => {
                token.is_empty()
            }
            Credential::ApiKey { header, value } => header.is_empty() || value.is_empty(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::SharedAccessSignature { .. } => f
                .debug_struct("SharedAccessSignature")
                .finish_non_exhaustive(),
            Credential::Bearer { .. } => f.debug_struct("Bearer").finish_non_exhaustive(),
            Credential::ApiKey { header, .. } => f
                .debug_struct("ApiKey")
                .field("header", header)
                .finish_non_exhaustive(),
        }
    }
}

// ============================================================================
// Bound Transport Context
// ============================================================================

/// Credential, endpoint, method and timeout bound to a cursor.
///
/// Built once per explicit dispatch and reused unchanged by every automatic
/// continuation that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportContext {
    credential: Credential,
    endpoint: Url,
    method: Method,
    timeout: Duration,
}

impl TransportContext {
    /// Create a context builder
    pub fn builder() -> TransportContextBuilder {
        TransportContextBuilder::default()
    }

    /// Credential for every request
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Query endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// HTTP method
    pub fn method(&self) -> Method {
        self.method
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Builder for [`TransportContext`]
#[derive(Debug, Default)]
pub struct TransportContextBuilder {
    credential: Option<Credential>,
    endpoint: Option<String>,
    method: Option<Method>,
    timeout: Option<Duration>,
}

impl TransportContextBuilder {
    /// Set the credential
    #[must_use]
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Set the endpoint URL
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the HTTP method
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the context
    pub fn build(self) -> Result<TransportContext> {
        let credential = self
            .credential
            .filter(|credential| !credential.is_empty())
            .ok_or_else(|| Error::invalid_argument("credential cannot be null or empty"))?;
        let endpoint = self
            .endpoint
            .filter(|endpoint| !endpoint.trim().is_empty())
            .ok_or_else(|| Error::invalid_argument("endpoint cannot be null or empty"))?;
        let endpoint = Url::parse(endpoint.trim())
            .map_err(|e| Error::invalid_argument(format!("invalid endpoint '{endpoint}': {e}")))?;
        let method = self
            .method
            .ok_or_else(|| Error::invalid_argument("method cannot be null"))?;

        Ok(TransportContext {
            credential,
            endpoint,
            method,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

// ============================================================================
// Request / Response
// ============================================================================

/// One request handed to a [`Transport`]
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// Bound transport context
    pub context: Arc<TransportContext>,
    /// Headers for this request only
    pub headers: StringMap,
    /// Request body
    pub body: Bytes,
}

impl TransportRequest {
    /// Look up a request header
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Response returned by a [`Transport`]
#[derive(Debug, Clone, Default)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers, keyed by lower-case name
    pub headers: StringMap,
    /// Response body
    pub body: Bytes,
}

impl TransportResponse {
    /// Create a response
    pub fn new(status: u16, headers: StringMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Whether the status implies success
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Look up a response header
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Executes one query request.
///
/// Implementations enforce the context timeout and map non-success statuses
/// to [`Error::ServiceRejected`]. They must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and wait for the response
    async fn execute(&self, request: &TransportRequest) -> Result<TransportResponse>;
}
