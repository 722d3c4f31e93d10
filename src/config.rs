//! Query configuration files
//!
//! A config file describes one query and where to send it. YAML and JSON are
//! both accepted.
//!
//! ```yaml
//! endpoint: https://my-hub.example.com/devices/query?api-version=2021-04-12
//! credential:
//!   type: shared_access_signature
//!   token: SharedAccessSignature sr=...
//! query: select * from devices where status = 'enabled'
//! kind: twin
//! page_size: 100
//! ```

use crate::error::{Error, Result};
use crate::query::{NonTextBody, QueryDescriptor, QueryOptions};
use crate::transport::{Credential, TransportConfig, TransportContext};
use crate::types::{Method, ResultKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Query Config
// ============================================================================

/// Complete query configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Query endpoint URL
    pub endpoint: String,

    /// HTTP method
    #[serde(default)]
    pub method: Method,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Credential presented on every request
    pub credential: Credential,

    /// Select-style query text; omit for raw queries
    #[serde(default)]
    pub query: Option<String>,

    /// Requested result kind
    pub kind: ResultKind,

    /// Page size; defaults to 100 except on resume-only configs
    #[serde(default)]
    pub page_size: Option<i32>,

    /// Token sent with the first request, to pick up where a run stopped
    #[serde(default)]
    pub continuation_token: Option<String>,

    /// Body sent by queries without text
    #[serde(default)]
    pub non_text_body: NonTextBody,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_timeout_ms() -> u64 {
    30_000
}

const DEFAULT_PAGE_SIZE: i32 = 100;

/// HTTP transport settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Extra headers sent on every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl QueryConfig {
    /// Build the query descriptor.
    ///
    /// Query text is always kept; the continuation token travels separately
    /// (see [`QueryConfig::initial_token`]). Only a config with a token and no
    /// text becomes a resume descriptor, whose page size stays unset unless
    /// given.
    pub fn descriptor(&self) -> Result<QueryDescriptor> {
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        match (&self.query, self.initial_token()) {
            (Some(text), _) => QueryDescriptor::from_text(text.clone(), page_size, self.kind),
            (None, Some(token)) => {
                let mut options = QueryOptions::new().with_continuation_token(token);
                if let Some(size) = self.page_size {
                    let size = u32::try_from(size).map_err(|_| {
                        Error::invalid_argument("page size cannot be zero or negative")
                    })?;
                    options = options.with_page_size(size);
                }
                QueryDescriptor::resume(&options, self.kind)
            }
            (None, None) => QueryDescriptor::without_text(page_size, self.kind),
        }
    }

    /// Token to send with the first request, if any
    pub fn initial_token(&self) -> Option<&str> {
        self.continuation_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }

    /// Build the transport context
    pub fn transport_context(&self) -> Result<TransportContext> {
        TransportContext::builder()
            .credential(self.credential.clone())
            .endpoint(self.endpoint.clone())
            .method(self.method)
            .timeout(Duration::from_millis(self.timeout_ms))
            .build()
    }

    /// Build the HTTP transport configuration
    pub fn transport_config(&self) -> TransportConfig {
        let mut builder = TransportConfig::builder();
        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        for (key, value) in &self.http.headers {
            builder = builder.header(key.clone(), value.clone());
        }
        builder.build()
    }

    /// Validate everything needed to run the query
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::missing_field("endpoint"));
        }
        self.descriptor()?;
        self.transport_context()?;
        Ok(())
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load a query config from a YAML or JSON file
pub fn load_config(path: impl AsRef<Path>) -> Result<QueryConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read {}: {e}", path.display())))?;
    load_config_from_str(&content)
}

/// Parse a query config from YAML or JSON text
pub fn load_config_from_str(content: &str) -> Result<QueryConfig> {
    Ok(serde_yaml::from_str(content)?)
}
