//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{load_config, QueryConfig};
use crate::cursor::QueryCursor;
use crate::error::{Error, Result};
use crate::transport::HttpTransport;
use serde_json::{json, Value};
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command against stdout and stderr
    pub async fn run(&self) -> Result<()> {
        self.run_with(&mut std::io::stdout(), &mut std::io::stderr())
            .await
    }

    /// Run the CLI command, writing messages to `out` and the resume token to `err`
    pub async fn run_with(&self, out: &mut impl Write, err: &mut impl Write) -> Result<()> {
        match &self.cli.command {
            Commands::Run {
                continuation,
                max_rows,
            } => {
                self.run_query(continuation.as_deref(), *max_rows, out, err)
                    .await
            }
            Commands::Validate => self.validate(out),
        }
    }

    /// Load query configuration
    fn load_config(&self) -> Result<QueryConfig> {
        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::config("Query config file not specified (use -c flag)"))?;
        load_config(path)
    }

    /// Run the query, printing rows until the result set or row budget ends
    async fn run_query(
        &self,
        continuation: Option<&str>,
        max_rows: Option<usize>,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> Result<()> {
        let start = Instant::now();
        let mut config = self.load_config()?;
        if let Some(token) = continuation {
            config.continuation_token = Some(token.to_string());
        }

        let transport = Arc::new(HttpTransport::with_config(config.transport_config())?);
        let mut cursor = QueryCursor::new(config.descriptor()?, transport)
            .with_non_text_body(config.non_text_body);
        cursor
            .send_query_request(config.transport_context()?, config.initial_token())
            .await?;

        let mut rows = 0;
        loop {
            if max_rows.is_some_and(|max| rows >= max) {
                Self::report_early_stop(&cursor, err)?;
                break;
            }
            if !cursor.has_next().await? {
                break;
            }
            let row = cursor.next().await?;
            rows += 1;
            self.output_message(out, &json!({ "type": "RECORD", "record": row }))?;
        }

        info!("Read {} rows in {:?}", rows, start.elapsed());
        Ok(())
    }

    /// Print the token a later run can resume from
    fn report_early_stop(cursor: &QueryCursor, err: &mut impl Write) -> Result<()> {
        let unread = cursor.unread_rows();
        if unread > 0 {
            warn!(
                "Stopped with {} unread rows on the current page; resuming starts after them",
                unread
            );
        }
        if let Some(token) = cursor.continuation_token()? {
            writeln!(err, "continuation token: {token}")?;
        }
        Ok(())
    }

    /// Validate query configuration
    fn validate(&self, out: &mut impl Write) -> Result<()> {
        let config = self.load_config()?;
        config.validate()?;

        self.output_message(
            out,
            &json!({
                "type": "LOG",
                "log": {
                    "level": "INFO",
                    "message": format!(
                        "Query config is valid: {} query against {}",
                        config.kind,
                        config.endpoint
                    )
                }
            }),
        )
    }

    /// Output a message
    fn output_message(&self, out: &mut impl Write, msg: &Value) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(msg)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(msg)?,
        };
        writeln!(out, "{line}")?;
        Ok(())
    }
}
