//! Pagination engine

use super::headers::{request_headers, ResponseHeaders};
use crate::error::{Error, Result};
use crate::page::{JsonPageDecoder, PageBuffer, PageDecoder};
use crate::query::{NonTextBody, QueryDescriptor, QueryOptions};
use crate::transport::{Transport, TransportContext, TransportRequest};
use crate::types::{JsonValue, ResultKind};
use futures::Stream;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Where the cursor stands relative to the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    /// No page has been fetched
    Unfetched,
    /// The current page has unread rows
    RowsRemaining,
    /// The current page is drained and the service offered another
    ExhaustedWithToken(String),
    /// The current page is drained and no token remains
    Terminal,
}

/// Why a page fetch was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchReason {
    /// First request of an explicit `send_query_request`
    Initial,
    /// Issued by `has_next` on an exhausted page with a token
    AutoContinuation,
    /// Forced by a caller-supplied token
    ExplicitResume,
}

impl fmt::Display for FetchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FetchReason::Initial => "initial fetch",
            FetchReason::AutoContinuation => "continuation fetch",
            FetchReason::ExplicitResume => "resume fetch",
        })
    }
}

/// A page together with the kind the service tagged it with
struct FetchedPage {
    kind: ResultKind,
    buffer: Box<dyn PageBuffer>,
}

/// Cursor over a paginated query.
///
/// Every state-changing call takes `&mut self`, so a cursor has at most one
/// request in flight. Share it across tasks only behind an external lock.
pub struct QueryCursor {
    descriptor: QueryDescriptor,
    transport: Arc<dyn Transport>,
    decoder: Arc<dyn PageDecoder>,
    non_text_body: NonTextBody,
    context: Option<Arc<TransportContext>>,
    page: Option<FetchedPage>,
}

impl QueryCursor {
    /// Create a cursor that decodes pages as JSON arrays
    pub fn new(descriptor: QueryDescriptor, transport: Arc<dyn Transport>) -> Self {
        Self {
            descriptor,
            transport,
            decoder: Arc::new(JsonPageDecoder::new()),
            non_text_body: NonTextBody::default(),
            context: None,
            page: None,
        }
    }

    /// Use a custom page decoder
    #[must_use]
    pub fn with_decoder(mut self, decoder: Arc<dyn PageDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Choose the body sent by queries without text
    #[must_use]
    pub fn with_non_text_body(mut self, body: NonTextBody) -> Self {
        self.non_text_body = body;
        self
    }

    /// The query this cursor runs
    pub fn descriptor(&self) -> &QueryDescriptor {
        &self.descriptor
    }

    /// Kind the service returned; `Unknown` until the first page arrives
    pub fn result_kind(&self) -> ResultKind {
        self.page
            .as_ref()
            .map_or(ResultKind::Unknown, |page| page.kind)
    }

    /// Transport context bound by the last `send_query_request`
    pub fn bound_context(&self) -> Option<&TransportContext> {
        self.context.as_deref()
    }

    /// Current page state
    pub fn page_state(&self) -> PageState {
        match &self.page {
            None => PageState::Unfetched,
            Some(page) if page.buffer.has_unread_row() => PageState::RowsRemaining,
            Some(page) => match page.buffer.continuation_token() {
                Some(token) => PageState::ExhaustedWithToken(token.to_string()),
                None => PageState::Terminal,
            },
        }
    }

    /// Rows left on the current page
    pub fn unread_rows(&self) -> usize {
        self.page.as_ref().map_or(0, |page| page.buffer.remaining())
    }

    /// Token returned with the current page, for external persistence
    pub fn continuation_token(&self) -> Result<Option<&str>> {
        self.page
            .as_ref()
            .map(|page| page.buffer.continuation_token())
            .ok_or(Error::NoPage)
    }

    /// Bind `context` and fetch the first page.
    ///
    /// Without an explicit token the descriptor's resume token, if any, is
    /// sent. The context stays bound even when the fetch fails, so a later
    /// explicit resume can reuse it.
    pub async fn send_query_request(
        &mut self,
        context: TransportContext,
        continuation_token: Option<&str>,
    ) -> Result<()> {
        let context = Arc::new(context);
        self.context = Some(Arc::clone(&context));

        let token = continuation_token
            .filter(|token| !token.is_empty())
            .or_else(|| self.descriptor.resume_token())
            .map(str::to_string);

        self.fetch(context, token, FetchReason::Initial).await
    }

    /// Whether another row is available, fetching follow-up pages as needed.
    ///
    /// Empty pages that carry a fresh token are skipped. An empty page that
    /// hands back the token it was fetched with is a `MalformedResponse`,
    /// since following it would request the same page forever.
    pub async fn has_next(&mut self) -> Result<bool> {
        loop {
            match self.page_state() {
                PageState::Unfetched => return Err(Error::NoPage),
                PageState::RowsRemaining => return Ok(true),
                PageState::Terminal => return Ok(false),
                PageState::ExhaustedWithToken(token) => {
                    self.continue_from(token.clone(), FetchReason::AutoContinuation)
                        .await?;
                    if self.page_state() == PageState::ExhaustedWithToken(token) {
                        debug!("continuation fetch returned an empty page with the same token");
                        return Err(Error::malformed(
                            "empty page returned the continuation token it was fetched with",
                        ));
                    }
                }
            }
        }
    }

    /// Take the next row
    pub async fn next(&mut self) -> Result<JsonValue> {
        if !self.has_next().await? {
            return Err(Error::NoMoreElements);
        }
        self.page
            .as_mut()
            .and_then(|page| page.buffer.pop_row())
            .ok_or(Error::NoMoreElements)
    }

    /// Fetch the page at `options.continuation_token`, then behave like `has_next`
    pub async fn has_next_with(&mut self, options: &QueryOptions) -> Result<bool> {
        self.resume(options).await?;
        self.has_next().await
    }

    /// Fetch the page at `options.continuation_token`, then behave like `next`
    pub async fn next_with(&mut self, options: &QueryOptions) -> Result<JsonValue> {
        self.resume(options).await?;
        self.next().await
    }

    /// Turn the cursor into a stream of rows
    pub fn into_rows(self) -> impl Stream<Item = Result<JsonValue>> + Send {
        futures::stream::try_unfold(self, |mut cursor| async move {
            if cursor.has_next().await? {
                let row = cursor.next().await?;
                Ok::<_, Error>(Some((row, cursor)))
            } else {
                Ok(None)
            }
        })
    }

    async fn resume(&mut self, options: &QueryOptions) -> Result<()> {
        let token = options
            .token()
            .ok_or_else(|| Error::invalid_argument("continuation token cannot be null or empty"))?
            .to_string();
        self.continue_from(token, FetchReason::ExplicitResume).await
    }

    async fn continue_from(&mut self, token: String, reason: FetchReason) -> Result<()> {
        let context = self.context.clone().ok_or_else(|| {
            Error::invalid_argument("cursor has no bound transport context; send a query first")
        })?;
        self.fetch(context, Some(token), reason).await
    }

    /// One request/response exchange. Cursor state changes only on success.
    async fn fetch(
        &mut self,
        context: Arc<TransportContext>,
        continuation_token: Option<String>,
        reason: FetchReason,
    ) -> Result<()> {
        let headers = request_headers(self.descriptor.page_size(), continuation_token.as_deref());
        let body = self.descriptor.request_body(self.non_text_body)?;

        debug!(
            "{}: {} {} (continuation: {})",
            reason,
            context.method(),
            context.endpoint(),
            continuation_token.is_some()
        );

        let request = TransportRequest {
            context,
            headers,
            body: body.into(),
        };
        let response = self.transport.execute(&request).await?;

        // Custom transports may return non-success responses instead of errors.
        if !response.is_success() {
            return Err(Error::service_rejected(
                response.status,
                String::from_utf8_lossy(&response.body),
            ));
        }

        let meta = ResponseHeaders::parse(&response.headers);
        if meta.result_kind.is_unknown() {
            return Err(Error::malformed("query response type is not defined by the service"));
        }
        if meta.result_kind != self.descriptor.kind() {
            return Err(Error::malformed(format!(
                "query response of kind '{}' does not match requested kind '{}'",
                meta.result_kind,
                self.descriptor.kind()
            )));
        }

        let buffer = self.decoder.decode(&response.body, meta.continuation_token)?;

        debug!(
            "{}: {} rows, more pages: {}",
            reason,
            buffer.remaining(),
            buffer.continuation_token().is_some()
        );

        self.page = Some(FetchedPage {
            kind: meta.result_kind,
            buffer,
        });
        Ok(())
    }
}

impl fmt::Debug for QueryCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCursor")
            .field("descriptor", &self.descriptor)
            .field("non_text_body", &self.non_text_body)
            .field("context", &self.context)
            .field("state", &self.page_state())
            .finish_non_exhaustive()
    }
}
