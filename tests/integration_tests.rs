//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: descriptor → HTTP requests → paged rows

use futures::TryStreamExt;
use query_cursor::cursor::{CONTINUATION_TOKEN_HEADER, ITEM_TYPE_HEADER, PAGE_SIZE_HEADER};
use query_cursor::transport::{HttpTransport, TransportConfig};
use query_cursor::{
    load_config_from_str, Credential, Error, Method, QueryCursor, QueryDescriptor, QueryOptions,
    ResultKind, TransportContext,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn context(server: &MockServer) -> TransportContext {
    TransportContext::builder()
        .credential(Credential::shared_access_signature("SharedAccessSignature sr=hub"))
        .endpoint(format!("{}/devices/query", server.uri()))
        .method(Method::POST)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

fn page(kind: &str, token: Option<&str>, rows: serde_json::Value) -> ResponseTemplate {
    let mut template = ResponseTemplate::new(200)
        .insert_header(ITEM_TYPE_HEADER, kind)
        .set_body_json(rows);
    if let Some(token) = token {
        template = template.insert_header(CONTINUATION_TOKEN_HEADER, token);
    }
    template
}

fn transport() -> Arc<HttpTransport> {
    Arc::new(HttpTransport::new().unwrap())
}

// ============================================================================
// Pagination Tests
// ============================================================================

#[tokio::test]
async fn test_twin_query_follows_continuation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/devices/query"))
        .and(header(CONTINUATION_TOKEN_HEADER, "tok1"))
        .and(header(PAGE_SIZE_HEADER, "100"))
        .and(body_json(json!({"query": "select * from devices"})))
        .respond_with(page("twin", None, json!([{"id": "b"}])))
        .with_priority(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/devices/query"))
        .and(header("authorization", "SharedAccessSignature sr=hub"))
        .and(header(PAGE_SIZE_HEADER, "100"))
        .and(body_json(json!({"query": "select * from devices"})))
        .respond_with(page("twin", Some("tok1"), json!([{"id": "a"}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let descriptor =
        QueryDescriptor::from_text("select * from devices", 100, ResultKind::Twin).unwrap();
    let mut cursor = QueryCursor::new(descriptor, transport());
    cursor
        .send_query_request(context(&mock_server), None)
        .await
        .unwrap();

    assert!(cursor.has_next().await.unwrap());
    assert_eq!(cursor.next().await.unwrap(), json!({"id": "a"}));
    assert_eq!(cursor.continuation_token().unwrap(), Some("tok1"));

    assert!(cursor.has_next().await.unwrap());
    assert_eq!(cursor.next().await.unwrap(), json!({"id": "b"}));

    assert!(!cursor.has_next().await.unwrap());
    assert!(matches!(cursor.next().await, Err(Error::NoMoreElements)));
}

#[tokio::test]
async fn test_rows_stream_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header(CONTINUATION_TOKEN_HEADER, "p2"))
        .respond_with(page("jobResponse", None, json!([{"jobId": "j3"}])))
        .with_priority(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .respond_with(page(
            "jobResponse",
            Some("p2"),
            json!([{"jobId": "j1"}, {"jobId": "j2"}]),
        ))
        .mount(&mock_server)
        .await;

    let descriptor = QueryDescriptor::from_text(
        "SELECT * FROM devices.jobs",
        2,
        ResultKind::JobResponse,
    )
    .unwrap();
    let mut cursor = QueryCursor::new(descriptor, transport());
    cursor
        .send_query_request(context(&mock_server), None)
        .await
        .unwrap();

    let rows: Vec<_> = cursor.into_rows().try_collect().await.unwrap();
    assert_eq!(
        rows,
        vec![json!({"jobId": "j1"}), json!({"jobId": "j2"}), json!({"jobId": "j3"})]
    );
}

#[tokio::test]
async fn test_resume_from_persisted_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/devices/query"))
        .and(header(CONTINUATION_TOKEN_HEADER, "persisted"))
        .respond_with(page("twin", None, json!([{"id": "z"}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = QueryOptions::new().with_continuation_token("persisted");
    let descriptor = QueryDescriptor::resume(&options, ResultKind::Twin).unwrap();
    let mut cursor = QueryCursor::new(descriptor, transport());
    cursor
        .send_query_request(context(&mock_server), None)
        .await
        .unwrap();

    assert_eq!(cursor.next().await.unwrap(), json!({"id": "z"}));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key(PAGE_SIZE_HEADER));
    assert!(requests[0].body.is_empty());
}

// ============================================================================
// Failure Tests
// ============================================================================

#[tokio::test]
async fn test_kind_mismatch_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(page("deviceJob", None, json!([{"jobId": "j1"}])))
        .mount(&mock_server)
        .await;

    let descriptor =
        QueryDescriptor::from_text("select * from devices", 10, ResultKind::Twin).unwrap();
    let mut cursor = QueryCursor::new(descriptor, transport());
    let err = cursor
        .send_query_request(context(&mock_server), None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MalformedResponse { .. }));
    assert!(matches!(cursor.continuation_token(), Err(Error::NoPage)));
}

#[tokio::test]
async fn test_throttled_request_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("throttled"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let descriptor =
        QueryDescriptor::from_text("select * from devices", 10, ResultKind::Twin).unwrap();
    let mut cursor = QueryCursor::new(descriptor, transport());
    let err = cursor
        .send_query_request(context(&mock_server), None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ServiceRejected { status: 429, .. }));
}

// ============================================================================
// Config-Driven Tests
// ============================================================================

#[tokio::test]
async fn test_config_driven_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/devices/query"))
        .and(header("x-api-key", "secret"))
        .and(header("x-trace", "on"))
        .and(header(PAGE_SIZE_HEADER, "5"))
        .and(body_json(json!({"query": "select * from devices"})))
        .respond_with(page("raw", None, json!([{"count": 3}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let yaml = format!(
        r"
endpoint: {}/devices/query
credential:
  type: api_key
  header: x-api-key
  value: secret
kind: raw
page_size: 5
non_text_body: select_all_devices
http:
  headers:
    x-trace: 'on'
",
        mock_server.uri()
    );
    let config = load_config_from_str(&yaml).unwrap();

    let transport = Arc::new(HttpTransport::with_config(config.transport_config()).unwrap());
    let mut cursor = QueryCursor::new(config.descriptor().unwrap(), transport)
        .with_non_text_body(config.non_text_body);
    cursor
        .send_query_request(config.transport_context().unwrap(), None)
        .await
        .unwrap();

    assert_eq!(cursor.next().await.unwrap(), json!({"count": 3}));
    assert!(!cursor.has_next().await.unwrap());
}

#[tokio::test]
async fn test_config_resume_without_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/devices/query"))
        .and(header(CONTINUATION_TOKEN_HEADER, "saved"))
        .respond_with(page("twin", None, json!([{"id": "r"}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let yaml = format!(
        r"
endpoint: {}/devices/query
credential:
  type: shared_access_signature
  token: SharedAccessSignature sr=hub
kind: twin
continuation_token: saved
",
        mock_server.uri()
    );
    let config = load_config_from_str(&yaml).unwrap();

    let mut cursor = QueryCursor::new(config.descriptor().unwrap(), transport());
    cursor
        .send_query_request(config.transport_context().unwrap(), config.initial_token())
        .await
        .unwrap();

    assert_eq!(cursor.next().await.unwrap(), json!({"id": "r"}));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key(PAGE_SIZE_HEADER));
    assert!(requests[0].body.is_empty());
}

#[test]
fn test_transport_config_user_agent() {
    let config = TransportConfig::builder().user_agent("it/1.0").build();
    assert!(HttpTransport::with_config(config).is_ok());
}
