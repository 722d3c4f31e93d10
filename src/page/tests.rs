//! Tests for page module

use super::*;
use crate::error::Error;
use serde_json::json;

#[test]
fn test_json_page_pops_in_order() {
    let mut page = JsonPage::new(vec![json!({"id": "a"}), json!({"id": "b"})], None);

    assert!(page.has_unread_row());
    assert_eq!(page.remaining(), 2);
    assert_eq!(page.pop_row(), Some(json!({"id": "a"})));
    assert_eq!(page.pop_row(), Some(json!({"id": "b"})));
    assert!(!page.has_unread_row());
    assert_eq!(page.pop_row(), None);
}

#[test]
fn test_decoder_keeps_continuation_token() {
    let page = JsonPageDecoder::new()
        .decode(br#"[{"id":"a"}]"#, Some("tok1".to_string()))
        .unwrap();

    assert_eq!(page.continuation_token(), Some("tok1"));
    assert_eq!(page.remaining(), 1);
}

#[test]
fn test_decoder_empty_body_is_empty_page() {
    let page = JsonPageDecoder::new().decode(b"", None).unwrap();
    assert!(!page.has_unread_row());

    let page = JsonPageDecoder::new().decode(b"  \n", None).unwrap();
    assert!(!page.has_unread_row());

    let page = JsonPageDecoder::new().decode(b"[]", None).unwrap();
    assert!(!page.has_unread_row());
}

#[test]
fn test_decoder_rejects_non_array() {
    let Err(err) = JsonPageDecoder::new().decode(br#"{"id":"a"}"#, None) else {
        panic!("Expected object body to be rejected");
    };
    assert!(matches!(err, Error::Decode { .. }));
    assert!(err.to_string().contains("an object"));

    let Err(err) = JsonPageDecoder::new().decode(b"[{", None) else {
        panic!("Expected truncated body to be rejected");
    };
    assert!(matches!(err, Error::Decode { .. }));
}
