use serde::Deserialize;
use serde_json::json;
use shared::protocol::{BusinessUnderstanding, UseCase};

use super::*;

#[derive(Debug, Deserialize, PartialEq)]
struct Item {
    id: i64,
}

#[test]
fn raw_payload_passes_through() {
    let item: Item = decode(json!({ "id": 4 })).expect("decode");
    assert_eq!(item, Item { id: 4 });
}

#[test]
fn envelope_is_unwrapped() {
    let item: Item = decode(json!({ "success": true, "data": { "id": 9 } })).expect("decode");
    assert_eq!(item, Item { id: 9 });
}

#[test]
fn failed_envelope_becomes_error_with_its_message() {
    let err = decode::<Item>(json!({ "success": false, "error": "quota exceeded" }))
        .expect_err("envelope failure");
    assert_eq!(err.display_message(), "quota exceeded");
}

#[test]
fn object_with_non_bool_success_is_not_an_envelope() {
    let value = unwrap_envelope(json!({ "success": "yes", "id": 1 })).expect("value");
    assert_eq!(value["id"], 1);
}

#[test]
fn lists_accept_bare_arrays_wrappers_and_null() {
    let bare: Vec<Item> = decode_list(json!([{ "id": 1 }, { "id": 2 }])).expect("bare");
    assert_eq!(bare.len(), 2);

    let wrapped: Vec<Item> =
        decode_list(json!({ "success": true, "data": { "items": [{ "id": 3 }] } }))
            .expect("wrapped");
    assert_eq!(wrapped, vec![Item { id: 3 }]);

    let empty: Vec<Item> = decode_list(Value::Null).expect("null");
    assert!(empty.is_empty());
}

#[test]
fn error_message_prefers_detail_then_message_then_error() {
    assert_eq!(
        extract_error_message(&json!({ "detail": "Not found", "message": "x" }), "fallback"),
        "Not found"
    );
    assert_eq!(
        extract_error_message(&json!({ "message": "Bad input" }), "fallback"),
        "Bad input"
    );
    assert_eq!(
        extract_error_message(&json!({ "error": { "message": "nested" } }), "fallback"),
        "nested"
    );
    assert_eq!(extract_error_message(&json!({ "other": 1 }), "fallback"), "fallback");
    assert_eq!(extract_error_message(&json!(42), "fallback"), "fallback");
}

#[test]
fn validation_items_are_flattened() {
    let body = json!({
        "detail": [
            { "loc": ["body", "name"], "msg": "field required" },
            { "loc": ["body", "budget"], "msg": "value is not a valid float" }
        ]
    });
    assert_eq!(
        extract_error_message(&body, "fallback"),
        "name: field required; budget: value is not a valid float"
    );
}

#[test]
fn embedded_use_case_decodes_from_string_or_object() {
    let from_string: EmbeddedJson<UseCase> =
        decode_embedded(&json!("{\"title\":\"Churn model\",\"initiative_id\":3}"));
    assert_eq!(
        from_string.into_option().map(|u| u.title),
        Some("Churn model".to_string())
    );

    let from_object: EmbeddedJson<UseCase> = decode_embedded(&json!({ "name": "Routing" }));
    assert!(matches!(from_object, EmbeddedJson::Present(ref u) if u.title == "Routing"));
}

#[test]
fn malformed_embedded_use_case_is_none_not_a_failure() {
    let parsed: EmbeddedJson<UseCase> = decode_embedded(&json!("{not json"));
    assert!(parsed.is_malformed());
    assert_eq!(parsed.into_option(), None);

    let record: BusinessUnderstanding = decode(json!({
        "id": 1,
        "initiative_id": 2,
        "selected_use_case": "{\"title\": broken"
    }))
    .expect("record still decodes");
    assert!(record.selected_use_case.is_malformed());
    assert!(record.selected_use_case.as_ref().is_none());
}
