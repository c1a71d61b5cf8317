use crate::model::{self, HttpMethod, PageRecord, SliceDescriptor, SliceRecord};
use crate::{EncodeOptions, FieldPath, Record, ValidationReason};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn construct(payload: Value) -> Result<SliceRecord, crate::SchemaValidationError> {
    model::resolve();
    SliceRecord::construct(&payload)
}

fn sample() -> Value {
    json!({
        "pages": [
            {
                "records": [{"id": 1, "name": "first"}, {"id": 2, "name": "second"}],
                "request": {
                    "url": "https://api.example.com/v1/items?page=1",
                    "http_method": "GET",
                    "headers": {"Accept": "application/json"}
                },
                "response": {"status": 200, "body": "{\"items\": []}"}
            },
            {"records": []}
        ],
        "slice_descriptor": {"start_datetime": "2023-01-01T00:00:00Z"},
        "state": {"cursor": {"updated_at": "2023-01-02"}, "page": 2}
    })
}

#[test]
fn test_construct() {
    let slice = construct(sample()).unwrap();
    assert_eq!(slice.pages().len(), 2);

    let first = &slice.pages()[0];
    assert_eq!(first.records().len(), 2);
    assert_eq!(first.records()[1]["name"], json!("second"));
    let request = first.request().unwrap();
    assert_eq!(request.method(), HttpMethod::Get);
    assert_eq!(request.url(), "https://api.example.com/v1/items?page=1");
    assert_eq!(request.parameters(), None);
    assert_eq!(first.response().unwrap().status(), 200);

    let second = &slice.pages()[1];
    assert!(second.records().is_empty());
    assert_eq!(second.request(), None);

    assert_eq!(
        slice.slice_descriptor().unwrap().start_datetime(),
        Some("2023-01-01T00:00:00Z")
    );
    assert_eq!(slice.state().unwrap()["page"], json!(2));
}

#[test]
fn test_missing_pages() {
    let err = construct(json!({})).unwrap_err();
    assert_eq!(err.path, FieldPath::root().key("pages"));
    assert_eq!(err.reason, ValidationReason::Missing);
    assert!(err.to_string().contains("pages"));
    assert!(err.to_string().contains("required"));
}

#[test]
fn test_missing_reported_before_type_errors() {
    let err = construct(json!({"state": 3})).unwrap_err();
    assert_eq!(err.path.to_string(), "pages");
    assert_eq!(err.reason, ValidationReason::Missing);
}

#[test]
fn test_optional_fields_absent() {
    let slice = construct(json!({"pages": []})).unwrap();
    assert!(slice.pages().is_empty());
    assert_eq!(slice.slice_descriptor(), None);
    assert_eq!(slice.state(), None);
}

#[test]
fn test_null_optional_fields_are_absent() {
    let slice = construct(json!({"pages": [], "slice_descriptor": null, "state": null})).unwrap();
    assert_eq!(slice.slice_descriptor(), None);
    assert_eq!(slice.state(), None);
}

#[test]
fn test_null_pages_rejected() {
    let err = construct(json!({"pages": null})).unwrap_err();
    assert_eq!(err.path.to_string(), "pages");
    assert_eq!(
        err.reason,
        ValidationReason::InvalidType {
            expected: "array of PageRecord object".into(),
            found: "null"
        }
    );
}

#[test]
fn test_empty_descriptor_is_present() {
    let slice = construct(json!({"pages": [], "slice_descriptor": {}})).unwrap();
    let descriptor = slice.slice_descriptor().unwrap();
    assert!(descriptor.is_empty());
    assert_eq!(
        slice.to_json().get("slice_descriptor"),
        Some(&json!({}))
    );
}

#[test]
fn test_alias_mapping() {
    let slice = construct(json!({
        "pages": [],
        "slice_descriptor": {"list_item": "customers"}
    }))
    .unwrap();
    let encoded = slice.to_json();
    assert_eq!(
        encoded.get("slice_descriptor"),
        Some(&json!({"list_item": "customers"}))
    );
    assert!(!encoded.contains_key("sliceDescriptor"));
    assert!(!encoded.contains_key("state"));
    assert_eq!(encoded.get("pages"), Some(&json!([])));
}

#[test]
fn test_unknown_keys_ignored() {
    let slice = construct(json!({"pages": [], "unexpected_key": 123})).unwrap();
    assert_eq!(slice, SliceRecord::new(vec![], None, None));
    assert!(!slice.to_json().contains_key("unexpected_key"));
}

#[test]
fn test_round_trip() {
    let slice = construct(sample()).unwrap();
    let encoded = Value::Object(slice.to_json());
    assert_eq!(encoded, sample());
    assert_eq!(construct(encoded).unwrap(), slice);
}

#[test]
fn test_round_trip_built_record() {
    model::resolve();
    let slice = SliceRecord::new(
        vec![PageRecord::new(vec![serde_json::Map::new()], None, None)],
        Some(SliceDescriptor::new(None, Some("orders".into()))),
        None,
    );
    let encoded = Value::Object(slice.to_json());
    assert_eq!(
        encoded,
        json!({"pages": [{"records": [{}]}], "slice_descriptor": {"list_item": "orders"}})
    );
    assert_eq!(SliceRecord::construct(&encoded).unwrap(), slice);
}

#[test]
fn test_explicit_nulls() {
    let slice = construct(json!({"pages": [{"records": []}]})).unwrap();
    let encoded = Value::Object(slice.to_json_with(&EncodeOptions::explicit_nulls()));
    assert_eq!(
        encoded,
        json!({
            "pages": [{"records": [], "request": null, "response": null}],
            "slice_descriptor": null,
            "state": null
        })
    );
    assert_eq!(construct(encoded).unwrap(), slice);
}

#[test]
fn test_explicit_nulls_in_nested_records() {
    let slice = construct(json!({"pages": [], "slice_descriptor": {"list_item": "x"}})).unwrap();
    let encoded = slice.to_json_with(&EncodeOptions::explicit_nulls());
    assert_eq!(
        encoded.get("slice_descriptor"),
        Some(&json!({"start_datetime": null, "list_item": "x"}))
    );
}

#[test]
fn test_payload_must_be_object() {
    let err = construct(json!([])).unwrap_err();
    assert!(err.path.is_root());
    assert_eq!(
        err.reason,
        ValidationReason::InvalidType {
            expected: "object".into(),
            found: "array"
        }
    );
}

#[test]
fn test_state_must_be_object() {
    let err = construct(json!({"pages": [], "state": ["a"]})).unwrap_err();
    assert_eq!(err.path.to_string(), "state");
    assert_eq!(
        err.reason,
        ValidationReason::InvalidType {
            expected: "object".into(),
            found: "array"
        }
    );
}

#[test]
fn test_nested_failures() {
    let err = construct(json!({"pages": [{"records": []}, {"records": [{}, 7]}]})).unwrap_err();
    assert_eq!(err.path.to_string(), "pages[1].records[1]");
    assert_eq!(
        err.reason,
        ValidationReason::InvalidType {
            expected: "object".into(),
            found: "number"
        }
    );

    let err = construct(json!({"pages": [{}]})).unwrap_err();
    assert_eq!(err.path.to_string(), "pages[0].records");
    assert_eq!(err.reason, ValidationReason::Missing);

    let err = construct(json!({
        "pages": [{"records": [], "request": {"url": "https://x", "http_method": "PATCH"}}]
    }))
    .unwrap_err();
    assert_eq!(err.path.to_string(), "pages[0].request.http_method");
    assert_eq!(
        err.reason,
        ValidationReason::NotAllowed {
            value: "PATCH".into(),
            allowed: HttpMethod::VARIANTS,
        }
    );

    let err = construct(json!({"pages": [], "slice_descriptor": {"start_datetime": 5}}))
        .unwrap_err();
    assert_eq!(err.path.to_string(), "slice_descriptor.start_datetime");
}

#[test]
fn test_decode_failure_keeps_path() {
    let err = construct(json!({
        "pages": [{"records": [], "response": {"status": 70000}}]
    }))
    .unwrap_err();
    assert_eq!(err.path.to_string(), "pages[0].response.status");
    assert!(matches!(err.reason, ValidationReason::Decode(_)));
}

#[test]
fn test_validate_collects_all() {
    let schemas = model::resolve();
    let errors = schemas.validate(
        SliceRecord::NAME,
        &json!({"pages": [{"records": 1}, {}], "state": "s"}),
    );
    let paths = errors
        .iter()
        .map(|e| e.path.to_string())
        .collect::<Vec<_>>();
    assert_eq!(paths, vec!["pages[0].records", "pages[1].records", "state"]);
}
