//! End-to-end inference tests over realistic pasted payloads
//!
//! Exercises the full flow: JSON text → table list → serialized output as a
//! rendering layer would consume it.

use pretty_assertions::assert_eq;
use relmap::{parse_json_text, Field, Table, TableInferrer, ValueKind};
use serde_json::json;
use test_case::test_case;

#[test]
fn api_response_payload_decomposes_into_linked_tables() {
    let payload = r#"
    {
        "orderId": 1001,
        "placedAt": "2024-03-01T09:15:00Z",
        "total": 99.5,
        "paid": true,
        "customer": {
            "name": "Ada Lovelace",
            "vip": false
        },
        "items": [
            { "sku": "A-1", "qty": 2, "labels": ["new"] },
            { "sku": "B-7", "qty": 1, "discount": 0.1 }
        ],
        "attachments": []
    }"#;

    let tables = parse_json_text(payload);

    assert_eq!(tables.len(), 3);

    let root = &tables[0];
    assert_eq!(root.table_name, "root");
    assert!(root.is_root());
    assert_eq!(
        root.fields,
        vec![
            Field::scalar("orderId", ValueKind::Integer),
            Field::scalar("placedAt", ValueKind::Date),
            Field::scalar("total", ValueKind::Decimal),
            Field::scalar("paid", ValueKind::Boolean),
        ]
    );

    let customer = &tables[1];
    assert_eq!(customer.table_name, "customer");
    assert_eq!(customer.parent_id, root.id);

    let items = &tables[2];
    assert_eq!(items.table_name, "items");
    assert_eq!(items.parent_id, root.id);
    // merged across both elements, first-occurrence order
    assert_eq!(
        items.fields,
        vec![
            Field::scalar("sku", ValueKind::String),
            Field::scalar("qty", ValueKind::Integer),
            Field::array("labels", ValueKind::String),
            Field::scalar("discount", ValueKind::Decimal),
        ]
    );
}

#[test]
fn output_serializes_with_camel_case_keys() {
    let tables = parse_json_text(r#"{"id": 1}"#);
    let rendered = serde_json::to_value(&tables).unwrap();

    assert_eq!(
        rendered,
        json!([{
            "id": 1,
            "tableName": "root",
            "parentId": 0,
            "width": 120,
            "fieldTypeX": 70,
            "fields": [ { "fieldName": "id", "fieldType": "integer" } ]
        }])
    );
}

#[test]
fn deep_nesting_keeps_parent_before_child() {
    let tables = parse_json_text(
        r#"{
            "level": 0,
            "child": { "level": 1, "child": { "level": 2, "rows": [ { "n": 1 } ] } }
        }"#,
    );

    assert_eq!(tables.len(), 4);
    for window in tables.windows(2) {
        assert!(window[0].id < window[1].id);
    }
    for table in &tables[1..] {
        assert!(tables.iter().any(|t| t.id == table.parent_id && t.id < table.id));
    }
}

#[test]
fn concurrent_runs_do_not_interfere() {
    // each call owns its id counter; ids always restart at 1
    let payload = json!({ "a": { "x": 1 }, "b": { "y": 2 }, "c": 3 });

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let payload = payload.clone();
            std::thread::spawn(move || relmap::parse_json_to_tables(&payload))
        })
        .collect();

    for handle in handles {
        let tables = handle.join().unwrap();
        assert_eq!(tables.len(), 3);
        assert_eq!(tables[0].id, 1);
    }
}

#[test_case(json!("plain text"), ValueKind::String; "string scalar")]
#[test_case(json!("2024-12-31"), ValueKind::Date; "date string")]
#[test_case(json!(17), ValueKind::Integer; "integer")]
#[test_case(json!(17.5), ValueKind::Decimal; "decimal")]
#[test_case(json!(false), ValueKind::Boolean; "boolean")]
#[test_case(json!(null), ValueKind::Null; "null")]
fn scalar_payloads_classify(value: serde_json::Value, kind: ValueKind) {
    let tables = relmap::parse_json_to_tables(&value);

    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].fields, vec![Field::scalar("root", kind)]);
}

#[test]
fn renderer_width_hints_cover_widest_field() {
    let tables = parse_json_text(r#"{"customer_reference": "x", "id": 1}"#);

    let root: &Table = &tables[0];
    // widest row is customer_reference + string = 24 chars
    assert_eq!(root.width, 24 * 10 + 30);
    // type column aligned for the longest type label (integer, 7 chars)
    assert_eq!(root.field_type_x, root.width + 20 - 70);
}

#[test]
fn custom_root_name_flows_through_text_entry() {
    let inferrer = TableInferrer::new().with_root_name("payload");

    let tables = inferrer.infer_text("not json at all {{");
    assert_eq!(tables[0].table_name, "payload");
    assert_eq!(tables[0].fields, vec![Field::scalar("payload", ValueKind::String)]);
}
