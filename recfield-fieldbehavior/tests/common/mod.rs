//! Shared freight schemas and record builders for field behavior tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use proptest::prelude::*;
use recfield_model::{Behavior, ElementKind, FieldDescriptor, Record, Scalar, ScalarType, Schema, Value};

pub fn timestamp_schema() -> Arc<Schema> {
    Schema::builder("google.protobuf.Timestamp")
        .field(FieldDescriptor::scalar("seconds", ScalarType::Int))
        .field(FieldDescriptor::scalar("nanos", ScalarType::Int))
        .build()
        .unwrap()
}

/// `LineItem`: `external_reference_id` is IMMUTABLE, `title` is free.
pub fn line_item_schema() -> Arc<Schema> {
    Schema::builder("example.freight.v1.LineItem")
        .field(FieldDescriptor::scalar("title", ScalarType::String))
        .field(FieldDescriptor::scalar("quantity", ScalarType::Float))
        .field(
            FieldDescriptor::scalar("external_reference_id", ScalarType::String)
                .with_behavior(Behavior::Immutable),
        )
        .build()
        .unwrap()
}

/// `Site`: a singular nested record with an immutable id and an output only
/// etag.
pub fn site_schema() -> Arc<Schema> {
    Schema::builder("example.freight.v1.Site")
        .field(FieldDescriptor::scalar("display_name", ScalarType::String))
        .field(FieldDescriptor::scalar("site_id", ScalarType::String).with_behavior(Behavior::Immutable))
        .field(FieldDescriptor::scalar("etag", ScalarType::String).with_behavior(Behavior::OutputOnly))
        .build()
        .unwrap()
}

pub fn shipment_schema() -> Arc<Schema> {
    let line_item = ElementKind::Record(line_item_schema());
    let string = ElementKind::Scalar(ScalarType::String);
    Schema::builder("example.freight.v1.Shipment")
        .field(FieldDescriptor::scalar("name", ScalarType::String))
        .field(FieldDescriptor::scalar("annotation", ScalarType::String).with_behavior(Behavior::Optional))
        .field(
            FieldDescriptor::scalar("external_reference_id", ScalarType::String)
                .with_behavior(Behavior::Immutable),
        )
        .field(FieldDescriptor::record("create_time", &timestamp_schema()).with_behavior(Behavior::OutputOnly))
        .field(FieldDescriptor::scalar("update_count", ScalarType::Uint).with_behavior(Behavior::OutputOnly))
        .field(FieldDescriptor::scalar("weight", ScalarType::Float).with_behavior(Behavior::Immutable))
        .field(
            FieldDescriptor::list("immutable_readings", ElementKind::Scalar(ScalarType::Float))
                .with_behavior(Behavior::Immutable),
        )
        .field(FieldDescriptor::record("origin_site", &site_schema()))
        .field(FieldDescriptor::list("line_items", line_item.clone()))
        .field(FieldDescriptor::list("immutable_line_item_list", line_item.clone()).with_behavior(Behavior::Immutable))
        .field(FieldDescriptor::list("immutable_tags", string.clone()).with_behavior(Behavior::Immutable))
        .field(FieldDescriptor::map("line_items_map", line_item.clone()))
        .field(FieldDescriptor::map("immutable_line_items_map", line_item).with_behavior(Behavior::Immutable))
        .field(FieldDescriptor::map("immutable_primitives_map", string.clone()).with_behavior(Behavior::Immutable))
        .field(FieldDescriptor::map("labels", string.clone()).with_behavior(Behavior::Immutable))
        .field(FieldDescriptor::map("annotations", string))
        .build()
        .unwrap()
}

/// `UpdateShipmentRequest`: wraps shipments singly, in a list and in a map.
pub fn update_shipment_request_schema() -> Arc<Schema> {
    let shipment = shipment_schema();
    Schema::builder("example.freight.v1.UpdateShipmentRequest")
        .field(FieldDescriptor::record("shipment", &shipment))
        .field(FieldDescriptor::list("shipments", ElementKind::Record(shipment.clone())))
        .field(FieldDescriptor::map("shipments_by_id", ElementKind::Record(shipment)))
        .field(FieldDescriptor::list("line_items", ElementKind::Record(line_item_schema())))
        .build()
        .unwrap()
}

pub fn shipment() -> Record {
    Record::new(shipment_schema())
}

pub fn request() -> Record {
    Record::new(update_shipment_request_schema())
}

pub fn timestamp(seconds: i64) -> Record {
    Record::new(timestamp_schema()).with("seconds", seconds).unwrap()
}

pub fn line_item(title: &str, external_reference_id: &str) -> Record {
    let mut item = Record::new(line_item_schema());
    if !title.is_empty() {
        item.set("title", title).unwrap();
    }
    if !external_reference_id.is_empty() {
        item.set("external_reference_id", external_reference_id).unwrap();
    }
    item
}

pub fn site(display_name: &str, site_id: &str, etag: &str) -> Record {
    Record::new(site_schema())
        .with("display_name", display_name)
        .unwrap()
        .with("site_id", site_id)
        .unwrap()
        .with("etag", etag)
        .unwrap()
}

pub fn float(x: f64) -> Value {
    Value::Scalar(Scalar::Float(x))
}

pub fn readings(values: &[f64]) -> Value {
    Value::List(values.iter().copied().map(float).collect())
}

pub fn items(items: Vec<Record>) -> Value {
    Value::List(items.into_iter().map(Value::Record).collect())
}

pub fn item_map(entries: Vec<(&str, Record)>) -> Value {
    Value::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::Record(v)))
            .collect(),
    )
}

pub fn string_map(entries: &[(&str, &str)]) -> Value {
    Value::Map(
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect(),
    )
}

// ── Strategies ───────────────────────────────────────────────────

fn word() -> impl Strategy<Value = String> {
    "[a-z]{0,3}"
}

fn line_item_strategy() -> impl Strategy<Value = Record> {
    (word(), word()).prop_map(|(title, id)| line_item(&title, &id))
}

pub fn shipment_strategy() -> impl Strategy<Value = Record> {
    (
        prop::option::of(word()),
        prop::option::of(word()),
        prop::option::of(0i64..1000),
        prop::option::of((word(), word(), word())),
        prop::collection::vec(line_item_strategy(), 0..3),
        prop::collection::btree_map(word(), line_item_strategy(), 0..3),
        prop::collection::btree_map(word(), word(), 0..3),
        prop::option::of(prop_oneof![Just(f64::NAN), -10.0f64..10.0]),
    )
        .prop_map(|(name, ext_id, created, origin, line_items, by_key, labels, weight)| {
            let mut s = shipment();
            if let Some(name) = name {
                s.set("name", name).unwrap();
            }
            if let Some(id) = ext_id {
                s.set("external_reference_id", id).unwrap();
            }
            if let Some(seconds) = created {
                s.set("create_time", timestamp(seconds)).unwrap();
            }
            if let Some((display_name, site_id, etag)) = origin {
                s.set("origin_site", site(&display_name, &site_id, &etag)).unwrap();
            }
            s.set("immutable_line_item_list", items(line_items.clone())).unwrap();
            s.set("line_items", items(line_items)).unwrap();
            let by_key: BTreeMap<String, Value> =
                by_key.into_iter().map(|(k, v)| (k, Value::Record(v))).collect();
            s.set("line_items_map", Value::Map(by_key.clone())).unwrap();
            s.set("immutable_line_items_map", Value::Map(by_key)).unwrap();
            s.set(
                "labels",
                Value::Map(labels.into_iter().map(|(k, v)| (k, Value::from(v))).collect()),
            )
            .unwrap();
            if let Some(weight) = weight {
                s.set("weight", float(weight)).unwrap();
                s.set("immutable_readings", readings(&[weight, 1.5])).unwrap();
            }
            s
        })
}

pub fn request_strategy() -> impl Strategy<Value = Record> {
    (
        prop::option::of(shipment_strategy()),
        prop::collection::btree_map(word(), shipment_strategy(), 0..2),
        prop::collection::vec(shipment_strategy(), 0..2),
    )
        .prop_map(|(single, by_id, list)| {
            let mut r = request();
            if let Some(s) = single {
                r.set("shipment", s).unwrap();
            }
            r.set(
                "shipments_by_id",
                Value::Map(by_id.into_iter().map(|(k, v)| (k, Value::Record(v))).collect()),
            )
            .unwrap();
            r.set("shipments", Value::List(list.into_iter().map(Value::Record).collect()))
                .unwrap();
            r
        })
}

/// Mask paths over `Shipment`, including nested and map entry paths.
pub fn shipment_path_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "*",
        "name",
        "external_reference_id",
        "weight",
        "immutable_readings",
        "origin_site",
        "origin_site.site_id",
        "line_items",
        "immutable_line_item_list",
        "line_items_map",
        "immutable_line_items_map",
        "labels",
    ])
    .prop_map(String::from)
}
