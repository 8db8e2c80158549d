//! Shared schemas and record builders for field mask tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use proptest::prelude::*;
use recfield_model::{ElementKind, FieldDescriptor, Record, ScalarType, Schema, Value};

/// `library.Book`: a flat record of scalars.
pub fn book_schema() -> Arc<Schema> {
    Schema::builder("library.Book")
        .field(FieldDescriptor::scalar("name", ScalarType::String))
        .field(FieldDescriptor::scalar("author", ScalarType::String))
        .field(FieldDescriptor::scalar("title", ScalarType::String))
        .field(FieldDescriptor::scalar("read", ScalarType::Bool))
        .build()
        .unwrap()
}

/// `library.CreateBookRequest`: a parent string plus a nested book.
pub fn create_book_request_schema() -> Arc<Schema> {
    Schema::builder("library.CreateBookRequest")
        .field(FieldDescriptor::scalar("parent", ScalarType::String))
        .field(FieldDescriptor::record("book", &book_schema()))
        .build()
        .unwrap()
}

/// `syntax.v1.Nested`: the value type of nested records, lists and maps.
pub fn nested_schema() -> Arc<Schema> {
    Schema::builder("syntax.v1.Nested")
        .field(FieldDescriptor::scalar("string", ScalarType::String))
        .field(FieldDescriptor::scalar("int", ScalarType::Int))
        .build()
        .unwrap()
}

/// `syntax.v1.LegacyGroup`: addressed by type name in older masks.
pub fn legacy_group_schema() -> Arc<Schema> {
    Schema::builder("syntax.v1.LegacyGroup")
        .field(FieldDescriptor::scalar("value", ScalarType::String))
        .build()
        .unwrap()
}

/// `syntax.v1.Message`: one field of every shape.
pub fn message_schema() -> Arc<Schema> {
    let nested = nested_schema();
    Schema::builder("syntax.v1.Message")
        .field(FieldDescriptor::scalar("string", ScalarType::String))
        .field(FieldDescriptor::scalar("int", ScalarType::Int))
        .field(FieldDescriptor::record("message", &nested))
        .field(FieldDescriptor::list("repeated_string", ElementKind::Scalar(ScalarType::String)))
        .field(FieldDescriptor::list("repeated_message", ElementKind::Record(nested.clone())))
        .field(FieldDescriptor::map("map_string_string", ElementKind::Scalar(ScalarType::String)))
        .field(FieldDescriptor::map("map_string_message", ElementKind::Record(nested)))
        .field(FieldDescriptor::record("legacy_group", &legacy_group_schema()))
        .build()
        .unwrap()
}

pub fn message() -> Record {
    Record::new(message_schema())
}

pub fn nested(string: &str, int: i64) -> Record {
    Record::new(nested_schema())
        .with("string", string)
        .unwrap()
        .with("int", int)
        .unwrap()
}

pub fn string_map(entries: &[(&str, &str)]) -> Value {
    Value::Map(
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect(),
    )
}

pub fn message_map(entries: Vec<(&str, Record)>) -> Value {
    Value::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::Record(v)))
            .collect(),
    )
}

// ── Strategies ───────────────────────────────────────────────────

fn key_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c.d", "e"]).prop_map(String::from)
}

pub fn nested_strategy() -> impl Strategy<Value = Record> {
    (
        prop::option::of("[a-z]{0,4}"),
        prop::option::of(-5i64..5),
    )
        .prop_map(|(string, int)| {
            let mut r = Record::new(nested_schema());
            if let Some(s) = string {
                r.set("string", s).unwrap();
            }
            if let Some(i) = int {
                r.set("int", i).unwrap();
            }
            r
        })
}

pub fn message_strategy() -> impl Strategy<Value = Record> {
    (
        prop::option::of("[a-z]{0,4}"),
        prop::option::of(nested_strategy()),
        prop::collection::vec("[a-z]{1,3}", 0..3),
        prop::collection::vec(nested_strategy(), 0..3),
        prop::collection::btree_map(key_strategy(), "[a-z]{0,3}", 0..3),
        prop::collection::btree_map(key_strategy(), nested_strategy(), 0..3),
    )
        .prop_map(|(string, nested, strings, messages, string_map, message_map)| {
            let mut r = message();
            if let Some(s) = string {
                r.set("string", s).unwrap();
            }
            if let Some(n) = nested {
                r.set("message", n).unwrap();
            }
            r.set(
                "repeated_string",
                Value::List(strings.into_iter().map(Value::from).collect()),
            )
            .unwrap();
            r.set(
                "repeated_message",
                Value::List(messages.into_iter().map(Value::Record).collect()),
            )
            .unwrap();
            r.set(
                "map_string_string",
                Value::Map(string_map.into_iter().map(|(k, v)| (k, Value::from(v))).collect()),
            )
            .unwrap();
            let message_map: BTreeMap<String, Value> = message_map
                .into_iter()
                .map(|(k, v)| (k, Value::Record(v)))
                .collect();
            r.set("map_string_message", Value::Map(message_map)).unwrap();
            r
        })
}

/// Paths of every shape, valid and invalid alike.
pub fn path_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "string",
        "int",
        "message",
        "message.string",
        "message.int",
        "repeated_string",
        "repeated_message",
        "repeated_message.string",
        "map_string_string",
        "map_string_string.a",
        "map_string_string.`c.d`",
        "map_string_message",
        "map_string_message.b",
        "map_string_message.a.string",
        "map_string_message.`c.d`.int",
        "legacy_group.value",
        "unknown",
        "string.nope",
    ])
    .prop_map(String::from)
}
