//! Projection of typed records back into the flattened property tree that is
//! persisted as resource state.
//!
//! Each record type lists its fields once, as `FieldDescriptor`s, and a single
//! `flatten` routine walks those lists recursively. Output maps are
//! `serde_json::Map`s, whose key order is fixed, so projecting the same record
//! twice always yields the same tree.
use log::debug;
use serde_json::{Map, Value};

use crate::errors::Error;
use crate::model::ClusterRecord;
use crate::state::ResourceData;

pub type Tree = Map<String, Value>;

/// Implemented by every record type that can be projected
pub trait Describe {
    fn describe(&self) -> Vec<FieldDescriptor<'_>>;
}

pub enum FieldValue<'a> {
    Scalar(Value),
    Sequence(Vec<Value>),
    Record(&'a dyn Describe),
    Records(Vec<&'a dyn Describe>),
}

pub struct FieldDescriptor<'a> {
    /// Key in the persisted tree; `None` means the field has no place there
    pub key: Option<&'static str>,
    pub ignore: bool,
    pub value: FieldValue<'a>,
}

impl<'a> FieldDescriptor<'a> {
    fn new(key: &'static str, value: FieldValue<'a>) -> Self {
        FieldDescriptor {
            key: Some(key),
            ignore: false,
            value,
        }
    }

    pub fn scalar(key: &'static str, value: impl Into<Value>) -> Self {
        Self::new(key, FieldValue::Scalar(value.into()))
    }

    /// Absent optional values are projected as `null`, which clears the key on assignment
    pub fn optional<T: Into<Value>>(key: &'static str, value: Option<T>) -> Self {
        Self::scalar(key, value.map(Into::into).unwrap_or(Value::Null))
    }

    pub fn sequence<T: Clone + Into<Value>>(key: &'static str, values: &[T]) -> Self {
        Self::new(
            key,
            FieldValue::Sequence(values.iter().cloned().map(Into::into).collect()),
        )
    }

    pub fn record(key: &'static str, record: &'a dyn Describe) -> Self {
        Self::new(key, FieldValue::Record(record))
    }

    pub fn records<T: Describe>(key: &'static str, records: &'a [T]) -> Self {
        Self::new(
            key,
            FieldValue::Records(records.iter().map(|r| r as &dyn Describe).collect()),
        )
    }

    pub fn ignored(mut self) -> Self {
        self.ignore = true;
        self
    }
}

/// Recursively flatten a record into a tree
pub fn flatten(record: &dyn Describe) -> Tree {
    let mut tree = Tree::new();
    for field in record.describe() {
        let key = match field.key {
            Some(key) if !field.ignore => key,
            _ => continue,
        };
        let value = match field.value {
            FieldValue::Scalar(value) => value,
            FieldValue::Sequence(values) => Value::Array(values),
            FieldValue::Record(nested) => Value::Object(flatten(nested)),
            FieldValue::Records(nested) => {
                Value::Array(nested.into_iter().map(|r| Value::Object(flatten(r))).collect())
            }
        };
        tree.insert(key.to_owned(), value);
    }
    tree
}

pub fn project(record: &ClusterRecord) -> Tree {
    flatten(record)
}

/// Write every top-level field of `tree` into the resource's persisted state.
/// The first field that cannot be set aborts the remaining assignments.
pub fn assign(data: &mut ResourceData, tree: Tree) -> Result<(), Error> {
    for (key, value) in tree {
        debug!("Setting '{}' to {}", key, value);
        data.set(&key, value)?;
    }
    Ok(())
}
