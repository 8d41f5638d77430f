//! Shape of the cluster resource's property tree, as the state host sees it.
//! Every value written into persisted state is checked against it.
use std::collections::BTreeMap;

use lazy_static::lazy_static;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Int,
    Bool,
    StringList,
    /// A single nested map
    Map(Schema),
    /// An ordered sequence of nested maps
    Blocks(Schema),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: BTreeMap<&'static str, FieldKind>,
}

lazy_static! {
    pub static ref CLUSTER_SCHEMA: Schema = cluster_schema();
}

impl Schema {
    pub fn new(fields: Vec<(&'static str, FieldKind)>) -> Self {
        Schema {
            fields: fields.into_iter().collect(),
        }
    }

    pub fn field(&self, key: &str) -> Option<&FieldKind> {
        self.fields.get(key)
    }

    /// Check `value` against the kind declared for `key`. `null` is accepted for any field.
    pub fn check(&self, key: &str, value: &Value) -> Result<(), String> {
        match self.field(key) {
            Some(kind) => kind.check(key, value),
            None => Err(format!("'{}' is not part of the schema", key)),
        }
    }

    fn check_map(&self, path: &str, value: &Value) -> Result<(), String> {
        let map = value
            .as_object()
            .ok_or_else(|| format!("'{}' must be a map, got {}", path, value))?;
        for (key, nested) in map {
            let kind = self
                .field(key)
                .ok_or_else(|| format!("'{}.{}' is not part of the schema", path, key))?;
            kind.check(&format!("{}.{}", path, key), nested)?;
        }
        Ok(())
    }
}

impl FieldKind {
    fn check(&self, path: &str, value: &Value) -> Result<(), String> {
        let valid = match (self, value) {
            (_, Value::Null) => true,
            (FieldKind::String, Value::String(_)) => true,
            (FieldKind::Int, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (FieldKind::Bool, Value::Bool(_)) => true,
            (FieldKind::StringList, Value::Array(items)) => items.iter().all(Value::is_string),
            (FieldKind::Map(schema), _) => return schema.check_map(path, value),
            (FieldKind::Blocks(schema), Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    schema.check_map(&format!("{}.{}", path, i), item)?;
                }
                true
            }
            _ => false,
        };
        if valid {
            Ok(())
        } else {
            Err(format!("'{}' expected {}, got {}", path, self.describe(), value))
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            FieldKind::String => "a string",
            FieldKind::Int => "an integer",
            FieldKind::Bool => "a boolean",
            FieldKind::StringList => "a list of strings",
            FieldKind::Map(_) => "a map",
            FieldKind::Blocks(_) => "a list of blocks",
        }
    }
}

fn node_pool_schema() -> Schema {
    use FieldKind::*;
    let gpu = Schema::new(vec![("type", String), ("count", Int)]);
    let node = Schema::new(vec![
        ("name", String),
        ("status", String),
        ("status_detail", String),
        ("status_reason", String),
        ("public_ip", String),
        ("private_ip", String),
        ("phase", String),
    ]);
    Schema::new(vec![
        ("name", String),
        ("size", Int),
        ("template", String),
        ("vcpus", Int),
        ("memory", Int),
        ("gpus", Blocks(gpu)),
        ("ssh_user", String),
        ("ssh_key", String),
        ("kubernetes_version", String),
        ("nodes", Blocks(node)),
    ])
}

pub fn cluster_schema() -> Schema {
    use FieldKind::*;
    let infra = Schema::new(vec![
        ("datacenter", String),
        ("cluster", String),
        ("datastore", String),
        ("resource_pool", String),
        ("networks", StringList),
    ]);
    let network_plugin = Schema::new(vec![
        ("name", String),
        ("details", Map(Schema::new(vec![("pod_cidr", String)]))),
    ]);
    Schema::new(vec![
        ("uuid", String),
        ("status", String),
        ("master_vip", String),
        ("aci_profile_uuid", String),
        ("ingress_vip_addr_id", String),
        ("name", String),
        ("type", String),
        ("provider", String),
        ("kubernetes_version", String),
        ("description", String),
        ("workers", Int),
        ("loadbalancer_ip_num", Int),
        ("ingress_as_lb", Bool),
        ("etcd_encrypted", Bool),
        ("is_harbor_enabled", Bool),
        ("is_istio_enabled", Bool),
        ("ingress_vip_pool_id", String),
        ("http_proxy", String),
        ("https_proxy", String),
        ("no_proxy", StringList),
        ("ntp_pools", StringList),
        ("ntp_servers", StringList),
        ("root_ca_registries", StringList),
        ("insecure_registries", StringList),
        ("infra", Blocks(infra)),
        ("network_plugin", Blocks(network_plugin)),
        ("master_node_pool", Blocks(node_pool_schema())),
        ("worker_node_pool", Blocks(node_pool_schema())),
    ])
}
