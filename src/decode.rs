//! Turns a declared property tree into a typed `ClusterSpec`.
//!
//! Decoding is all-or-nothing: the first invalid field aborts with its error
//! and no partially filled spec is ever handed out.
use serde_json::{Map, Value};

use crate::coerce::{coerce_bool, coerce_int, coerce_string, coerce_string_list, coerce_u32};
use crate::errors::Error;
use crate::model::{
    CalicoDetail, ClusterSpec, Gpu, InfraPlacement, NetworkPluginConfig, NodePool, ProxySettings,
};

type Tree = Map<String, Value>;

const EXACTLY_ONE: &str = "expected exactly one entry";

pub fn decode(tree: &Tree) -> Result<ClusterSpec, Error> {
    let name = required_string(tree, "", "name")?;
    let cluster_type = required_string(tree, "", "type")?;
    let provider = required_string(tree, "", "provider")?;
    let kubernetes_version = required_string(tree, "", "kubernetes_version")?;

    let infra = decode_infra(singleton(tree, "infra")?)?;
    let network_plugin = decode_network_plugin(singleton(tree, "network_plugin")?)?;
    let master_node_pool = decode_node_pool(
        singleton(tree, "master_node_pool")?,
        "master_node_pool.0",
        &kubernetes_version,
    )?;
    let worker_node_pools = blocks(tree, "", "worker_node_pool")?
        .into_iter()
        .enumerate()
        .map(|(i, pool)| {
            decode_node_pool(pool, &format!("worker_node_pool.{}", i), &kubernetes_version)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let workers = match optional(tree, "workers") {
        Some(value) => coerce_int("workers", value)?,
        None => worker_node_pools.iter().map(|pool| i64::from(pool.size)).sum(),
    };

    Ok(ClusterSpec {
        name,
        cluster_type,
        provider,
        kubernetes_version,
        description: optional_string(tree, "description")?,
        infra,
        network_plugin,
        master_node_pool,
        worker_node_pools,
        workers,
        loadbalancer_ip_num: optional_int(tree, "loadbalancer_ip_num")?.unwrap_or(0),
        ingress_as_lb: optional_bool(tree, "ingress_as_lb")?,
        etcd_encrypted: optional_bool(tree, "etcd_encrypted")?,
        is_harbor_enabled: optional_bool(tree, "is_harbor_enabled")?,
        is_istio_enabled: optional_bool(tree, "is_istio_enabled")?,
        ingress_vip_pool_id: optional_string(tree, "ingress_vip_pool_id")?,
        proxy: ProxySettings {
            http_proxy: optional_string(tree, "http_proxy")?,
            https_proxy: optional_string(tree, "https_proxy")?,
            no_proxy: optional_list(tree, "no_proxy")?,
        },
        ntp_pools: optional_list(tree, "ntp_pools")?,
        ntp_servers: optional_list(tree, "ntp_servers")?,
        root_ca_registries: optional_list(tree, "root_ca_registries")?,
        insecure_registries: optional_list(tree, "insecure_registries")?,
    })
}

fn decode_infra(tree: &Tree) -> Result<InfraPlacement, Error> {
    let path = "infra.0";
    let networks = coerce_string_list("infra.0.networks", required(tree, path, "networks")?)?;
    if networks.is_empty() {
        return Err(Error::validation("infra.0.networks", "at least one network is required"));
    }
    Ok(InfraPlacement {
        datacenter: required_string(tree, path, "datacenter")?,
        cluster: required_string(tree, path, "cluster")?,
        datastore: required_string(tree, path, "datastore")?,
        resource_pool: required_string(tree, path, "resource_pool")?,
        networks,
    })
}

fn decode_network_plugin(tree: &Tree) -> Result<NetworkPluginConfig, Error> {
    let path = "network_plugin.0";
    let name = required_string(tree, path, "name")?;
    let details = match required(tree, path, "details")? {
        Value::Object(details) => details,
        _ => return Err(Error::validation("network_plugin.0.details", "expected a map")),
    };
    match name.as_str() {
        "calico" => Ok(NetworkPluginConfig::Calico(CalicoDetail {
            pod_cidr: required_string(details, "network_plugin.0.details", "pod_cidr")?,
        })),
        other => Err(Error::validation(
            "network_plugin.0.name",
            format!(
                "unsupported plugin '{}', expected one of {:?}",
                other,
                NetworkPluginConfig::SUPPORTED
            ),
        )),
    }
}

fn decode_node_pool(tree: &Tree, path: &str, cluster_version: &str) -> Result<NodePool, Error> {
    let size = coerce_u32(&join(path, "size"), required(tree, path, "size")?)?;
    if size == 0 {
        return Err(Error::validation(join(path, "size"), "must be at least 1"));
    }
    let gpus = blocks(tree, path, "gpus")?
        .into_iter()
        .enumerate()
        .map(|(i, gpu)| -> Result<Gpu, Error> {
            let gpu_path = format!("{}.gpus.{}", path, i);
            Ok(Gpu {
                gpu_type: required_string(gpu, &gpu_path, "type")?,
                count: coerce_int(&join(&gpu_path, "count"), required(gpu, &gpu_path, "count")?)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NodePool {
        name: required_string(tree, path, "name")?,
        size,
        template: required_string(tree, path, "template")?,
        vcpus: coerce_int(&join(path, "vcpus"), required(tree, path, "vcpus")?)?,
        memory: coerce_int(&join(path, "memory"), required(tree, path, "memory")?)?,
        gpus,
        ssh_user: required_string(tree, path, "ssh_user")?,
        ssh_key: required_string(tree, path, "ssh_key")?,
        kubernetes_version: match optional(tree, "kubernetes_version") {
            Some(value) => coerce_string(&join(path, "kubernetes_version"), value)?,
            None => cluster_version.to_owned(),
        },
        nodes: Vec::new(),
    })
}

/// The one entry of a block that must appear exactly once.
/// A bare map counts as a single entry.
fn singleton<'a>(tree: &'a Tree, key: &str) -> Result<&'a Tree, Error> {
    match optional(tree, key) {
        Some(Value::Object(map)) => Ok(map),
        Some(Value::Array(items)) if items.len() == 1 => items[0]
            .as_object()
            .ok_or_else(|| Error::validation(format!("{}.0", key), "expected a map")),
        Some(Value::Array(_)) | None => Err(Error::validation(key, EXACTLY_ONE)),
        Some(_) => Err(Error::validation(key, "expected a list of blocks")),
    }
}

/// Zero or more entries of a repeated block, in declared order
fn blocks<'a>(tree: &'a Tree, path: &str, key: &str) -> Result<Vec<&'a Tree>, Error> {
    let field = join(path, key);
    match optional(tree, key) {
        None => Ok(Vec::new()),
        Some(Value::Object(map)) => Ok(vec![map]),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_object()
                    .ok_or_else(|| Error::validation(format!("{}.{}", field, i), "expected a map"))
            })
            .collect(),
        Some(_) => Err(Error::validation(field, "expected a list of blocks")),
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_owned()
    } else {
        format!("{}.{}", path, key)
    }
}

fn optional<'a>(tree: &'a Tree, key: &str) -> Option<&'a Value> {
    tree.get(key).filter(|value| !value.is_null())
}

fn required<'a>(tree: &'a Tree, path: &str, key: &str) -> Result<&'a Value, Error> {
    optional(tree, key).ok_or_else(|| Error::validation(join(path, key), "required"))
}

fn required_string(tree: &Tree, path: &str, key: &str) -> Result<String, Error> {
    let value = coerce_string(&join(path, key), required(tree, path, key)?)?;
    if value.is_empty() {
        return Err(Error::validation(join(path, key), "must not be empty"));
    }
    Ok(value)
}

fn optional_string(tree: &Tree, key: &str) -> Result<Option<String>, Error> {
    optional(tree, key).map(|value| coerce_string(key, value)).transpose()
}

fn optional_int(tree: &Tree, key: &str) -> Result<Option<i64>, Error> {
    optional(tree, key).map(|value| coerce_int(key, value)).transpose()
}

fn optional_bool(tree: &Tree, key: &str) -> Result<bool, Error> {
    Ok(optional(tree, key)
        .map(|value| coerce_bool(key, value))
        .transpose()?
        .unwrap_or(false))
}

fn optional_list(tree: &Tree, key: &str) -> Result<Vec<String>, Error> {
    Ok(optional(tree, key)
        .map(|value| coerce_string_list(key, value))
        .transpose()?
        .unwrap_or_default())
}
