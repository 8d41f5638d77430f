use serde::{Deserialize, Serialize};

use super::{InfraPlacement, NetworkPluginConfig, NodePool};
use crate::project::{Describe, FieldDescriptor};

/// Represents the body of a cluster create request
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ClusterSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub cluster_type: String,
    /// Provider client config uuid the cluster is placed with
    pub provider: String,
    pub kubernetes_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub infra: InfraPlacement,
    #[serde(rename = "network_plugin_profile")]
    pub network_plugin: NetworkPluginConfig,
    #[serde(rename = "master_group")]
    pub master_node_pool: NodePool,
    #[serde(rename = "node_groups")]
    pub worker_node_pools: Vec<NodePool>,
    pub workers: i64,
    #[serde(rename = "load_balancer_num")]
    pub loadbalancer_ip_num: i64,
    pub ingress_as_lb: bool,
    pub etcd_encrypted: bool,
    pub is_harbor_enabled: bool,
    pub is_istio_enabled: bool,
    /// VIP pool the ingress address is allocated from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress_vip_pool_id: Option<String>,
    #[serde(flatten)]
    pub proxy: ProxySettings,
    pub ntp_pools: Vec<String>,
    pub ntp_servers: Vec<String>,
    pub root_ca_registries: Vec<String>,
    pub insecure_registries: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ProxySettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https_proxy: Option<String>,
    pub no_proxy: Vec<String>,
}

/// A cluster as reported by the management service.
///
/// Every field is defaulted: a freshly created cluster is routinely returned
/// without node inventories or a master VIP.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ClusterRecord {
    #[serde(rename = "id")]
    pub uuid: String,
    pub status: Option<String>,
    pub master_vip: Option<String>,
    pub aci_profile_uuid: Option<String>,
    pub ingress_vip_addr_id: Option<String>,
    pub kubeconfig: Option<String>,
    #[serde(flatten)]
    pub spec: ClusterSpec,
}

/// The only fields the service accepts on a cluster patch
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClusterPatch {
    #[serde(rename = "id")]
    pub uuid: String,
    pub workers: i64,
    #[serde(rename = "load_balancer_num")]
    pub loadbalancer_ip_num: i64,
}

impl ClusterPatch {
    pub fn from_spec(uuid: &str, spec: &ClusterSpec) -> Self {
        ClusterPatch {
            uuid: uuid.to_owned(),
            workers: spec.workers,
            loadbalancer_ip_num: spec.loadbalancer_ip_num,
        }
    }
}

impl Describe for ClusterRecord {
    fn describe(&self) -> Vec<FieldDescriptor<'_>> {
        let spec = &self.spec;
        vec![
            FieldDescriptor::scalar("uuid", self.uuid.as_str()),
            FieldDescriptor::optional("status", self.status.as_deref()),
            FieldDescriptor::optional("master_vip", self.master_vip.as_deref()),
            FieldDescriptor::optional("aci_profile_uuid", self.aci_profile_uuid.as_deref()),
            FieldDescriptor::optional("ingress_vip_addr_id", self.ingress_vip_addr_id.as_deref()),
            FieldDescriptor::optional("kubeconfig", self.kubeconfig.as_deref()).ignored(),
            FieldDescriptor::scalar("name", spec.name.as_str()),
            FieldDescriptor::scalar("type", spec.cluster_type.as_str()),
            FieldDescriptor::scalar("provider", spec.provider.as_str()),
            FieldDescriptor::scalar("kubernetes_version", spec.kubernetes_version.as_str()),
            FieldDescriptor::optional("description", spec.description.as_deref()),
            FieldDescriptor::scalar("workers", spec.workers),
            FieldDescriptor::scalar("loadbalancer_ip_num", spec.loadbalancer_ip_num),
            FieldDescriptor::scalar("ingress_as_lb", spec.ingress_as_lb),
            FieldDescriptor::scalar("etcd_encrypted", spec.etcd_encrypted),
            FieldDescriptor::scalar("is_harbor_enabled", spec.is_harbor_enabled),
            FieldDescriptor::scalar("is_istio_enabled", spec.is_istio_enabled),
            FieldDescriptor::optional("ingress_vip_pool_id", spec.ingress_vip_pool_id.as_deref()),
            FieldDescriptor::optional("http_proxy", spec.proxy.http_proxy.as_deref()),
            FieldDescriptor::optional("https_proxy", spec.proxy.https_proxy.as_deref()),
            FieldDescriptor::sequence("no_proxy", &spec.proxy.no_proxy),
            FieldDescriptor::sequence("ntp_pools", &spec.ntp_pools),
            FieldDescriptor::sequence("ntp_servers", &spec.ntp_servers),
            FieldDescriptor::sequence("root_ca_registries", &spec.root_ca_registries),
            FieldDescriptor::sequence("insecure_registries", &spec.insecure_registries),
            FieldDescriptor::records("infra", std::slice::from_ref(&spec.infra)),
            FieldDescriptor::records("network_plugin", std::slice::from_ref(&spec.network_plugin)),
            FieldDescriptor::records(
                "master_node_pool",
                std::slice::from_ref(&spec.master_node_pool),
            ),
            FieldDescriptor::records("worker_node_pool", &spec.worker_node_pools),
        ]
    }
}
