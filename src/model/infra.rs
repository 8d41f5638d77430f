use serde::{Deserialize, Serialize};

use crate::project::{Describe, FieldDescriptor};

/// Where the cluster's VMs are placed. Fixed at creation time.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct InfraPlacement {
    pub datacenter: String,
    pub cluster: String,
    pub datastore: String,
    pub resource_pool: String,
    pub networks: Vec<String>,
}

/// Network plugin profile, tagged by plugin name.
///
/// Only plugins listed here can be declared; anything else is rejected while
/// decoding rather than forwarded to the service.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "name", content = "details")]
pub enum NetworkPluginConfig {
    #[serde(rename = "calico")]
    Calico(CalicoDetail),
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CalicoDetail {
    pub pod_cidr: String,
}

impl NetworkPluginConfig {
    pub const SUPPORTED: &'static [&'static str] = &["calico"];

    pub fn name(&self) -> &'static str {
        match self {
            NetworkPluginConfig::Calico(_) => "calico",
        }
    }
}

impl Default for NetworkPluginConfig {
    fn default() -> Self {
        NetworkPluginConfig::Calico(CalicoDetail::default())
    }
}

impl Describe for InfraPlacement {
    fn describe(&self) -> Vec<FieldDescriptor<'_>> {
        vec![
            FieldDescriptor::scalar("datacenter", self.datacenter.as_str()),
            FieldDescriptor::scalar("cluster", self.cluster.as_str()),
            FieldDescriptor::scalar("datastore", self.datastore.as_str()),
            FieldDescriptor::scalar("resource_pool", self.resource_pool.as_str()),
            FieldDescriptor::sequence("networks", &self.networks),
        ]
    }
}

impl Describe for NetworkPluginConfig {
    fn describe(&self) -> Vec<FieldDescriptor<'_>> {
        let details: &dyn Describe = match self {
            NetworkPluginConfig::Calico(detail) => detail,
        };
        vec![
            FieldDescriptor::scalar("name", self.name()),
            FieldDescriptor::record("details", details),
        ]
    }
}

impl Describe for CalicoDetail {
    fn describe(&self) -> Vec<FieldDescriptor<'_>> {
        vec![FieldDescriptor::scalar("pod_cidr", self.pod_cidr.as_str())]
    }
}
