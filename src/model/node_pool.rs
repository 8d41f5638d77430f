use serde::{Deserialize, Serialize};

use crate::project::{Describe, FieldDescriptor};

/// A master or worker node group
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct NodePool {
    pub name: String,
    pub size: u32,
    pub template: String,
    pub vcpus: i64,
    pub memory: i64,
    pub gpus: Vec<Gpu>,
    pub ssh_user: String,
    pub ssh_key: String,
    pub kubernetes_version: String,
    /// Filled in by the service; never sent
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Gpu {
    #[serde(rename = "type")]
    pub gpu_type: String,
    pub count: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Node {
    pub name: String,
    pub status: String,
    pub status_detail: String,
    pub status_reason: String,
    pub public_ip: String,
    pub private_ip: String,
    pub phase: String,
}

impl Describe for NodePool {
    fn describe(&self) -> Vec<FieldDescriptor<'_>> {
        vec![
            FieldDescriptor::scalar("name", self.name.as_str()),
            FieldDescriptor::scalar("size", self.size),
            FieldDescriptor::scalar("template", self.template.as_str()),
            FieldDescriptor::scalar("vcpus", self.vcpus),
            FieldDescriptor::scalar("memory", self.memory),
            FieldDescriptor::records("gpus", &self.gpus),
            FieldDescriptor::scalar("ssh_user", self.ssh_user.as_str()),
            FieldDescriptor::scalar("ssh_key", self.ssh_key.as_str()),
            FieldDescriptor::scalar("kubernetes_version", self.kubernetes_version.as_str()),
            FieldDescriptor::records("nodes", &self.nodes),
        ]
    }
}

impl Describe for Gpu {
    fn describe(&self) -> Vec<FieldDescriptor<'_>> {
        vec![
            FieldDescriptor::scalar("type", self.gpu_type.as_str()),
            FieldDescriptor::scalar("count", self.count),
        ]
    }
}

impl Describe for Node {
    fn describe(&self) -> Vec<FieldDescriptor<'_>> {
        vec![
            FieldDescriptor::scalar("name", self.name.as_str()),
            FieldDescriptor::scalar("status", self.status.as_str()),
            FieldDescriptor::scalar("status_detail", self.status_detail.as_str()),
            FieldDescriptor::scalar("status_reason", self.status_reason.as_str()),
            FieldDescriptor::scalar("public_ip", self.public_ip.as_str()),
            FieldDescriptor::scalar("private_ip", self.private_ip.as_str()),
            FieldDescriptor::scalar("phase", self.phase.as_str()),
        ]
    }
}
