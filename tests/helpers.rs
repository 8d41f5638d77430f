#![allow(dead_code)]
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};

use ccp_cluster_controller::model::Node;
use ccp_cluster_controller::{
    load_manifest, ClientError, ClusterApi, ClusterPatch, ClusterRecord, ClusterSpec,
};

/// One call received by the fake service
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(ClusterSpec),
    GetByName(String),
    Patch(ClusterPatch),
    Delete(String),
}

/// In-memory stand-in for the management service.
///
/// Like the real one, `create` answers with a partial record (no identity,
/// no nodes); only `get_by_name` returns the full cluster.
pub struct FakeClusterApi {
    calls: Mutex<Vec<Call>>,
    clusters: Mutex<BTreeMap<String, ClusterRecord>>,
    failures: Mutex<Vec<&'static str>>,
    next_id: Mutex<u32>,
    withhold_identity: Mutex<bool>,
}

impl FakeClusterApi {
    pub fn new() -> Self {
        FakeClusterApi {
            calls: Mutex::new(Vec::new()),
            clusters: Mutex::new(BTreeMap::new()),
            failures: Mutex::new(Vec::new()),
            next_id: Mutex::new(123),
            withhold_identity: Mutex::new(false),
        }
    }

    /// Make the next call to `operation` fail as unreachable
    pub fn fail_next(&self, operation: &'static str) {
        self.failures.lock().unwrap().push(operation);
    }

    /// Store newly created clusters without an id, as a lagging service would
    pub fn withhold_identity(&self) {
        *self.withhold_identity.lock().unwrap() = true;
    }

    pub fn insert(&self, record: ClusterRecord) {
        self.clusters
            .lock()
            .unwrap()
            .insert(record.spec.name.clone(), record);
    }

    pub fn cluster(&self, name: &str) -> Option<ClusterRecord> {
        self.clusters.lock().unwrap().get(name).cloned()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call, operation: &'static str) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(call);
        let mut failures = self.failures.lock().unwrap();
        match failures.iter().position(|op| *op == operation) {
            Some(index) => {
                failures.remove(index);
                Err(ClientError::Unreachable(format!("{} timed out", operation)))
            }
            None => Ok(()),
        }
    }
}

fn provisioned(pool_name: &str, size: u32) -> Vec<Node> {
    (0..size)
        .map(|i| Node {
            name: format!("{}-{}", pool_name, i),
            status: "READY".to_owned(),
            status_detail: "Ready".to_owned(),
            status_reason: String::new(),
            public_ip: format!("10.10.0.{}", i + 10),
            private_ip: format!("192.168.1.{}", i + 10),
            phase: "Running".to_owned(),
        })
        .collect()
}

#[async_trait]
impl ClusterApi for FakeClusterApi {
    async fn create(&self, spec: &ClusterSpec) -> Result<ClusterRecord, ClientError> {
        self.record(Call::Create(spec.clone()), "create")?;

        let mut next_id = self.next_id.lock().unwrap();
        let mut stored = ClusterRecord {
            uuid: format!("id-{}", *next_id),
            status: Some("READY".to_owned()),
            master_vip: Some("10.10.0.2".to_owned()),
            kubeconfig: Some("apiVersion: v1".to_owned()),
            spec: spec.clone(),
            ..ClusterRecord::default()
        };
        *next_id += 1;
        if *self.withhold_identity.lock().unwrap() {
            stored.uuid.clear();
        }
        let master = &mut stored.spec.master_node_pool;
        master.nodes = provisioned(&master.name, master.size);
        for pool in stored.spec.worker_node_pools.iter_mut() {
            pool.nodes = provisioned(&pool.name, pool.size);
        }
        self.insert(stored);

        Ok(ClusterRecord {
            status: Some("CREATING".to_owned()),
            spec: spec.clone(),
            ..ClusterRecord::default()
        })
    }

    async fn get_by_name(&self, name: &str) -> Result<ClusterRecord, ClientError> {
        self.record(Call::GetByName(name.to_owned()), "get_by_name")?;
        self.cluster(name)
            .ok_or_else(|| ClientError::NotFound(name.to_owned()))
    }

    async fn patch(&self, patch: &ClusterPatch) -> Result<ClusterRecord, ClientError> {
        self.record(Call::Patch(patch.clone()), "patch")?;
        let mut clusters = self.clusters.lock().unwrap();
        let record = clusters
            .values_mut()
            .find(|record| record.uuid == patch.uuid)
            .ok_or_else(|| ClientError::Api {
                status: 404,
                message: format!("no cluster with id {}", patch.uuid),
            })?;
        record.spec.workers = patch.workers;
        record.spec.loadbalancer_ip_num = patch.loadbalancer_ip_num;
        Ok(ClusterRecord {
            uuid: record.uuid.clone(),
            ..ClusterRecord::default()
        })
    }

    async fn delete(&self, uuid: &str) -> Result<(), ClientError> {
        self.record(Call::Delete(uuid.to_owned()), "delete")?;
        let mut clusters = self.clusters.lock().unwrap();
        let before = clusters.len();
        clusters.retain(|_, record| record.uuid != uuid);
        if clusters.len() == before {
            return Err(ClientError::Api {
                status: 404,
                message: format!("no cluster with id {}", uuid),
            });
        }
        Ok(())
    }
}

// Get the repo's example declared cluster tree
pub fn example_tree() -> Map<String, Value> {
    let path = format!("{}/example-cluster.yaml", env!("CARGO_MANIFEST_DIR"));
    load_manifest(Path::new(&path)).expect("Unable to load example cluster")
}
