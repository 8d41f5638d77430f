use serde_json::{json, Map, Value};

mod helpers;

use ccp_cluster_controller::project::assign;
use ccp_cluster_controller::{project, ClusterRecord, Error, ResourceData};

// A cluster as the management service returns it
fn api_record() -> ClusterRecord {
    serde_json::from_value(json!({
        "id": "id-123",
        "name": "demo",
        "type": "vsphere",
        "provider": "prov-1",
        "kubernetes_version": "1.15.3",
        "status": "READY",
        "master_vip": "10.10.0.2",
        "kubeconfig": "apiVersion: v1",
        "workers": 2,
        "load_balancer_num": 1,
        "etcd_encrypted": true,
        "no_proxy": ["b.example.com", "a.example.com"],
        "infra": {
            "datacenter": "dc-1", "cluster": "cl-1", "datastore": "ds-1",
            "resource_pool": "rp", "networks": ["net-b", "net-a"]
        },
        "network_plugin_profile": {"name": "calico", "details": {"pod_cidr": "192.168.0.0/16"}},
        "master_group": {
            "name": "master-group", "size": 1, "template": "tmpl", "vcpus": 2, "memory": 16384,
            "ssh_user": "ccpuser", "ssh_key": "key", "kubernetes_version": "1.15.3",
            "nodes": [{"name": "master-0", "status": "READY", "private_ip": "192.168.1.10"}]
        },
        "node_groups": [{
            "name": "node-group", "size": 2, "template": "tmpl", "vcpus": 4, "memory": 32768,
            "ssh_user": "ccpuser", "ssh_key": "key", "kubernetes_version": "1.15.3",
            "nodes": [
                {"name": "node-1", "status": "READY", "phase": "Running"},
                {"name": "node-0", "status": "ERROR", "status_reason": "ip exhausted"}
            ]
        }]
    }))
    .expect("Unable to parse API record")
}

#[test]
fn test_project_api_record() {
    let tree = project(&api_record());

    assert_eq!(tree["uuid"], json!("id-123"));
    assert_eq!(tree["loadbalancer_ip_num"], json!(1));
    assert_eq!(tree["no_proxy"], json!(["b.example.com", "a.example.com"]));
    assert_eq!(tree["infra"][0]["networks"], json!(["net-b", "net-a"]));
    assert_eq!(
        tree["network_plugin"],
        json!([{"name": "calico", "details": {"pod_cidr": "192.168.0.0/16"}}])
    );
    assert_eq!(tree["aci_profile_uuid"], Value::Null);
    assert!(tree.get("kubeconfig").is_none());

    let nodes = &tree["worker_node_pool"][0]["nodes"];
    assert_eq!(nodes[0]["name"], json!("node-1"));
    assert_eq!(nodes[1]["status_reason"], json!("ip exhausted"));
    assert_eq!(nodes[1]["public_ip"], json!(""));
}

#[test]
fn test_project_is_deterministic() {
    let record = api_record();
    let first = project(&record);
    let second = project(&record);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_assign_writes_projected_tree() {
    let mut data = ResourceData::new(helpers::example_tree());
    assign(&mut data, project(&api_record())).expect("Unable to assign projected tree");

    assert_eq!(data.state()["master_node_pool"][0]["nodes"][0]["name"], json!("master-0"));
    assert!(data.state().get("aci_profile_uuid").is_none());
    // Assignment never touches identity
    assert_eq!(data.id(), "");
}

#[test]
fn test_assign_stops_at_first_bad_field() {
    let mut tree = Map::new();
    tree.insert("description".into(), json!("first"));
    tree.insert("name".into(), json!(42));
    tree.insert("workers".into(), json!(3));

    let mut data = ResourceData::new(Map::new());
    match assign(&mut data, tree) {
        Err(Error::FieldAssignment { field, .. }) => assert_eq!(field, "name"),
        other => panic!("Expected field assignment error, got {:?}", other),
    }
    assert_eq!(data.state().get("description"), Some(&json!("first")));
    assert!(data.state().get("workers").is_none());
}
