//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use mks_core::ServiceClient;
use mock_server::stub::{Method, StatusCode, Stub, StubRoute};
use tracing_subscriber::EnvFilter;

pub const TOKEN: &str = "fakeID";
pub const USER_AGENT: &str = "mks-tests";

pub const CLUSTER_ID: &str = "dbe7559b-55d8-4f65-9230-6a22b985ff73";
pub const NODEGROUP_ID: &str = "a376745a-fbcb-413d-b418-169d059d79ce";
pub const NODE_ID: &str = "39e5dd4d-5e23-4a00-8173-974bf844f21b";
pub const TASK_ID: &str = "2f6fb93c-cf0d-4289-a78c-34393ac75f92";

pub const CLUSTER_RAW: &str = r#"{
    "cluster": {
        "additional_software": null,
        "created_at": "2020-02-13T09:18:32.05753Z",
        "enable_autorepair": true,
        "enable_patch_version_auto_upgrade": true,
        "id": "dbe7559b-55d8-4f65-9230-6a22b985ff73",
        "kube_api_ip": "203.0.113.101",
        "kube_version": "1.15.7",
        "maintenance_last_start": "2020-02-13T09:18:32.05753Z",
        "maintenance_window_end": "03:00:00",
        "maintenance_window_start": "01:00:00",
        "name": "test-cluster",
        "network_id": "74a591b7-5e73-4f0e-9e0c-4d7a5e8b1e2d",
        "pki_tree_updated_at": null,
        "project_id": "69744a2b-6a3a-4d4b-b6d4-f4b3d1a6f1f0",
        "region": "ru-1",
        "status": "ACTIVE",
        "subnet_id": "c872c5a2-1f31-4e8c-8b4a-2c5a0c6ca0cb",
        "updated_at": "2020-02-13T09:18:32.05753Z",
        "zonal": false,
        "kubernetes_options": {
            "enable_pod_security_policy": true,
            "feature_gates": [],
            "admission_controllers": []
        }
    }
}"#;

pub const CLUSTERS_RAW: &str = r#"{
    "clusters": [
        {"id": "dbe7559b-55d8-4f65-9230-6a22b985ff73", "name": "test-cluster-0", "status": "ACTIVE"},
        {"id": "b2e9b1c4-4ac3-4cd2-9b8b-0b0a4cd9ca1b", "name": "test-cluster-1", "status": "PENDING_DELETE"}
    ]
}"#;

pub const NODEGROUP_RAW: &str = r#"{
    "nodegroup": {
        "availability_zone": "ru-1a",
        "cluster_id": "dbe7559b-55d8-4f65-9230-6a22b985ff73",
        "created_at": "2020-02-19T15:41:45.948646Z",
        "flavor_id": "99b62670-9d78-43fd-8f55-d184a4800f8d",
        "id": "a376745a-fbcb-413d-b418-169d059d79ce",
        "local_volume": false,
        "nodes": [
            {
                "created_at": "2020-02-19T15:41:45.948646Z",
                "hostname": "test-cluster-node-eegp9",
                "id": "39e5dd4d-5e23-4a00-8173-974bf844f21b",
                "ip": "198.51.100.11",
                "nodegroup_id": "a376745a-fbcb-413d-b418-169d059d79ce",
                "os_server_id": "dc56abe9-d0d4-4099-9b5f-e5cabfccf276",
                "updated_at": "2020-02-19T15:41:45.948646Z"
            }
        ],
        "status": "ACTIVE",
        "updated_at": "2020-02-19T15:41:45.948646Z",
        "volume_gb": 10,
        "volume_type": "basic.ru-1a",
        "labels": {"test-label-key": "test-label-value"},
        "taints": [{"key": "test-key-0", "value": "test-value-0", "effect": "NoSchedule"}],
        "enable_autoscale": false,
        "autoscale_min_nodes": 0,
        "autoscale_max_nodes": 0,
        "user_data": ""
    }
}"#;

pub const NODE_RAW: &str = r#"{
    "node": {
        "created_at": "2020-02-25T08:49:21.780542Z",
        "hostname": "test-cluster-node-gap1g",
        "id": "39e5dd4d-5e23-4a00-8173-974bf844f21b",
        "ip": "198.51.100.11",
        "nodegroup_id": "a376745a-fbcb-413d-b418-169d059d79ce",
        "os_server_id": "dc56abe9-d0d4-4099-9b5f-e5cabfccf276",
        "updated_at": "2020-02-25T08:49:21.780542Z"
    }
}"#;

pub const TASKS_RAW: &str = r#"{
    "tasks": [
        {
            "cluster_id": "dbe7559b-55d8-4f65-9230-6a22b985ff73",
            "id": "2f6fb93c-cf0d-4289-a78c-34393ac75f92",
            "started_at": "2020-02-19T11:43:02.868387Z",
            "status": "DONE",
            "type": "CREATE_CLUSTER",
            "updated_at": "2020-02-19T11:43:02.868387Z"
        },
        {
            "cluster_id": "dbe7559b-55d8-4f65-9230-6a22b985ff73",
            "id": "7e8d9a74-3c55-4c4f-a6d2-2d4bc1d1b9a0",
            "started_at": "2020-02-20T11:43:02.868387Z",
            "status": "IN_PROGRESS",
            "type": "ROTATE_CERTS",
            "updated_at": null
        }
    ]
}"#;

pub const KUBECONFIG_RAW: &str = "apiVersion: v1
clusters:
- cluster:
    certificate-authority-data: LS0tLS1CRUdJTiBDRVJUSUZJQ0FURS0tLS0t
    server: https://203.0.113.101:6443
  name: test-cluster
users:
- name: admin
  user:
    client-certificate-data: LS0tLS1DRVJU
    client-key-data: LS0tLS1LRVk=
";

pub const ERR_NOT_FOUND_RAW: &str =
    r#"{"error":{"id":"63ed5342-b22c-4c7a-9d41-c1fe4a142c13","message":"cluster is not found"}}"#;
pub const ERR_GENERIC_RAW: &str = r#"{"error":{"message":"bad gateway"}}"#;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn client(endpoint: &str) -> ServiceClient {
    ServiceClient::new(TOKEN, endpoint).with_user_agent(USER_AGENT)
}

/// Starts a stub answering `method path` with `status` and `body`.
pub async fn stub(method: Method, path: &str, status: u16, body: &str) -> Stub {
    init_tracing();
    let status = StatusCode::from_u16(status).unwrap();
    Stub::start(StubRoute::new(method, path).status(status).body(body))
        .await
        .unwrap()
}
