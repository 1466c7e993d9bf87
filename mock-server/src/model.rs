//! Wire types served by the mock API.
//!
//! These mirror the MKS v1 schema but are defined independently from the
//! client crate, so integration tests catch drift between the two.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KubernetesOptions {
    #[serde(default)]
    pub enable_pod_security_policy: bool,
    #[serde(default)]
    pub feature_gates: Vec<String>,
    #[serde(default)]
    pub admission_controllers: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub name: String,
    pub status: String,
    pub project_id: String,
    pub network_id: String,
    pub subnet_id: String,
    pub kube_api_ip: String,
    pub kube_version: String,
    pub region: String,
    pub additional_software: Option<serde_json::Value>,
    pub pki_tree_updated_at: Option<DateTime<Utc>>,
    pub maintenance_window_start: String,
    pub maintenance_window_end: String,
    pub maintenance_last_start: Option<DateTime<Utc>>,
    pub enable_autorepair: bool,
    pub enable_patch_version_auto_upgrade: bool,
    pub zonal: bool,
    pub kubernetes_options: KubernetesOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Taint {
    pub key: String,
    pub value: String,
    pub effect: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub hostname: String,
    pub ip: String,
    pub nodegroup_id: String,
    pub os_server_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Nodegroup {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub status: String,
    pub cluster_id: String,
    pub flavor_id: String,
    pub volume_gb: u32,
    pub volume_type: String,
    pub local_volume: bool,
    pub availability_zone: String,
    pub nodes: Vec<Node>,
    pub labels: HashMap<String, String>,
    pub taints: Vec<Taint>,
    pub enable_autoscale: bool,
    pub autoscale_min_nodes: u32,
    pub autoscale_max_nodes: u32,
    pub nodegroup_type: String,
    pub install_nvidia_device_plugin: bool,
    pub preemptible: bool,
}

/// Single-nodegroup representation: the base fields plus user data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodegroupDetail {
    #[serde(flatten)]
    pub nodegroup: Nodegroup,
    pub user_data: String,
}

/// List representation: user data is replaced by a presence map.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodegroupSummary {
    #[serde(flatten)]
    pub nodegroup: Nodegroup,
    pub available_additional_info: HashMap<String, bool>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub cluster_id: String,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KubeVersion {
    pub version: String,
    pub is_default: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KubeOption {
    #[serde(rename = "KubeVersionMinor")]
    pub kube_version_minor: String,
    #[serde(rename = "Names")]
    pub names: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateNodegroup {
    pub count: u32,
    #[serde(default)]
    pub flavor_id: Option<String>,
    #[serde(default)]
    pub cpus: Option<u32>,
    #[serde(default)]
    pub ram_mb: Option<u32>,
    #[serde(default)]
    pub volume_gb: Option<u32>,
    #[serde(default)]
    pub volume_type: Option<String>,
    #[serde(default)]
    pub local_volume: Option<bool>,
    #[serde(default)]
    pub keypair_name: Option<String>,
    pub availability_zone: String,
    #[serde(default)]
    pub labels: Option<HashMap<String, String>>,
    #[serde(default)]
    pub taints: Option<Vec<Taint>>,
    #[serde(default)]
    pub enable_autoscale: Option<bool>,
    #[serde(default)]
    pub autoscale_min_nodes: Option<u32>,
    #[serde(default)]
    pub autoscale_max_nodes: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNodegroup {
    pub labels: Option<HashMap<String, String>>,
    pub taints: Option<Vec<Taint>>,
    pub enable_autoscale: Option<bool>,
    pub autoscale_min_nodes: Option<u32>,
    pub autoscale_max_nodes: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ResizeNodegroup {
    pub desired: u32,
}

#[derive(Debug, Deserialize)]
pub struct CreateCluster {
    pub name: String,
    pub kube_version: String,
    pub region: String,
    #[serde(default)]
    pub nodegroups: Vec<CreateNodegroup>,
    pub network_id: Option<String>,
    pub subnet_id: Option<String>,
    pub maintenance_window_start: Option<String>,
    pub enable_autorepair: Option<bool>,
    pub enable_patch_version_auto_upgrade: Option<bool>,
    pub zonal: Option<bool>,
    pub kubernetes_options: Option<KubernetesOptions>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCluster {
    pub maintenance_window_start: Option<String>,
    pub enable_autorepair: Option<bool>,
    pub enable_patch_version_auto_upgrade: Option<bool>,
    pub kubernetes_options: Option<KubernetesOptions>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClusterEnvelope<T> {
    pub cluster: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClusterList {
    pub clusters: Vec<Cluster>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NodegroupEnvelope<T> {
    pub nodegroup: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NodegroupList {
    pub nodegroups: Vec<NodegroupSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NodeEnvelope {
    pub node: Node,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskEnvelope {
    pub task: Task,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskList {
    pub tasks: Vec<Task>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct KubeVersionList {
    pub kube_versions: Vec<KubeVersion>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FeatureGateList {
    pub feature_gates: Vec<KubeOption>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdmissionControllerList {
    pub admission_controllers: Vec<KubeOption>,
}

/// `{"error": {...}}`. `id` is present only on not-found errors.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub message: String,
}
