//! Nodegroups: sets of identically configured worker nodes in a cluster.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{encode, ServiceClient};
use crate::context::RequestContext;
use crate::error::Error;
use crate::http::HttpMethod;
use crate::node;
use crate::result::ResponseResult;
use crate::wire::wire_enum;

const CLUSTERS: &str = "clusters";
const RESOURCE: &str = "nodegroups";
const RESIZE: &str = "resize";

wire_enum! {
    /// Current status of a nodegroup.
    pub enum Status {
        Active => "ACTIVE",
        PendingCreate => "PENDING_CREATE",
        PendingUpdate => "PENDING_UPDATE",
        PendingDelete => "PENDING_DELETE",
        PendingScaleUp => "PENDING_SCALE_UP",
        PendingScaleDown => "PENDING_SCALE_DOWN",
        PendingNodeReinstall => "PENDING_NODE_REINSTALL",
        Error => "ERROR",
    }
}

wire_enum! {
    /// Effect of a Kubernetes node taint.
    pub enum TaintEffect {
        NoSchedule => "NoSchedule",
        NoExecute => "NoExecute",
        PreferNoSchedule => "PreferNoSchedule",
    }
}

/// A Kubernetes taint applied to every node of the group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taint {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub effect: TaintEffect,
}

/// Fields shared by the get and list representations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseView {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub status: Status,
    pub cluster_id: String,
    pub flavor_id: String,
    pub volume_gb: u32,
    pub volume_type: String,
    pub local_volume: bool,
    pub availability_zone: String,
    pub nodes: Vec<node::View>,
    pub labels: HashMap<String, String>,
    pub taints: Vec<Taint>,
    pub enable_autoscale: bool,
    pub autoscale_min_nodes: u32,
    pub autoscale_max_nodes: u32,
    pub nodegroup_type: String,
    pub install_nvidia_device_plugin: bool,
    pub preemptible: bool,
}

/// A nodegroup as returned by [`get`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetView {
    #[serde(flatten)]
    pub base: BaseView,
    /// Base64 script run by worker nodes on boot.
    #[serde(default)]
    pub user_data: String,
}

/// A nodegroup as returned by [`list`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListView {
    #[serde(flatten)]
    pub base: BaseView,
    /// Which bulky extras (user data and the like) exist for the nodegroup.
    #[serde(default)]
    pub available_additional_info: HashMap<String, bool>,
}

/// Options for [`create`], also embedded in cluster creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateOpts {
    pub count: u32,
    /// Set either this or `cpus`/`ram_mb`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpus: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram_mb: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_gb: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_volume: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keypair_name: Option<String>,
    pub availability_zone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taints: Option<Vec<Taint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_autoscale: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscale_min_nodes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscale_max_nodes: Option<u32>,
}

/// Options for [`update`]. `taints: Some(vec![])` removes every taint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateOpts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taints: Option<Vec<Taint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_autoscale: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscale_min_nodes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscale_max_nodes: Option<u32>,
}

/// Options for [`resize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeOpts {
    pub desired: u32,
}

#[derive(Serialize)]
struct Request<'a, T> {
    nodegroup: &'a T,
}

#[derive(Deserialize)]
struct Single {
    nodegroup: GetView,
}

#[derive(Deserialize)]
struct Many {
    nodegroups: Vec<ListView>,
}

pub async fn get(
    client: &ServiceClient,
    ctx: &RequestContext,
    cluster_id: &str,
    nodegroup_id: &str,
) -> Result<(GetView, ResponseResult), Error> {
    let url = client.url(&[CLUSTERS, cluster_id, RESOURCE, nodegroup_id]);
    let (single, result) = client
        .call::<Single>(ctx, HttpMethod::Get, &url, None)
        .await?;
    Ok((single.nodegroup, result))
}

pub async fn list(
    client: &ServiceClient,
    ctx: &RequestContext,
    cluster_id: &str,
) -> Result<(Vec<ListView>, ResponseResult), Error> {
    let url = client.url(&[CLUSTERS, cluster_id, RESOURCE]);
    let (many, result) = client.call::<Many>(ctx, HttpMethod::Get, &url, None).await?;
    Ok((many.nodegroups, result))
}

/// Adds a nodegroup. The API answers `204 No Content`; poll [`get`] or the
/// cluster's tasks for progress.
pub async fn create(
    client: &ServiceClient,
    ctx: &RequestContext,
    cluster_id: &str,
    opts: &CreateOpts,
) -> Result<ResponseResult, Error> {
    let body = encode(&Request { nodegroup: opts })?;
    let url = client.url(&[CLUSTERS, cluster_id, RESOURCE]);
    client.call_empty(ctx, HttpMethod::Post, &url, Some(body)).await
}

pub async fn delete(
    client: &ServiceClient,
    ctx: &RequestContext,
    cluster_id: &str,
    nodegroup_id: &str,
) -> Result<ResponseResult, Error> {
    let url = client.url(&[CLUSTERS, cluster_id, RESOURCE, nodegroup_id]);
    client.call_empty(ctx, HttpMethod::Delete, &url, None).await
}

/// Changes the number of nodes in the group.
pub async fn resize(
    client: &ServiceClient,
    ctx: &RequestContext,
    cluster_id: &str,
    nodegroup_id: &str,
    opts: &ResizeOpts,
) -> Result<ResponseResult, Error> {
    let body = encode(&Request { nodegroup: opts })?;
    let url = client.url(&[CLUSTERS, cluster_id, RESOURCE, nodegroup_id, RESIZE]);
    client.call_empty(ctx, HttpMethod::Post, &url, Some(body)).await
}

pub async fn update(
    client: &ServiceClient,
    ctx: &RequestContext,
    cluster_id: &str,
    nodegroup_id: &str,
    opts: &UpdateOpts,
) -> Result<ResponseResult, Error> {
    let body = encode(&Request { nodegroup: opts })?;
    let url = client.url(&[CLUSTERS, cluster_id, RESOURCE, nodegroup_id]);
    client.call_empty(ctx, HttpMethod::Put, &url, Some(body)).await
}
