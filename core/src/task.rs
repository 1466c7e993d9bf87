//! Asynchronous operations the service runs against a cluster.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ServiceClient;
use crate::context::RequestContext;
use crate::error::Error;
use crate::http::HttpMethod;
use crate::result::ResponseResult;
use crate::wire::wire_enum;

const CLUSTERS: &str = "clusters";
const RESOURCE: &str = "tasks";

wire_enum! {
    /// Progress of a task.
    pub enum Status {
        InProgress => "IN_PROGRESS",
        Done => "DONE",
        Error => "ERROR",
    }
}

wire_enum! {
    /// What a task is doing.
    pub enum Type {
        CreateCluster => "CREATE_CLUSTER",
        DeleteCluster => "DELETE_CLUSTER",
        RotateCerts => "ROTATE_CERTS",
        NodegroupResize => "NODEGROUP_RESIZE",
        NodeReinstall => "NODE_REINSTALL",
        ClusterResize => "CLUSTER_RESIZE",
        UpgradePatchVersion => "UPGRADE_PATCH_VERSION",
        UpgradeMinorVersion => "UPGRADE_MINOR_VERSION",
        UpdateNodegroupLabels => "UPDATE_NODEGROUP_LABELS",
        UpgradeMastersConfiguration => "UPGRADE_MASTERS_CONFIGURATION",
        UpgradeClusterConfiguration => "UPGRADE_CLUSTER_CONFIGURATION",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct View {
    pub id: String,
    pub started_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub cluster_id: String,
    pub status: Status,
    #[serde(rename = "type")]
    pub kind: Type,
}

impl View {
    /// True once the task has stopped, successfully or not.
    pub fn is_finished(&self) -> bool {
        matches!(self.status, Status::Done | Status::Error)
    }
}

#[derive(Deserialize)]
struct Single {
    task: View,
}

#[derive(Deserialize)]
struct Many {
    tasks: Vec<View>,
}

pub async fn get(
    client: &ServiceClient,
    ctx: &RequestContext,
    cluster_id: &str,
    task_id: &str,
) -> Result<(View, ResponseResult), Error> {
    let url = client.url(&[CLUSTERS, cluster_id, RESOURCE, task_id]);
    let (single, result) = client
        .call::<Single>(ctx, HttpMethod::Get, &url, None)
        .await?;
    Ok((single.task, result))
}

pub async fn list(
    client: &ServiceClient,
    ctx: &RequestContext,
    cluster_id: &str,
) -> Result<(Vec<View>, ResponseResult), Error> {
    let url = client.url(&[CLUSTERS, cluster_id, RESOURCE]);
    let (many, result) = client.call::<Many>(ctx, HttpMethod::Get, &url, None).await?;
    Ok((many.tasks, result))
}
