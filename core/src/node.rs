//! Worker nodes inside a nodegroup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ServiceClient;
use crate::context::RequestContext;
use crate::error::Error;
use crate::http::HttpMethod;
use crate::result::ResponseResult;

const CLUSTERS: &str = "clusters";
const NODEGROUPS: &str = "nodegroups";
const REINSTALL: &str = "reinstall";

/// A single worker node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct View {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub hostname: String,
    pub ip: String,
    pub nodegroup_id: String,
    /// Identifier of the backing compute instance.
    pub os_server_id: String,
}

#[derive(Deserialize)]
struct Single {
    node: View,
}

pub async fn get(
    client: &ServiceClient,
    ctx: &RequestContext,
    cluster_id: &str,
    nodegroup_id: &str,
    node_id: &str,
) -> Result<(View, ResponseResult), Error> {
    let url = client.url(&[CLUSTERS, cluster_id, NODEGROUPS, nodegroup_id, node_id]);
    let (single, result) = client
        .call::<Single>(ctx, HttpMethod::Get, &url, None)
        .await?;
    Ok((single.node, result))
}

/// Reinstalls the node's operating system and Kubernetes components.
pub async fn reinstall(
    client: &ServiceClient,
    ctx: &RequestContext,
    cluster_id: &str,
    nodegroup_id: &str,
    node_id: &str,
) -> Result<ResponseResult, Error> {
    let url = client.url(&[
        CLUSTERS,
        cluster_id,
        NODEGROUPS,
        nodegroup_id,
        node_id,
        REINSTALL,
    ]);
    client.call_empty(ctx, HttpMethod::Post, &url, None).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_node_envelope() {
        let raw = r#"{
            "node": {
                "created_at": "2020-02-25T08:49:21.780542Z",
                "hostname": "test-cluster-node-gap1g",
                "id": "203d0f8c-547d-48a7-98ed-3075254b8d4a",
                "ip": "198.51.100.11",
                "nodegroup_id": "f174b65d-442a-4423-aaf7-5654789b8a9d",
                "os_server_id": "dc56abe9-d0d4-4099-9b5f-e5cabfccf276",
                "updated_at": "2020-02-25T08:49:21.780542Z"
            }
        }"#;
        let single: Single = serde_json::from_str(raw).unwrap();
        let node = single.node;
        assert_eq!(node.id, "203d0f8c-547d-48a7-98ed-3075254b8d4a");
        assert_eq!(node.hostname, "test-cluster-node-gap1g");
        assert_eq!(node.created_at, node.updated_at);
        assert_eq!(
            node.created_at.unwrap().to_rfc3339(),
            "2020-02-25T08:49:21.780542+00:00"
        );
    }

    #[test]
    fn trailing_comma_is_rejected() {
        let raw = r#"{"node":{"id":"203d0f8c-547d-48a7-98ed-3075254b8d4a",}}"#;
        assert!(serde_json::from_str::<Single>(raw).is_err());
    }
}
