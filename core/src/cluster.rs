//! Clusters: create, inspect, update, delete, and the cluster-level actions
//! (certificate rotation, Kubernetes upgrades, kubeconfig download).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{encode, ServiceClient};
use crate::context::RequestContext;
use crate::error::{Error, ExtractError};
use crate::http::HttpMethod;
use crate::nodegroup;
use crate::result::ResponseResult;
use crate::wire::wire_enum;

const RESOURCE: &str = "clusters";
const KUBECONFIG: &str = "kubeconfig";
const ROTATE_CERTS: &str = "rotate-certs";
const UPGRADE_PATCH_VERSION: &str = "upgrade-patch-version";
const UPGRADE_MINOR_VERSION: &str = "upgrade-minor-version";

wire_enum! {
    /// Current status of a cluster as reported by the API.
    pub enum Status {
        Active => "ACTIVE",
        PendingCreate => "PENDING_CREATE",
        PendingUpdate => "PENDING_UPDATE",
        PendingUpgrade => "PENDING_UPGRADE",
        PendingRotateCerts => "PENDING_ROTATE_CERTS",
        PendingDelete => "PENDING_DELETE",
        PendingResize => "PENDING_RESIZE",
        PendingNodeReinstall => "PENDING_NODE_REINSTALL",
        PendingUpgradePatchVersion => "PENDING_UPGRADE_PATCH_VERSION",
        PendingUpgradeMinorVersion => "PENDING_UPGRADE_MINOR_VERSION",
        PendingUpdateNodegroup => "PENDING_UPDATE_NODEGROUP",
        PendingUpgradeMastersConfiguration => "PENDING_UPGRADE_MASTERS_CONFIGURATION",
        PendingUpgradeClusterConfiguration => "PENDING_UPGRADE_CLUSTER_CONFIGURATION",
        Maintenance => "MAINTENANCE",
        Error => "ERROR",
    }
}

/// A cluster as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct View {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub name: String,
    pub status: Status,
    pub project_id: String,
    pub network_id: String,
    pub subnet_id: String,
    pub kube_api_ip: String,
    pub kube_version: String,
    pub region: String,
    pub additional_software: Option<serde_json::Map<String, serde_json::Value>>,
    pub pki_tree_updated_at: Option<DateTime<Utc>>,
    /// UTC time in `hh:mm:ss` at which maintenance may start.
    pub maintenance_window_start: String,
    pub maintenance_window_end: String,
    pub maintenance_last_start: Option<DateTime<Utc>>,
    /// Whether unhealthy worker nodes are reinstalled automatically.
    pub enable_autorepair: bool,
    pub enable_patch_version_auto_upgrade: bool,
    pub zonal: bool,
    pub kubernetes_options: Option<KubernetesOptions>,
}

/// Kubernetes-level settings of a cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KubernetesOptions {
    pub enable_pod_security_policy: bool,
    pub feature_gates: Vec<String>,
    pub admission_controllers: Vec<String>,
}

/// Options for [`create`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateOpts {
    pub name: String,
    pub kube_version: String,
    pub region: String,
    pub nodegroups: Vec<nodegroup::CreateOpts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_window_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_autorepair: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_patch_version_auto_upgrade: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zonal: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes_options: Option<KubernetesOptions>,
}

/// Options for [`update`]. Unset fields are left unchanged by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateOpts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_window_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_autorepair: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_patch_version_auto_upgrade: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes_options: Option<KubernetesOptions>,
}

/// Connection details pulled out of a kubeconfig, plus the kubeconfig itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKubeconfig {
    pub cluster_ca: String,
    pub server: String,
    pub client_cert: String,
    pub client_key: String,
    pub raw_config: String,
}

#[derive(Serialize)]
struct Request<'a, T> {
    cluster: &'a T,
}

#[derive(Deserialize)]
struct Single {
    cluster: View,
}

#[derive(Deserialize)]
struct Many {
    clusters: Vec<View>,
}

pub async fn get(
    client: &ServiceClient,
    ctx: &RequestContext,
    cluster_id: &str,
) -> Result<(View, ResponseResult), Error> {
    let url = client.url(&[RESOURCE, cluster_id]);
    let (single, result) = client
        .call::<Single>(ctx, HttpMethod::Get, &url, None)
        .await?;
    Ok((single.cluster, result))
}

pub async fn list(
    client: &ServiceClient,
    ctx: &RequestContext,
) -> Result<(Vec<View>, ResponseResult), Error> {
    let url = client.url(&[RESOURCE]);
    let (many, result) = client.call::<Many>(ctx, HttpMethod::Get, &url, None).await?;
    Ok((many.clusters, result))
}

pub async fn create(
    client: &ServiceClient,
    ctx: &RequestContext,
    opts: &CreateOpts,
) -> Result<(View, ResponseResult), Error> {
    let body = encode(&Request { cluster: opts })?;
    let url = client.url(&[RESOURCE]);
    let (single, result) = client
        .call::<Single>(ctx, HttpMethod::Post, &url, Some(body))
        .await?;
    Ok((single.cluster, result))
}

pub async fn update(
    client: &ServiceClient,
    ctx: &RequestContext,
    cluster_id: &str,
    opts: &UpdateOpts,
) -> Result<(View, ResponseResult), Error> {
    let body = encode(&Request { cluster: opts })?;
    let url = client.url(&[RESOURCE, cluster_id]);
    let (single, result) = client
        .call::<Single>(ctx, HttpMethod::Put, &url, Some(body))
        .await?;
    Ok((single.cluster, result))
}

pub async fn delete(
    client: &ServiceClient,
    ctx: &RequestContext,
    cluster_id: &str,
) -> Result<ResponseResult, Error> {
    let url = client.url(&[RESOURCE, cluster_id]);
    client.call_empty(ctx, HttpMethod::Delete, &url, None).await
}

/// Downloads the cluster's kubeconfig as raw bytes.
pub async fn get_kubeconfig(
    client: &ServiceClient,
    ctx: &RequestContext,
    cluster_id: &str,
) -> Result<(Vec<u8>, ResponseResult), Error> {
    let url = client.url(&[RESOURCE, cluster_id, KUBECONFIG]);
    let (raw, result) = client.call_raw(ctx, HttpMethod::Get, &url).await?;
    Ok((raw.to_vec(), result))
}

/// Downloads the kubeconfig and extracts the CA, server address, and client
/// credentials from it. A kubeconfig that is not valid UTF-8 is a decode
/// error.
pub async fn get_parsed_kubeconfig(
    client: &ServiceClient,
    ctx: &RequestContext,
    cluster_id: &str,
) -> Result<(ParsedKubeconfig, ResponseResult), Error> {
    let (raw, result) = get_kubeconfig(client, ctx, cluster_id).await?;
    decode_kubeconfig(raw, result)
}

fn decode_kubeconfig(
    raw: Vec<u8>,
    result: ResponseResult,
) -> Result<(ParsedKubeconfig, ResponseResult), Error> {
    let raw_config = match String::from_utf8(raw) {
        Ok(raw_config) => raw_config,
        Err(err) => {
            return Err(Error::Decode {
                source: ExtractError::Utf8(err),
                result: Box::new(result),
            })
        }
    };

    match parse_kubeconfig(raw_config) {
        Ok(parsed) => Ok((parsed, result)),
        Err(KubeconfigFieldError::Missing(field)) => Err(Error::KubeconfigFieldMissing {
            field,
            result: Box::new(result),
        }),
        Err(KubeconfigFieldError::Invalid(field)) => Err(Error::KubeconfigFieldInvalid {
            field,
            result: Box::new(result),
        }),
    }
}

pub async fn rotate_certs(
    client: &ServiceClient,
    ctx: &RequestContext,
    cluster_id: &str,
) -> Result<ResponseResult, Error> {
    let url = client.url(&[RESOURCE, cluster_id, ROTATE_CERTS]);
    client.call_empty(ctx, HttpMethod::Post, &url, None).await
}

pub async fn upgrade_patch_version(
    client: &ServiceClient,
    ctx: &RequestContext,
    cluster_id: &str,
) -> Result<(View, ResponseResult), Error> {
    let url = client.url(&[RESOURCE, cluster_id, UPGRADE_PATCH_VERSION]);
    let (single, result) = client
        .call::<Single>(ctx, HttpMethod::Post, &url, None)
        .await?;
    Ok((single.cluster, result))
}

pub async fn upgrade_minor_version(
    client: &ServiceClient,
    ctx: &RequestContext,
    cluster_id: &str,
) -> Result<(View, ResponseResult), Error> {
    let url = client.url(&[RESOURCE, cluster_id, UPGRADE_MINOR_VERSION]);
    let (single, result) = client
        .call::<Single>(ctx, HttpMethod::Post, &url, None)
        .await?;
    Ok((single.cluster, result))
}

#[derive(Debug, PartialEq, Eq)]
enum KubeconfigFieldError {
    Missing(&'static str),
    Invalid(&'static str),
}

/// Returns the value after the first occurrence of `field`, i.e. the second
/// space-separated token on that line.
fn kubeconfig_field(kubeconfig: &str, field: &'static str) -> Result<String, KubeconfigFieldError> {
    let start = kubeconfig
        .find(field)
        .ok_or(KubeconfigFieldError::Missing(field))?;
    let line = kubeconfig[start..].lines().next().unwrap_or_default();

    line.split(' ')
        .nth(1)
        .map(str::to_string)
        .ok_or(KubeconfigFieldError::Invalid(field))
}

fn parse_kubeconfig(raw_config: String) -> Result<ParsedKubeconfig, KubeconfigFieldError> {
    Ok(ParsedKubeconfig {
        cluster_ca: kubeconfig_field(&raw_config, "certificate-authority-data")?,
        server: kubeconfig_field(&raw_config, "server")?,
        client_cert: kubeconfig_field(&raw_config, "client-certificate-data")?,
        client_key: kubeconfig_field(&raw_config, "client-key-data")?,
        raw_config,
    })
}
