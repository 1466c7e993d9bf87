//! Feature gates and admission controllers available per Kubernetes minor
//! version.

use serde::{Deserialize, Serialize};

use crate::client::ServiceClient;
use crate::context::RequestContext;
use crate::error::Error;
use crate::http::HttpMethod;
use crate::result::ResponseResult;

const FEATURE_GATES: &str = "feature-gates";
const ADMISSION_CONTROLLERS: &str = "admission-controllers";

/// Option names supported by one Kubernetes minor version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    /// Minor version in `X.Y` form.
    #[serde(rename = "KubeVersionMinor")]
    pub kube_version: String,
    #[serde(rename = "Names", default)]
    pub names: Vec<String>,
}

#[derive(Deserialize)]
struct FeatureGates {
    feature_gates: Vec<View>,
}

#[derive(Deserialize)]
struct AdmissionControllers {
    admission_controllers: Vec<View>,
}

pub async fn list_feature_gates(
    client: &ServiceClient,
    ctx: &RequestContext,
) -> Result<(Vec<View>, ResponseResult), Error> {
    let url = client.url(&[FEATURE_GATES]);
    let (body, result) = client
        .call::<FeatureGates>(ctx, HttpMethod::Get, &url, None)
        .await?;
    Ok((body.feature_gates, result))
}

pub async fn list_admission_controllers(
    client: &ServiceClient,
    ctx: &RequestContext,
) -> Result<(Vec<View>, ResponseResult), Error> {
    let url = client.url(&[ADMISSION_CONTROLLERS]);
    let (body, result) = client
        .call::<AdmissionControllers>(ctx, HttpMethod::Get, &url, None)
        .await?;
    Ok((body.admission_controllers, result))
}
