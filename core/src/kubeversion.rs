//! Kubernetes versions a cluster can be created with.

use serde::{Deserialize, Serialize};

use crate::client::ServiceClient;
use crate::context::RequestContext;
use crate::error::Error;
use crate::http::HttpMethod;
use crate::result::ResponseResult;

const RESOURCE: &str = "kube_versions";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    pub version: String,
    pub is_default: bool,
}

#[derive(Deserialize)]
struct Many {
    kube_versions: Vec<View>,
}

pub async fn list(
    client: &ServiceClient,
    ctx: &RequestContext,
) -> Result<(Vec<View>, ResponseResult), Error> {
    let url = client.url(&[RESOURCE]);
    let (many, result) = client.call::<Many>(ctx, HttpMethod::Get, &url, None).await?;
    Ok((many.kube_versions, result))
}

/// Picks the version flagged as default, if any.
pub fn default_version(versions: &[View]) -> Option<&View> {
    versions.iter().find(|version| version.is_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_and_finds_default() {
        let raw = r#"{"kube_versions":[
            {"is_default": true, "version": "1.15.10"},
            {"is_default": false, "version": "1.15.7"}
        ]}"#;
        let versions = serde_json::from_str::<Many>(raw).unwrap().kube_versions;
        assert_eq!(versions.len(), 2);
        assert_eq!(default_version(&versions).unwrap().version, "1.15.10");
    }

    #[test]
    fn missing_field_fails_decode() {
        let raw = r#"{"kube_versions":[{"version": "1.15.10"}]}"#;
        assert!(serde_json::from_str::<Many>(raw).is_err());
    }
}
