//! Builds, pre-release versions, beta groups, and beta testers.

use super::{Links, ListResource, Resource, Response, SingleResource, SingleResponse};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildAttributes {
    pub version: String,
    pub uploaded_date: String,
    pub expiration_date: String,
    pub expired: bool,
    pub min_os_version: String,
    pub processing_state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses_non_exempt_encryption: Option<bool>,
}

pub type Build = Resource<BuildAttributes>;
pub type BuildsResponse = Response<BuildAttributes>;
pub type BuildResponse = SingleResponse<BuildAttributes>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreReleaseVersionAttributes {
    pub version: String,
    pub platform: String,
}

pub type PreReleaseVersion = Resource<PreReleaseVersionAttributes>;

/// `GET /v1/preReleaseVersions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreReleaseVersionsResponse {
    #[serde(default)]
    pub data: Vec<PreReleaseVersion>,
    #[serde(default)]
    pub links: Links,
}

/// `GET /v1/preReleaseVersions/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreReleaseVersionResponse {
    pub data: PreReleaseVersion,
    #[serde(default)]
    pub links: Links,
}

impl SingleResource for PreReleaseVersionResponse {
    type Data = PreReleaseVersion;

    fn data(&self) -> &PreReleaseVersion {
        &self.data
    }

    fn resource_links(&self) -> Option<&Links> {
        Some(&self.links)
    }
}

impl ListResource for PreReleaseVersionsResponse {
    type Item = PreReleaseVersion;

    fn from_items(items: Vec<PreReleaseVersion>, links: Option<Links>) -> Self {
        Self {
            data: items,
            links: links.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BetaGroupAttributes {
    pub name: String,
    pub created_date: String,
    pub is_internal_group: bool,
    pub public_link_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_link_limit: Option<u32>,
}

pub type BetaGroup = Resource<BetaGroupAttributes>;
pub type BetaGroupsResponse = Response<BetaGroupAttributes>;
pub type BetaGroupResponse = SingleResponse<BetaGroupAttributes>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BetaTesterAttributes {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub invite_type: String,
    pub state: String,
}

pub type BetaTester = Resource<BetaTesterAttributes>;
pub type BetaTestersResponse = Response<BetaTesterAttributes>;
pub type BetaTesterResponse = SingleResponse<BetaTesterAttributes>;

/// Metric documents carry free-form attribute maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BetaGroupMetricAttributes(pub BTreeMap<String, serde_json::Value>);

pub type BetaGroupMetricsResponse = Response<BetaGroupMetricAttributes>;
