//! Values produced by the CLI itself rather than decoded from a response body.

use super::{AppResponse, AppStoreVersionsResponse, Resource, SingleResponse};
use serde::{Deserialize, Serialize};

/// Result of `DELETE /v1/webhooks/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookDeleteResult {
    pub id: String,
    pub deleted: bool,
}

/// Result of removing a beta tester.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BetaTesterDeleteResult {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    pub deleted: bool,
}

/// One app plus its App Store versions, rendered as two tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppOverview {
    pub app: AppResponse,
    pub versions: AppStoreVersionsResponse,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundAssetVersionAppStoreReleaseAttributes {
    pub state: String,
}

pub type BackgroundAssetVersionAppStoreRelease =
    Resource<BackgroundAssetVersionAppStoreReleaseAttributes>;
pub type BackgroundAssetVersionAppStoreReleaseResponse =
    SingleResponse<BackgroundAssetVersionAppStoreReleaseAttributes>;

/// Result of removing an alternative distribution domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlternativeDistributionDomainDeleteResult {
    pub id: String,
    pub deleted: bool,
}
