//! Relationship linkage documents and resource type names.

use super::{Links, ListResource, SingleResource};
use serde::{Deserialize, Serialize};

/// Resource type strings used in `type` members.
pub mod resource_type {
    pub const APPS: &str = "apps";
    pub const APP_STORE_VERSIONS: &str = "appStoreVersions";
    pub const APP_STORE_VERSION_SUBMISSIONS: &str = "appStoreVersionSubmissions";
    pub const BUILDS: &str = "builds";
    pub const PRE_RELEASE_VERSIONS: &str = "preReleaseVersions";
    pub const BETA_GROUPS: &str = "betaGroups";
    pub const BETA_TESTERS: &str = "betaTesters";
    pub const BUNDLE_IDS: &str = "bundleIds";
    pub const CERTIFICATES: &str = "certificates";
    pub const PROFILES: &str = "profiles";
    pub const USERS: &str = "users";
    pub const CUSTOMER_REVIEWS: &str = "customerReviews";
    pub const WEBHOOKS: &str = "webhooks";
    pub const WEBHOOK_DELIVERIES: &str = "webhookDeliveries";
}

/// Resource identifier object: a `{type, id}` reference with no attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
}

impl ResourceData {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }
}

/// To-many relationship document (`/relationships/...` endpoints).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkagesResponse {
    #[serde(default)]
    pub data: Vec<ResourceData>,
    #[serde(default)]
    pub links: Links,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl ListResource for LinkagesResponse {
    type Item = ResourceData;

    fn from_items(items: Vec<ResourceData>, links: Option<Links>) -> Self {
        Self {
            data: items,
            links: links.unwrap_or_default(),
            meta: None,
        }
    }
}

macro_rules! single_linkage_response {
    ($($(#[$doc:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
            pub struct $name {
                pub data: ResourceData,
                #[serde(default)]
                pub links: Links,
            }

            impl SingleResource for $name {
                type Data = ResourceData;

                fn data(&self) -> &ResourceData {
                    &self.data
                }

                fn resource_links(&self) -> Option<&Links> {
                    Some(&self.links)
                }
            }
        )+
    };
}

single_linkage_response! {
    /// `GET /v1/builds/{id}/relationships/app`
    BuildAppLinkageResponse,
    /// `GET /v1/appStoreVersions/{id}/relationships/appStoreVersionSubmission`
    AppStoreVersionSubmissionLinkageResponse,
    /// `GET /v1/builds/{id}/relationships/preReleaseVersion`
    BuildPreReleaseVersionLinkageResponse,
}
