use super::{Resource, Response, SingleResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppAttributes {
    pub name: String,
    pub bundle_id: String,
    pub sku: String,
    pub primary_locale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_rights_declaration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppStoreVersionAttributes {
    pub platform: String,
    pub version_string: String,
    pub app_store_state: String,
    pub release_type: String,
    pub created_date: String,
}

pub type App = Resource<AppAttributes>;
pub type AppsResponse = Response<AppAttributes>;
pub type AppResponse = SingleResponse<AppAttributes>;

pub type AppStoreVersion = Resource<AppStoreVersionAttributes>;
pub type AppStoreVersionsResponse = Response<AppStoreVersionAttributes>;
pub type AppStoreVersionResponse = SingleResponse<AppStoreVersionAttributes>;
