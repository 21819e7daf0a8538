use super::{Resource, Response, SingleResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserAttributes {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<String>,
    pub all_apps_visible: bool,
    pub provisioning_allowed: bool,
}

pub type User = Resource<UserAttributes>;
pub type UsersResponse = Response<UserAttributes>;
pub type UserResponse = SingleResponse<UserAttributes>;
