use super::{Resource, Response, SingleResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BundleIdAttributes {
    pub name: String,
    pub identifier: String,
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_id: Option<String>,
}

pub type BundleId = Resource<BundleIdAttributes>;
pub type BundleIdsResponse = Response<BundleIdAttributes>;
pub type BundleIdResponse = SingleResponse<BundleIdAttributes>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificateAttributes {
    pub name: String,
    pub certificate_type: String,
    pub display_name: String,
    pub serial_number: String,
    pub platform: String,
    pub expiration_date: String,
}

pub type Certificate = Resource<CertificateAttributes>;
pub type CertificatesResponse = Response<CertificateAttributes>;
pub type CertificateResponse = SingleResponse<CertificateAttributes>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileAttributes {
    pub name: String,
    pub platform: String,
    pub profile_type: String,
    pub profile_state: String,
    pub uuid: String,
    pub expiration_date: String,
}

pub type Profile = Resource<ProfileAttributes>;
pub type ProfilesResponse = Response<ProfileAttributes>;
pub type ProfileResponse = SingleResponse<ProfileAttributes>;
