//! Relationship documents and small results that reduce to an id.

use super::headers;
use crate::output::adapters::{id_deleted_rows, id_state_rows};
use crate::output::registry::{Headers, OutputRegistry, Rows};
use crate::types::{
    AlternativeDistributionDomainDeleteResult, AppStoreVersionSubmissionLinkageResponse,
    BackgroundAssetVersionAppStoreReleaseResponse, BuildAppLinkageResponse,
    BuildPreReleaseVersionLinkageResponse, LinkagesResponse,
};

pub fn register(registry: &mut OutputRegistry) {
    registry.register_rows(linkage_rows);
    registry.register_single_linkage_rows::<BuildAppLinkageResponse>();
    registry.register_single_linkage_rows::<AppStoreVersionSubmissionLinkageResponse>();
    registry.register_single_linkage_rows::<BuildPreReleaseVersionLinkageResponse>();
    registry.register_id_state_rows(
        |release: &BackgroundAssetVersionAppStoreReleaseResponse| {
            (release.data.id.clone(), release.data.attributes.state.clone())
        },
        id_state_rows,
    );
    registry.register_id_bool_rows(
        |result: &AlternativeDistributionDomainDeleteResult| (result.id.clone(), result.deleted),
        id_deleted_rows,
    );
}

pub fn linkage_rows(response: &LinkagesResponse) -> (Headers, Rows) {
    let rows = response
        .data
        .iter()
        .map(|item| vec![item.resource_type.clone(), item.id.clone()])
        .collect();
    (headers(&["Type", "ID"]), rows)
}
