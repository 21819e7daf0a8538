use super::headers;
use crate::output::adapters::id_deleted_rows;
use crate::output::format::{compact_whitespace, full_name, or_dash};
use crate::output::registry::{Headers, OutputRegistry, Rows};
use crate::types::{
    BetaGroupAttributes, BetaGroupMetricAttributes, BetaTesterAttributes, BetaTesterDeleteResult,
    BuildAttributes, PreReleaseVersionResponse, PreReleaseVersionsResponse, Response,
};

pub fn register(registry: &mut OutputRegistry) {
    registry.register_rows_with_single_resource_adapter::<BuildAttributes, _>(build_rows);
    registry.register_rows_with_single_to_list_adapter::<
        PreReleaseVersionResponse,
        PreReleaseVersionsResponse,
        _,
    >(pre_release_version_rows);
    registry.register_rows_with_single_resource_adapter::<BetaGroupAttributes, _>(beta_group_rows);
    registry.register_rows_with_single_resource_adapter::<BetaTesterAttributes, _>(beta_tester_rows);
    registry.register_rows(beta_tester_delete_rows);
    registry.register_response_data_rows::<BetaGroupMetricAttributes>();
}

pub fn build_rows(response: &Response<BuildAttributes>) -> (Headers, Rows) {
    let rows = response
        .data
        .iter()
        .map(|build| {
            let attrs = &build.attributes;
            vec![
                build.id.clone(),
                attrs.version.clone(),
                attrs.uploaded_date.clone(),
                attrs.processing_state.clone(),
                attrs.expired.to_string(),
                attrs.min_os_version.clone(),
            ]
        })
        .collect();
    (
        headers(&["ID", "Version", "Uploaded", "Processing", "Expired", "Min OS"]),
        rows,
    )
}

pub fn pre_release_version_rows(response: &PreReleaseVersionsResponse) -> (Headers, Rows) {
    let rows = response
        .data
        .iter()
        .map(|version| {
            vec![
                version.id.clone(),
                version.attributes.version.clone(),
                version.attributes.platform.clone(),
            ]
        })
        .collect();
    (headers(&["ID", "Version", "Platform"]), rows)
}

pub fn beta_group_rows(response: &Response<BetaGroupAttributes>) -> (Headers, Rows) {
    let rows = response
        .data
        .iter()
        .map(|group| {
            let attrs = &group.attributes;
            vec![
                group.id.clone(),
                compact_whitespace(&attrs.name),
                attrs.is_internal_group.to_string(),
                attrs.public_link_enabled.to_string(),
                or_dash(attrs.public_link.as_deref()),
            ]
        })
        .collect();
    (
        headers(&["ID", "Name", "Internal", "Public Link Enabled", "Public Link"]),
        rows,
    )
}

pub fn beta_tester_rows(response: &Response<BetaTesterAttributes>) -> (Headers, Rows) {
    let rows = response
        .data
        .iter()
        .map(|tester| {
            let attrs = &tester.attributes;
            vec![
                tester.id.clone(),
                or_dash(Some(full_name(&attrs.first_name, &attrs.last_name).as_str())),
                attrs.email.clone(),
                attrs.state.clone(),
                attrs.invite_type.clone(),
            ]
        })
        .collect();
    (
        headers(&["ID", "Name", "Email", "State", "Invite Type"]),
        rows,
    )
}

fn beta_tester_delete_rows(result: &BetaTesterDeleteResult) -> (Headers, Rows) {
    if result.email.is_empty() {
        return id_deleted_rows(&result.id, result.deleted);
    }
    (
        headers(&["ID", "Email", "Deleted"]),
        vec![vec![
            result.id.clone(),
            result.email.clone(),
            result.deleted.to_string(),
        ]],
    )
}
