use super::headers;
use crate::output::format::{compact_whitespace, or_dash};
use crate::output::registry::{Headers, OutputRegistry, Rows};
use crate::types::{BundleIdAttributes, CertificateAttributes, ProfileAttributes, Response};

pub fn register(registry: &mut OutputRegistry) {
    registry.register_rows_with_single_resource_adapter::<BundleIdAttributes, _>(bundle_id_rows);
    registry.register_rows_with_single_resource_adapter::<CertificateAttributes, _>(certificate_rows);
    registry.register_rows_with_single_resource_adapter::<ProfileAttributes, _>(profile_rows);
}

pub fn bundle_id_rows(response: &Response<BundleIdAttributes>) -> (Headers, Rows) {
    let rows = response
        .data
        .iter()
        .map(|bundle| {
            let attrs = &bundle.attributes;
            vec![
                bundle.id.clone(),
                compact_whitespace(&attrs.name),
                attrs.identifier.clone(),
                attrs.platform.clone(),
                or_dash(attrs.seed_id.as_deref()),
            ]
        })
        .collect();
    (
        headers(&["ID", "Name", "Identifier", "Platform", "Seed ID"]),
        rows,
    )
}

pub fn certificate_rows(response: &Response<CertificateAttributes>) -> (Headers, Rows) {
    let rows = response
        .data
        .iter()
        .map(|cert| {
            let attrs = &cert.attributes;
            let name = if attrs.display_name.is_empty() {
                &attrs.name
            } else {
                &attrs.display_name
            };
            vec![
                cert.id.clone(),
                compact_whitespace(name),
                attrs.certificate_type.clone(),
                attrs.serial_number.clone(),
                attrs.expiration_date.clone(),
            ]
        })
        .collect();
    (
        headers(&["ID", "Name", "Type", "Serial", "Expires"]),
        rows,
    )
}

pub fn profile_rows(response: &Response<ProfileAttributes>) -> (Headers, Rows) {
    let rows = response
        .data
        .iter()
        .map(|profile| {
            let attrs = &profile.attributes;
            vec![
                profile.id.clone(),
                compact_whitespace(&attrs.name),
                attrs.profile_type.clone(),
                attrs.profile_state.clone(),
                attrs.expiration_date.clone(),
            ]
        })
        .collect();
    (
        headers(&["ID", "Name", "Type", "State", "Expires"]),
        rows,
    )
}
