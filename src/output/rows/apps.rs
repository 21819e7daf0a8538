use super::headers;
use crate::error::OutputError;
use crate::output::format::compact_whitespace;
use crate::output::registry::{Headers, OutputRegistry, RenderFn, Rows};
use crate::types::{
    AppAttributes, AppOverview, AppStoreVersionAttributes, AppsResponse, Response,
};

pub fn register(registry: &mut OutputRegistry) {
    registry.register_rows_with_single_resource_adapter::<AppAttributes, _>(app_rows);
    registry.register_rows_with_single_resource_adapter::<AppStoreVersionAttributes, _>(version_rows);
    registry.register_direct(overview);
}

pub fn app_rows(response: &AppsResponse) -> (Headers, Rows) {
    let rows = response
        .data
        .iter()
        .map(|app| {
            let attrs = &app.attributes;
            vec![
                app.id.clone(),
                compact_whitespace(&attrs.name),
                attrs.bundle_id.clone(),
                attrs.sku.clone(),
                attrs.primary_locale.clone(),
            ]
        })
        .collect();
    (
        headers(&["ID", "Name", "Bundle ID", "SKU", "Primary Locale"]),
        rows,
    )
}

pub fn version_rows(response: &Response<AppStoreVersionAttributes>) -> (Headers, Rows) {
    let rows = response
        .data
        .iter()
        .map(|version| {
            let attrs = &version.attributes;
            vec![
                version.id.clone(),
                attrs.version_string.clone(),
                attrs.platform.clone(),
                attrs.app_store_state.clone(),
                attrs.release_type.clone(),
                attrs.created_date.clone(),
            ]
        })
        .collect();
    (
        headers(&["ID", "Version", "Platform", "State", "Release Type", "Created"]),
        rows,
    )
}

fn overview(value: &AppOverview, render: &mut RenderFn<'_>) -> Result<(), OutputError> {
    let app = AppsResponse::new(vec![value.app.data.clone()], value.app.links.clone());
    let (headers, rows) = app_rows(&app);
    render(&headers, &rows);

    let (headers, rows) = version_rows(&value.versions);
    render(&headers, &rows);
    Ok(())
}
