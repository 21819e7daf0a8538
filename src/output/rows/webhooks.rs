use super::headers;
use crate::output::adapters::id_deleted_rows;
use crate::output::format::{compact_whitespace, or_dash};
use crate::output::registry::{Headers, OutputRegistry, Rows};
use crate::types::{Response, WebhookAttributes, WebhookDeleteResult, WebhookDeliveryAttributes};

pub fn register(registry: &mut OutputRegistry) {
    registry.register_rows_with_single_resource_adapter::<WebhookAttributes, _>(webhook_rows);
    registry.register_rows(delivery_rows);
    registry.register_id_bool_rows(
        |result: &WebhookDeleteResult| (result.id.clone(), result.deleted),
        id_deleted_rows,
    );
}

pub fn webhook_rows(response: &Response<WebhookAttributes>) -> (Headers, Rows) {
    let rows = response
        .data
        .iter()
        .map(|webhook| {
            let attrs = &webhook.attributes;
            vec![
                webhook.id.clone(),
                compact_whitespace(&attrs.name),
                attrs.enabled.to_string(),
                attrs.url.clone(),
                attrs.event_types.join(", "),
            ]
        })
        .collect();
    (
        headers(&["ID", "Name", "Enabled", "URL", "Events"]),
        rows,
    )
}

pub fn delivery_rows(response: &Response<WebhookDeliveryAttributes>) -> (Headers, Rows) {
    let rows = response
        .data
        .iter()
        .map(|delivery| {
            let attrs = &delivery.attributes;
            vec![
                delivery.id.clone(),
                attrs.delivery_state.clone(),
                attrs.created_date.clone(),
                or_dash(attrs.sent_date.as_deref()),
                compact_whitespace(&or_dash(attrs.error_message.as_deref())),
            ]
        })
        .collect();
    (
        headers(&["ID", "State", "Created", "Sent", "Error"]),
        rows,
    )
}
