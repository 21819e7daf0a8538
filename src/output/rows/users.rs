use super::headers;
use crate::output::format::full_name;
use crate::output::registry::{Headers, OutputRegistry, Rows};
use crate::types::{Response, UserAttributes};

pub fn register(registry: &mut OutputRegistry) {
    registry.register_rows_with_single_resource_adapter::<UserAttributes, _>(user_rows);
}

pub fn user_rows(response: &Response<UserAttributes>) -> (Headers, Rows) {
    let rows = response
        .data
        .iter()
        .map(|user| {
            let attrs = &user.attributes;
            vec![
                user.id.clone(),
                attrs.username.clone(),
                full_name(&attrs.first_name, &attrs.last_name),
                attrs.roles.join(", "),
                attrs.all_apps_visible.to_string(),
            ]
        })
        .collect();
    (
        headers(&["ID", "Username", "Name", "Roles", "All Apps"]),
        rows,
    )
}
