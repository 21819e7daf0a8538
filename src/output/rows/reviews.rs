use super::headers;
use crate::output::format::compact_whitespace;
use crate::output::registry::{Headers, OutputRegistry, Rows};
use crate::types::{CustomerReviewAttributes, Response};

pub fn register(registry: &mut OutputRegistry) {
    registry.register_rows_with_single_resource_adapter::<CustomerReviewAttributes, _>(review_rows);
}

/// Review bodies are multi-line free text; they are compacted to one line per row.
pub fn review_rows(response: &Response<CustomerReviewAttributes>) -> (Headers, Rows) {
    let rows = response
        .data
        .iter()
        .map(|review| {
            let attrs = &review.attributes;
            vec![
                review.id.clone(),
                attrs.rating.to_string(),
                compact_whitespace(&attrs.title),
                compact_whitespace(&attrs.body),
                attrs.reviewer_nickname.clone(),
                attrs.territory.clone(),
                attrs.created_date.clone(),
            ]
        })
        .collect();
    (
        headers(&["ID", "Rating", "Title", "Body", "Reviewer", "Territory", "Created"]),
        rows,
    )
}
