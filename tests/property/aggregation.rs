//! Aggregation properties for arbitrary page layouts

use asc::client::RequestContext;
use asc::pagination::{paginate_all_as, PaginatedResponse};
use asc::types::{App, AppAttributes, AppsResponse, Links};
use asc::ApiError;
use futures::executor::block_on;
use futures::future::ready;
use proptest::prelude::*;

fn page(index: usize, size: usize, next: &str) -> AppsResponse {
    let data = (0..size)
        .map(|i| App::new("apps", format!("{}-{}", index, i), AppAttributes::default()))
        .collect();
    AppsResponse::new(data, Links::with_next(next))
}

fn cursor(index: usize, total: usize) -> String {
    if index + 1 < total {
        format!("page={}", index + 1)
    } else {
        String::new()
    }
}

/// Walking k pages yields every item exactly once, in page order.
#[test]
fn test_aggregation_preserves_count_and_order() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::vec(0usize..6, 1..8), |sizes| {
            let pages: Vec<AppsResponse> = sizes
                .iter()
                .enumerate()
                .map(|(i, &size)| page(i, size, &cursor(i, sizes.len())))
                .collect();
            let first = pages[0].clone();
            let rest = pages.clone();

            let fetch = move |_ctx: RequestContext, next: String| {
                let index: usize = next.trim_start_matches("page=").parse().unwrap_or(0);
                ready(
                    rest.get(index)
                        .cloned()
                        .map(|p| Box::new(p) as Box<dyn PaginatedResponse>)
                        .ok_or(ApiError::InvalidArgument(next)),
                )
            };

            let ctx = RequestContext::new();
            let value = block_on(paginate_all_as(&ctx, Some(first), fetch))
                .into_result()
                .unwrap();

            let expected: Vec<String> = pages
                .iter()
                .flat_map(|p| p.data.iter().map(|app| app.id.clone()))
                .collect();
            let actual: Vec<String> = value.data.iter().map(|app| app.id.clone()).collect();
            assert_eq!(actual.len(), sizes.iter().sum::<usize>());
            assert_eq!(actual, expected);

            Ok(())
        })
        .unwrap();
}

/// A page whose `next` points back at itself always stops with a repeated-URL error.
#[test]
fn test_self_cycle_always_detected() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&("[a-z]{1,12}", 1usize..4), |(next, size)| {
            let looping = page(1, size, &next);
            let fetch = move |_ctx: RequestContext, _next: String| {
                ready(Ok::<Box<dyn PaginatedResponse>, ApiError>(Box::new(looping.clone())))
            };

            let ctx = RequestContext::new();
            let outcome = block_on(paginate_all_as(&ctx, Some(page(0, size, &next)), fetch));

            let err = outcome.error.expect("cycle must be reported");
            assert!(err.is_repeated_url());
            assert_eq!(err.page, 3);
            assert_eq!(outcome.value.data.len(), size * 2);

            Ok(())
        })
        .unwrap();
}
