//! Integration tests for the pagination engine against scripted fetchers.

use asc::client::RequestContext;
use asc::pagination::{paginate_all, paginate_all_as, PaginatedResponse};
use asc::types::{
    App, AppAttributes, AppsResponse, BetaGroup, BetaGroupAttributes, BetaGroupsResponse, Links,
};
use asc::ApiError;
use futures::future::{ready, Ready};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

type FetchResult = Result<Box<dyn PaginatedResponse>, ApiError>;

fn apps_page(group: usize, count: usize, next: &str) -> AppsResponse {
    let data = (0..count)
        .map(|i| {
            App::new(
                "apps",
                format!("group-{}-{}", group, i),
                AppAttributes {
                    name: format!("App {}.{}", group, i),
                    ..AppAttributes::default()
                },
            )
        })
        .collect();
    AppsResponse::new(data, Links::with_next(next))
}

/// Serves pages keyed by cursor and records every cursor it was asked for.
#[derive(Clone, Default)]
struct ScriptedFetcher {
    pages: Rc<RefCell<HashMap<String, FetchPage>>>,
    calls: Rc<RefCell<Vec<String>>>,
}

#[derive(Clone)]
enum FetchPage {
    Apps(AppsResponse),
    Groups(BetaGroupsResponse),
    Fail(String),
}

impl ScriptedFetcher {
    fn serve(&self, cursor: &str, page: FetchPage) {
        self.pages.borrow_mut().insert(cursor.to_string(), page);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn fetch_fn(&self) -> impl FnMut(RequestContext, String) -> Ready<FetchResult> {
        let fetcher = self.clone();
        move |_ctx, next| {
            fetcher.calls.borrow_mut().push(next.clone());
            let page = fetcher.pages.borrow().get(&next).cloned();
            ready(match page {
                Some(FetchPage::Apps(page)) => Ok(Box::new(page) as Box<dyn PaginatedResponse>),
                Some(FetchPage::Groups(page)) => Ok(Box::new(page) as Box<dyn PaginatedResponse>),
                Some(FetchPage::Fail(message)) => Err(ApiError::Transport(message)),
                None => Err(ApiError::InvalidArgument(format!("unscripted cursor {}", next))),
            })
        }
    }
}

fn ids(response: &AppsResponse) -> Vec<String> {
    response.data.iter().map(|app| app.id.clone()).collect()
}

#[tokio::test]
async fn test_single_page_walk_never_fetches() {
    let fetcher = ScriptedFetcher::default();
    let ctx = RequestContext::new();

    let outcome = paginate_all_as(&ctx, Some(apps_page(1, 3, "")), fetcher.fetch_fn()).await;

    assert!(outcome.is_complete());
    assert_eq!(outcome.value.data.len(), 3);
    assert!(fetcher.calls().is_empty());
}

#[tokio::test]
async fn test_three_page_walk_concatenates_in_order() {
    let fetcher = ScriptedFetcher::default();
    fetcher.serve("page=2", FetchPage::Apps(apps_page(2, 2, "page=3")));
    fetcher.serve("page=3", FetchPage::Apps(apps_page(3, 2, "")));
    let ctx = RequestContext::new();

    let outcome = paginate_all_as(&ctx, Some(apps_page(1, 2, "page=2")), fetcher.fetch_fn()).await;
    let value = outcome.into_result().unwrap();

    let ids = ids(&value);
    assert_eq!(ids.len(), 6);
    assert_eq!(ids.first().map(String::as_str), Some("group-1-0"));
    assert_eq!(ids.last().map(String::as_str), Some("group-3-1"));
    assert_eq!(fetcher.calls(), vec!["page=2", "page=3"]);
}

#[tokio::test]
async fn test_failure_on_page_three_keeps_earlier_pages() {
    let fetcher = ScriptedFetcher::default();
    fetcher.serve("page=2", FetchPage::Apps(apps_page(2, 2, "page=3")));
    fetcher.serve("page=3", FetchPage::Fail("connection reset".to_string()));
    fetcher.serve("page=4", FetchPage::Apps(apps_page(4, 2, "page=5")));
    fetcher.serve("page=5", FetchPage::Apps(apps_page(5, 2, "")));
    let ctx = RequestContext::new();

    let outcome = paginate_all_as(&ctx, Some(apps_page(1, 2, "page=2")), fetcher.fetch_fn()).await;

    let err = outcome.error.as_ref().expect("walk should fail");
    assert_eq!(err.page, 3);
    assert!(err.to_string().contains("page 3"));
    assert!(matches!(err.fetch_error(), Some(ApiError::Transport(_))));
    assert_eq!(outcome.value.data.len(), 4);
    assert_eq!(fetcher.calls(), vec!["page=2", "page=3"]);
}

#[tokio::test]
async fn test_cycle_is_reported_as_repeated_url() {
    let fetcher = ScriptedFetcher::default();
    fetcher.serve("page=1", FetchPage::Apps(apps_page(2, 1, "page=1")));
    let ctx = RequestContext::new();

    let outcome = paginate_all_as(&ctx, Some(apps_page(1, 1, "page=1")), fetcher.fetch_fn()).await;

    let err = outcome.error.expect("cycle should stop the walk");
    assert!(err.is_repeated_url());
    assert_eq!(outcome.value.data.len(), 2);
    assert_eq!(fetcher.calls(), vec!["page=1"]);
}

#[tokio::test]
async fn test_type_mismatch_keeps_first_page() {
    let fetcher = ScriptedFetcher::default();
    fetcher.serve(
        "page=2",
        FetchPage::Groups(BetaGroupsResponse::new(
            vec![BetaGroup::new("betaGroups", "g-1", BetaGroupAttributes::default())],
            Links::default(),
        )),
    );
    let ctx = RequestContext::new();

    let outcome = paginate_all_as(&ctx, Some(apps_page(1, 2, "page=2")), fetcher.fetch_fn()).await;

    let err = outcome.error.expect("mismatch should stop the walk");
    assert!(err.to_string().contains("unexpected response type"));
    assert_eq!(err.page, 2);
    assert_eq!(ids(&outcome.value), vec!["group-1-0", "group-1-1"]);
}

#[tokio::test]
async fn test_absent_first_page_yields_empty_result() {
    let fetcher = ScriptedFetcher::default();
    let ctx = RequestContext::new();

    let outcome = paginate_all_as::<AppsResponse, _, _>(&ctx, None, fetcher.fetch_fn()).await;

    assert!(outcome.is_complete());
    assert!(outcome.value.data.is_empty());
    assert!(fetcher.calls().is_empty());
}

#[tokio::test]
async fn test_type_erased_walk_returns_first_page_type() {
    let fetcher = ScriptedFetcher::default();
    fetcher.serve("page=2", FetchPage::Apps(apps_page(2, 3, "")));
    let ctx = RequestContext::new();

    let first: Box<dyn PaginatedResponse> = Box::new(apps_page(1, 1, "page=2"));
    let pagination = paginate_all(&ctx, Some(first), fetcher.fetch_fn()).await;
    assert!(pagination.is_complete());

    let result = pagination.into_result().unwrap().expect("result present");
    assert_eq!(result.data_len(), 4);
    let apps = result
        .into_any()
        .downcast::<AppsResponse>()
        .expect("result keeps the first page's type");
    assert_eq!(apps.data[3].id, "group-2-2");
}

#[tokio::test]
async fn test_fetcher_receives_caller_context() {
    let ctx = RequestContext::new();
    let seen_cancelled = Rc::new(RefCell::new(None));
    let seen = seen_cancelled.clone();
    let parent = ctx.clone();

    let fetch = move |page_ctx: RequestContext, _next: String| {
        parent.cancel();
        *seen.borrow_mut() = Some(page_ctx.is_cancelled());
        ready(Err::<Box<dyn PaginatedResponse>, _>(ApiError::Cancelled))
    };

    let outcome = paginate_all_as(&ctx, Some(apps_page(1, 1, "page=2")), fetch).await;

    assert_eq!(*seen_cancelled.borrow(), Some(true));
    let err = outcome.error.expect("fetch error propagates");
    assert!(matches!(err.fetch_error(), Some(ApiError::Cancelled)));
    assert_eq!(outcome.value.data.len(), 1);
}
