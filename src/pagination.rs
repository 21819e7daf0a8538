//! Pagination engine
//!
//! Follows `links.next` cursors from a first page until the listing is exhausted,
//! concatenating each page's `data` into one result of the first page's concrete
//! type. The engine does no I/O itself: every page after the first comes from the
//! injected `fetch_next` function, which receives the caller's [`RequestContext`]
//! so cancellation and deadlines apply to each fetch.
//!
//! Failures never discard work already done. [`Pagination`] and
//! [`PaginationOutcome`] always carry the partial result next to the error.

use crate::client::urls::redact_url;
use crate::client::RequestContext;
use crate::error::{AggregateError, ApiError, PageErrorKind, PaginationError};
use crate::output::Renderable;
use crate::types::{Links, LinkagesResponse, PreReleaseVersionsResponse, Response};
use serde::Serialize;
use std::any::{Any, TypeId};
use std::collections::HashSet;
use std::future::Future;
use tracing::debug;

/// One page of a listing endpoint.
pub trait PaginatedResponse: Renderable + Send + Sync {
    /// Navigation links; `None` means there are no further pages.
    fn links(&self) -> Option<&Links>;

    /// The `data` member, type-erased.
    fn data_any(&self) -> &dyn Any;

    /// Number of items in `data`.
    fn data_len(&self) -> usize {
        0
    }

    /// A zero-valued instance of the same concrete type.
    fn empty_clone(&self) -> Box<dyn PaginatedResponse>;

    /// Consume `page` and append its `data` to `self`.
    fn aggregate_from(&mut self, _page: Box<dyn PaginatedResponse>) -> Result<(), AggregateError> {
        Err(AggregateError::MissingData {
            type_name: self.response_type(),
        })
    }

    fn response_type(&self) -> &'static str {
        self.type_name()
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn as_renderable(&self) -> &dyn Renderable;
}

impl<A> PaginatedResponse for Response<A>
where
    A: Serialize + Send + Sync + 'static,
{
    fn links(&self) -> Option<&Links> {
        Some(&self.links)
    }

    fn data_any(&self) -> &dyn Any {
        &self.data
    }

    fn data_len(&self) -> usize {
        self.data.len()
    }

    fn empty_clone(&self) -> Box<dyn PaginatedResponse> {
        Box::new(Self::default())
    }

    fn aggregate_from(&mut self, page: Box<dyn PaginatedResponse>) -> Result<(), AggregateError> {
        let page_type = page.response_type();
        let page = page
            .into_any()
            .downcast::<Self>()
            .map_err(|_| AggregateError::TypeMismatch {
                page: page_type,
                result: std::any::type_name::<Self>(),
            })?;
        self.data.extend(page.data);
        Ok(())
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn as_renderable(&self) -> &dyn Renderable {
        self
    }
}

/// Implements [`PaginatedResponse`] for list structs with `data: Vec<_>` and
/// `links: Links` fields.
macro_rules! impl_paginated_response {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl PaginatedResponse for $ty {
                fn links(&self) -> Option<&Links> {
                    Some(&self.links)
                }

                fn data_any(&self) -> &dyn Any {
                    &self.data
                }

                fn data_len(&self) -> usize {
                    self.data.len()
                }

                fn empty_clone(&self) -> Box<dyn PaginatedResponse> {
                    Box::new(<$ty>::default())
                }

                fn aggregate_from(
                    &mut self,
                    page: Box<dyn PaginatedResponse>,
                ) -> Result<(), AggregateError> {
                    let page_type = page.response_type();
                    let page = page.into_any().downcast::<$ty>().map_err(|_| {
                        AggregateError::TypeMismatch {
                            page: page_type,
                            result: std::any::type_name::<$ty>(),
                        }
                    })?;
                    self.data.extend(page.data);
                    Ok(())
                }

                fn into_any(self: Box<Self>) -> Box<dyn Any> {
                    self
                }

                fn as_renderable(&self) -> &dyn Renderable {
                    self
                }
            }
        )+
    };
}

impl_paginated_response!(LinkagesResponse, PreReleaseVersionsResponse);

/// Result of a type-erased walk: the aggregate so far plus the error that stopped it.
pub struct Pagination {
    pub result: Option<Box<dyn PaginatedResponse>>,
    pub error: Option<PaginationError>,
}

impl Pagination {
    fn complete(result: Box<dyn PaginatedResponse>) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    fn failed(result: Box<dyn PaginatedResponse>, error: PaginationError) -> Self {
        Self {
            result: Some(result),
            error: Some(error),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Drop the partial result when the walk failed.
    pub fn into_result(self) -> Result<Option<Box<dyn PaginatedResponse>>, PaginationError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.result),
        }
    }
}

impl std::fmt::Debug for Pagination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pagination")
            .field("result", &self.result.as_ref().map(|r| r.response_type()))
            .field("items", &self.result.as_ref().map(|r| r.data_len()))
            .field("error", &self.error)
            .finish()
    }
}

/// Typed result of [`paginate_all_as`].
#[derive(Debug)]
pub struct PaginationOutcome<R> {
    pub value: R,
    pub error: Option<PaginationError>,
}

impl<R> PaginationOutcome<R> {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<R, PaginationError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.value),
        }
    }
}

fn concrete_type(page: &dyn PaginatedResponse) -> TypeId {
    page.as_any().type_id()
}

/// Walk every page starting at `first_page`.
///
/// `fetch_next` is called with a clone of `ctx` and the raw `next` cursor of the
/// previous page. It is never called when the first page has no `next` link.
pub async fn paginate_all<F, Fut>(
    ctx: &RequestContext,
    first_page: Option<Box<dyn PaginatedResponse>>,
    mut fetch_next: F,
) -> Pagination
where
    F: FnMut(RequestContext, String) -> Fut,
    Fut: Future<Output = Result<Box<dyn PaginatedResponse>, ApiError>>,
{
    let Some(mut current) = first_page else {
        return Pagination {
            result: None,
            error: None,
        };
    };

    let expected = concrete_type(current.as_ref());
    let expected_name = current.response_type();
    let mut result = current.empty_clone();
    let mut seen: HashSet<String> = HashSet::new();
    let mut page = 1usize;

    loop {
        let next = current
            .links()
            .and_then(Links::next_cursor)
            .map(str::to_owned);
        let items = current.data_len();

        if let Err(err) = result.aggregate_from(current) {
            return Pagination::failed(result, PaginationError::new(page, err.into()));
        }
        debug!(page, items, total = result.data_len(), "Aggregated page");

        let Some(next) = next else {
            break;
        };

        if !seen.insert(next.clone()) {
            debug!(page, next = %redact_url(&next), "Pagination cursor repeated");
            return Pagination::failed(
                result,
                PaginationError::new(page + 1, PageErrorKind::RepeatedPaginationUrl),
            );
        }

        page += 1;
        debug!(page, next = %redact_url(&next), "Fetching next page");

        let fetched = match fetch_next(ctx.clone(), next).await {
            Ok(fetched) => fetched,
            Err(err) => {
                return Pagination::failed(
                    result,
                    PaginationError::new(page, PageErrorKind::Fetch(Box::new(err))),
                );
            }
        };

        if concrete_type(fetched.as_ref()) != expected {
            return Pagination::failed(
                result,
                PaginationError::new(
                    page,
                    PageErrorKind::UnexpectedResponseType {
                        expected: expected_name,
                        got: fetched.response_type(),
                    },
                ),
            );
        }

        current = fetched;
    }

    Pagination::complete(result)
}

/// Typed wrapper over [`paginate_all`].
///
/// `first_page = None` yields `R::default()` without calling `fetch_next`.
pub async fn paginate_all_as<R, F, Fut>(
    ctx: &RequestContext,
    first_page: Option<R>,
    fetch_next: F,
) -> PaginationOutcome<R>
where
    R: PaginatedResponse + Default + 'static,
    F: FnMut(RequestContext, String) -> Fut,
    Fut: Future<Output = Result<Box<dyn PaginatedResponse>, ApiError>>,
{
    let Some(first_page) = first_page else {
        return PaginationOutcome {
            value: R::default(),
            error: None,
        };
    };

    let Pagination { result, error } = paginate_all(ctx, Some(Box::new(first_page)), fetch_next).await;

    match result.map(|result| result.into_any().downcast::<R>()) {
        Some(Ok(value)) => PaginationOutcome {
            value: *value,
            error,
        },
        _ => PaginationOutcome {
            value: R::default(),
            error: error.or_else(|| {
                Some(PaginationError::new(
                    1,
                    PageErrorKind::UnexpectedResponseType {
                        expected: std::any::type_name::<R>(),
                        got: "unknown",
                    },
                ))
            }),
        },
    }
}
