//! HTTP client for the App Store Connect API.
//!
//! Every call takes a [`RequestContext`] so the CLI can cancel in-flight requests
//! on Ctrl-C and bound the whole command with a deadline.

pub mod auth;
pub mod context;
pub mod endpoints;
pub mod urls;

pub use auth::TokenSource;
pub use context::RequestContext;
pub use endpoints::Endpoint;

use crate::config::{AscConfig, HttpConfig};
use crate::error::ApiError;
use crate::pagination::{paginate_all_as, PaginatedResponse, PaginationOutcome};
use futures::future::{BoxFuture, FutureExt};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;
use urls::{redact_url, validate_next_url};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.appstoreconnect.apple.com/";

/// Paging options for list calls.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Page size (`limit` query parameter).
    pub limit: Option<u32>,
    /// Resume from a `links.next` cursor instead of the first page.
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ErrorEntry {
    code: Option<String>,
    title: Option<String>,
    detail: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AscClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: Arc<TokenSource>,
    allowed_hosts: Arc<Vec<String>>,
}

impl AscClient {
    pub fn new(http: &HttpConfig, tokens: TokenSource) -> Result<Self, ApiError> {
        let base_url = parse_base_url(&http.base_url)?;
        let client = reqwest::Client::builder()
            .user_agent(http.user_agent.clone())
            .timeout(Duration::from_secs(http.timeout_secs.max(1)))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http: client,
            base_url,
            tokens: Arc::new(tokens),
            allowed_hosts: Arc::new(http.allowed_hosts.clone()),
        })
    }

    /// Client for the active profile's credentials.
    pub fn from_config(config: &AscConfig) -> Result<Self, ApiError> {
        let tokens = TokenSource::from_config(&config.active_auth()?)?;
        Self::new(&config.http, tokens)
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_static_token(mut self, token: impl Into<String>) -> Self {
        self.tokens = Arc::new(TokenSource::static_token(token));
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET a path or absolute URL and decode the JSON body.
    ///
    /// Absolute URLs go through the same host and scheme checks as pagination
    /// cursors.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        path_or_url: &str,
    ) -> Result<T, ApiError> {
        let url = validate_next_url(&self.base_url, &self.allowed_hosts, path_or_url)?;
        self.get_url(ctx, url).await
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        endpoint: &Endpoint,
    ) -> Result<T, ApiError> {
        let url = endpoint.url(&self.base_url, None)?;
        self.get_url(ctx, url).await
    }

    /// One page of a list endpoint, or the page at `options.next`.
    pub async fn list<R: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        endpoint: &Endpoint,
        options: &ListOptions,
    ) -> Result<R, ApiError> {
        match options.next.as_deref() {
            Some(next) => self.get_json(ctx, next).await,
            None => {
                let url = endpoint.url(&self.base_url, options.limit)?;
                self.get_url(ctx, url).await
            }
        }
    }

    /// Every page of a list endpoint.
    ///
    /// A failure on the first page is returned as an error. Later failures come
    /// back in the outcome beside the pages aggregated so far.
    pub async fn list_all<R>(
        &self,
        ctx: &RequestContext,
        endpoint: &Endpoint,
        options: &ListOptions,
    ) -> Result<PaginationOutcome<R>, ApiError>
    where
        R: PaginatedResponse + DeserializeOwned + Default + 'static,
    {
        let first: R = self.list(ctx, endpoint, options).await?;
        Ok(paginate_all_as(ctx, Some(first), self.fetch_page::<R>()).await)
    }

    pub async fn delete(&self, ctx: &RequestContext, endpoint: &Endpoint) -> Result<(), ApiError> {
        let url = endpoint.url(&self.base_url, None)?;
        self.send(ctx, Method::DELETE, url).await.map(|_| ())
    }

    /// Fetch function for [`crate::pagination::paginate_all`], decoding each page as `R`.
    pub fn fetch_page<R>(
        &self,
    ) -> impl FnMut(RequestContext, String) -> BoxFuture<'static, Result<Box<dyn PaginatedResponse>, ApiError>>
    where
        R: PaginatedResponse + DeserializeOwned + 'static,
    {
        let client = self.clone();
        move |ctx, next| {
            let client = client.clone();
            async move {
                let page: R = client.get_json(&ctx, &next).await?;
                Ok(Box::new(page) as Box<dyn PaginatedResponse>)
            }
            .boxed()
        }
    }

    async fn get_url<T: DeserializeOwned>(&self, ctx: &RequestContext, url: Url) -> Result<T, ApiError> {
        let body = self.send(ctx, Method::GET, url).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send(&self, ctx: &RequestContext, method: Method, url: Url) -> Result<String, ApiError> {
        let bearer = self.tokens.bearer()?;
        let redacted = redact_url(url.as_str());
        debug!(method = %method, url = %redacted, "Sending request");

        let request = self.http.request(method.clone(), url).bearer_auth(bearer);
        let started = Instant::now();
        let (status, body) = ctx
            .run(async move {
                let response = request.send().await.map_err(transport_error)?;
                let status = response.status();
                let body = response.text().await.map_err(transport_error)?;
                Ok((status, body))
            })
            .await?;

        debug!(
            method = %method,
            url = %redacted,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Received response"
        );

        if !status.is_success() {
            let err = status_error(status, &body);
            warn!(url = %redacted, error = %err, "Request failed");
            return Err(err);
        }
        Ok(body)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let raw = raw.trim();
    let raw = if raw.is_empty() { DEFAULT_BASE_URL } else { raw };
    let mut url = Url::parse(raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::DeadlineExceeded
    } else {
        ApiError::Transport(err.to_string())
    }
}

fn status_error(status: StatusCode, body: &str) -> ApiError {
    let entry = serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .and_then(|payload| payload.errors.into_iter().next());

    let (code, message) = match entry {
        Some(entry) => {
            let message = match (entry.title, entry.detail) {
                (Some(title), Some(detail)) => format!("{}: {}", title, detail),
                (Some(text), None) | (None, Some(text)) => text,
                (None, None) => status.canonical_reason().unwrap_or("request failed").to_string(),
            };
            (entry.code, message)
        }
        None => {
            let trimmed = body.trim();
            let message = if trimmed.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                trimmed.chars().take(200).collect()
            };
            (None, message)
        }
    };

    ApiError::Status {
        status: status.as_u16(),
        code,
        message,
    }
}
