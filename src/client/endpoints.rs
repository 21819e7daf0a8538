//! Endpoint paths used by the CLI.

use crate::error::ApiError;
use url::Url;

/// A path under the API base URL plus fixed query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl Endpoint {
    pub fn new(segments: &[&str]) -> Self {
        Self {
            segments: segments.iter().map(|s| s.to_string()).collect(),
            query: Vec::new(),
        }
    }

    /// Add a JSON:API `filter[field]=value` parameter.
    pub fn filter(self, field: &str, value: impl Into<String>) -> Self {
        self.query(&format!("filter[{}]", field), value)
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// `/v1/apps/123` style path, for logs and messages.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Full URL under `base`, with `limit` appended when set.
    pub fn url(&self, base: &Url, limit: Option<u32>) -> Result<Url, ApiError> {
        let mut url = base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(format!("cannot use {} as a base URL", base)))?;
            path.pop_if_empty();
            for segment in &self.segments {
                path.push(segment);
            }
        }

        if !self.query.is_empty() || limit.is_some() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
            if let Some(limit) = limit {
                pairs.append_pair("limit", &limit.to_string());
            }
        }
        Ok(url)
    }
}

pub fn apps() -> Endpoint {
    Endpoint::new(&["v1", "apps"])
}

pub fn app(app_id: &str) -> Endpoint {
    Endpoint::new(&["v1", "apps", app_id])
}

pub fn app_store_versions(app_id: &str) -> Endpoint {
    Endpoint::new(&["v1", "apps", app_id, "appStoreVersions"])
}

pub fn builds(app_id: &str) -> Endpoint {
    Endpoint::new(&["v1", "builds"]).filter("app", app_id)
}

pub fn build_app_linkage(build_id: &str) -> Endpoint {
    Endpoint::new(&["v1", "builds", build_id, "relationships", "app"])
}

pub fn pre_release_versions(app_id: &str) -> Endpoint {
    Endpoint::new(&["v1", "preReleaseVersions"]).filter("app", app_id)
}

pub fn beta_groups(app_id: &str) -> Endpoint {
    Endpoint::new(&["v1", "betaGroups"]).filter("app", app_id)
}

pub fn beta_group_metrics(group_id: &str) -> Endpoint {
    Endpoint::new(&["v1", "betaGroups", group_id, "metrics", "publicLinkUsages"])
}

pub fn app_beta_group_linkages(app_id: &str) -> Endpoint {
    Endpoint::new(&["v1", "apps", app_id, "relationships", "betaGroups"])
}

pub fn beta_testers(app_id: &str) -> Endpoint {
    Endpoint::new(&["v1", "betaTesters"]).filter("apps", app_id)
}

pub fn beta_tester(tester_id: &str) -> Endpoint {
    Endpoint::new(&["v1", "betaTesters", tester_id])
}

pub fn bundle_ids() -> Endpoint {
    Endpoint::new(&["v1", "bundleIds"])
}

pub fn certificates() -> Endpoint {
    Endpoint::new(&["v1", "certificates"])
}

pub fn profiles() -> Endpoint {
    Endpoint::new(&["v1", "profiles"])
}

pub fn users() -> Endpoint {
    Endpoint::new(&["v1", "users"])
}

pub fn customer_reviews(app_id: &str) -> Endpoint {
    Endpoint::new(&["v1", "apps", app_id, "customerReviews"])
}

pub fn webhooks(app_id: &str) -> Endpoint {
    Endpoint::new(&["v1", "apps", app_id, "webhooks"])
}

pub fn webhook(webhook_id: &str) -> Endpoint {
    Endpoint::new(&["v1", "webhooks", webhook_id])
}

pub fn webhook_deliveries(webhook_id: &str) -> Endpoint {
    Endpoint::new(&["v1", "webhooks", webhook_id, "deliveries"])
}
