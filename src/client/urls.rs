//! Pagination cursor validation and URL redaction for logs.

use crate::error::ApiError;
use url::Url;

/// Host App Store Connect serves the API from.
pub const DEFAULT_API_HOST: &str = "api.appstoreconnect.apple.com";

const SENSITIVE_QUERY_KEYS: &[&str] = &[
    "x-amz-signature",
    "x-amz-credential",
    "x-amz-algorithm",
    "x-amz-signedheaders",
    "x-amz-security-token",
    "signature",
    "key-pair-id",
    "policy",
    "sig",
    "token",
    "access_token",
    "id_token",
    "refresh_token",
];

fn is_loopback(host: &str) -> bool {
    matches!(host, "localhost" | "127.0.0.1" | "::1" | "[::1]")
}

/// Resolve a `links.next` cursor against `base` and check it is safe to follow.
///
/// Relative cursors are joined to `base`. Absolute cursors must use https (plain
/// http only for loopback hosts) and point at `base`'s host or one of
/// `allowed_hosts`.
pub fn validate_next_url(base: &Url, allowed_hosts: &[String], next: &str) -> Result<Url, ApiError> {
    let next = next.trim();
    if next.is_empty() {
        return Err(ApiError::InvalidUrl("empty pagination URL".to_string()));
    }

    let url = match Url::parse(next) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => base
            .join(next)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", redact_url(next), e)))?,
        Err(e) => {
            return Err(ApiError::InvalidUrl(format!("{}: {}", redact_url(next), e)));
        }
    };

    let disallowed = |reason: &str| ApiError::DisallowedUrl {
        url: redact_url(url.as_str()),
        reason: reason.to_string(),
    };

    let host = url.host_str().ok_or_else(|| disallowed("missing host"))?;
    match url.scheme() {
        "https" => {}
        "http" if is_loopback(host) => {}
        _ => return Err(disallowed("scheme must be https")),
    }

    let base_host = base.host_str().unwrap_or_default();
    let allowed = host.eq_ignore_ascii_case(base_host)
        || allowed_hosts.iter().any(|h| host.eq_ignore_ascii_case(h));
    if !allowed {
        return Err(disallowed("host is not allowed"));
    }

    Ok(url)
}

/// Mask credentials and signed query parameters so a URL can be logged.
pub fn redact_url(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return raw.to_string();
    };

    if !url.username().is_empty() || url.password().is_some() {
        let _ = url.set_username("redacted");
        let _ = url.set_password(None);
    }

    if url.query().is_none() {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let sensitive = SENSITIVE_QUERY_KEYS
                .iter()
                .any(|k| key.eq_ignore_ascii_case(k));
            let value = if sensitive {
                "REDACTED".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();
    url.query_pairs_mut().clear().extend_pairs(pairs);
    url.to_string()
}
