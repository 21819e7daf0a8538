//! Configuration System
//!
//! Layered configuration: merge-policy defaults, then the global config file, then
//! `ASC_*` environment variables. Credentials can live at the top level (`[auth]`)
//! or in named profiles (`[profiles.<name>]`) selected with `profile` or
//! `ASC_PROFILE`.

use crate::client::urls::DEFAULT_API_HOST;
use crate::client::DEFAULT_BASE_URL;
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::env::parse_timeout;

const MASK: &str = "********";

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AscConfig {
    /// Name of the profile in `profiles` to use for credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Credentials used when no profile is selected
    #[serde(default)]
    pub auth: AuthConfig,

    /// Named credential sets
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub profiles: BTreeMap<String, AuthConfig>,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API key or bearer token credentials
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer_id: Option<String>,

    /// Path to the `.p8` key downloaded from App Store Connect
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key_path: Option<PathBuf>,

    /// Inline key contents, PEM or bare base64
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,

    /// Pre-signed token, used as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
}

impl AuthConfig {
    /// Fill unset fields from `fallback`.
    fn or(mut self, fallback: &AuthConfig) -> AuthConfig {
        self.key_id = self.key_id.or_else(|| fallback.key_id.clone());
        self.issuer_id = self.issuer_id.or_else(|| fallback.issuer_id.clone());
        self.private_key_path = self
            .private_key_path
            .or_else(|| fallback.private_key_path.clone());
        self.private_key = self.private_key.or_else(|| fallback.private_key.clone());
        self.bearer_token = self.bearer_token.or_else(|| fallback.bearer_token.clone());
        self
    }

    fn masked(&self) -> AuthConfig {
        AuthConfig {
            private_key: self.private_key.as_ref().map(|_| MASK.to_string()),
            bearer_token: self.bearer_token.as_ref().map(|_| MASK.to_string()),
            ..self.clone()
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.bearer_token.is_some() {
            return Ok(());
        }
        match (&self.key_id, &self.issuer_id) {
            (Some(_), None) => Err("key_id is set but issuer_id is missing".to_string()),
            (None, Some(_)) => Err("issuer_id is set but key_id is missing".to_string()),
            _ => Ok(()),
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Hosts that `links.next` cursors may point at, besides the base URL host
    #[serde(default = "default_allowed_hosts")]
    pub allowed_hosts: Vec<String>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_allowed_hosts() -> Vec<String> {
    vec![DEFAULT_API_HOST.to_string()]
}

fn default_user_agent() -> String {
    format!("asc/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            allowed_hosts: default_allowed_hosts(),
            user_agent: default_user_agent(),
        }
    }
}

/// Output defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Format used when a command gets no `--output`
    #[serde(default = "default_output_format")]
    pub default_format: String,
}

fn default_output_format() -> String {
    "json".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: default_output_format(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Profile(String, String),
    Http(String),
    Output(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Profile(name, msg) => write!(f, "Profile '{}': {}", name, msg),
            ValidationError::Http(msg) => write!(f, "HTTP: {}", msg),
            ValidationError::Output(msg) => write!(f, "Output: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl AscConfig {
    /// Credentials for the selected profile.
    ///
    /// Profile fields win; anything the profile leaves unset comes from `[auth]`
    /// and the `ASC_*` credential variables.
    pub fn active_auth(&self) -> Result<AuthConfig, ApiError> {
        match self.profile.as_deref().filter(|p| !p.trim().is_empty()) {
            None => Ok(self.auth.clone()),
            Some(name) => self
                .profiles
                .get(name)
                .map(|profile| profile.clone().or(&self.auth))
                .ok_or_else(|| ApiError::ConfigError(format!("unknown profile '{}'", name))),
        }
    }

    /// Output format used when a command does not pass `--output`.
    pub fn default_output_format(&self) -> Result<OutputFormat, ApiError> {
        Ok(self.output.default_format.parse::<OutputFormat>()?)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Some(name) = self.profile.as_deref().filter(|p| !p.trim().is_empty()) {
            if !self.profiles.contains_key(name) {
                errors.push(ValidationError::Profile(
                    name.to_string(),
                    "not defined under [profiles]".to_string(),
                ));
            }
        }
        if let Err(e) = self.auth.validate() {
            errors.push(ValidationError::Profile("default".to_string(), e));
        }
        for (name, profile) in &self.profiles {
            if let Err(e) = profile.validate() {
                errors.push(ValidationError::Profile(name.clone(), e));
            }
        }

        match url::Url::parse(&self.http.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::Http(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            ))),
            Err(e) => errors.push(ValidationError::Http(format!(
                "invalid base_url '{}': {}",
                self.http.base_url, e
            ))),
        }
        if self.http.timeout_secs == 0 {
            errors.push(ValidationError::Http("timeout_secs must be greater than 0".to_string()));
        }

        if let Err(e) = self.output.default_format.parse::<OutputFormat>() {
            errors.push(ValidationError::Output(e.to_string()));
        }

        if !matches!(self.logging.format.as_str(), "json" | "text") {
            errors.push(ValidationError::Logging(format!(
                "format must be 'json' or 'text', got '{}'",
                self.logging.format
            )));
        }
        if !matches!(self.logging.output.as_str(), "stderr" | "file") {
            errors.push(ValidationError::Logging(format!(
                "output must be 'stderr' or 'file', got '{}'",
                self.logging.output
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Copy with inline keys and bearer tokens masked, for display.
    pub fn redacted(&self) -> AscConfig {
        AscConfig {
            auth: self.auth.masked(),
            profiles: self
                .profiles
                .iter()
                .map(|(name, profile)| (name.clone(), profile.masked()))
                .collect(),
            ..self.clone()
        }
    }

    /// Effective configuration as TOML with secrets masked.
    pub fn to_toml(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(&self.redacted())
            .map_err(|e| ApiError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Starter config file: defaults as TOML under a comment header.
    pub fn template() -> Result<String, ApiError> {
        let mut config = AscConfig::default();
        config.auth = AuthConfig {
            key_id: Some("ABC123DEFG".to_string()),
            issuer_id: Some("00000000-0000-0000-0000-000000000000".to_string()),
            private_key_path: Some(PathBuf::from("~/.appstoreconnect/AuthKey_ABC123DEFG.p8")),
            private_key: None,
            bearer_token: None,
        };
        let body = toml::to_string_pretty(&config)
            .map_err(|e| ApiError::ConfigError(format!("Failed to serialize config: {}", e)))?;
        Ok(format!(
            "# asc configuration\n\
             #\n\
             # Values here are overridden by ASC_* environment variables.\n\
             # Replace the placeholder credentials with your API key details.\n\
             \n{}",
            body
        ))
    }
}

/// Collapse validation errors into one config error.
pub fn validation_failed(errors: &[ValidationError]) -> ApiError {
    let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    ApiError::ConfigError(format!(
        "Configuration validation failed:\n{}",
        error_msgs.join("\n")
    ))
}
