//! Merge rules: defaults, override order, conflict handling.
//!
//! Later sources win key by key: defaults, then the config file, then `ASC_*`
//! environment overrides.

use crate::client::urls::DEFAULT_API_HOST;
use crate::client::DEFAULT_BASE_URL;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("http.base_url", DEFAULT_BASE_URL)?
        .set_default("http.timeout_secs", 30i64)?
        .set_default("http.allowed_hosts", vec![DEFAULT_API_HOST])?
        .set_default("output.default_format", "json")?
        .set_default("logging.enabled", false)?
        .set_default("logging.level", "info")
}
