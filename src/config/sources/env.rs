//! `ASC_*` environment overrides.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;

/// Environment variable to config key.
const STRING_OVERRIDES: &[(&str, &str)] = &[
    ("ASC_KEY_ID", "auth.key_id"),
    ("ASC_ISSUER_ID", "auth.issuer_id"),
    ("ASC_PRIVATE_KEY_PATH", "auth.private_key_path"),
    ("ASC_PRIVATE_KEY", "auth.private_key"),
    ("ASC_BEARER_TOKEN", "auth.bearer_token"),
    ("ASC_DEFAULT_OUTPUT", "output.default_format"),
    ("ASC_BASE_URL", "http.base_url"),
    ("ASC_PROFILE", "profile"),
];

fn var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "api"
    )
}

/// Parse `ASC_TIMEOUT`: plain seconds, or a number with an `s` or `m` suffix.
pub fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    let raw = raw.trim();
    let (digits, scale) = if let Some(minutes) = raw.strip_suffix('m') {
        (minutes, 60)
    } else if let Some(seconds) = raw.strip_suffix('s') {
        (seconds, 1)
    } else {
        (raw, 1)
    };

    match digits.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(value * scale),
        _ => Err(ConfigError::Message(format!(
            "invalid ASC_TIMEOUT '{}': expected seconds like 30 or 30s",
            raw
        ))),
    }
}

/// Apply environment overrides on top of file and default sources.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    for (name, key) in STRING_OVERRIDES {
        builder = builder.set_override_option(*key, var(name))?;
    }

    if let Some(raw) = var("ASC_TIMEOUT") {
        let secs = parse_timeout(&raw)?;
        builder = builder.set_override("http.timeout_secs", secs as i64)?;
    }

    if var("ASC_DEBUG").map(|v| is_truthy(&v)).unwrap_or(false) {
        builder = builder
            .set_override("logging.enabled", true)?
            .set_override("logging.level", "debug")?;
    }

    Ok(builder)
}
