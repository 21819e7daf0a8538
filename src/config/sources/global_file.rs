//! Global config file source: $XDG_CONFIG_HOME/asc/config.toml, ~/.config/asc/config.toml,
//! or the platform config directory.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use config::FileFormat;
use directories::BaseDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path to global config file.
pub fn global_config_path() -> Option<PathBuf> {
    let non_empty = |name: &str| std::env::var_os(name).filter(|v| !v.is_empty());

    if let Some(xdg) = non_empty("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg).join("asc").join("config.toml"));
    }
    if let Some(home) = non_empty("HOME") {
        return Some(PathBuf::from(home).join(".config").join("asc").join("config.toml"));
    }
    BaseDirs::new().map(|dirs| dirs.config_dir().join("asc").join("config.toml"))
}

/// Add a TOML file source. A missing `required` file fails at build time.
pub fn add_file(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> ConfigBuilder<DefaultState> {
    builder.add_source(File::from(path).format(FileFormat::Toml).required(required))
}

/// Add global config file source to builder if it exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(path) = global_config_path() {
        if path.exists() {
            let canonical = path.canonicalize().unwrap_or_else(|_| path.clone());
            builder = add_file(builder, &canonical, false);
        } else {
            debug!(
                config_path = %path.display(),
                "No global configuration file; run `asc config init` to create one"
            );
        }
    }
    Ok(builder)
}
