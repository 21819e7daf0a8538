//! Config loading facade: one entry point for every layer.

use super::merge::merge_policy::builder_with_defaults;
use super::sources::{env, global_file};
use super::AscConfig;
use crate::error::ApiError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads [`AscConfig`] from defaults, files, and the environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the global file (or `ASC_CONFIG_PATH`), then `ASC_*` overrides.
    pub fn load() -> Result<AscConfig, ApiError> {
        let mut builder = builder_with_defaults()?;

        match std::env::var_os("ASC_CONFIG_PATH").filter(|v| !v.is_empty()) {
            Some(path) => {
                let path = PathBuf::from(path);
                debug!(config_path = %path.display(), "Loading config from ASC_CONFIG_PATH");
                builder = global_file::add_file(builder, &path, true);
            }
            None => builder = global_file::add_to_builder(builder)?,
        }

        builder = env::add_to_builder(builder)?;
        let config: AscConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Defaults, then `path` (which must exist), then `ASC_*` overrides.
    pub fn load_with_path(path: &Path) -> Result<AscConfig, ApiError> {
        let builder = global_file::add_file(builder_with_defaults()?, path, true);
        let builder = env::add_to_builder(builder)?;
        let config: AscConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Defaults plus one file, ignoring the environment.
    pub fn load_from_file(path: &Path) -> Result<AscConfig, ApiError> {
        let builder = global_file::add_file(builder_with_defaults()?, path, true);
        let config: AscConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Where `load` looks for the global file when `ASC_CONFIG_PATH` is unset.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    /// Where `asc config init` writes: `ASC_CONFIG_PATH`, else the global path.
    pub fn init_path() -> Option<PathBuf> {
        std::env::var_os("ASC_CONFIG_PATH")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(Self::global_config_path)
    }

    /// Built-in defaults only.
    pub fn default() -> AscConfig {
        AscConfig::default()
    }
}
