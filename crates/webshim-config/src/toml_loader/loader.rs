//! Read the config from a path or the platform default.

use std::path::Path;

use tracing::{info, warn};
use webshim_common::ConfigError;

use crate::schema::ShimConfig;
use crate::validation;

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file.
///
/// Missing fields take their defaults. Validation problems are logged and
/// the parsed config is returned as-is; callers wanting a hard failure run
/// [`validation::validate`] themselves.
pub fn load_from_path(path: &Path) -> Result<ShimConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: ShimConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), error = %e, "config validation warning");
    }

    info!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Load config from the platform default path, writing a commented default
/// file first if there is none.
///
/// On macOS: `~/Library/Application Support/webshim/config.toml`
/// On Linux: `~/.config/webshim/config.toml`
pub fn load_default() -> Result<ShimConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!(path = %path.display(), "no config found, creating default");
            create_default_config(&path)?;
            Ok(ShimConfig::default())
        }
        Err(e) => Err(e),
    }
}
