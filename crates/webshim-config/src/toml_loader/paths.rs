//! Where the config file lives, and seeding it with the commented template.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use webshim_common::ConfigError;

use super::template::default_config_toml;

/// Directory under the platform config dir that holds our files.
pub const APP_DIR: &str = "webshim";
pub const CONFIG_FILE: &str = "config.toml";
/// Names a config file to use instead of the platform default.
pub const CONFIG_PATH_ENV: &str = "WEBSHIM_CONFIG";

/// `$WEBSHIM_CONFIG` if set, else `<config dir>/webshim/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    resolve_config_path(std::env::var_os(CONFIG_PATH_ENV), dirs::config_dir())
}

fn resolve_config_path(
    env_override: Option<OsString>,
    config_dir: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = env_override.filter(|p| !p.is_empty()) {
        debug!(env = CONFIG_PATH_ENV, "config path taken from environment");
        return Ok(PathBuf::from(path));
    }
    let config_dir = config_dir
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Write the commented template to `path`. An existing file is left alone.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_failure("create config directory", parent, e))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            debug!(path = %path.display(), "config already exists, not overwriting");
            return Ok(());
        }
        Err(e) => return Err(io_failure("create config", path, e)),
    };
    file.write_all(default_config_toml().as_bytes())
        .map_err(|e| io_failure("write default config to", path, e))?;

    info!(path = %path.display(), "created default config");
    Ok(())
}

fn io_failure(action: &str, path: &Path, error: io::Error) -> ConfigError {
    ConfigError::ParseError(format!("failed to {action} {}: {error}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_dir_gets_app_subdirectory() {
        let path = resolve_config_path(None, Some(PathBuf::from("/home/u/.config"))).unwrap();
        assert_eq!(path, PathBuf::from("/home/u/.config/webshim/config.toml"));
    }

    #[test]
    fn environment_override_wins() {
        let path = resolve_config_path(
            Some(OsString::from("/etc/webshim.toml")),
            Some(PathBuf::from("/home/u/.config")),
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/etc/webshim.toml"));
    }

    #[test]
    fn empty_override_is_ignored() {
        let path = resolve_config_path(Some(OsString::new()), Some(PathBuf::from("/c"))).unwrap();
        assert_eq!(path, PathBuf::from("/c/webshim/config.toml"));
    }

    #[test]
    fn no_config_dir_is_an_error() {
        assert!(matches!(
            resolve_config_path(None, None),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn existing_config_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[window]\ntitle = \"Mine\"\n").unwrap();

        create_default_config(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[window]\ntitle = \"Mine\"\n");
    }
}
