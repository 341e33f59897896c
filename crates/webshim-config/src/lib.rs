//! webshim configuration file.
//!
//! A small TOML file describing the window, its initial content, the page
//! appearance and logging. Every section has defaults, so a partial file
//! (or none at all) works.
//!
//! ```rust,no_run
//! use webshim_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    AppearanceConfig, ContentConfig, LogLevel, LoggingConfig, ShimConfig, StartupMode,
    WindowConfig, WindowDecorations, CONFIG_SCHEMA_VERSION,
};
pub use toml_loader::{create_default_config, default_config_path, load_default, load_from_path};

use webshim_common::ConfigError;

/// Load and validate the config at the platform default path, creating it
/// with commented defaults if it does not exist yet.
pub fn load_config() -> Result<ShimConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to pretty-printed JSON.
pub fn config_to_json(config: &ShimConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
