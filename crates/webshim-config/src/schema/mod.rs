//! Configuration schema. All sections use `#[serde(default)]` so partial
//! files deserialize.

mod appearance;
mod content;
mod logging;
mod window;

pub use appearance::AppearanceConfig;
pub use content::ContentConfig;
pub use logging::{LogLevel, LoggingConfig};
pub use window::{StartupMode, WindowConfig, WindowDecorations};

use serde::{Deserialize, Serialize};

/// Current version of the config file layout.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShimConfig {
    pub window: WindowConfig,
    pub content: ContentConfig,
    pub appearance: AppearanceConfig,
    pub logging: LoggingConfig,
}
