//! Page appearance applied after the window is created.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Background color as `#rrggbb` or `#rrggbbaa`.
    pub background: Option<String>,
    /// Page zoom (valid range: 0.25-5.0).
    pub zoom: f64,
    /// Stylesheet injected into every loaded page.
    pub css_file: Option<PathBuf>,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            background: None,
            zoom: 1.0,
            css_file: None,
        }
    }
}
