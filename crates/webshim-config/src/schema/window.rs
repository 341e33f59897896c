//! Window configuration types.

use serde::{Deserialize, Serialize};

/// Window decoration style.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WindowDecorations {
    #[default]
    Full,
    None,
}

/// Window state when first shown.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StartupMode {
    #[default]
    Windowed,
    Maximized,
    Fullscreen,
}

/// Window size, style and close behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Client width in logical pixels (valid range: 100-16384).
    pub width: u32,
    /// Client height in logical pixels (valid range: 100-16384).
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
    pub resizable: bool,
    pub decorations: WindowDecorations,
    pub startup_mode: StartupMode,
    pub visible: bool,
    /// Hide the window instead of exiting when it is closed.
    pub hide_on_close: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Application".into(),
            width: 800,
            height: 600,
            min_width: 300,
            min_height: 300,
            resizable: true,
            decorations: WindowDecorations::Full,
            startup_mode: StartupMode::Windowed,
            visible: true,
            hide_on_close: false,
        }
    }
}

impl WindowConfig {
    pub fn frameless(&self) -> bool {
        self.decorations == WindowDecorations::None
    }
}
