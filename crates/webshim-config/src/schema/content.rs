//! Initial content of the window.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What to load first. `url` and `html_file` are mutually exclusive; with
/// neither set the app shows its built-in page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// A URL, or a `data:text/html,` document.
    pub url: Option<String>,
    /// Path to an HTML file loaded as an inline document.
    pub html_file: Option<PathBuf>,
    /// Enable the browser's developer tools.
    pub debug: bool,
}
