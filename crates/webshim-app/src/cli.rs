//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use webshim_config::{LogLevel, ShimConfig, StartupMode, WindowDecorations};

#[derive(Parser, Debug, Default)]
#[command(name = "webshim", version, about = "Show a web page in a native window")]
pub struct Args {
    /// URL to load, including `data:text/html,` documents
    #[arg(long, conflicts_with = "html")]
    pub url: Option<String>,

    /// HTML file to show
    #[arg(long, value_name = "FILE")]
    pub html: Option<PathBuf>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    /// Hide the title bar and borders
    #[arg(long)]
    pub frameless: bool,

    #[arg(long)]
    pub fullscreen: bool,

    /// Hide the window on close instead of exiting
    #[arg(long)]
    pub hide_on_close: bool,

    /// Enable developer tools
    #[arg(long)]
    pub debug: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Print the backend and its capabilities as JSON, then exit
    #[arg(long)]
    pub capabilities: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

impl Args {
    /// Fold the flags over `config`. Flags win; absent flags keep the file's value.
    pub fn apply_to(&self, config: &mut ShimConfig) {
        if let Some(url) = &self.url {
            config.content.url = Some(url.clone());
            config.content.html_file = None;
        }
        if let Some(html) = &self.html {
            config.content.html_file = Some(html.clone());
            config.content.url = None;
        }
        if let Some(title) = &self.title {
            config.window.title = title.clone();
        }
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if self.frameless {
            config.window.decorations = WindowDecorations::None;
        }
        if self.fullscreen {
            config.window.startup_mode = StartupMode::Fullscreen;
        }
        if self.hide_on_close {
            config.window.hide_on_close = true;
        }
        if self.debug {
            config.content.debug = true;
        }
        if let Some(level) = self.log_level.as_deref().and_then(parse_level) {
            config.logging.level = level;
        }
    }
}

fn parse_level(level: &str) -> Option<LogLevel> {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Some(LogLevel::Trace),
        "debug" => Some(LogLevel::Debug),
        "info" => Some(LogLevel::Info),
        "warn" | "warning" => Some(LogLevel::Warning),
        "error" => Some(LogLevel::Error),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("webshim").chain(argv.iter().copied()))
    }

    #[test]
    fn no_flags_leave_config_untouched() {
        let mut config = ShimConfig::default();
        args(&[]).apply_to(&mut config);
        assert_eq!(config.window.title, "Application");
        assert_eq!(config.window.startup_mode, StartupMode::Windowed);
        assert!(config.content.url.is_none());
    }

    #[test]
    fn flags_override_config() {
        let mut config = ShimConfig::default();
        config.window.title = "From file".into();
        args(&[
            "--title",
            "From flag",
            "--width",
            "1024",
            "--frameless",
            "--fullscreen",
            "--debug",
            "--log-level",
            "WARN",
        ])
        .apply_to(&mut config);

        assert_eq!(config.window.title, "From flag");
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
        assert!(config.window.frameless());
        assert_eq!(config.window.startup_mode, StartupMode::Fullscreen);
        assert!(config.content.debug);
        assert_eq!(config.logging.level, LogLevel::Warning);
    }

    #[test]
    fn url_flag_replaces_html_file_from_config() {
        let mut config = ShimConfig::default();
        config.content.html_file = Some(PathBuf::from("page.html"));
        args(&["--url", "https://example.com"]).apply_to(&mut config);
        assert_eq!(config.content.url.as_deref(), Some("https://example.com"));
        assert!(config.content.html_file.is_none());
    }

    #[test]
    fn url_and_html_conflict() {
        let result = Args::try_parse_from(["webshim", "--url", "a", "--html", "b.html"]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_log_level_is_ignored() {
        let mut config = ShimConfig::default();
        args(&["--log-level", "loud"]).apply_to(&mut config);
        assert_eq!(config.logging.level, LogLevel::Info);
    }
}
