//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// The equivalent `tracing` filter directive.
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Extra filter directives, e.g. `"wry=warn"`, appended to `level`.
    pub filter: Option<String>,
}

impl LoggingConfig {
    /// Filter string for `tracing_subscriber::EnvFilter`.
    pub fn directive(&self) -> String {
        let level = self.level.as_directive();
        match self.filter.as_deref().map(str::trim) {
            Some(extra) if !extra.is_empty() => format!("webshim={level},{extra}"),
            _ => format!("webshim={level}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directive_is_info() {
        assert_eq!(LoggingConfig::default().directive(), "webshim=info");
    }

    #[test]
    fn extra_filter_is_appended() {
        let config = LoggingConfig {
            level: LogLevel::Warning,
            filter: Some(" wry=debug ".into()),
        };
        assert_eq!(config.directive(), "webshim=warn,wry=debug");
    }

    #[test]
    fn levels_deserialize_uppercase() {
        let level: LogLevel = serde_json::from_str("\"TRACE\"").unwrap();
        assert_eq!(level, LogLevel::Trace);
    }
}
