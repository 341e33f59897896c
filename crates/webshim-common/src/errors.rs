use std::ffi::NulError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Errors surfaced by a webview handle.
///
/// Construction failures are strict (`UninitializedField`, `NulByte`,
/// `Initialization`); most runtime calls are lenient and only report
/// the failures listed here.
#[derive(Debug, thiserror::Error)]
pub enum WebViewError {
    /// A builder field required to create the window was never set.
    #[error("required field uninitialized: {0}")]
    UninitializedField(&'static str),

    /// The native window or browser control could not be created.
    #[error("webview failed to initialize: {0}")]
    Initialization(String),

    /// A string handed to the native side contained an interior NUL byte.
    #[error(transparent)]
    NulByte(#[from] NulError),

    #[error("failed to evaluate javascript: {0}")]
    JsEvaluation(String),

    #[error("failed to inject css")]
    CssInjection,

    /// The closure could not be queued, usually because the webview was dropped.
    #[error("closure could not be dispatched, webview was likely dropped")]
    Dispatch,

    /// The script bridge was asked for a transition its current state forbids.
    #[error("script bridge error: {0}")]
    Bridge(String),

    /// A synchronous evaluation was started while another one was still waiting.
    #[error("re-entrant synchronous evaluation")]
    Reentrant,

    /// The compiled-in adapter does not implement this operation.
    #[error("not supported by this backend: {0}")]
    Unsupported(&'static str),

    /// The handle has already been torn down.
    #[error("webview is closed")]
    Closed,

    /// A native call failed after construction.
    #[error("native error: {0}")]
    Native(String),

    /// An error raised by host code inside an invoke handler or dispatched closure.
    #[error(transparent)]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

impl WebViewError {
    /// Wrap an arbitrary host error so it can flow out of a handler.
    pub fn custom<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Custom(error.into())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    WebView(#[from] WebViewError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("window.width = 0".into());
        assert_eq!(err.to_string(), "config validation error: window.width = 0");
    }

    #[test]
    fn webview_error_display() {
        let err = WebViewError::UninitializedField("content");
        assert_eq!(err.to_string(), "required field uninitialized: content");

        let err = WebViewError::Initialization("no display".into());
        assert_eq!(err.to_string(), "webview failed to initialize: no display");

        let err = WebViewError::Unsupported("synchronous eval");
        assert_eq!(err.to_string(), "not supported by this backend: synchronous eval");

        assert_eq!(WebViewError::Closed.to_string(), "webview is closed");
    }

    #[test]
    fn nul_error_converts() {
        let nul = CString::new("a\0b").unwrap_err();
        let err: WebViewError = nul.into();
        assert!(matches!(err, WebViewError::NulByte(_)));
    }

    #[test]
    fn custom_error_keeps_message() {
        let err = WebViewError::custom("handler exploded");
        assert!(matches!(err, WebViewError::Custom(_)));
        assert_eq!(err.to_string(), "handler exploded");
    }

    #[test]
    fn shim_error_from_parts() {
        let err: ShimError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, ShimError::Config(_)));
        assert!(err.to_string().contains("bad toml"));

        let err: ShimError = WebViewError::Dispatch.into();
        assert!(matches!(err, ShimError::WebView(_)));

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ShimError = io_err.into();
        assert!(matches!(err, ShimError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }
}
