//! Navigation targets: conventional URLs and embedded `data:` documents.
//!
//! Not every browser control loads `data:` URLs, so a target carrying the
//! `data:text/html,` prefix is decoded here and handed to the adapter as an
//! in-memory document instead of a URL fetch.

use std::borrow::Cow;

/// Prefix marking a literal, percent-encoded HTML document.
pub const DATA_URL_PREFIX: &str = "data:text/html,";

/// Document shown when a window is created without content.
pub const DEFAULT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><meta http-equiv="X-UA-Compatible" content="IE=edge"></head>
<body><div id="app"></div><script type="text/javascript"></script></body>
</html>"#;

/// Where a window should point its browser control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    /// Fetch from the network or a local scheme.
    Url(String),
    /// Load this document directly, without a fetch.
    Html(String),
}

impl NavTarget {
    /// Classify a host-supplied target string.
    ///
    /// Empty strings resolve to [`DEFAULT_HTML`]; `data:text/html,` targets
    /// are percent-decoded into [`NavTarget::Html`].
    pub fn parse(target: &str) -> Self {
        if target.is_empty() {
            return Self::Html(DEFAULT_HTML.to_string());
        }
        match target.strip_prefix(DATA_URL_PREFIX) {
            Some(encoded) => Self::Html(decode_data_payload(encoded)),
            None => Self::Url(target.to_string()),
        }
    }

    /// Short description for log lines; never the whole document.
    pub fn describe(&self) -> Cow<'_, str> {
        match self {
            Self::Url(url) => Cow::Borrowed(url.as_str()),
            Self::Html(html) => Cow::Owned(format!("<inline document, {} bytes>", html.len())),
        }
    }
}

/// Decode the payload of a `data:text/html,` URL.
///
/// `+` becomes a space, `%XX` becomes the byte `0xXX`, everything else
/// passes through. Malformed escapes are kept literally and invalid UTF-8
/// is replaced rather than rejected.
pub fn decode_data_payload(encoded: &str) -> String {
    // `%2B` stays escaped through the first pass, so a literal plus survives.
    let spaced = encoded.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Percent-encode a document as a `data:text/html,` URL.
pub fn encode_data_url(html: &str) -> String {
    format!("{DATA_URL_PREFIX}{}", urlencoding::encode(html))
}
