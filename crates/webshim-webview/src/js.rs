//! JavaScript text generation for host -> page calls.

/// Appends a `<style>` element holding its single string argument.
pub const CSS_INJECT_FUNCTION: &str = "(function(e){var t=document.createElement('style'),\
d=document.head||document.getElementsByTagName('head')[0];t.setAttribute('type','text/css'),\
t.styleSheet?t.styleSheet.cssText=e:t.appendChild(document.createTextNode(e)),d.appendChild(t)})";

/// Characters that are printable but still escaped, so the payload can sit
/// inside either quote style or an HTML `<script>` block.
const ESCAPED_PRINTABLE: &[u8] = b"<>\\'\"";

/// Escape `s` for embedding inside a double-quoted JS string literal.
///
/// Printable ASCII other than `<>\'"` passes through; every other byte
/// (controls, DEL, each byte of a multi-byte UTF-8 sequence) becomes `\xHH`.
pub fn encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for &byte in s.as_bytes() {
        if (0x20..0x80).contains(&byte) && byte != 0x7f && !ESCAPED_PRINTABLE.contains(&byte) {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("\\x{byte:02x}"));
        }
    }
    out
}

/// Script that appends `css` as a new stylesheet.
pub fn css_injection(css: &str) -> String {
    format!("{CSS_INJECT_FUNCTION}(\"{}\")", encode(css))
}

/// Scope a script inside an immediately-invoked function so its
/// declarations do not leak into the page's globals.
pub fn wrap_iife(js: &str) -> String {
    format!("(function(){{\n{js}\n}})()")
}

/// A JSON-escaped string literal, safe to splice into generated scripts.
pub fn string_literal(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}
