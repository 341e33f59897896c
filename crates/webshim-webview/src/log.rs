//! Page-facing log output, routed through `tracing`.

use std::fmt;

use tracing::{debug as trace_debug, info};

/// Target used for everything the page or host logs through this module.
pub const PAGE_TARGET: &str = "webshim::page";

/// Log a line on behalf of the page.
pub fn print_log(message: &str) {
    info!(target: PAGE_TARGET, "{message}");
}

/// Debug output with `format_args!` formatting.
///
/// ```
/// webshim_webview::log::debug(format_args!("loaded {} bytes", 42));
/// ```
pub fn debug(args: fmt::Arguments<'_>) {
    trace_debug!(target: PAGE_TARGET, "{args}");
}
