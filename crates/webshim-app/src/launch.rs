//! Turn a resolved config into a running webview.

use std::fs;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};
use webshim_common::{Color, ShimError};
use webshim_config::{ContentConfig, ShimConfig, StartupMode};
use webshim_webview::{Adapter, Content, Handle, WebView, WebViewBuilder};

use crate::commands;
use crate::demo::DEMO_HTML;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Host state carried by the webview.
#[derive(Debug, Default)]
pub struct AppState {
    /// Ticker pushes delivered to the page.
    pub ticks: u64,
    /// Page commands accepted by the allowlist.
    pub commands: u64,
}

/// The compiled-in backend and what it supports. Needs no window.
pub fn capability_report<A: Adapter>() -> serde_json::Value {
    serde_json::json!({
        "backend": A::KIND,
        "capabilities": A::CAPABILITIES,
    })
}

/// What the window should show first. Falls back to the demo page.
pub fn initial_content(config: &ContentConfig) -> Result<Content<String>, ShimError> {
    if let Some(url) = &config.url {
        return Ok(Content::Url(url.clone()));
    }
    if let Some(path) = &config.html_file {
        debug!(path = %path.display(), "reading html file");
        return Ok(Content::Html(fs::read_to_string(path)?));
    }
    Ok(Content::Html(DEMO_HTML.to_string()))
}

/// Everything that can be decided before the window exists.
pub fn builder<A: Adapter + 'static>(
    config: &ShimConfig,
) -> Result<WebViewBuilder<AppState, A>, ShimError> {
    let window = &config.window;
    let mut builder = WebViewBuilder::new()
        .title(window.title.as_str())
        .content(initial_content(&config.content)?)
        .size(window.width, window.height)
        .min_size(window.min_width, window.min_height)
        .resizable(window.resizable)
        .frameless(window.frameless())
        .visible(window.visible)
        .hide_instead_of_close(window.hide_on_close)
        .fullscreen(window.startup_mode == StartupMode::Fullscreen)
        .debug(config.content.debug)
        .user_data(AppState::default())
        .invoke_handler(|webview: &mut WebView<AppState, A>, body: &str| {
            commands::handle(webview, body)
        });

    if let Some(hex) = &config.appearance.background {
        match Color::from_hex(hex) {
            Some(color) => builder = builder.color(color),
            None => warn!(background = %hex, "ignoring invalid background color"),
        }
    }
    Ok(builder)
}

/// Build the window and apply the settings that need a live webview.
pub fn launch<A: Adapter + 'static>(config: &ShimConfig) -> Result<WebView<AppState, A>, ShimError> {
    let mut webview = builder::<A>(config)?.build()?;

    if config.window.startup_mode == StartupMode::Maximized {
        webview.set_maximized(true);
    }
    if (config.appearance.zoom - 1.0).abs() > f64::EPSILON {
        webview.set_zoom_level(config.appearance.zoom);
    }
    // Queued by the bridge until the first page has loaded.
    if let Some(path) = &config.appearance.css_file {
        let css = fs::read_to_string(path)?;
        webview.inject_css(&css)?;
    }
    Ok(webview)
}

/// Push an incrementing counter into the page every `interval` until the
/// webview goes away.
pub fn spawn_ticker<A: Adapter + 'static>(
    handle: Handle<AppState, A>,
    interval: Duration,
) -> Result<thread::JoinHandle<()>, ShimError> {
    let ticker = thread::Builder::new()
        .name("webshim-ticker".into())
        .spawn(move || loop {
            thread::sleep(interval);
            let sent = handle.dispatch(|webview| {
                let state = webview.user_data_mut();
                state.ticks += 1;
                let n = state.ticks;
                webview.eval(&format!("window.webshim && window.webshim.tick({n});"))
            });
            if sent.is_err() {
                debug!("webview gone, ticker stopping");
                break;
            }
        })?;
    Ok(ticker)
}
