//! Navigation, script evaluation and window setters.
//!
//! Setters are lenient: when the adapter lacks the capability or the window
//! is already gone they log at `debug` and succeed. Script and navigation
//! calls on a closed webview fail with [`WebViewError::Closed`].

use std::time::Instant;

use tracing::{debug, trace, warn};

use webshim_common::{Color, WebViewError};

use crate::adapter::{Adapter, ResultSlot};
use crate::appearance::{Appearance, Transition};
use crate::bridge::Submission;
use crate::js;
use crate::navigation::NavTarget;
use crate::WVResult;

use super::{check_nul, WebView};

impl<T, A: Adapter> WebView<T, A> {
    /// Load a URL, or an inline document given as a `data:text/html,` URL.
    pub fn navigate(&mut self, target: &str) -> WVResult {
        check_nul(target)?;
        self.load(NavTarget::parse(target))
    }

    /// Load an already-decoded HTML document.
    pub fn set_html(&mut self, html: &str) -> WVResult {
        check_nul(html)?;
        self.load(NavTarget::Html(html.to_string()))
    }

    fn load(&mut self, target: NavTarget) -> WVResult {
        if self.host.closed {
            return Err(WebViewError::Closed);
        }
        debug!(target = %target.describe(), "navigating");
        // Scripts issued from here on belong to the new document.
        let previous = self.bridge.state();
        self.bridge.page_started();
        self.host.adapter.navigate(&target).inspect_err(|e| {
            warn!(error = %e, "navigation failed, keeping current page");
            self.bridge.navigation_failed(previous);
        })
    }

    /// Evaluate `js` in the page, scoped in an anonymous function.
    ///
    /// Scripts issued before the page has loaded are queued and run in
    /// order once it has. The result is discarded.
    pub fn eval(&mut self, js: &str) -> WVResult {
        check_nul(js)?;
        match self.bridge.submit(js::wrap_iife(js))? {
            Submission::RunNow(script) => self.host.adapter.eval(&script),
            Submission::Queued => {
                trace!(len = js.len(), "script queued until page load");
                Ok(())
            }
        }
    }

    /// Evaluate the expression `js` and wait for its JSON-encoded value.
    ///
    /// Only available where [`Capabilities::sync_eval`] holds. Runs a nested
    /// pump that never delivers page messages or dispatched jobs, so it is
    /// safe to call from the invoke handler. Fails with
    /// [`WebViewError::Reentrant`] if another `eval_sync` is still waiting.
    ///
    /// [`Capabilities::sync_eval`]: crate::adapter::Capabilities::sync_eval
    pub fn eval_sync(&mut self, js: &str) -> WVResult<String> {
        check_nul(js)?;
        if !self.capabilities().sync_eval {
            return Err(WebViewError::Unsupported("synchronous eval"));
        }
        self.bridge.begin_eval()?;
        let result = self.wait_for_result(js);
        self.bridge.end_eval();
        result
    }

    fn wait_for_result(&mut self, js: &str) -> WVResult<String> {
        let slot = ResultSlot::new();
        self.host.adapter.eval_with_result(js, slot.clone())?;

        let started = Instant::now();
        loop {
            if let Some(value) = slot.take() {
                trace!(elapsed = ?started.elapsed(), "script result arrived");
                return Ok(value);
            }
            if started.elapsed() >= self.sync_eval_timeout {
                return Err(WebViewError::JsEvaluation(format!(
                    "no result after {:?}",
                    self.sync_eval_timeout
                )));
            }
            self.host.adapter.pump_nested();
        }
    }

    /// Append `css` to the page as a new stylesheet.
    pub fn inject_css(&mut self, css: &str) -> WVResult {
        if !self.capabilities().css_injection {
            debug!("css injection not supported by this backend");
            return Ok(());
        }
        self.eval(&js::css_injection(css)).map_err(|e| match e {
            WebViewError::JsEvaluation(_) => WebViewError::CssInjection,
            other => other,
        })
    }

    pub fn set_title(&mut self, title: &str) -> WVResult {
        check_nul(title)?;
        self.title = title.to_string();
        if self.host.closed {
            debug!("set_title on closed webview");
            return Ok(());
        }
        self.host.adapter.set_title(title);
        Ok(())
    }

    /// Enter or leave fullscreen. Leaving restores the geometry saved
    /// before the first transition exactly.
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        if !self.setter_available("fullscreen", self.capabilities().fullscreen) {
            return;
        }
        let adapter = &self.host.adapter;
        match self.geometry.fullscreen(fullscreen, || adapter.geometry()) {
            Transition::Unchanged => {}
            Transition::Enter => self.host.adapter.set_fullscreen(true),
            Transition::Leave { restore } => {
                self.host.adapter.set_fullscreen(false);
                match restore {
                    Some(geometry) => self.host.adapter.apply_geometry(&geometry),
                    None if self.geometry.is_maximized() => self.host.adapter.set_maximized(true),
                    None => {}
                }
            }
        }
    }

    /// Maximize or restore. Shares the saved geometry with fullscreen.
    pub fn set_maximized(&mut self, maximized: bool) {
        if !self.setter_available("maximize", true) {
            return;
        }
        let adapter = &self.host.adapter;
        match self.geometry.maximized(maximized, || adapter.geometry()) {
            Transition::Unchanged => {}
            Transition::Enter => {
                if !self.geometry.is_fullscreen() {
                    self.host.adapter.set_maximized(true);
                }
            }
            Transition::Leave { restore } => {
                if !self.geometry.is_fullscreen() {
                    self.host.adapter.set_maximized(false);
                }
                if let Some(geometry) = restore {
                    self.host.adapter.apply_geometry(&geometry);
                }
            }
        }
    }

    pub fn set_minimized(&mut self, minimized: bool) {
        if self.setter_available("minimize", true) {
            self.host.adapter.set_minimized(minimized);
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.setter_available("visibility", true) {
            self.host.adapter.set_visible(visible);
        }
    }

    pub fn set_frameless(&mut self, frameless: bool) {
        if self.setter_available("frameless", true) {
            self.host.adapter.set_frameless(frameless);
        }
    }

    /// Set the page background and the matching light/dark window chrome.
    pub fn set_color<C: Into<Color>>(&mut self, color: C) {
        if !self.setter_available("background color", self.capabilities().background_color) {
            return;
        }
        let color = color.into();
        let appearance = Appearance::for_background(color);
        if let Err(e) = self.host.adapter.set_background(color, appearance) {
            warn!(error = %e, color = %color.to_hex(), "failed to set background color");
        }
    }

    /// Page zoom, where `1.0` is 100%.
    pub fn set_zoom_level(&mut self, level: f64) {
        if !self.setter_available("zoom", self.capabilities().zoom) {
            return;
        }
        if !level.is_finite() || level <= 0.0 {
            debug!(level, "ignoring invalid zoom level");
            return;
        }
        if let Err(e) = self.host.adapter.set_zoom(level) {
            warn!(error = %e, level, "failed to set zoom level");
        }
    }

    pub fn open_devtools(&mut self) {
        if self.setter_available("devtools", self.capabilities().devtools) {
            self.host.adapter.open_devtools();
        }
    }

    fn setter_available(&self, what: &'static str, supported: bool) -> bool {
        if self.host.closed {
            debug!(what, "ignoring setter on closed webview");
            return false;
        }
        if !supported {
            debug!(what, backend = ?A::KIND, "not supported by this backend");
        }
        supported
    }
}
