//! Real windows: a winit window with a wry browser control filling it.

mod platform;

use std::time::Duration;

use tracing::{debug, warn};
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::window::{Fullscreen, Theme, Window};

use webshim_common::{Color, Position, Size, WebViewError};

use crate::appearance::{Appearance, WindowGeometry};
use crate::events::{NativeEvent, PageLoadState};
use crate::link::BridgeLink;
use crate::navigation::NavTarget;

use super::{
    Adapter, BackendKind, Capabilities, PumpMode, PumpOutcome, Waker, WindowSpec,
};
use platform::with_platform;

/// On Linux WebKitGTK delivers its callbacks through the GTK main context,
/// which winit never waits on, so a blocking pump is a short slice instead.
#[cfg(target_os = "linux")]
const BLOCKING_TIMEOUT: Option<Duration> = Some(Duration::from_millis(8));
#[cfg(not(target_os = "linux"))]
const BLOCKING_TIMEOUT: Option<Duration> = None;

pub struct NativeAdapter {
    // Field order matters: the browser control must go before its window.
    webview: Option<wry::WebView>,
    window: Option<Window>,
    waker: Waker,
}

impl NativeAdapter {
    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }

    pub fn webview(&self) -> Option<&wry::WebView> {
        self.webview.as_ref()
    }

    fn live_webview(&self) -> Result<&wry::WebView, WebViewError> {
        self.webview.as_ref().ok_or(WebViewError::Closed)
    }

    fn build_webview(
        window: &Window,
        spec: &WindowSpec,
        init_script: &str,
        link: &BridgeLink,
    ) -> Result<wry::WebView, wry::Error> {
        let mut builder = wry::WebViewBuilder::new()
            .with_devtools(spec.debug)
            .with_initialization_script(init_script);

        builder = attach_ipc_handler(builder, link.clone());
        builder = attach_page_load_handler(builder, link.clone());
        builder = attach_title_handler(builder, link.clone());

        if let Some(color) = spec.background {
            builder = builder.with_background_color(color.as_tuple());
        }

        builder = match &spec.target {
            NavTarget::Url(url) => builder.with_url(url),
            NavTarget::Html(html) => builder.with_html(html),
        };

        builder.build(window)
    }
}

fn attach_ipc_handler<'a>(builder: wry::WebViewBuilder<'a>, link: BridgeLink) -> wry::WebViewBuilder<'a> {
    builder.with_ipc_handler(move |request| {
        let body = request.body().to_string();
        debug!(body_len = body.len(), "message from page");
        link.push(NativeEvent::Message { body });
    })
}

fn attach_page_load_handler<'a>(builder: wry::WebViewBuilder<'a>, link: BridgeLink) -> wry::WebViewBuilder<'a> {
    builder.with_on_page_load_handler(move |event, url| {
        let state = PageLoadState::from(event);
        debug!(?state, url = %url, "page load");
        link.push(NativeEvent::PageLoad { state, url });
    })
}

fn attach_title_handler<'a>(builder: wry::WebViewBuilder<'a>, link: BridgeLink) -> wry::WebViewBuilder<'a> {
    builder.with_document_title_changed_handler(move |title| {
        link.push(NativeEvent::TitleChanged { title });
    })
}

fn theme_for(appearance: Appearance) -> Theme {
    match appearance {
        Appearance::Light => Theme::Light,
        Appearance::Dark => Theme::Dark,
    }
}

fn native_error(e: wry::Error) -> WebViewError {
    WebViewError::Native(e.to_string())
}

impl Adapter for NativeAdapter {
    #[cfg(target_os = "macos")]
    const KIND: BackendKind = BackendKind::CocoaWebKit;
    #[cfg(target_os = "windows")]
    const KIND: BackendKind = BackendKind::WebView2;
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    const KIND: BackendKind = BackendKind::GtkWebKit;

    /// Only WebKitGTK hands script results back while we pump GTK ourselves.
    const CAPABILITIES: Capabilities = Capabilities {
        sync_eval: cfg!(target_os = "linux"),
        css_injection: true,
        fullscreen: true,
        background_color: true,
        zoom: true,
        devtools: true,
    };

    fn create(spec: &WindowSpec, init_script: &str, link: BridgeLink) -> Result<Self, WebViewError> {
        let size = spec.initial_size();
        let mut attributes = Window::default_attributes()
            .with_title(spec.title.as_str())
            .with_inner_size(LogicalSize::new(size.width, size.height))
            .with_min_inner_size(LogicalSize::new(spec.min_size.width, spec.min_size.height))
            .with_resizable(spec.resizable)
            .with_decorations(!spec.frameless)
            .with_visible(spec.visible);
        if let Some(color) = spec.background {
            attributes = attributes.with_theme(Some(theme_for(Appearance::for_background(color))));
        }

        let (window, waker) = with_platform(|platform| {
            platform
                .create_window(attributes, link.clone())
                .map(|window| (window, platform.waker()))
        })??;

        let webview = match Self::build_webview(&window, spec, init_script, &link) {
            Ok(webview) => webview,
            Err(e) => {
                // Unregister before the window is dropped.
                let id = window.id();
                if with_platform(|platform| platform.forget(id)).is_err() {
                    warn!("could not unregister failed window");
                }
                return Err(WebViewError::Initialization(e.to_string()));
            }
        };

        debug!(title = %spec.title, %size, target = %spec.target.describe(), "native window created");
        Ok(Self {
            webview: Some(webview),
            window: Some(window),
            waker,
        })
    }

    fn waker(&self) -> Waker {
        self.waker.clone()
    }

    fn navigate(&mut self, target: &NavTarget) -> Result<(), WebViewError> {
        let webview = self.live_webview()?;
        match target {
            NavTarget::Url(url) => webview.load_url(url),
            NavTarget::Html(html) => webview.load_html(html),
        }
        .map_err(native_error)
    }

    fn eval(&mut self, js: &str) -> Result<(), WebViewError> {
        self.live_webview()?
            .evaluate_script(js)
            .map_err(|e| WebViewError::JsEvaluation(e.to_string()))
    }

    #[cfg(target_os = "linux")]
    fn eval_with_result(&mut self, js: &str, slot: super::ResultSlot) -> Result<(), WebViewError> {
        self.live_webview()?
            .evaluate_script_with_callback(js, move |result| slot.fill(result))
            .map_err(|e| WebViewError::JsEvaluation(e.to_string()))
    }

    fn pump(&mut self, mode: PumpMode) -> PumpOutcome {
        let timeout = match mode {
            PumpMode::Blocking => BLOCKING_TIMEOUT,
            PumpMode::Poll => Some(Duration::ZERO),
        };
        match with_platform(|platform| platform.pump(timeout)) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "pump failed");
                PumpOutcome::Exited
            }
        }
    }

    #[cfg(target_os = "linux")]
    fn pump_nested(&mut self) {
        // GTK only; winit stays untouched so window events wait for the outer pump.
        if gtk::events_pending() {
            gtk::main_iteration_do(false);
        } else {
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    fn set_title(&mut self, title: &str) {
        if let Some(window) = &self.window {
            window.set_title(title);
        }
    }

    fn geometry(&self) -> WindowGeometry {
        let Some(window) = &self.window else {
            return WindowGeometry {
                position: Position::default(),
                size: Size::new(0, 0),
                frameless: false,
                maximized: false,
            };
        };
        let position = window
            .outer_position()
            .map(|p| Position::new(p.x, p.y))
            .unwrap_or_default();
        let size = window.inner_size();
        WindowGeometry {
            position,
            size: Size::new(size.width, size.height),
            frameless: !window.is_decorated(),
            maximized: window.is_maximized(),
        }
    }

    fn apply_geometry(&mut self, geometry: &WindowGeometry) {
        let Some(window) = &self.window else {
            return;
        };
        window.set_decorations(!geometry.frameless);
        window.set_maximized(geometry.maximized);
        if !geometry.maximized {
            window.set_outer_position(PhysicalPosition::new(geometry.position.x, geometry.position.y));
            let _ = window.request_inner_size(PhysicalSize::new(geometry.size.width, geometry.size.height));
        }
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if let Some(window) = &self.window {
            window.set_fullscreen(fullscreen.then_some(Fullscreen::Borderless(None)));
        }
    }

    fn set_maximized(&mut self, maximized: bool) {
        if let Some(window) = &self.window {
            window.set_maximized(maximized);
        }
    }

    fn set_minimized(&mut self, minimized: bool) {
        if let Some(window) = &self.window {
            window.set_minimized(minimized);
        }
    }

    fn set_visible(&mut self, visible: bool) {
        if let Some(window) = &self.window {
            window.set_visible(visible);
        }
    }

    fn set_frameless(&mut self, frameless: bool) {
        if let Some(window) = &self.window {
            window.set_decorations(!frameless);
        }
    }

    fn set_background(&mut self, color: Color, appearance: Appearance) -> Result<(), WebViewError> {
        if let Some(window) = &self.window {
            window.set_theme(Some(theme_for(appearance)));
        }
        self.live_webview()?
            .set_background_color(color.as_tuple())
            .map_err(native_error)
    }

    fn set_zoom(&mut self, level: f64) -> Result<(), WebViewError> {
        self.live_webview()?.zoom(level).map_err(native_error)
    }

    fn open_devtools(&mut self) {
        if let Some(webview) = &self.webview {
            webview.open_devtools();
        }
    }

    fn close(&mut self) {
        if let Some(window) = &self.window {
            let id = window.id();
            if with_platform(|platform| platform.forget(id)).is_err() {
                warn!("closing window while the event loop is busy");
            }
        }
        self.webview = None;
        if self.window.take().is_some() {
            debug!("native window closed");
        }
    }
}
