//! The native browser adapter contract.
//!
//! Each adapter owns one native window with an embedded browser control and
//! implements the same small surface: navigate, evaluate, pump, wake, plus
//! the window setters. Page-side notifications are not returned from these
//! calls; the adapter pushes them into the [`BridgeLink`] it was created
//! with, and the handle drains that link after every pump.
//!
//! The adapter is chosen at build time through [`DefaultAdapter`].

pub mod headless;
#[cfg(feature = "native")]
pub mod native;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use webshim_common::{Color, Size, WebViewError};

use crate::appearance::{Appearance, WindowGeometry};
use crate::link::BridgeLink;
use crate::navigation::NavTarget;

pub use headless::{HeadlessAdapter, HeadlessPage};
#[cfg(feature = "native")]
pub use native::NativeAdapter;

#[cfg(feature = "native")]
pub type DefaultAdapter = NativeAdapter;
#[cfg(not(feature = "native"))]
pub type DefaultAdapter = HeadlessAdapter;

/// Called from any thread to unblock a pump waiting for native events.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// The browser engine families a handle can sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    CocoaWebKit,
    GtkWebKit,
    WebView2,
    EdgeHtml,
    Mshtml,
    Headless,
}

/// What an adapter really implements. Setters outside this set are
/// accepted and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// `eval_sync` can spin a nested pump until the script result lands.
    pub sync_eval: bool,
    pub css_injection: bool,
    pub fullscreen: bool,
    pub background_color: bool,
    pub zoom: bool,
    pub devtools: bool,
}

/// How long one pump iteration may wait for native events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpMode {
    /// Wait until at least one event (or a wake) arrives.
    Blocking,
    /// Process what is already queued and return.
    Poll,
}

/// Whether the native loop can keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpOutcome {
    Continue,
    /// The native event loop shut down underneath us.
    Exited,
}

/// Native-facing part of a window configuration.
#[derive(Debug, Clone)]
pub struct WindowSpec {
    pub title: String,
    pub target: NavTarget,
    pub size: Size,
    pub min_size: Size,
    pub resizable: bool,
    pub frameless: bool,
    pub visible: bool,
    pub debug: bool,
    pub background: Option<Color>,
}

impl WindowSpec {
    /// Requested client size, never below the minimum.
    pub fn initial_size(&self) -> Size {
        self.size.at_least(self.min_size)
    }
}

/// Landing spot for an asynchronous script result.
#[derive(Debug, Clone, Default)]
pub struct ResultSlot {
    value: Arc<Mutex<Option<String>>>,
}

impl ResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(&self, value: String) {
        if let Ok(mut slot) = self.value.lock() {
            *slot = Some(value);
        }
    }

    pub fn take(&self) -> Option<String> {
        self.value.lock().ok().and_then(|mut slot| slot.take())
    }
}

pub trait Adapter: Sized {
    const KIND: BackendKind;

    /// What this adapter implements, known without creating a window.
    const CAPABILITIES: Capabilities;

    /// Create the window, embed the browser control, install
    /// `init_script`, wire native callbacks to `link`, and start loading
    /// `spec.target`. Nothing may be left allocated on failure.
    fn create(spec: &WindowSpec, init_script: &str, link: BridgeLink) -> Result<Self, WebViewError>;

    /// A waker that interrupts a blocking [`Adapter::pump`] from any thread.
    fn waker(&self) -> Waker;

    fn navigate(&mut self, target: &NavTarget) -> Result<(), WebViewError>;

    /// Fire-and-forget evaluation.
    fn eval(&mut self, js: &str) -> Result<(), WebViewError>;

    /// Start an evaluation whose JSON-encoded result is written to `slot`.
    fn eval_with_result(&mut self, _js: &str, _slot: ResultSlot) -> Result<(), WebViewError> {
        Err(WebViewError::Unsupported("synchronous eval"))
    }

    /// Run one native event-loop iteration.
    fn pump(&mut self, mode: PumpMode) -> PumpOutcome;

    /// Let pending native work progress while a synchronous evaluation
    /// waits. Must not deliver anything to host code.
    fn pump_nested(&mut self) {}

    fn set_title(&mut self, title: &str);
    fn geometry(&self) -> WindowGeometry;
    fn apply_geometry(&mut self, geometry: &WindowGeometry);
    fn set_fullscreen(&mut self, fullscreen: bool);
    fn set_maximized(&mut self, maximized: bool);
    fn set_minimized(&mut self, minimized: bool);
    fn set_visible(&mut self, visible: bool);
    fn set_frameless(&mut self, frameless: bool);
    fn set_background(&mut self, color: Color, appearance: Appearance) -> Result<(), WebViewError>;
    fn set_zoom(&mut self, level: f64) -> Result<(), WebViewError>;
    fn open_devtools(&mut self) {}

    /// Release the browser control and then the window. The handle has
    /// already severed the link. Must tolerate being called twice.
    fn close(&mut self);
}
