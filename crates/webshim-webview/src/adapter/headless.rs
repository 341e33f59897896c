//! In-memory adapter with no display requirement.
//!
//! Models a window (geometry, style, visibility), records every navigation
//! and script it is given, and exposes a [`HeadlessPage`] through which a
//! test plays the part of page script and window manager: sending bridge
//! messages, finishing loads, requesting a close.

use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use tracing::{debug, trace};

use webshim_common::{Color, Position, Size, WebViewError};

use crate::appearance::{Appearance, WindowGeometry};
use crate::events::{NativeEvent, PageLoadState};
use crate::link::BridgeLink;
use crate::navigation::NavTarget;

use super::{
    Adapter, BackendKind, Capabilities, PumpMode, PumpOutcome, ResultSlot, Waker, WindowSpec,
};

/// Size of the pretend screen used for fullscreen and maximize.
pub const HEADLESS_SCREEN: Size = Size::new(1920, 1080);

/// Upper bound on a blocking pump with nothing to do, so a test that
/// forgets to post an event stalls briefly instead of hanging.
const BLOCKING_WAIT: Duration = Duration::from_millis(50);

/// Where new windows are placed.
const INITIAL_POSITION: Position = Position::new(100, 100);

/// Observable state of the modelled window.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessWindow {
    pub title: String,
    pub position: Position,
    pub size: Size,
    pub min_size: Size,
    pub resizable: bool,
    pub frameless: bool,
    pub visible: bool,
    pub fullscreen: bool,
    pub maximized: bool,
    pub minimized: bool,
    pub zoom: f64,
    pub background: Option<Color>,
    pub appearance: Option<Appearance>,
    pub devtools_open: bool,
}

#[derive(Debug, Default)]
struct Signal {
    woken: Mutex<bool>,
    cond: Condvar,
}

impl Signal {
    fn wake(&self) {
        if let Ok(mut woken) = self.woken.lock() {
            *woken = true;
            self.cond.notify_all();
        }
    }

    /// Wait for a wake or until `link` has events, bounded by `BLOCKING_WAIT`.
    fn wait(&self, link: &BridgeLink) {
        let Ok(mut woken) = self.woken.lock() else {
            return;
        };
        if !*woken && !link.has_pending() {
            woken = match self.cond.wait_timeout(woken, BLOCKING_WAIT) {
                Ok((guard, _)) => guard,
                Err(_) => return,
            };
        }
        *woken = false;
    }

    fn clear(&self) {
        if let Ok(mut woken) = self.woken.lock() {
            *woken = false;
        }
    }
}

/// The page and window-manager side of a headless window.
///
/// Cheap to clone and usable from any thread. Once the owning handle is
/// destroyed every method becomes a no-op and reports `false`.
#[derive(Debug, Clone)]
pub struct HeadlessPage {
    link: BridgeLink,
    signal: Arc<Signal>,
}

impl HeadlessPage {
    /// Simulate `window.external.invoke(body)`.
    pub fn invoke(&self, body: &str) -> bool {
        self.push(NativeEvent::Message { body: body.into() })
    }

    pub fn start_load(&self, url: &str) -> bool {
        self.push(NativeEvent::PageLoad {
            state: PageLoadState::Started,
            url: url.into(),
        })
    }

    pub fn finish_load(&self, url: &str) -> bool {
        self.push(NativeEvent::PageLoad {
            state: PageLoadState::Finished,
            url: url.into(),
        })
    }

    pub fn change_title(&self, title: &str) -> bool {
        self.push(NativeEvent::TitleChanged {
            title: title.into(),
        })
    }

    /// Simulate the user clicking the window's close button.
    pub fn request_close(&self) -> bool {
        self.push(NativeEvent::CloseRequested)
    }

    fn push(&self, event: NativeEvent) -> bool {
        let queued = self.link.push(event);
        if queued {
            self.signal.wake();
        }
        queued
    }
}

type Responder = Box<dyn FnMut(&str) -> Option<String>>;

pub struct HeadlessAdapter {
    window: HeadlessWindow,
    link: BridgeLink,
    signal: Arc<Signal>,
    init_script: String,
    auto_load: bool,
    navigations: Vec<NavTarget>,
    scripts: Vec<String>,
    responder: Responder,
    unanswered: Vec<(ResultSlot, String)>,
    rejected_scripts: Option<String>,
    refuse_navigation: bool,
    pumps: usize,
    closed: bool,
}

impl HeadlessAdapter {
    pub fn window(&self) -> &HeadlessWindow {
        &self.window
    }

    pub fn page(&self) -> HeadlessPage {
        HeadlessPage {
            link: self.link.clone(),
            signal: Arc::clone(&self.signal),
        }
    }

    pub fn init_script(&self) -> &str {
        &self.init_script
    }

    /// Every target handed to the control, the initial one first.
    pub fn navigations(&self) -> &[NavTarget] {
        &self.navigations
    }

    /// Every script evaluated so far, in order.
    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }

    /// Number of pump iterations run, nested ones excluded.
    pub fn pump_count(&self) -> usize {
        self.pumps
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether navigations complete on their own. When off, a test drives
    /// loads through [`HeadlessPage::finish_load`].
    pub fn set_auto_load(&mut self, auto_load: bool) {
        self.auto_load = auto_load;
    }

    /// Decide what `eval_sync` returns for a given script. `None` means the
    /// page never answers.
    pub fn set_script_responder(&mut self, responder: impl FnMut(&str) -> Option<String> + 'static) {
        self.responder = Box::new(responder);
    }

    /// Make `eval` fail for any script containing `needle`.
    pub fn reject_scripts_containing(&mut self, needle: impl Into<String>) {
        self.rejected_scripts = Some(needle.into());
    }

    /// Make later navigations fail before they start.
    pub fn refuse_navigation(&mut self, refuse: bool) {
        self.refuse_navigation = refuse;
    }

    fn load(&mut self, target: &NavTarget) {
        self.navigations.push(target.clone());
        if !self.auto_load {
            return;
        }
        let url = match target {
            NavTarget::Url(url) => url.clone(),
            NavTarget::Html(_) => "about:blank".to_string(),
        };
        self.link.push(NativeEvent::PageLoad {
            state: PageLoadState::Started,
            url: url.clone(),
        });
        self.link.push(NativeEvent::PageLoad {
            state: PageLoadState::Finished,
            url,
        });
    }

    fn deliver_results(&mut self) {
        for (slot, value) in self.unanswered.drain(..) {
            slot.fill(value);
        }
    }

    fn cover_screen(&mut self) {
        self.window.position = Position::default();
        self.window.size = HEADLESS_SCREEN;
    }
}

impl Adapter for HeadlessAdapter {
    const KIND: BackendKind = BackendKind::Headless;
    const CAPABILITIES: Capabilities = Capabilities {
        sync_eval: true,
        css_injection: true,
        fullscreen: true,
        background_color: true,
        zoom: true,
        devtools: true,
    };

    fn create(spec: &WindowSpec, init_script: &str, link: BridgeLink) -> Result<Self, WebViewError> {
        let size = spec.initial_size();
        if size.width == 0 || size.height == 0 {
            return Err(WebViewError::Initialization(format!(
                "cannot create a {size} window"
            )));
        }

        let mut adapter = Self {
            window: HeadlessWindow {
                title: spec.title.clone(),
                position: INITIAL_POSITION,
                size,
                min_size: spec.min_size,
                resizable: spec.resizable,
                frameless: spec.frameless,
                visible: spec.visible,
                fullscreen: false,
                maximized: false,
                minimized: false,
                zoom: 1.0,
                background: spec.background,
                appearance: spec.background.map(Appearance::for_background),
                devtools_open: false,
            },
            link,
            signal: Arc::new(Signal::default()),
            init_script: init_script.to_string(),
            auto_load: true,
            navigations: Vec::new(),
            scripts: Vec::new(),
            responder: Box::new(|_| Some("null".to_string())),
            unanswered: Vec::new(),
            rejected_scripts: None,
            refuse_navigation: false,
            pumps: 0,
            closed: false,
        };
        adapter.load(&spec.target);
        debug!(title = %spec.title, %size, "headless window created");
        Ok(adapter)
    }

    fn waker(&self) -> Waker {
        let signal = Arc::clone(&self.signal);
        Arc::new(move || signal.wake())
    }

    fn navigate(&mut self, target: &NavTarget) -> Result<(), WebViewError> {
        if self.closed {
            return Err(WebViewError::Closed);
        }
        if self.refuse_navigation {
            return Err(WebViewError::Native(format!(
                "navigation to {} refused",
                target.describe()
            )));
        }
        self.load(target);
        Ok(())
    }

    fn eval(&mut self, js: &str) -> Result<(), WebViewError> {
        if self.closed {
            return Err(WebViewError::Closed);
        }
        if let Some(needle) = self.rejected_scripts.as_deref() {
            if js.contains(needle) {
                return Err(WebViewError::JsEvaluation("script rejected by page".into()));
            }
        }
        self.scripts.push(js.to_string());
        Ok(())
    }

    fn eval_with_result(&mut self, js: &str, slot: ResultSlot) -> Result<(), WebViewError> {
        self.eval(js)?;
        if let Some(value) = (self.responder)(js) {
            // Answered on a later pump, like a real engine callback.
            self.unanswered.push((slot, value));
        }
        Ok(())
    }

    fn pump(&mut self, mode: PumpMode) -> PumpOutcome {
        if self.closed {
            return PumpOutcome::Exited;
        }
        self.pumps += 1;
        match mode {
            PumpMode::Blocking => self.signal.wait(&self.link),
            PumpMode::Poll => self.signal.clear(),
        }
        self.deliver_results();
        PumpOutcome::Continue
    }

    fn pump_nested(&mut self) {
        if self.unanswered.is_empty() {
            trace!("headless nested pump idle");
            std::thread::sleep(Duration::from_millis(1));
        }
        self.deliver_results();
    }

    fn set_title(&mut self, title: &str) {
        self.window.title = title.to_string();
    }

    fn geometry(&self) -> WindowGeometry {
        WindowGeometry {
            position: self.window.position,
            size: self.window.size,
            frameless: self.window.frameless,
            maximized: self.window.maximized,
        }
    }

    fn apply_geometry(&mut self, geometry: &WindowGeometry) {
        self.window.position = geometry.position;
        self.window.size = geometry.size;
        self.window.frameless = geometry.frameless;
        self.window.maximized = geometry.maximized;
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.window.fullscreen = fullscreen;
        if fullscreen {
            self.window.frameless = true;
            self.cover_screen();
        }
    }

    fn set_maximized(&mut self, maximized: bool) {
        self.window.maximized = maximized;
        if maximized {
            self.cover_screen();
        }
    }

    fn set_minimized(&mut self, minimized: bool) {
        self.window.minimized = minimized;
    }

    fn set_visible(&mut self, visible: bool) {
        self.window.visible = visible;
    }

    fn set_frameless(&mut self, frameless: bool) {
        self.window.frameless = frameless;
    }

    fn set_background(&mut self, color: Color, appearance: Appearance) -> Result<(), WebViewError> {
        self.window.background = Some(color);
        self.window.appearance = Some(appearance);
        Ok(())
    }

    fn set_zoom(&mut self, level: f64) -> Result<(), WebViewError> {
        self.window.zoom = level;
        Ok(())
    }

    fn open_devtools(&mut self) {
        self.window.devtools_open = true;
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.window.visible = false;
        self.unanswered.clear();
        debug!(title = %self.window.title, "headless window closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(target: NavTarget) -> WindowSpec {
        WindowSpec {
            title: "headless".into(),
            target,
            size: Size::new(640, 480),
            min_size: Size::new(300, 300),
            resizable: true,
            frameless: false,
            visible: true,
            debug: false,
            background: None,
        }
    }

    #[test]
    fn create_loads_initial_target() {
        let link = BridgeLink::new();
        let adapter =
            HeadlessAdapter::create(&spec(NavTarget::Url("https://a.test".into())), "init", link.clone())
                .unwrap();
        assert_eq!(adapter.window().size, Size::new(640, 480));
        assert_eq!(adapter.init_script(), "init");
        assert_eq!(adapter.navigations().len(), 1);
        let events = link.drain();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[1],
            NativeEvent::PageLoad { state: PageLoadState::Finished, url } if url == "https://a.test"
        ));
    }

    #[test]
    fn zero_sized_window_fails() {
        let mut bad = spec(NavTarget::Html(String::new()));
        bad.size = Size::new(0, 0);
        bad.min_size = Size::new(0, 0);
        let result = HeadlessAdapter::create(&bad, "", BridgeLink::new());
        assert!(matches!(result, Err(WebViewError::Initialization(_))));
    }

    #[test]
    fn fullscreen_covers_screen_and_drops_frame() {
        let mut adapter =
            HeadlessAdapter::create(&spec(NavTarget::Html(String::new())), "", BridgeLink::new()).unwrap();
        adapter.set_fullscreen(true);
        assert_eq!(adapter.window().size, HEADLESS_SCREEN);
        assert!(adapter.window().frameless);
        adapter.set_fullscreen(false);
        // Restoring the frame and size is the handle's job.
        assert!(adapter.window().frameless);
    }

    #[test]
    fn blocking_pump_returns_after_wake() {
        let mut adapter =
            HeadlessAdapter::create(&spec(NavTarget::Html(String::new())), "", BridgeLink::new()).unwrap();
        let waker = adapter.waker();
        std::thread::spawn(move || waker()).join().unwrap();
        assert_eq!(adapter.pump(PumpMode::Blocking), PumpOutcome::Continue);
        assert_eq!(adapter.pump_count(), 1);
    }

    #[test]
    fn page_is_inert_after_sever() {
        let link = BridgeLink::new();
        let adapter =
            HeadlessAdapter::create(&spec(NavTarget::Html(String::new())), "", link.clone()).unwrap();
        let page = adapter.page();
        assert!(page.invoke("before"));
        link.sever();
        assert!(!page.invoke("after"));
        assert!(!page.request_close());
    }

    #[test]
    fn results_arrive_on_a_later_pump() {
        let mut adapter =
            HeadlessAdapter::create(&spec(NavTarget::Html(String::new())), "", BridgeLink::new()).unwrap();
        adapter.set_script_responder(|js| Some(format!("{}", js.len())));
        let slot = ResultSlot::new();
        adapter.eval_with_result("1 + 1", slot.clone()).unwrap();
        assert!(slot.take().is_none());
        adapter.pump_nested();
        assert_eq!(slot.take().as_deref(), Some("5"));
    }

    #[test]
    fn closed_adapter_rejects_work() {
        let mut adapter =
            HeadlessAdapter::create(&spec(NavTarget::Html(String::new())), "", BridgeLink::new()).unwrap();
        adapter.close();
        adapter.close();
        assert!(adapter.is_closed());
        assert!(matches!(adapter.eval("x"), Err(WebViewError::Closed)));
        assert_eq!(adapter.pump(PumpMode::Poll), PumpOutcome::Exited);
    }
}
