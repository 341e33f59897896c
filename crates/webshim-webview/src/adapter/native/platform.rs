//! The per-thread winit event loop shared by every native window.
//!
//! winit allows one event loop per process and only creates windows from
//! inside its callbacks, so the loop lives in a thread-local, is built on
//! first use, and is driven with `pump_app_events` rather than `run`.
//! Window creation is requested here and fulfilled by the [`Router`] the
//! next time the loop hands it an `ActiveEventLoop`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, trace, warn};
use winit::application::ApplicationHandler;
use winit::event::{StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopBuilder, EventLoopProxy};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowAttributes, WindowId};

use webshim_common::WebViewError;

use crate::adapter::{PumpOutcome, Waker};
use crate::events::NativeEvent;
use crate::link::BridgeLink;

/// Pump iterations allowed for a window creation request to be serviced.
const CREATE_ATTEMPTS: usize = 64;

#[derive(Debug, Clone, Copy)]
pub(crate) enum UserEvent {
    /// Sent by a [`Waker`]; only interrupts the wait.
    Wake,
}

/// Routes winit callbacks to the link of the window they concern.
#[derive(Default)]
struct Router {
    links: HashMap<WindowId, BridgeLink>,
    request: Option<WindowAttributes>,
    created: Option<Result<Window, String>>,
}

impl Router {
    fn fulfil(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(attributes) = self.request.take() {
            let created = event_loop.create_window(attributes).map_err(|e| e.to_string());
            self.created = Some(created);
        }
    }
}

impl ApplicationHandler<UserEvent> for Router {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        trace!(?cause, "event loop wakeup");
        self.fulfil(event_loop);
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.fulfil(event_loop);
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        trace!(?event, "user event");
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(link) = self.links.get(&id) {
                    link.push(NativeEvent::CloseRequested);
                }
            }
            WindowEvent::Destroyed => {
                self.links.remove(&id);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.fulfil(event_loop);
    }
}

/// The GUI thread is whichever thread creates the first window, not
/// necessarily `main`. macOS still requires the main thread.
fn event_loop_builder() -> EventLoopBuilder<UserEvent> {
    #[cfg_attr(target_os = "macos", allow(unused_mut))]
    let mut builder = EventLoop::<UserEvent>::with_user_event();
    #[cfg(target_os = "linux")]
    {
        use winit::platform::x11::EventLoopBuilderExtX11;
        builder.with_x11().with_any_thread(true);
    }
    #[cfg(target_os = "windows")]
    {
        use winit::platform::windows::EventLoopBuilderExtWindows;
        builder.with_any_thread(true);
    }
    builder
}

pub(crate) struct Platform {
    event_loop: EventLoop<UserEvent>,
    router: Router,
    proxy: EventLoopProxy<UserEvent>,
}

thread_local! {
    static PLATFORM: RefCell<Option<Platform>> = const { RefCell::new(None) };
}

/// Run `f` against this thread's platform, creating it on first use.
pub(crate) fn with_platform<R>(f: impl FnOnce(&mut Platform) -> R) -> Result<R, WebViewError> {
    PLATFORM.with(|cell| {
        let mut slot = cell
            .try_borrow_mut()
            .map_err(|_| WebViewError::Native("event loop re-entered from a callback".into()))?;
        if slot.is_none() {
            *slot = Some(Platform::new()?);
        }
        match slot.as_mut() {
            Some(platform) => Ok(f(platform)),
            None => Err(WebViewError::Initialization("event loop unavailable".into())),
        }
    })
}

impl Platform {
    fn new() -> Result<Self, WebViewError> {
        #[cfg(target_os = "linux")]
        {
            // wry embeds WebKitGTK through X11 handles only, so GDK and winit
            // both go through X11 (XWayland on Wayland sessions).
            gtk::gdk::set_allowed_backends("x11");
            gtk::init().map_err(|e| WebViewError::Initialization(format!("gtk: {e}")))?;
        }

        let event_loop = event_loop_builder()
            .build()
            .map_err(|e| WebViewError::Initialization(format!("event loop: {e}")))?;
        let proxy = event_loop.create_proxy();
        debug!("native event loop initialized");

        Ok(Self {
            event_loop,
            router: Router::default(),
            proxy,
        })
    }

    /// Create a window and register `link` for its close events.
    pub(crate) fn create_window(
        &mut self,
        attributes: WindowAttributes,
        link: BridgeLink,
    ) -> Result<Window, WebViewError> {
        self.router.request = Some(attributes);
        for _ in 0..CREATE_ATTEMPTS {
            if let PumpOutcome::Exited = self.pump(Some(Duration::ZERO)) {
                break;
            }
            if let Some(created) = self.router.created.take() {
                let window = created.map_err(WebViewError::Initialization)?;
                self.router.links.insert(window.id(), link);
                return Ok(window);
            }
        }
        self.router.request = None;
        Err(WebViewError::Initialization(
            "event loop never serviced the window request".into(),
        ))
    }

    /// Stop routing events for `id`.
    pub(crate) fn forget(&mut self, id: WindowId) {
        self.router.links.remove(&id);
    }

    pub(crate) fn waker(&self) -> Waker {
        let proxy = Mutex::new(self.proxy.clone());
        Arc::new(move || {
            if let Ok(proxy) = proxy.lock() {
                if proxy.send_event(UserEvent::Wake).is_err() {
                    trace!("wake after event loop closed");
                }
            }
        })
    }

    /// One iteration of winit, then whatever GTK has pending.
    pub(crate) fn pump(&mut self, timeout: Option<Duration>) -> PumpOutcome {
        let status = self
            .event_loop
            .pump_app_events(timeout, &mut self.router);

        #[cfg(target_os = "linux")]
        while gtk::events_pending() {
            gtk::main_iteration_do(false);
        }

        match status {
            PumpStatus::Continue => PumpOutcome::Continue,
            PumpStatus::Exit(code) => {
                warn!(code, "native event loop exited");
                PumpOutcome::Exited
            }
        }
    }
}
