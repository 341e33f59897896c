//! The webview handle: one native window with its browser control.
//!
//! A [`WebView`] owns its adapter, the script bridge state, the saved
//! geometry, the host's invoke handler and user data, and the receiving end
//! of the dispatch queue. It is tied to the GUI thread; other threads reach
//! it through a [`Handle`].

mod controls;
mod pump;


use std::ffi::CString;
use std::fmt;
use std::sync::mpsc;
use std::time::Duration;

use tracing::debug;

use crate::adapter::{Adapter, BackendKind, Capabilities, DefaultAdapter, Waker};
use crate::appearance::GeometryTracker;
use crate::bridge::Bridge;
use crate::dispatch::{Handle, Job};
use crate::link::BridgeLink;
use crate::WVResult;

/// Longest `eval_sync` waits for a script result.
pub const SYNC_EVAL_TIMEOUT: Duration = Duration::from_secs(5);

/// Reject strings the native side would truncate at an interior NUL.
pub(crate) fn check_nul(s: &str) -> WVResult {
    CString::new(s)?;
    Ok(())
}

/// Host callback for `window.external.invoke(arg)`.
pub(crate) type InvokeHandler<T, A> = Box<dyn FnMut(&mut WebView<T, A>, &str) -> WVResult>;

/// Owns the adapter and performs the two-phase teardown: sever the link
/// first, then release the native objects.
struct NativeHost<A: Adapter> {
    adapter: A,
    link: BridgeLink,
    closed: bool,
}

impl<A: Adapter> NativeHost<A> {
    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.link.sever();
        self.adapter.close();
    }
}

impl<A: Adapter> Drop for NativeHost<A> {
    fn drop(&mut self) {
        self.close();
    }
}

pub struct WebView<T, A: Adapter = DefaultAdapter> {
    host: NativeHost<A>,
    bridge: Bridge,
    geometry: GeometryTracker,
    handler: Option<InvokeHandler<T, A>>,
    user_data: T,
    jobs: mpsc::Receiver<Job<T, A>>,
    sender: mpsc::Sender<Job<T, A>>,
    waker: Waker,
    title: String,
    document_title: Option<String>,
    hide_instead_of_close: bool,
    should_exit: bool,
    pumping: bool,
    sync_eval_timeout: Duration,
}

/// Everything `build()` hands over once the adapter exists.
pub(crate) struct Parts<T, A: Adapter> {
    pub adapter: A,
    pub link: BridgeLink,
    pub bridge: Bridge,
    pub handler: InvokeHandler<T, A>,
    pub user_data: T,
    pub title: String,
    pub hide_instead_of_close: bool,
}

impl<T, A: Adapter> WebView<T, A> {
    pub(crate) fn from_parts(parts: Parts<T, A>) -> Self {
        let waker = parts.adapter.waker();
        let (sender, jobs) = mpsc::channel();
        Self {
            host: NativeHost {
                adapter: parts.adapter,
                link: parts.link,
                closed: false,
            },
            bridge: parts.bridge,
            geometry: GeometryTracker::new(),
            handler: Some(parts.handler),
            user_data: parts.user_data,
            jobs,
            sender,
            waker,
            title: parts.title,
            document_title: None,
            hide_instead_of_close: parts.hide_instead_of_close,
            should_exit: false,
            pumping: false,
            sync_eval_timeout: SYNC_EVAL_TIMEOUT,
        }
    }

    /// A cross-thread handle for dispatching work to this webview.
    pub fn handle(&self) -> Handle<T, A> {
        Handle::new(self.sender.clone(), self.waker.clone(), self.host.link.clone())
    }

    pub fn user_data(&self) -> &T {
        &self.user_data
    }

    pub fn user_data_mut(&mut self) -> &mut T {
        &mut self.user_data
    }

    /// Tear the window down and hand back the user data.
    pub fn into_inner(self) -> T {
        let WebView {
            host, user_data, ..
        } = self;
        drop(host);
        user_data
    }

    /// Tear the window down now. Queued dispatches are dropped unrun and
    /// late native callbacks become no-ops. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.host.closed {
            return;
        }
        self.bridge.close();
        self.host.close();
        // Anything still queued would never run.
        let dropped = self.jobs.try_iter().count();
        debug!(title = %self.title, dropped, "webview destroyed");
    }

    pub fn is_closed(&self) -> bool {
        self.host.closed
    }

    pub fn capabilities(&self) -> Capabilities {
        A::CAPABILITIES
    }

    pub fn backend(&self) -> BackendKind {
        A::KIND
    }

    /// The adapter, for backend-specific access.
    pub fn adapter(&self) -> &A {
        &self.host.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.host.adapter
    }

    pub fn bridge_state(&self) -> crate::bridge::BridgeState {
        self.bridge.state()
    }

    /// Title last set by the host.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Title last reported by the loaded document, if any.
    pub fn document_title(&self) -> Option<&str> {
        self.document_title.as_deref()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.geometry.is_fullscreen()
    }

    pub fn is_maximized(&self) -> bool {
        self.geometry.is_maximized()
    }

    /// Override how long `eval_sync` waits for a result.
    pub fn set_sync_eval_timeout(&mut self, timeout: Duration) {
        self.sync_eval_timeout = timeout;
    }
}

impl<T, A: Adapter> fmt::Debug for WebView<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebView")
            .field("backend", &A::KIND)
            .field("title", &self.title)
            .field("bridge", &self.bridge.state())
            .field("closed", &self.host.closed)
            .field("should_exit", &self.should_exit)
            .finish_non_exhaustive()
    }
}
