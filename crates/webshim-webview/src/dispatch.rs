//! Cross-thread hand-off of work to the GUI thread.
//!
//! The window and browser control may only be touched from the thread that
//! pumps them. Other threads hold a [`Handle`] and queue closures; the pump
//! runs them in FIFO order during a later iteration.

use std::fmt;
use std::sync::mpsc;

use tracing::trace;

use webshim_common::WebViewError;

use crate::adapter::{Adapter, DefaultAdapter, Waker};
use crate::link::BridgeLink;
use crate::webview::WebView;
use crate::WVResult;

/// A closure waiting to run on the GUI thread.
pub(crate) type Job<T, A> = Box<dyn FnOnce(&mut WebView<T, A>) -> WVResult + Send>;

/// Thread-safe, cloneable reference to a webview that can only dispatch.
pub struct Handle<T, A: Adapter = DefaultAdapter> {
    jobs: mpsc::Sender<Job<T, A>>,
    waker: Waker,
    link: BridgeLink,
}

impl<T, A: Adapter> Handle<T, A> {
    pub(crate) fn new(jobs: mpsc::Sender<Job<T, A>>, waker: Waker, link: BridgeLink) -> Self {
        Self { jobs, waker, link }
    }

    /// Queue `f` to run on the GUI thread and wake the pump.
    ///
    /// `f` never runs inside this call. Fails with [`WebViewError::Dispatch`]
    /// once the webview has been destroyed.
    pub fn dispatch<F>(&self, f: F) -> WVResult
    where
        F: FnOnce(&mut WebView<T, A>) -> WVResult + Send + 'static,
    {
        if !self.link.is_alive() {
            return Err(WebViewError::Dispatch);
        }
        self.jobs
            .send(Box::new(f))
            .map_err(|_| WebViewError::Dispatch)?;
        trace!("job dispatched");
        (self.waker)();
        Ok(())
    }

    /// Ask the pump to stop, waking it if it is blocked.
    pub fn exit(&self) -> WVResult {
        self.dispatch(|webview| {
            webview.exit();
            Ok(())
        })
    }

    /// Whether the webview this handle points at is still alive.
    pub fn is_alive(&self) -> bool {
        self.link.is_alive()
    }
}

impl<T, A: Adapter> Clone for Handle<T, A> {
    fn clone(&self) -> Self {
        Self {
            jobs: self.jobs.clone(),
            waker: self.waker.clone(),
            link: self.link.clone(),
        }
    }
}

impl<T, A: Adapter> fmt::Debug for Handle<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("alive", &self.link.is_alive())
            .finish_non_exhaustive()
    }
}
