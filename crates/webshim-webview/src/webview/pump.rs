//! The event pump: native events, then bridge events, then dispatched jobs.

use tracing::{debug, trace, warn};

use webshim_common::WebViewError;

use crate::adapter::{Adapter, PumpMode, PumpOutcome};
use crate::events::{NativeEvent, PageLoadState};
use crate::WVResult;

use super::WebView;

impl<T, A: Adapter> WebView<T, A> {
    /// Run one blocking iteration. `None` once the webview should exit.
    pub fn step(&mut self) -> Option<WVResult> {
        self.pump(PumpMode::Blocking)
    }

    /// Run one non-blocking iteration. `None` once the webview should exit.
    pub fn poll(&mut self) -> Option<WVResult> {
        self.pump(PumpMode::Poll)
    }

    /// One iteration, blocking or not, for hosts driving their own loop.
    pub fn iterate(&mut self, blocking: bool) -> Option<WVResult> {
        let mode = if blocking {
            PumpMode::Blocking
        } else {
            PumpMode::Poll
        };
        self.pump(mode)
    }

    /// Pump until exit, then hand back the user data.
    pub fn run(mut self) -> WVResult<T> {
        while let Some(result) = self.step() {
            result?;
        }
        Ok(self.into_inner())
    }

    /// Request that the pump stop. The next iteration returns `None` and
    /// tears the window down.
    pub fn exit(&mut self) {
        if !self.should_exit {
            debug!(title = %self.title, "exit requested");
        }
        self.should_exit = true;
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// The shared body of [`step`](Self::step) and [`poll`](Self::poll).
    pub fn pump(&mut self, mode: PumpMode) -> Option<WVResult> {
        if self.should_exit || self.host.closed {
            self.destroy();
            return None;
        }
        if self.pumping {
            return Some(Err(WebViewError::Reentrant));
        }

        self.pumping = true;
        let result = self.pump_once(mode);
        self.pumping = false;

        match result {
            Err(e) => {
                if self.should_exit {
                    self.destroy();
                }
                Some(Err(e))
            }
            Ok(()) if self.should_exit => {
                self.destroy();
                None
            }
            Ok(()) => Some(Ok(())),
        }
    }

    fn pump_once(&mut self, mode: PumpMode) -> WVResult {
        if self.host.adapter.pump(mode) == PumpOutcome::Exited {
            self.should_exit = true;
        }

        let mut first_error = None;

        for event in self.host.link.drain() {
            if self.host.closed {
                break;
            }
            if let Err(e) = self.handle_event(event) {
                warn!(error = %e, "event handling failed");
                first_error.get_or_insert(e);
            }
        }

        let jobs: Vec<_> = self.jobs.try_iter().collect();
        if !jobs.is_empty() {
            trace!(count = jobs.len(), "running dispatched jobs");
        }
        for job in jobs {
            if self.host.closed {
                break;
            }
            if let Err(e) = job(self) {
                warn!(error = %e, "dispatched job failed");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn handle_event(&mut self, event: NativeEvent) -> WVResult {
        match event {
            NativeEvent::PageLoad {
                state: PageLoadState::Started,
                url,
            } => {
                debug!(url = %url, "page load started");
                self.bridge.page_started();
                Ok(())
            }
            NativeEvent::PageLoad {
                state: PageLoadState::Finished,
                url,
            } => {
                debug!(url = %url, "page load finished");
                let mut first_error = None;
                for script in self.bridge.page_finished() {
                    if let Err(e) = self.host.adapter.eval(&script) {
                        warn!(error = %e, len = script.len(), "queued script failed");
                        first_error.get_or_insert(e);
                    }
                }
                first_error.map_or(Ok(()), Err)
            }
            NativeEvent::TitleChanged { title } => {
                trace!(title = %title, "document title changed");
                self.document_title = Some(title);
                Ok(())
            }
            NativeEvent::Message { body } => self.invoke(&body),
            NativeEvent::CloseRequested => {
                if self.hide_instead_of_close {
                    debug!(title = %self.title, "close requested, hiding");
                    self.host.adapter.set_visible(false);
                } else {
                    debug!(title = %self.title, "close requested");
                    self.exit();
                    self.destroy();
                }
                Ok(())
            }
        }
    }

    fn invoke(&mut self, body: &str) -> WVResult {
        let Some(mut handler) = self.handler.take() else {
            warn!(len = body.len(), "message arrived with no invoke handler");
            return Ok(());
        };
        trace!(len = body.len(), "delivering message");
        let result = handler(self, body);
        self.handler = Some(handler);
        result
    }
}
