//! Script bridge between page JavaScript and the host.
//!
//! Messages flow in both directions:
//! - **page -> host**: page script calls `window.external.invoke(string)`,
//!   the init script forwards it to the native message channel, and the
//!   pump hands it to the host's invoke handler.
//! - **host -> page**: the host evaluates script text; there is no envelope,
//!   callers serialize their own payloads.
//!
//! [`Bridge`] tracks whether the page can take scripts yet. Scripts
//! submitted before the first page load completes are held back and
//! flushed in order once it does.

use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, trace};

use webshim_common::WebViewError;

/// Installed before any page script runs. Defines the host-call primitive
/// on top of the native message channel (`window.ipc.postMessage`).
pub const BRIDGE_INIT_SCRIPT: &str = r#"
(function() {
    var invoke = function(arg) {
        window.ipc.postMessage(String(arg));
    };
    var external = window.external;
    try {
        if (external && typeof external === 'object') {
            external.invoke = invoke;
        }
    } catch (e) {}
    if (!window.external || window.external.invoke !== invoke) {
        try {
            Object.defineProperty(window, 'external', {
                value: { invoke: invoke },
                configurable: true
            });
        } catch (e) {
            window.external = { invoke: invoke };
        }
    }
})();
"#;

/// Lifecycle of the bridge on one handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Uninitialized,
    /// Init script installed, page not loaded yet.
    BridgeInstalled,
    /// Page load complete; scripts run immediately.
    Ready,
    /// A synchronous evaluation is waiting for its result.
    Evaluating,
    /// Torn down. Terminal.
    Closed,
}

impl fmt::Display for BridgeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::BridgeInstalled => "bridge-installed",
            Self::Ready => "ready",
            Self::Evaluating => "evaluating",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// What to do with a submitted script.
#[derive(Debug, PartialEq, Eq)]
pub enum Submission {
    /// Evaluate right away.
    RunNow(String),
    /// Held until the page is ready.
    Queued,
}

#[derive(Debug)]
pub struct Bridge {
    state: BridgeState,
    pending: VecDeque<String>,
}

impl Bridge {
    pub fn new() -> Self {
        Self {
            state: BridgeState::Uninitialized,
            pending: VecDeque::new(),
        }
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Record that the init script has been registered with the control.
    pub fn install(&mut self) -> Result<(), WebViewError> {
        match self.state {
            BridgeState::Uninitialized => {
                self.state = BridgeState::BridgeInstalled;
                Ok(())
            }
            other => Err(WebViewError::Bridge(format!(
                "cannot install bridge while {other}"
            ))),
        }
    }

    /// A navigation began; scripts wait until it finishes.
    pub fn page_started(&mut self) {
        match self.state {
            BridgeState::BridgeInstalled | BridgeState::Ready => {
                self.state = BridgeState::BridgeInstalled;
            }
            other => trace!(state = %other, "page start ignored"),
        }
    }

    /// A navigation was refused before it began. The current page stays,
    /// so a bridge that was `Ready` becomes `Ready` again.
    pub fn navigation_failed(&mut self, previous: BridgeState) {
        if previous == BridgeState::Ready && self.state == BridgeState::BridgeInstalled {
            self.state = BridgeState::Ready;
        }
    }

    /// A navigation finished. Returns the scripts held back meanwhile.
    pub fn page_finished(&mut self) -> Vec<String> {
        match self.state {
            BridgeState::BridgeInstalled | BridgeState::Ready => {
                self.state = BridgeState::Ready;
                if !self.pending.is_empty() {
                    debug!(count = self.pending.len(), "flushing queued scripts");
                }
                self.pending.drain(..).collect()
            }
            other => {
                trace!(state = %other, "page finish ignored");
                Vec::new()
            }
        }
    }

    /// Route a fire-and-forget script.
    pub fn submit(&mut self, script: String) -> Result<Submission, WebViewError> {
        match self.state {
            BridgeState::Ready | BridgeState::Evaluating => Ok(Submission::RunNow(script)),
            BridgeState::Uninitialized | BridgeState::BridgeInstalled => {
                self.pending.push_back(script);
                Ok(Submission::Queued)
            }
            BridgeState::Closed => Err(WebViewError::Closed),
        }
    }

    /// Enter `Evaluating` for a synchronous evaluation.
    pub fn begin_eval(&mut self) -> Result<(), WebViewError> {
        match self.state {
            BridgeState::Ready => {
                self.state = BridgeState::Evaluating;
                Ok(())
            }
            BridgeState::Evaluating => Err(WebViewError::Reentrant),
            BridgeState::Closed => Err(WebViewError::Closed),
            other => Err(WebViewError::Bridge(format!(
                "page not ready for evaluation ({other})"
            ))),
        }
    }

    /// Leave `Evaluating`, whether the result arrived or not.
    pub fn end_eval(&mut self) {
        if self.state == BridgeState::Evaluating {
            self.state = BridgeState::Ready;
        }
    }

    /// Move to `Closed` and drop anything still queued.
    pub fn close(&mut self) {
        self.state = BridgeState::Closed;
        self.pending.clear();
    }
}

impl Default for Bridge {
    fn default() -> Self {
        Self::new()
    }
}
