//! The association between a handle and the native callbacks that feed it.
//!
//! Every native callback (script message handler, page-load observer,
//! window-close hook) holds a clone of the handle's [`BridgeLink`] and
//! pushes [`NativeEvent`]s into it. Teardown severs the link before the
//! native objects are released, so a callback that fires late (retained
//! browser objects can outlive the logical handle) becomes a no-op instead
//! of reaching host code.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::trace;

use crate::events::NativeEvent;

#[derive(Debug)]
struct LinkInner {
    alive: AtomicBool,
    events: Mutex<VecDeque<NativeEvent>>,
}

/// Shared, severable event queue between native callbacks and a handle.
#[derive(Debug, Clone)]
pub struct BridgeLink {
    inner: Arc<LinkInner>,
}

impl BridgeLink {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(LinkInner {
                alive: AtomicBool::new(true),
                events: Mutex::new(VecDeque::new()),
            }),
        }
    }

    /// Queue an event. Returns `false` if the link was already severed.
    pub fn push(&self, event: NativeEvent) -> bool {
        if !self.is_alive() {
            trace!(?event, "dropping native event for severed link");
            return false;
        }
        match self.inner.events.lock() {
            Ok(mut events) => {
                events.push_back(event);
                true
            }
            Err(_) => false,
        }
    }

    /// Take every queued event in arrival order.
    pub fn drain(&self) -> Vec<NativeEvent> {
        match self.inner.events.lock() {
            Ok(mut events) => events.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn has_pending(&self) -> bool {
        self.inner
            .events
            .lock()
            .map(|events| !events.is_empty())
            .unwrap_or(false)
    }

    pub fn is_alive(&self) -> bool {
        self.inner.alive.load(Ordering::Acquire)
    }

    /// Disconnect every native callback holding this link and discard
    /// anything still queued. Idempotent.
    pub fn sever(&self) {
        self.inner.alive.store(false, Ordering::Release);
        if let Ok(mut events) = self.inner.events.lock() {
            events.clear();
        }
    }
}

impl Default for BridgeLink {
    fn default() -> Self {
        Self::new()
    }
}
