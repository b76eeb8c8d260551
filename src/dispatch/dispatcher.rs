//! # Dispatcher: per-topic handler tables and synchronous emission.
//!
//! The [`Dispatcher`] owns every single-topic subscription. It provides
//! "register a handler for a topic, either one-shot or persistent" and "emit
//! a topic with an envelope and payload to all its registered handlers, in
//! registration order".
//!
//! ## Rules
//! - **Synchronous emission**: handlers run inside `emit`, on the calling
//!   thread, in registration order.
//! - **Snapshot discipline**: each emission iterates a snapshot taken under
//!   the lock at emission time, so handlers that register or expire during
//!   the pass can neither be skipped nor double-fired.
//! - **Once-expiry at snapshot time**: one-shot registrations leave the live
//!   table in the same critical section that takes the snapshot. A reentrant
//!   publish from inside a handler therefore cannot observe a one-shot
//!   handler that is already part of an in-progress pass, and cannot re-fire
//!   it.
//! - **Advisory cap**: exceeding the per-topic handler limit logs a warning
//!   and registers anyway; capacity exists to catch subscription leaks, not
//!   to enforce a hard limit.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::warn;

use crate::events::{Delivery, Envelope, Payload, Topic};
use crate::handlers::HandlerRef;

/// One registered subscription for a topic.
struct Registration {
    handler: HandlerRef,
    once: bool,
}

/// Per-topic ordered handler tables with synchronous fan-out.
pub(crate) struct Dispatcher {
    topics: Mutex<HashMap<Topic, Vec<Registration>>>,
    /// Advisory per-topic handler cap; `None` = unlimited.
    handler_limit: Option<usize>,
}

impl Dispatcher {
    /// Creates an empty dispatcher with the given advisory cap.
    pub(crate) fn new(handler_limit: Option<usize>) -> Self {
        Self {
            topics: Mutex::new(HashMap::new()),
            handler_limit,
        }
    }

    /// Registers a handler for a topic under the given once/persistent mode.
    ///
    /// Registration order is delivery order. Exceeding the advisory cap
    /// warns and proceeds.
    pub(crate) fn register(&self, topic: Topic, handler: HandlerRef, once: bool) {
        let mut topics = self.topics.lock();
        let entries = topics.entry(topic.clone()).or_default();

        if let Some(max) = self.handler_limit {
            if entries.len() >= max {
                warn!(
                    topic = %topic,
                    registered = entries.len(),
                    max,
                    handler = handler.name(),
                    "handler cap exceeded; registering anyway"
                );
            }
        }

        entries.push(Registration { handler, once });
    }

    /// Emits one publish to every handler currently registered for `topic`.
    ///
    /// One-shot handlers are removed from the live table before the
    /// invocation pass starts; the pass itself runs without any lock held,
    /// so handlers may publish, subscribe, or expire reentrantly.
    pub(crate) fn emit(&self, topic: &str, envelope: &Envelope, payload: &Payload) {
        let snapshot: Vec<HandlerRef> = {
            let mut topics = self.topics.lock();
            let Some(entries) = topics.get_mut(topic) else {
                return;
            };
            let snapshot = entries.iter().map(|r| r.handler.clone()).collect();
            entries.retain(|r| !r.once);
            if entries.is_empty() {
                topics.remove(topic);
            }
            snapshot
        };

        let delivery = Delivery::Single(payload.clone());
        for handler in snapshot {
            handler.on_delivery(envelope, &delivery);
        }
    }

    /// Number of live registrations for a topic.
    pub(crate) fn count(&self, topic: &str) -> usize {
        self.topics.lock().get(topic).map_or(0, Vec::len)
    }
}
