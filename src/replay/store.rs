//! # Replay store: last published payload per topic.
//!
//! Maintains the authoritative "last known value" of every topic, written on
//! each publish and consulted by new subscriptions to decide whether to fire
//! immediately instead of waiting for the next publish.
//!
//! ## Rules
//! - Only the **latest** payload per topic is retained; no history.
//! - Absence of an entry means "never published" — distinct from an entry
//!   holding the null payload sentinel.
//! - A store constructed disabled records nothing and answers every lookup
//!   with `None`, which turns every replay check downstream into "wait for a
//!   live publish".

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::events::{Payload, PayloadSet, Topic};

/// Last-value store consulted by replay-enabled subscriptions.
pub(crate) struct ReplayStore {
    values: Mutex<HashMap<Topic, Payload>>,
    enabled: bool,
}

impl ReplayStore {
    /// Creates a store; a disabled store is inert.
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            enabled,
        }
    }

    /// True when replay was enabled at coordinator construction.
    pub(crate) fn enabled(&self) -> bool {
        self.enabled
    }

    /// Records the latest payload for a topic, overwriting any prior value.
    /// No-op when the store is disabled.
    pub(crate) fn record(&self, topic: Topic, payload: Payload) {
        if !self.enabled {
            return;
        }
        self.values.lock().insert(topic, payload);
    }

    /// Returns the last published payload for a topic, if any.
    pub(crate) fn last(&self, topic: &str) -> Option<Payload> {
        self.values.lock().get(topic).cloned()
    }

    /// Returns the full replayed set for a topic list, or `None` unless
    /// **every** topic has a stored value. A partial store never replays.
    pub(crate) fn replay_all(&self, topics: &[Topic]) -> Option<PayloadSet> {
        let values = self.values.lock();
        let mut set = PayloadSet::with_capacity(topics.len());
        for topic in topics {
            let payload = values.get(topic)?;
            set.insert(topic.clone(), payload.clone());
        }
        Some(set)
    }
}
