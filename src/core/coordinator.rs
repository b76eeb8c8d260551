//! # Coordinator: the publish/subscribe facade.
//!
//! The [`Coordinator`] is the object callers interact with. It owns the
//! three collaborators and wires them together:
//!
//! - the [`Dispatcher`](crate::dispatch::Dispatcher) for single-topic
//!   subscriptions,
//! - the [`ReplayStore`](crate::replay::ReplayStore) for
//!   last-value-on-subscribe delivery,
//! - the [`JoinRegistry`](crate::join::JoinRegistry) for multi-topic
//!   subscription groups,
//!
//! and it constructs the [`Envelope`] accompanying every delivery.
//!
//! ## Publish pipeline
//! ```text
//! publish(topic, payload)
//!   ├─► normalize payload (absent → null sentinel)
//!   ├─► construct Envelope { topic, seq, now }
//!   ├─► ReplayStore.record(topic, payload)            (when enabled)
//!   ├─► JoinRegistry.accumulate(topic, payload)
//!   │       └─► completed groups fire here, one Envelope per group key
//!   └─► Dispatcher.emit(topic, envelope, payload)
//!           └─► single-topic handlers, registration order
//! ```
//!
//! ## Error convention
//! An invalid subscription is never raised: it is published to the reserved
//! [`ERROR_TOPIC`] as `{ source, message }` (observable by subscribing to
//! that topic like any other), and additionally returned as `Err` for
//! callers wanting synchronous confirmation. A coordinator with no `"error"`
//! subscriber silently drops the report.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use serde_json::json;
use tracing::{debug, trace};

use crate::core::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::SubscribeError;
use crate::events::{normalize, Delivery, Envelope, Payload, Topic};
use crate::join::{join_key, JoinRegistry};
use crate::replay::ReplayStore;
use crate::subscribe::SubscribeSpec;

/// Reserved topic the coordinator reports its own errors on.
pub const ERROR_TOPIC: &str = "error";

/// In-process publish/subscribe coordinator.
///
/// Each instance is fully independent: registries, replay store, and the
/// envelope sequence counter are per-coordinator, so several coordinators
/// can live side by side in one process.
///
/// The coordinator is `Send + Sync`. Bookkeeping is serialized internally,
/// and no lock is held while a handler runs, which is what allows handlers
/// to call [`publish`](Coordinator::publish) and
/// [`subscribe`](Coordinator::subscribe) reentrantly.
pub struct Coordinator {
    cfg: Config,
    dispatcher: Dispatcher,
    replay: ReplayStore,
    joins: JoinRegistry,
    /// Envelope sequence counter, per instance.
    seq: AtomicU64,
}

impl Coordinator {
    /// Creates a coordinator with the given configuration.
    #[must_use]
    pub fn new(cfg: Config) -> Self {
        Self {
            dispatcher: Dispatcher::new(cfg.handler_limit()),
            replay: ReplayStore::new(cfg.store_published),
            joins: JoinRegistry::new(),
            seq: AtomicU64::new(0),
            cfg,
        }
    }

    /// Returns the configuration this coordinator was built with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Publishes a payload to a topic. Fire-and-forget.
    ///
    /// Synchronous and non-blocking: replay bookkeeping, join-group
    /// accumulation (including completions), and single-topic dispatch all
    /// run inside this call, on the calling thread. An absent payload
    /// (`None`) is normalized to the null sentinel.
    ///
    /// Handlers may call `publish`/`subscribe` reentrantly. Handler panics
    /// are not caught: they unwind to the caller and skip the remaining
    /// handlers of the current pass; coordinator state stays consistent.
    pub fn publish(&self, topic: impl Into<Topic>, payload: impl Into<Option<Payload>>) {
        let topic = topic.into();
        let payload = normalize(payload.into());
        trace!(topic = %topic, "publish");

        let envelope = self.next_envelope(topic.clone());
        self.replay.record(topic.clone(), payload.clone());

        // Completed join groups notify before the topic's own handlers.
        for completion in self.joins.accumulate(&topic, &payload) {
            let group_envelope = self.next_envelope(completion.key);
            let delivery = Delivery::Joined(completion.collected);
            for handler in completion.notified {
                handler.on_delivery(&group_envelope, &delivery);
            }
        }

        self.dispatcher.emit(&topic, &envelope, &payload);
    }

    /// Registers a subscription.
    ///
    /// A spec with one topic registers directly with the dispatcher; a spec
    /// with several topics enrolls in the join group for that exact ordered
    /// list. With replay enabled (both in [`Config`] and on the spec), a
    /// stored value (or a full stored set, for joins) fires the handler
    /// immediately, and a one-shot subscription satisfied this way is never
    /// registered at all.
    ///
    /// An invalid spec (no topics, or an empty topic name) is reported on
    /// [`ERROR_TOPIC`] and returned as `Err`; nothing is registered.
    pub fn subscribe(&self, spec: SubscribeSpec) -> Result<(), SubscribeError> {
        if let Err(err) = validate(&spec) {
            self.report(&err);
            return Err(err);
        }

        match spec.topics() {
            [topic] => self.subscribe_single(topic.clone(), &spec),
            _ => self.subscribe_joined(&spec),
        }
        Ok(())
    }

    /// Returns the last payload published to a topic, when replay is
    /// enabled and the topic has been published at least once.
    pub fn last_published(&self, topic: &str) -> Option<Payload> {
        self.replay.last(topic)
    }

    /// Number of handlers currently registered for a topic (single-topic
    /// subscriptions only). Useful for leak checks in tests.
    pub fn handler_count(&self, topic: &str) -> usize {
        self.dispatcher.count(topic)
    }

    fn subscribe_single(&self, topic: Topic, spec: &SubscribeSpec) {
        if spec.replay() && self.replay.enabled() {
            if let Some(stored) = self.replay.last(&topic) {
                let envelope = self.next_envelope(topic.clone());
                spec.handler().on_delivery(&envelope, &Delivery::Single(stored));
                if spec.once() {
                    // Replay satisfied the one-shot; no registration remains.
                    return;
                }
            }
        }
        self.dispatcher
            .register(topic, spec.handler().clone(), spec.once());
    }

    fn subscribe_joined(&self, spec: &SubscribeSpec) {
        if spec.replay() && self.replay.enabled() {
            if let Some(collected) = self.replay.replay_all(spec.topics()) {
                let envelope = self.next_envelope(join_key(spec.topics()));
                spec.handler()
                    .on_delivery(&envelope, &Delivery::Joined(collected));
                if spec.once() {
                    // A fully-replayed one-shot never joins the live group.
                    return;
                }
            }
        }
        self.joins
            .enroll(spec.topics(), spec.handler().clone(), spec.once());
    }

    fn report(&self, err: &SubscribeError) {
        debug!(error = err.as_label(), "invalid subscription reported on error topic");
        self.publish(
            ERROR_TOPIC,
            json!({
                "source": "subscribe",
                "message": err.as_message(),
            }),
        );
    }

    fn next_envelope(&self, id: Topic) -> Envelope {
        Envelope::new(id, self.seq.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

impl Default for Coordinator {
    /// A coordinator with the default [`Config`] (replay on, cap 50).
    fn default() -> Self {
        Self::new(Config::default())
    }
}

fn validate(spec: &SubscribeSpec) -> Result<(), SubscribeError> {
    if spec.topics().is_empty() {
        return Err(SubscribeError::NoTopics);
    }
    if spec.topics().iter().any(|t| t.is_empty()) {
        return Err(SubscribeError::EmptyTopic);
    }
    Ok(())
}
