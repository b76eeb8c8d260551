//! # Subscription request.
//!
//! Defines [`SubscribeSpec`] — the typed bundle describing what a handler
//! wants to listen to: one or more topics, the replay-on-subscribe flag, and
//! the once/persistent mode.
//!
//! A spec can be created:
//! - **Directly** with [`SubscribeSpec::single`] / [`SubscribeSpec::joined`]
//! - **Fluently** with [`SubscribeSpec::builder`]
//!
//! ## Rules
//! - The spec is passed to
//!   [`Coordinator::subscribe`](crate::Coordinator::subscribe), which
//!   validates it (non-empty topic list, non-empty topic names) before
//!   registering anything.
//! - Defaults match the coordinator's calling convention: `replay = true`,
//!   `once = true`.

use crate::events::Topic;
use crate::handlers::HandlerRef;

use super::builder::SubscribeSpecBuilder;

/// Typed subscription request.
///
/// Bundles together:
/// - The topics to listen on (one topic = direct subscription, several =
///   join subscription on the exact ordered list)
/// - The handler ([`HandlerRef`](crate::HandlerRef))
/// - `replay`: fire immediately from the replay store when possible
/// - `once`: one-shot vs persistent
///
/// ## Example
/// ```rust
/// use conflux::{HandlerFn, SubscribeSpec};
///
/// let h = HandlerFn::arc("demo", |_env, _delivery| {});
///
/// // One-shot with replay (the defaults):
/// let spec = SubscribeSpec::single("config.loaded", h.clone());
/// assert!(spec.once());
/// assert!(spec.replay());
///
/// // Standing join subscription, live publishes only:
/// let spec = SubscribeSpec::builder()
///     .topics(["user", "session"])
///     .persistent()
///     .skip_replay()
///     .build(h);
/// assert_eq!(spec.topics().len(), 2);
/// ```
#[derive(Clone)]
pub struct SubscribeSpec {
    topics: Vec<Topic>,
    handler: HandlerRef,
    replay: bool,
    once: bool,
}

impl SubscribeSpec {
    /// Creates a subscription request with explicit parameters.
    ///
    /// ### Parameters
    /// - `topics`: ordered topic list (order is part of a join group's key)
    /// - `handler`: delivery callback
    /// - `replay`: consult the replay store on subscribe
    /// - `once`: fire at most one time, then be removed
    pub fn new(topics: Vec<Topic>, handler: HandlerRef, replay: bool, once: bool) -> Self {
        Self {
            topics,
            handler,
            replay,
            once,
        }
    }

    /// One-shot, replay-enabled subscription to a single topic.
    pub fn single(topic: impl Into<Topic>, handler: HandlerRef) -> Self {
        Self::new(vec![topic.into()], handler, true, true)
    }

    /// One-shot, replay-enabled join subscription on the exact ordered list.
    pub fn joined<I, T>(topics: I, handler: HandlerRef) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Topic>,
    {
        Self::new(topics.into_iter().map(Into::into).collect(), handler, true, true)
    }

    /// Creates a builder for constructing a spec with a fluent API.
    pub fn builder() -> SubscribeSpecBuilder {
        SubscribeSpecBuilder::new()
    }

    /// Returns the ordered topic list.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Returns the handler handle.
    pub fn handler(&self) -> &HandlerRef {
        &self.handler
    }

    /// True when the replay store should be consulted on subscribe.
    pub fn replay(&self) -> bool {
        self.replay
    }

    /// True for a one-shot subscription.
    pub fn once(&self) -> bool {
        self.once
    }

    /// Returns a new spec with the replay flag updated.
    pub fn with_replay(mut self, replay: bool) -> Self {
        self.replay = replay;
        self
    }

    /// Returns a new spec with the once flag updated.
    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }
}
