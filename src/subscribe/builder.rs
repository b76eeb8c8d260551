use crate::events::{Delivery, Envelope, Topic};
use crate::handlers::{HandlerFn, HandlerRef};
use std::borrow::Cow;

use super::spec::SubscribeSpec;

/// Builder for [`SubscribeSpec`] with fluent API.
#[derive(Clone, Default)]
pub struct SubscribeSpecBuilder {
    topics: Vec<Topic>,
    skip_replay: bool,
    persistent: bool,
}

impl SubscribeSpecBuilder {
    /// Creates a new builder with the defaults (`replay = true`, `once = true`).
    pub fn new() -> Self {
        Self {
            topics: Vec::new(),
            skip_replay: false,
            persistent: false,
        }
    }

    /// Appends one topic to the ordered list.
    pub fn topic(mut self, topic: impl Into<Topic>) -> Self {
        self.topics.push(topic.into());
        self
    }

    /// Appends several topics, preserving their order.
    pub fn topics<I, T>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Topic>,
    {
        self.topics.extend(topics.into_iter().map(Into::into));
        self
    }

    /// Keeps the subscription standing instead of one-shot.
    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }

    /// Ignores the replay store; only live publishes are delivered.
    pub fn skip_replay(mut self) -> Self {
        self.skip_replay = true;
        self
    }

    /// Builds the spec from an existing handler handle.
    pub fn build(self, handler: HandlerRef) -> SubscribeSpec {
        SubscribeSpec::new(self.topics, handler, !self.skip_replay, !self.persistent)
    }

    /// Builds the spec from a closure.
    pub fn build_fn<F>(self, name: impl Into<Cow<'static, str>>, f: F) -> SubscribeSpec
    where
        F: Fn(&Envelope, &Delivery) + Send + Sync + 'static,
    {
        let handler = HandlerFn::arc(name, f);
        self.build(handler)
    }
}
