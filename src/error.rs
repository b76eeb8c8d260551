//! Error types used by the coordinator.
//!
//! The only failure the coordinator itself can produce is an invalid
//! subscription request, modeled by [`SubscribeError`]. Everything else is
//! advisory (the handler cap) or the handler's own responsibility.
//!
//! By convention the coordinator does not raise from its messaging surface:
//! an invalid subscription is published to the reserved
//! [`ERROR_TOPIC`](crate::ERROR_TOPIC) *and* returned as `Err` so callers
//! who never subscribe to the error channel still get synchronous
//! confirmation.

use thiserror::Error;

/// # Errors produced when validating a subscription request.
///
/// These never escape as panics; `Coordinator::subscribe` reports them on
/// the reserved error topic and returns them to the caller.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubscribeError {
    /// The request listed no topics at all.
    #[error("subscription lists no topics")]
    NoTopics,

    /// The request named an empty-string topic.
    #[error("subscription names an empty topic")]
    EmptyTopic,
}

impl SubscribeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use conflux::SubscribeError;
    ///
    /// assert_eq!(SubscribeError::NoTopics.as_label(), "subscribe_no_topics");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SubscribeError::NoTopics => "subscribe_no_topics",
            SubscribeError::EmptyTopic => "subscribe_empty_topic",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SubscribeError::NoTopics => "subscription lists no topics".to_string(),
            SubscribeError::EmptyTopic => "subscription names an empty topic".to_string(),
        }
    }
}
