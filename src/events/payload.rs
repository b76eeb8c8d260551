//! # Payloads and the delivery shapes handlers receive.
//!
//! A [`Payload`] is any caller-supplied [`serde_json::Value`]. Publishing
//! without a payload is normalized to [`Payload::Null`] — the "null payload"
//! sentinel, which is distinct from "topic never published" (absence in the
//! replay store).
//!
//! Handlers receive a [`Delivery`] next to the envelope:
//! - [`Delivery::Single`] for single-topic subscriptions and replay fires
//! - [`Delivery::Joined`] for join completions, carrying the full collected
//!   set of per-topic payloads

use std::collections::HashMap;

use super::envelope::Topic;

/// Caller-supplied value of unconstrained shape.
pub type Payload = serde_json::Value;

/// Full collected set delivered on join completion: topic → latest payload.
pub type PayloadSet = HashMap<Topic, Payload>;

/// Normalizes an optional payload: absence becomes the null sentinel.
#[inline]
pub(crate) fn normalize(payload: Option<Payload>) -> Payload {
    payload.unwrap_or(Payload::Null)
}

/// What a handler receives next to the [`Envelope`](super::Envelope).
#[derive(Clone, Debug)]
pub enum Delivery {
    /// One topic's payload (single-topic subscription or replay fire).
    Single(Payload),
    /// The full per-topic set of a completed join group.
    Joined(PayloadSet),
}

impl Delivery {
    /// Returns the single payload, or `None` for a joined delivery.
    #[inline]
    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Delivery::Single(p) => Some(p),
            Delivery::Joined(_) => None,
        }
    }

    /// Returns the joined set, or `None` for a single delivery.
    #[inline]
    pub fn joined(&self) -> Option<&PayloadSet> {
        match self {
            Delivery::Single(_) => None,
            Delivery::Joined(set) => Some(set),
        }
    }

    /// Looks up one topic's payload inside a joined delivery.
    #[inline]
    pub fn get(&self, topic: &str) -> Option<&Payload> {
        self.joined().and_then(|set| set.get(topic))
    }

    /// True for a join-completion delivery.
    #[inline]
    pub fn is_joined(&self) -> bool {
        matches!(self, Delivery::Joined(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_payload_becomes_null_sentinel() {
        assert_eq!(normalize(None), Payload::Null);
        assert_eq!(normalize(Some(json!(42))), json!(42));
    }

    #[test]
    fn test_single_accessors() {
        let d = Delivery::Single(json!("v"));
        assert_eq!(d.payload(), Some(&json!("v")));
        assert!(d.joined().is_none());
        assert!(d.get("any").is_none());
        assert!(!d.is_joined());
    }

    #[test]
    fn test_joined_accessors() {
        let mut set = PayloadSet::new();
        set.insert(Topic::from("a"), json!(1));
        set.insert(Topic::from("b"), json!(2));
        let d = Delivery::Joined(set);

        assert!(d.payload().is_none());
        assert_eq!(d.get("a"), Some(&json!(1)));
        assert_eq!(d.get("b"), Some(&json!(2)));
        assert!(d.get("c").is_none());
        assert!(d.is_joined());
    }
}
