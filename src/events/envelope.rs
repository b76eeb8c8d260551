//! # Delivery envelope: identity and provenance of a publish.
//!
//! Every publish (and every immediate replay fire) constructs an
//! [`Envelope`] that travels next to the payload. The envelope carries
//! *identity*, never data:
//!
//! - `id`: the topic, or the joined group key for join completions
//! - `seq`: per-coordinator monotonic sequence number
//! - `at`: wall-clock timestamp ([`Envelope::at_ms`] for epoch-milliseconds)
//!
//! ## Ordering guarantees
//! `seq` increases monotonically within one coordinator. Two independent
//! coordinators number their envelopes independently; there is no global
//! counter.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Named channel identifier. Opaque; any non-empty string is a valid topic,
/// including the reserved `"error"` topic the coordinator publishes to.
pub type Topic = Arc<str>;

/// Identity and provenance of one delivery.
///
/// Immutable once constructed. Handlers receive a reference per invocation;
/// all handlers of one emission pass observe the same envelope.
#[derive(Clone, Debug)]
pub struct Envelope {
    /// Topic name, or the joined group key for join completions.
    pub id: Topic,
    /// Monotonic sequence number within the owning coordinator.
    pub seq: u64,
    /// Wall-clock timestamp taken when the envelope was constructed.
    pub at: SystemTime,
}

impl Envelope {
    /// Creates an envelope stamped with the current wall-clock time.
    pub(crate) fn new(id: Topic, seq: u64) -> Self {
        Self {
            id,
            seq,
            at: SystemTime::now(),
        }
    }

    /// Returns the timestamp as integer milliseconds since the Unix epoch.
    ///
    /// A clock before the epoch yields 0 rather than an error.
    #[inline]
    pub fn at_ms(&self) -> u64 {
        self.at
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis().min(u128::from(u64::MAX)) as u64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_ms_is_epoch_scale() {
        let env = Envelope::new(Topic::from("t"), 0);
        // Anything after 2020-01-01 in ms.
        assert!(env.at_ms() > 1_577_836_800_000, "at_ms {} too small", env.at_ms());
    }

    #[test]
    fn test_id_carries_join_key_verbatim() {
        let env = Envelope::new(Topic::from("a,b,c"), 7);
        assert_eq!(&*env.id, "a,b,c");
        assert_eq!(env.seq, 7);
    }
}
