//! # Join registry: in-flight multi-topic subscription groups.
//!
//! Groups are keyed by the **exact ordered** join of the requested topic
//! list: `[A,B]` and `[B,A]` are different groups. This is carried over from
//! the observed system unchanged (an implementation could also normalize by
//! sorting — see DESIGN.md). Because the key is the comma-join of the list,
//! a topic containing a comma can collide with a differently split list;
//! another carried-over property of the keying.
//!
//! ## Rules
//! - Groups are created on first enrollment and deleted once every member
//!   has expired; a future subscribe recreates them from scratch.
//! - One publish is fed to every group whose list contains the topic;
//!   completions are reported back in group **creation order**, so a publish
//!   that completes several groups resolves them deterministically.
//! - The lock is released before any completion handler runs; the caller
//!   (the coordinator) invokes the returned snapshots.

use parking_lot::Mutex;

use crate::events::{Payload, PayloadSet, Topic};
use crate::handlers::HandlerRef;

use super::group::JoinGroup;

/// Computes the group key for an ordered topic list.
pub(crate) fn join_key(topics: &[Topic]) -> Topic {
    let mut key = String::new();
    for (i, topic) in topics.iter().enumerate() {
        if i > 0 {
            key.push(',');
        }
        key.push_str(topic);
    }
    Topic::from(key)
}

/// A completed group cycle, ready to notify.
pub(crate) struct Completion {
    /// Group key; becomes the completion envelope's id.
    pub(crate) key: Topic,
    /// Members snapshotted at completion, in subscription order.
    pub(crate) notified: Vec<HandlerRef>,
    /// The full collected set for this cycle.
    pub(crate) collected: PayloadSet,
}

/// Table of in-flight join groups, creation-ordered.
pub(crate) struct JoinRegistry {
    groups: Mutex<Vec<JoinGroup>>,
}

impl JoinRegistry {
    pub(crate) fn new() -> Self {
        Self {
            groups: Mutex::new(Vec::new()),
        }
    }

    /// Enrolls a handler into the group for `topics`, creating the group on
    /// first enrollment.
    pub(crate) fn enroll(&self, topics: &[Topic], handler: HandlerRef, once: bool) {
        let key = join_key(topics);
        let mut groups = self.groups.lock();
        match groups.iter().position(|g| g.key == key) {
            Some(i) => groups[i].enroll(handler, once),
            None => {
                let mut group = JoinGroup::new(key, topics.to_vec());
                group.enroll(handler, once);
                groups.push(group);
            }
        }
    }

    /// Feeds one publish to every affected group; abandoned groups are
    /// deleted in the same critical section. Returns the fired completions
    /// in group creation order.
    pub(crate) fn accumulate(&self, topic: &str, payload: &Payload) -> Vec<Completion> {
        let mut groups = self.groups.lock();
        let mut completions = Vec::new();

        for group in groups.iter_mut() {
            if let Some((notified, collected)) = group.absorb(topic, payload) {
                completions.push(Completion {
                    key: group.key.clone(),
                    notified,
                    collected,
                });
            }
        }
        groups.retain(|g| !g.is_abandoned());

        completions
    }

    /// Number of live groups.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.groups.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::HandlerFn;
    use serde_json::json;

    fn noop() -> HandlerRef {
        HandlerFn::arc("noop", |_env, _delivery| {})
    }

    fn topics(list: &[&str]) -> Vec<Topic> {
        list.iter().map(|t| Topic::from(*t)).collect()
    }

    #[test]
    fn test_join_key_is_ordered_comma_join() {
        assert_eq!(&*join_key(&topics(&["a", "b", "c"])), "a,b,c");
        assert_eq!(&*join_key(&topics(&["c", "a"])), "c,a");
        assert_eq!(&*join_key(&topics(&["solo"])), "solo");
    }

    #[test]
    fn test_opposite_orderings_are_distinct_groups() {
        let reg = JoinRegistry::new();
        reg.enroll(&topics(&["a", "b"]), noop(), true);
        reg.enroll(&topics(&["b", "a"]), noop(), true);
        assert_eq!(reg.len(), 2);

        reg.accumulate("a", &json!(1));
        let fired = reg.accumulate("b", &json!(2));
        assert_eq!(fired.len(), 2, "both orderings must complete independently");
        assert_eq!(&*fired[0].key, "a,b");
        assert_eq!(&*fired[1].key, "b,a");
        assert_eq!(reg.len(), 0, "all-once groups must be deleted after firing");
    }

    #[test]
    fn test_same_list_shares_one_group() {
        let reg = JoinRegistry::new();
        reg.enroll(&topics(&["a", "b"]), noop(), true);
        reg.enroll(&topics(&["a", "b"]), noop(), false);
        assert_eq!(reg.len(), 1);

        reg.accumulate("a", &json!(1));
        let fired = reg.accumulate("b", &json!(2));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].notified.len(), 2);
        assert_eq!(reg.len(), 1, "persistent member keeps the group alive");
    }

    #[test]
    fn test_unrelated_topic_touches_nothing() {
        let reg = JoinRegistry::new();
        reg.enroll(&topics(&["a", "b"]), noop(), true);
        assert!(reg.accumulate("x", &json!(1)).is_empty());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_recreated_group_starts_pending_from_scratch() {
        let reg = JoinRegistry::new();
        reg.enroll(&topics(&["a", "b"]), noop(), true);
        reg.accumulate("a", &json!(1));
        reg.accumulate("b", &json!(2));
        assert_eq!(reg.len(), 0);

        // Recreate; the old cycle's payloads must be gone.
        reg.enroll(&topics(&["a", "b"]), noop(), true);
        assert!(reg.accumulate("b", &json!(20)).is_empty());
        let fired = reg.accumulate("a", &json!(10));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].collected.get("a"), Some(&json!(10)));
        assert_eq!(fired[0].collected.get("b"), Some(&json!(20)));
    }
}
