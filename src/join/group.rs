//! # Join group: pending/complete state machine for one topic-set.
//!
//! A [`JoinGroup`] accumulates per-topic payloads for one exact ordered
//! topic list. Between completions it is **pending**; the moment its pending
//! map covers every topic it **completes**: the member list is snapshotted,
//! once-members leave the live list, the pending map is cleared, and the
//! group rearms for its remaining persistent members.
//!
//! ## Rules
//! - The pending map never holds more entries than the topic list — only
//!   listed topics are absorbed.
//! - Overwrite semantics: the latest value for a topic since the last
//!   completion wins; a republish before completion refreshes the entry.
//! - Once-members are removed at snapshot time, inside the registry's
//!   critical section, so a reentrant publish completing the same group
//!   cannot fire them again.
//! - A group that completes with no persistent members left is deleted by
//!   the registry; a future subscribe recreates it from scratch.

use crate::events::{Payload, PayloadSet, Topic};
use crate::handlers::HandlerRef;

/// One handler enrolled in a group.
pub(crate) struct Member {
    pub(crate) handler: HandlerRef,
    pub(crate) once: bool,
}

/// In-flight multi-topic subscription group.
pub(crate) struct JoinGroup {
    /// Group identity: the exact ordered join of the topic list.
    pub(crate) key: Topic,
    topics: Vec<Topic>,
    members: Vec<Member>,
    pending: PayloadSet,
}

impl JoinGroup {
    pub(crate) fn new(key: Topic, topics: Vec<Topic>) -> Self {
        Self {
            key,
            topics,
            members: Vec::new(),
            pending: PayloadSet::new(),
        }
    }

    /// Appends a member; subscription order is notification order.
    pub(crate) fn enroll(&mut self, handler: HandlerRef, once: bool) {
        self.members.push(Member { handler, once });
    }

    /// True once every member has expired.
    pub(crate) fn is_abandoned(&self) -> bool {
        self.members.is_empty()
    }

    /// Absorbs one publish. When this publish completed the group, returns
    /// the completion snapshot (the handlers to notify and the full
    /// collected set), rearming the group in the same step.
    pub(crate) fn absorb(
        &mut self,
        topic: &str,
        payload: &Payload,
    ) -> Option<(Vec<HandlerRef>, PayloadSet)> {
        let listed = self.topics.iter().find(|t| &***t == topic)?;
        self.pending.insert(listed.clone(), payload.clone());
        debug_assert!(self.pending.len() <= self.topics.len());

        if self.pending.len() < self.topics.len() {
            return None;
        }

        let notified: Vec<HandlerRef> = self.members.iter().map(|m| m.handler.clone()).collect();
        self.members.retain(|m| !m.once);
        let collected = std::mem::take(&mut self.pending);
        Some((notified, collected))
    }
}
