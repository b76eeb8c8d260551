//! Delivery data model: envelopes, payloads, and delivery shapes.
//!
//! This module groups everything a handler receives per invocation:
//! the [`Envelope`] (identity/provenance), the [`Payload`] (caller data,
//! null-sentinel normalized), and the [`Delivery`] wrapper distinguishing
//! single-topic payloads from joined sets.
//!
//! ## Quick reference
//! - **Producers**: `Coordinator::publish` (and replay fires in `subscribe`).
//! - **Consumers**: every registered [`Handler`](crate::Handler).

mod envelope;
mod payload;

pub use envelope::{Envelope, Topic};
pub use payload::{Delivery, Payload, PayloadSet};

pub(crate) use payload::normalize;
