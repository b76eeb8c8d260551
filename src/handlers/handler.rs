//! # Handler trait.
//!
//! Provides [`Handler`] — the extension point for plugging delivery
//! callbacks into the coordinator.
//!
//! ## Rules
//! - Handlers run **synchronously inside `publish`** (or inside `subscribe`
//!   for replay fires), on the caller's thread, in registration order.
//! - Handlers are assumed fast and non-blocking; a slow handler stalls the
//!   publisher, which is a caller responsibility.
//! - Handlers may call `publish`/`subscribe` reentrantly; no coordinator
//!   lock is held while a handler runs.
//! - Panics are **not** caught: they unwind to the publisher and skip the
//!   remaining handlers of that pass.
//!
//! ## Example
//! ```rust
//! use conflux::{Delivery, Envelope, Handler};
//!
//! struct Audit;
//!
//! impl Handler for Audit {
//!     fn on_delivery(&self, envelope: &Envelope, delivery: &Delivery) {
//!         if let Some(payload) = delivery.payload() {
//!             let _ = (envelope.seq, payload); // record it somewhere
//!         }
//!     }
//!
//!     fn name(&self) -> &str { "audit" }   // prefer short, descriptive names
//! }
//! ```

use std::sync::Arc;

use crate::events::{Delivery, Envelope};

/// Shared handler handle, suitable for registration in multiple
/// subscriptions at once.
pub type HandlerRef = Arc<dyn Handler>;

/// Delivery callback registered through a subscription.
///
/// Invoked once per matching publish (or once total, for a one-shot
/// subscription), with the envelope and either the topic's payload or a
/// completed join group's full payload set.
pub trait Handler: Send + Sync + 'static {
    /// Processes a single delivery.
    ///
    /// Called synchronously on the publishing thread. Deliveries for one
    /// topic arrive in registration order relative to sibling handlers.
    fn on_delivery(&self, envelope: &Envelope, delivery: &Delivery);

    /// Returns the handler name used in diagnostics (cap warnings, logs).
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose —
    /// override it when possible.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
