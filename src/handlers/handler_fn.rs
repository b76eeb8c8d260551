//! # Function-backed handler (`HandlerFn`)
//!
//! [`HandlerFn`] wraps a closure `F: Fn(&Envelope, &Delivery)`, the common
//! case for small subscriptions. The closure is `Fn`, not `FnMut`: a handler
//! may be invoked from several subscriptions, so shared mutable state must
//! be explicit (`Arc<Mutex<...>>`, atomics) inside the closure.
//!
//! ## Example
//! ```rust
//! use conflux::{HandlerFn, HandlerRef};
//!
//! let h: HandlerRef = HandlerFn::arc("printer", |env, delivery| {
//!     println!("{} #{}: {:?}", env.id, env.seq, delivery.payload());
//! });
//!
//! assert_eq!(h.name(), "printer");
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use crate::events::{Delivery, Envelope};
use crate::handlers::handler::Handler;

/// Function-backed handler implementation.
pub struct HandlerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> HandlerFn<F>
where
    F: Fn(&Envelope, &Delivery) + Send + Sync + 'static,
{
    /// Creates a new function-backed handler.
    ///
    /// Prefer [`HandlerFn::arc`] when you immediately need a
    /// [`HandlerRef`](crate::HandlerRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the handler and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&Envelope, &Delivery) + Send + Sync + 'static,
{
    fn on_delivery(&self, envelope: &Envelope, delivery: &Delivery) {
        (self.f)(envelope, delivery)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
