//! # Delivery handlers.
//!
//! This module provides the [`Handler`] trait, the closure adapter
//! [`HandlerFn`], and built-in implementations for handling deliveries made
//! through the [`Coordinator`](crate::Coordinator).
//!
//! ## Architecture
//! ```text
//! Delivery flow:
//!   publish(topic, payload) ──► Coordinator ──► Dispatcher / Join Registry
//!                                                    │
//!                                                    ├──► Handler::on_delivery(&Envelope, &Delivery)
//!                                                    │         │
//!                                                    │    ┌────┴─────┬──────────┐
//!                                                    │    ▼          ▼          ▼
//!                                                    │  LogWriter  Metrics   Custom ...
//!                                                    │
//!                                                    └──► Replay Store (internal bookkeeping)
//! ```
//!
//! ## Handler modes
//! - **Once** — fires at most one time, then is removed (the default)
//! - **Persistent** — fires on every matching publish until the coordinator
//!   is dropped

mod handler;
mod handler_fn;

pub(crate) mod embedded;

pub use handler::{Handler, HandlerRef};
pub use handler_fn::HandlerFn;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
