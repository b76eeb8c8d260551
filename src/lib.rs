//! # conflux
//!
//! **Conflux** is an in-process publish/subscribe coordination library for Rust.
//!
//! It lets independent parts of an application communicate by named topics
//! without direct references to each other, and adds three things a plain
//! event dispatcher lacks: replay of the last known value to late
//! subscribers, join subscriptions that wait on several topics at once, and
//! a once-vs-persistent mode per subscription.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//!     │  publisher   │    │  publisher   │    │ subscriber   │
//!     │ (any caller) │    │ (any caller) │    │ (any caller) │
//!     └──────┬───────┘    └──────┬───────┘    └──────┬───────┘
//!            ▼ publish           ▼ publish           ▼ subscribe(SubscribeSpec)
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Coordinator (facade)                                            │
//! │  - normalizes payloads, constructs Envelopes                     │
//! │  - reports invalid subscriptions on the reserved "error" topic   │
//! └───────┬──────────────────────┬─────────────────────────┬─────────┘
//!         ▼                      ▼                         ▼
//! ┌────────────────┐   ┌──────────────────┐   ┌─────────────────────┐
//! │  Replay Store  │   │  Join Registry   │   │     Dispatcher      │
//! │ topic → last   │   │ ordered-list key │   │ topic → ordered     │
//! │ payload        │   │ → pending group  │   │ handler table       │
//! └────────────────┘   └──────────────────┘   └─────────────────────┘
//!         │                      │                         │
//!         │ replay-on-subscribe  │ completion (full set)   │ emission pass
//!         └──────────────────────┴────────────┬────────────┘
//!                                             ▼
//!                              Handler::on_delivery(&Envelope, &Delivery)
//! ```
//!
//! ### Publish lifecycle
//! ```text
//! publish(topic, payload)
//!   ├─► payload: absent → null sentinel
//!   ├─► Envelope { id: topic, seq, at }
//!   ├─► Replay Store: topic → payload (latest wins, when enabled)
//!   ├─► Join Registry: feed every group listing `topic`
//!   │     └─ pending map full? → snapshot members, drop once-members,
//!   │        clear pending, delete abandoned group, fire completions
//!   └─► Dispatcher: snapshot the topic's table, drop once-entries,
//!       invoke handlers in registration order
//! ```
//!
//! Dispatch is synchronous and single-turn: every handler runs inside the
//! `publish` call, on the calling thread. Reentrant `publish`/`subscribe`
//! from inside a handler is supported; no lock is held while handlers run.
//!
//! ## Features
//! | Area               | Description                                                      | Key types / traits                        |
//! |--------------------|------------------------------------------------------------------|-------------------------------------------|
//! | **Publishing**     | Fire-and-forget synchronous delivery with per-publish envelopes. | [`Coordinator`], [`Envelope`]             |
//! | **Subscriptions**  | Typed requests: one or many topics, replay flag, once flag.      | [`SubscribeSpec`], [`SubscribeSpecBuilder`] |
//! | **Handlers**       | Trait-based callbacks plus a closure adapter.                    | [`Handler`], [`HandlerFn`], [`HandlerRef`] |
//! | **Replay**         | Late subscribers receive the last known value immediately.       | [`Config::store_published`]               |
//! | **Joins**          | One handler fires once per complete set across several topics.   | [`Delivery::Joined`]                      |
//! | **Errors**         | Invalid subscriptions reported on the reserved `"error"` topic.  | [`SubscribeError`], [`ERROR_TOPIC`]       |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use conflux::{Config, Coordinator, HandlerFn, SubscribeSpec};
//! use serde_json::json;
//!
//! let bus = Coordinator::new(Config::default());
//!
//! // Replay: the publish happens before the subscribe, yet the handler
//! // still fires (synchronously, inside `subscribe`).
//! bus.publish("config.loaded", json!({ "port": 8080 }));
//! bus.subscribe(SubscribeSpec::single(
//!     "config.loaded",
//!     HandlerFn::arc("boot", |env, delivery| {
//!         println!("{} -> {:?}", env.id, delivery.payload());
//!     }),
//! ))?;
//!
//! // Join: fires once both topics have produced data.
//! bus.subscribe(SubscribeSpec::joined(
//!     ["user", "session"],
//!     HandlerFn::arc("login", |_env, delivery| {
//!         let set = delivery.joined().expect("join delivery");
//!         println!("user={:?} session={:?}", set.get("user"), set.get("session"));
//!     }),
//! ))?;
//! bus.publish("user", json!("alice"));
//! bus.publish("session", json!(42));
//! # Ok::<(), conflux::SubscribeError>(())
//! ```

mod core;
mod dispatch;
mod error;
mod events;
mod handlers;
mod join;
mod replay;
mod subscribe;

// ---- Public re-exports ----

pub use crate::core::{Config, Coordinator, ERROR_TOPIC};
pub use error::SubscribeError;
pub use events::{Delivery, Envelope, Payload, PayloadSet, Topic};
pub use handlers::{Handler, HandlerFn, HandlerRef};
pub use subscribe::{SubscribeSpec, SubscribeSpecBuilder};

// Optional: expose a simple built-in logger handler (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use handlers::LogWriter;
