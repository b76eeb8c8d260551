//! Coordination core: facade and configuration.
//!
//! The public API from this module is [`Coordinator`] (wiring dispatcher,
//! replay store, and join registry together) and its construction-time
//! [`Config`].

mod config;
mod coordinator;

pub use config::Config;
pub use coordinator::{Coordinator, ERROR_TOPIC};
