//! Typed subscription requests.
//!
//! Replaces the original system's variadic positional-argument parsing with
//! an explicit request type: [`SubscribeSpec`] plus a fluent
//! [`SubscribeSpecBuilder`]. Validation happens in
//! [`Coordinator::subscribe`](crate::Coordinator::subscribe), where the
//! error-reporting convention lives.

mod builder;
mod spec;

pub use builder::SubscribeSpecBuilder;
pub use spec::SubscribeSpec;
