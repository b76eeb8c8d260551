//! # Example: join
//!
//! Shows a join subscription: one handler bound to several topics that
//! fires only once all of them have produced data, receiving the full
//! collected set.
//!
//! Demonstrates how to:
//! - Enroll a persistent join subscription with the builder API.
//! - Observe that a republish before completion exposes only the latest value.
//! - Watch the group rearm for a second full round.
//!
//! ## Run
//! ```bash
//! cargo run --example join
//! ```

use conflux::{Coordinator, SubscribeSpec};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bus = Coordinator::default();

    let spec = SubscribeSpec::builder()
        .topics(["user", "session"])
        .persistent()
        .skip_replay()
        .build_fn("login", |env, delivery| {
            let set = delivery.joined().expect("join delivery");
            println!(
                "[login] {} user={} session={}",
                env.id,
                set.get("user").unwrap(),
                set.get("session").unwrap()
            );
        });
    bus.subscribe(spec)?;

    // First round: the early "user" value is refreshed before completion.
    bus.publish("user", json!("alice"));
    bus.publish("user", json!("bob"));
    println!("(nothing fired yet — session still pending)");
    bus.publish("session", json!(1));

    // The group rearmed; a second full round fires again with fresh values.
    bus.publish("user", json!("carol"));
    bus.publish("session", json!(2));
    Ok(())
}
