//! # Example: replay
//!
//! Shows the replay path: a subscriber arriving after a topic has already
//! been published still receives the last known value, synchronously,
//! inside `subscribe`.
//!
//! Demonstrates how to:
//! - Publish before anyone listens.
//! - Subscribe one-shot with replay (the defaults) and fire immediately.
//! - Subscribe persistent and keep receiving live publishes afterwards.
//!
//! ## Run
//! ```bash
//! cargo run --example replay
//! ```

use conflux::{Config, Coordinator, HandlerFn, SubscribeSpec};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bus = Coordinator::new(Config::default());

    // 1. Publish while nobody listens; the store keeps the latest value.
    bus.publish("config.loaded", json!({ "port": 8080 }));
    bus.publish("config.loaded", json!({ "port": 9090 }));

    // 2. A late one-shot subscriber fires right here, with the latest value,
    //    and leaves no registration behind.
    bus.subscribe(SubscribeSpec::single(
        "config.loaded",
        HandlerFn::arc("boot", |env, delivery| {
            println!("[boot] {} seq={} -> {:?}", env.id, env.seq, delivery.payload());
        }),
    ))?;
    println!("[boot] registrations left: {}", bus.handler_count("config.loaded"));

    // 3. A persistent subscriber replays too, then stays for live publishes.
    bus.subscribe(
        SubscribeSpec::single(
            "config.loaded",
            HandlerFn::arc("watcher", |_env, delivery| {
                println!("[watcher] saw {:?}", delivery.payload());
            }),
        )
        .with_once(false),
    )?;

    bus.publish("config.loaded", json!({ "port": 7070 }));
    Ok(())
}
