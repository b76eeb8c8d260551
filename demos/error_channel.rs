//! # Example: error_channel
//!
//! Shows the coordinator's self-reporting convention: an invalid
//! subscription is never raised — it is published to the reserved `"error"`
//! topic, observable like any other topic, and returned as `Err` for the
//! caller.
//!
//! Uses the `logging` feature's [`LogWriter`] to print the report, and a
//! `tracing` subscriber to surface the advisory handler-cap warning.
//!
//! ## Run
//! ```bash
//! cargo run --example error_channel --features logging
//! ```

use std::sync::Arc;

use conflux::{Config, Coordinator, HandlerFn, LogWriter, SubscribeSpec, ERROR_TOPIC};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let bus = Coordinator::new(Config {
        max_handlers_per_topic: 2,
        ..Config::default()
    });

    // Watch the error channel like any other topic.
    bus.subscribe(
        SubscribeSpec::single(ERROR_TOPIC, Arc::new(LogWriter::new())).with_once(false),
    )?;

    // An empty topic list: reported on "error" and returned as Err.
    let empty: [&str; 0] = [];
    let result = bus.subscribe(SubscribeSpec::joined(
        empty,
        HandlerFn::arc("never", |_env, _delivery| {}),
    ));
    println!("subscribe returned: {result:?}");

    // Blow past the advisory cap: warns, registers anyway.
    for i in 0..4 {
        bus.subscribe(
            SubscribeSpec::single("busy", HandlerFn::arc("leaky", |_env, _d| {}))
                .with_once(false),
        )?;
        println!("registered handler #{} (count={})", i + 1, bus.handler_count("busy"));
    }
    Ok(())
}
