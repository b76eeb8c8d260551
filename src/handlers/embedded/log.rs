//! # LogWriter — simple delivery printer
//!
//! A minimal handler that prints incoming deliveries to stdout.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [deliver] id="sensor.temp" seq=3 payload=21.5
//! [deliver] id="a,b" seq=9 joined={"a": 1, "b": 2}
//! ```

use crate::events::{Delivery, Envelope};
use crate::handlers::Handler;

/// Delivery printer handler.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Handler for LogWriter {
    fn on_delivery(&self, envelope: &Envelope, delivery: &Delivery) {
        match delivery {
            Delivery::Single(payload) => {
                println!(
                    "[deliver] id={:?} seq={} payload={}",
                    envelope.id, envelope.seq, payload
                );
            }
            Delivery::Joined(set) => {
                let mut parts: Vec<String> =
                    set.iter().map(|(t, p)| format!("{t:?}: {p}")).collect();
                parts.sort_unstable();
                println!(
                    "[deliver] id={:?} seq={} joined={{{}}}",
                    envelope.id,
                    envelope.seq,
                    parts.join(", ")
                );
            }
        }
    }

    fn name(&self) -> &str {
        "LogWriter"
    }
}
