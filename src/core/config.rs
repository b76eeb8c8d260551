//! # Coordinator configuration.
//!
//! Provides [`Config`] — construction-time settings for a
//! [`Coordinator`](crate::Coordinator).
//!
//! ## Sentinel values
//! - `max_handlers_per_topic = 0` → unlimited (no advisory cap)

/// Construction-time configuration for one coordinator instance.
///
/// Defines:
/// - **Replay behavior**: whether publishes are stored for late subscribers
/// - **Leak detection**: the advisory per-topic handler cap
///
/// ## Field semantics
/// - `store_published`: keep the last payload per topic for replay
///   (`false` = subscriptions only ever see live publishes)
/// - `max_handlers_per_topic`: advisory cap (`0` = unlimited); exceeding it
///   warns and registers anyway
///
/// ## Notes
/// All fields are public for flexibility. Prefer [`Config::handler_limit`]
/// over sprinkling sentinel checks (`0`) across call sites.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Keep the last published payload per topic for replay-on-subscribe.
    ///
    /// When disabled, the replay store records nothing and every
    /// subscription waits for a live publish regardless of its replay flag.
    pub store_published: bool,

    /// Maximum number of handlers per topic before the dispatcher warns.
    ///
    /// - `0` = unlimited (no warning)
    /// - `n > 0` = warn when a registration would exceed `n`
    ///
    /// The cap is advisory: registration always proceeds. It exists to
    /// surface subscription leaks, not to enforce a hard limit.
    pub max_handlers_per_topic: usize,
}

impl Config {
    /// Returns the advisory handler cap as an `Option`.
    ///
    /// - `None` → unlimited
    /// - `Some(n)` → warn past `n` handlers on one topic
    #[inline]
    pub fn handler_limit(&self) -> Option<usize> {
        if self.max_handlers_per_topic == 0 {
            None
        } else {
            Some(self.max_handlers_per_topic)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `store_published = true` (replay enabled)
    /// - `max_handlers_per_topic = 50` (leak warning threshold)
    fn default() -> Self {
        Self {
            store_published: true,
            max_handlers_per_topic: 50,
        }
    }
}
