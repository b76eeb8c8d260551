//! End-to-end coordinator scenarios: replay, once/persistent modes, join
//! groups, the reserved error topic, and reentrancy.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::json;

use conflux::{
    Config, Coordinator, Delivery, Envelope, HandlerFn, HandlerRef, Payload, SubscribeSpec,
    ERROR_TOPIC,
};

/// Handler recording every delivery it sees, in order.
fn recorder(log: &Arc<Mutex<Vec<(String, Delivery)>>>) -> HandlerRef {
    let log = Arc::clone(log);
    HandlerFn::arc("recorder", move |env: &Envelope, delivery: &Delivery| {
        log.lock().unwrap().push((env.id.to_string(), delivery.clone()));
    })
}

fn counter(hits: &Arc<AtomicUsize>) -> HandlerRef {
    let hits = Arc::clone(hits);
    HandlerFn::arc("counter", move |_env: &Envelope, _delivery: &Delivery| {
        hits.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn replay_fires_synchronously_for_late_subscriber() {
    let bus = Coordinator::default();
    let log = Arc::new(Mutex::new(Vec::new()));

    bus.publish("x", json!("v1"));
    bus.subscribe(SubscribeSpec::single("x", recorder(&log))).unwrap();

    let seen = log.lock().unwrap();
    assert_eq!(seen.len(), 1, "replay must fire inside subscribe");
    assert_eq!(seen[0].0, "x");
    assert_eq!(seen[0].1.payload(), Some(&json!("v1")));
}

#[test]
fn replay_satisfied_once_leaves_no_registration() {
    let bus = Coordinator::default();
    let hits = Arc::new(AtomicUsize::new(0));

    bus.publish("x", json!("v1"));
    bus.subscribe(SubscribeSpec::single("x", counter(&hits))).unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(bus.handler_count("x"), 0, "replayed once-sub must not register");

    bus.publish("x", json!("v2"));
    assert_eq!(hits.load(Ordering::SeqCst), 1, "handler fired a second time");
}

#[test]
fn replayed_persistent_subscription_also_registers() {
    let bus = Coordinator::default();
    let hits = Arc::new(AtomicUsize::new(0));

    bus.publish("x", json!(1));
    bus.subscribe(SubscribeSpec::single("x", counter(&hits)).with_once(false))
        .unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1, "replay fire");
    assert_eq!(bus.handler_count("x"), 1);

    bus.publish("x", json!(2));
    assert_eq!(hits.load(Ordering::SeqCst), 2, "live fire after replay");
}

#[test]
fn once_subscription_fires_at_most_once() {
    let bus = Coordinator::default();
    let hits = Arc::new(AtomicUsize::new(0));

    bus.subscribe(SubscribeSpec::single("t", counter(&hits))).unwrap();
    bus.publish("t", json!(1));
    bus.publish("t", json!(2));
    bus.publish("t", json!(3));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn persistent_siblings_fire_once_per_publish_in_subscription_order() {
    let bus = Coordinator::default();
    let order = Arc::new(Mutex::new(Vec::new()));

    for tag in ["first", "second"] {
        let order = Arc::clone(&order);
        bus.subscribe(
            SubscribeSpec::single(
                "t",
                HandlerFn::arc(tag, move |_env: &Envelope, _d: &Delivery| {
                    order.lock().unwrap().push(tag);
                }),
            )
            .with_once(false),
        )
        .unwrap();
    }

    bus.publish("t", json!(1));
    bus.publish("t", json!(2));
    assert_eq!(
        *order.lock().unwrap(),
        vec!["first", "second", "first", "second"]
    );
}

#[test]
fn join_fires_once_complete_with_latest_values() {
    let bus = Coordinator::new(Config {
        store_published: false,
        ..Config::default()
    });
    let log = Arc::new(Mutex::new(Vec::new()));

    bus.subscribe(SubscribeSpec::joined(["a", "b", "c"], recorder(&log)))
        .unwrap();

    bus.publish("a", json!("stale"));
    bus.publish("a", json!("fresh"));
    bus.publish("b", json!(2));
    assert!(log.lock().unwrap().is_empty(), "group fired before completion");

    bus.publish("c", json!(3));
    let seen = log.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "a,b,c", "completion envelope id is the group key");
    let set = seen[0].1.joined().expect("joined delivery");
    assert_eq!(set.get("a"), Some(&json!("fresh")), "latest A value must win");
    assert_eq!(set.get("b"), Some(&json!(2)));
    assert_eq!(set.get("c"), Some(&json!(3)));
}

#[test]
fn join_scenario_without_prior_publishes() {
    let bus = Coordinator::default();
    let log = Arc::new(Mutex::new(Vec::new()));

    bus.subscribe(SubscribeSpec::joined(["a", "b", "c"], recorder(&log)))
        .unwrap();
    bus.publish("a", json!(1));
    bus.publish("b", json!(2));
    assert!(log.lock().unwrap().is_empty());

    bus.publish("c", json!(3));
    let seen = log.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let set = seen[0].1.joined().expect("joined delivery");
    assert_eq!(set.get("a"), Some(&json!(1)));
    assert_eq!(set.get("b"), Some(&json!(2)));
    assert_eq!(set.get("c"), Some(&json!(3)));
}

#[test]
fn opposite_topic_orders_are_independent_groups() {
    let bus = Coordinator::new(Config {
        store_published: false,
        ..Config::default()
    });
    let ab = Arc::new(AtomicUsize::new(0));
    let ba = Arc::new(AtomicUsize::new(0));

    bus.subscribe(SubscribeSpec::joined(["a", "b"], counter(&ab))).unwrap();
    bus.subscribe(SubscribeSpec::joined(["b", "a"], counter(&ba))).unwrap();

    bus.publish("a", json!(1));
    bus.publish("b", json!(2));
    assert_eq!(ab.load(Ordering::SeqCst), 1);
    assert_eq!(ba.load(Ordering::SeqCst), 1);
}

#[test]
fn persistent_join_group_rearms_with_fresh_values() {
    let bus = Coordinator::default();
    let log = Arc::new(Mutex::new(Vec::new()));

    bus.subscribe(SubscribeSpec::joined(["a", "b"], recorder(&log)).with_once(false))
        .unwrap();

    bus.publish("a", json!(1));
    bus.publish("b", json!(2));
    bus.publish("a", json!(10));
    assert_eq!(log.lock().unwrap().len(), 1, "half a second round must not fire");

    bus.publish("b", json!(20));
    let seen = log.lock().unwrap();
    assert_eq!(seen.len(), 2);
    let second = seen[1].1.joined().expect("joined delivery");
    assert_eq!(second.get("a"), Some(&json!(10)));
    assert_eq!(second.get("b"), Some(&json!(20)));
}

#[test]
fn fully_replayed_join_fires_immediately() {
    let bus = Coordinator::default();
    let hits = Arc::new(AtomicUsize::new(0));

    bus.publish("a", json!(1));
    bus.publish("b", json!(2));
    bus.subscribe(SubscribeSpec::joined(["a", "b"], counter(&hits))).unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1, "full stored set must replay");

    // The once-sub never joined a live group: a fresh round must not reach it.
    bus.publish("a", json!(10));
    bus.publish("b", json!(20));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn partially_replayed_join_waits_for_live_publishes() {
    let bus = Coordinator::default();
    let log = Arc::new(Mutex::new(Vec::new()));

    bus.publish("a", json!("stored"));
    bus.subscribe(SubscribeSpec::joined(["a", "b"], recorder(&log)))
        .unwrap();
    assert!(log.lock().unwrap().is_empty(), "partial replay must not fire");

    // The stored "a" does not seed the group; both topics must publish live.
    bus.publish("b", json!("live-b"));
    assert!(log.lock().unwrap().is_empty());
    bus.publish("a", json!("live-a"));
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[test]
fn disabled_store_means_live_publishes_only() {
    let bus = Coordinator::new(Config {
        store_published: false,
        ..Config::default()
    });
    let hits = Arc::new(AtomicUsize::new(0));

    bus.publish("x", json!("v1"));
    bus.subscribe(SubscribeSpec::single("x", counter(&hits))).unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 0, "no replay with storage off");
    assert!(bus.last_published("x").is_none());

    bus.publish("x", json!("v2"));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn null_payload_publish_still_replays() {
    let bus = Coordinator::default();
    let log = Arc::new(Mutex::new(Vec::new()));

    bus.publish("t", None);
    bus.subscribe(SubscribeSpec::single("t", recorder(&log))).unwrap();

    let seen = log.lock().unwrap();
    assert_eq!(seen.len(), 1, "null payload is a published value, not absence");
    assert_eq!(seen[0].1.payload(), Some(&Payload::Null));
}

#[test]
fn empty_topic_list_reports_on_error_topic_without_panicking() {
    let bus = Coordinator::default();
    let log = Arc::new(Mutex::new(Vec::new()));

    bus.subscribe(SubscribeSpec::single(ERROR_TOPIC, recorder(&log)).with_once(false))
        .unwrap();

    let topics: [&str; 0] = [];
    let result = bus.subscribe(SubscribeSpec::joined(
        topics,
        HandlerFn::arc("dropped", |_env: &Envelope, _d: &Delivery| {}),
    ));
    assert!(result.is_err(), "caller must get synchronous confirmation");

    let seen = log.lock().unwrap();
    assert_eq!(seen.len(), 1, "report must reach error subscribers");
    let payload = seen[0].1.payload().expect("single delivery");
    assert_eq!(payload["source"], json!("subscribe"));
    assert!(payload["message"].as_str().unwrap().contains("no topics"));
}

#[test]
fn empty_topic_name_is_rejected() {
    let bus = Coordinator::default();
    let hits = Arc::new(AtomicUsize::new(0));

    let result = bus.subscribe(SubscribeSpec::joined(["a", ""], counter(&hits)));
    assert!(result.is_err());

    bus.publish("a", json!(1));
    assert_eq!(hits.load(Ordering::SeqCst), 0, "rejected spec must register nothing");
}

#[test]
fn unreported_error_is_silently_dropped() {
    // No "error" subscriber: the report goes nowhere and nothing panics.
    let bus = Coordinator::default();
    let topics: [&str; 0] = [];
    let result = bus.subscribe(SubscribeSpec::joined(
        topics,
        HandlerFn::arc("dropped", |_env: &Envelope, _d: &Delivery| {}),
    ));
    assert!(result.is_err());
}

#[test]
fn handler_may_publish_reentrantly() {
    let bus = Arc::new(Coordinator::default());
    let chained = Arc::new(AtomicUsize::new(0));

    bus.subscribe(SubscribeSpec::single("second", counter(&chained)).with_replay(false))
        .unwrap();

    let inner = Arc::clone(&bus);
    bus.subscribe(
        SubscribeSpec::single(
            "first",
            HandlerFn::arc("chainer", move |_env: &Envelope, _d: &Delivery| {
                inner.publish("second", json!("chained"));
            }),
        )
        .with_replay(false),
    )
    .unwrap();

    bus.publish("first", json!(1));
    assert_eq!(chained.load(Ordering::SeqCst), 1, "reentrant publish must deliver");
}

#[test]
fn handler_may_subscribe_reentrantly() {
    let bus = Arc::new(Coordinator::default());
    let late = Arc::new(AtomicUsize::new(0));

    let inner = Arc::clone(&bus);
    let late_inner = Arc::clone(&late);
    bus.subscribe(
        SubscribeSpec::single(
            "t",
            HandlerFn::arc("registrar", move |_env: &Envelope, _d: &Delivery| {
                let hits = Arc::clone(&late_inner);
                inner
                    .subscribe(
                        SubscribeSpec::single(
                            "t",
                            HandlerFn::arc("late", move |_env: &Envelope, _d: &Delivery| {
                                hits.fetch_add(1, Ordering::SeqCst);
                            }),
                        )
                        .with_replay(false)
                        .with_once(false),
                    )
                    .unwrap();
            }),
        )
        .with_replay(false),
    )
    .unwrap();

    bus.publish("t", json!(1));
    assert_eq!(late.load(Ordering::SeqCst), 0, "late handler fired in its own pass");

    bus.publish("t", json!(2));
    assert_eq!(late.load(Ordering::SeqCst), 1);
}

#[test]
fn once_join_member_stays_at_most_once_under_reentrant_completion() {
    let bus = Arc::new(Coordinator::new(Config {
        store_published: false,
        ..Config::default()
    }));
    let hits = Arc::new(AtomicUsize::new(0));

    let inner = Arc::clone(&bus);
    let inner_hits = Arc::clone(&hits);
    bus.subscribe(SubscribeSpec::joined(
        ["a", "b"],
        HandlerFn::arc("reentrant", move |_env: &Envelope, _d: &Delivery| {
            inner_hits.fetch_add(1, Ordering::SeqCst);
            // Complete the same group again from inside the completion pass.
            if inner_hits.load(Ordering::SeqCst) == 1 {
                inner.publish("a", json!(10));
                inner.publish("b", json!(20));
            }
        }),
    ))
    .unwrap();

    bus.publish("a", json!(1));
    bus.publish("b", json!(2));
    assert_eq!(hits.load(Ordering::SeqCst), 1, "once-member refired reentrantly");
}

#[test]
fn coordinators_are_independent() {
    let left = Coordinator::default();
    let right = Coordinator::default();
    let hits = Arc::new(AtomicUsize::new(0));

    left.publish("t", json!("left"));
    right.subscribe(SubscribeSpec::single("t", counter(&hits))).unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 0, "replay must not cross instances");
    assert!(right.last_published("t").is_none());
    assert_eq!(left.last_published("t"), Some(json!("left")));
}

#[test]
fn envelope_sequence_is_monotonic_per_coordinator() {
    let bus = Coordinator::default();
    let seqs = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seqs);
    bus.subscribe(
        SubscribeSpec::single(
            "t",
            HandlerFn::arc("seqs", move |env: &Envelope, _d: &Delivery| {
                sink.lock().unwrap().push(env.seq);
            }),
        )
        .with_once(false),
    )
    .unwrap();

    bus.publish("t", json!(1));
    bus.publish("t", json!(2));
    bus.publish("t", json!(3));

    let seen = seqs.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert!(seen.windows(2).all(|w| w[0] < w[1]), "seq must increase: {seen:?}");
}
