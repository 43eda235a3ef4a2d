//! Shared listener helpers for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chime_events::{FnListener, Listener};

/// Payload used by the accumulation scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payload {
    pub value: i64,
}

/// Listener that sums every payload value it receives.
pub fn accumulator(name: &str) -> (Arc<AtomicI64>, Listener<Payload>) {
    let total = Arc::new(AtomicI64::new(0));
    let sink = Arc::clone(&total);
    let listener: Listener<Payload> =
        Arc::new(FnListener::new(name.to_string(), move |p: &Payload| {
            sink.fetch_add(p.value, Ordering::SeqCst);
        }));
    (total, listener)
}

/// Listener that counts invocations, payload ignored.
pub fn counter<T: 'static>(name: &str) -> (Arc<AtomicUsize>, Listener<T>) {
    let count = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&count);
    let listener: Listener<T> = Arc::new(FnListener::new(name.to_string(), move |_: &T| {
        hits.fetch_add(1, Ordering::SeqCst);
    }));
    (count, listener)
}

/// Listener that appends its name to a shared log on every invocation.
pub fn recorder<T: 'static>(name: &str, log: &Arc<Mutex<Vec<String>>>) -> Listener<T> {
    let name = name.to_string();
    let log = Arc::clone(log);
    Arc::new(FnListener::new(name.clone(), move |_: &T| {
        log.lock().unwrap().push(name.clone());
    }))
}
