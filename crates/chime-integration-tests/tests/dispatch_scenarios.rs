//! End-to-end dispatch scenarios through the hub surface.

mod common;

use std::sync::{Arc, Mutex};

use chime_events::EventHub;
use common::{Payload, accumulator, counter, recorder};

#[test]
fn test_mixed_persistence_totals() {
    let hub = EventHub::new();
    let reading = hub.register_event::<Payload>("reading");

    let (total1, l1) = accumulator("l1");
    let (total2, l2) = accumulator("l2");
    let (total3, l3) = accumulator("l3");

    hub.on(reading, l1).unwrap();
    hub.once(reading, l2).unwrap();
    hub.on(reading, l3).unwrap();

    for _ in 0..3 {
        hub.emit(reading, &Payload { value: 6 }).unwrap();
    }

    assert_eq!(total1.load(std::sync::atomic::Ordering::SeqCst), 18);
    assert_eq!(total2.load(std::sync::atomic::Ordering::SeqCst), 6);
    assert_eq!(total3.load(std::sync::atomic::Ordering::SeqCst), 18);
}

#[test]
fn test_delivery_order_stable_across_raises() {
    let hub = EventHub::new();
    let tick = hub.register_event::<Payload>("tick");
    let log = Arc::new(Mutex::new(Vec::new()));

    hub.on(tick, recorder("a", &log)).unwrap();
    hub.on(tick, recorder("b", &log)).unwrap();
    hub.on(tick, recorder("c", &log)).unwrap();

    hub.emit(tick, &Payload { value: 1 }).unwrap();
    hub.emit(tick, &Payload { value: 2 }).unwrap();

    let log = log.lock().unwrap();
    assert_eq!(*log, vec!["a", "b", "c", "a", "b", "c"]);
}

#[test]
fn test_duplicate_listener_invoked_per_instance() {
    let hub = EventHub::new();
    let tick = hub.register_event::<Payload>("tick");
    let (count, listener) = counter("dup");

    hub.on(tick, Arc::clone(&listener)).unwrap();
    hub.on(tick, Arc::clone(&listener)).unwrap();

    hub.emit(tick, &Payload { value: 1 }).unwrap();
    assert_eq!(count.load(std::sync::atomic::Ordering::SeqCst), 2);

    assert!(hub.off(tick, &listener).unwrap());
    hub.emit(tick, &Payload { value: 1 }).unwrap();
    assert_eq!(count.load(std::sync::atomic::Ordering::SeqCst), 3);
}

#[test]
fn test_off_before_first_emit_silences_once_listener() {
    let hub = EventHub::new();
    let tick = hub.register_event::<Payload>("tick");
    let (count, listener) = counter("once");

    hub.once(tick, Arc::clone(&listener)).unwrap();
    assert!(hub.off(tick, &listener).unwrap());

    hub.emit(tick, &Payload { value: 1 }).unwrap();
    assert_eq!(count.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[test]
fn test_emit_with_no_listeners_is_noop() {
    let hub = EventHub::new();
    let tick = hub.register_event::<Payload>("tick");
    assert!(hub.emit(tick, &Payload { value: 1 }).is_ok());
}
