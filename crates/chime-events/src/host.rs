//! Host composition: the [`EventHost`] trait and named event properties.
//!
//! Any struct can gain event capabilities by owning an [`EventHub`] in a
//! field and declaring [`EventHost`] conformance; no base type is required.
//! For call sites that prefer `host.clicked.emit(&n)` over routing every
//! call through the hub, [`EventProperty`] binds one channel into a field
//! the host can expose directly.

use std::fmt;
use std::sync::Arc;

use crate::error::EventError;
use crate::hub::{EventHub, EventId};
use crate::listener::Listener;
use crate::multicast::MulticastEvent;

/// Capability trait for objects that own named events.
///
/// Implementors supply the hub; every other method is provided and
/// forwards to it. The hub lives in a dedicated field of the host, so the
/// event state is dropped with the host and never shared between hosts.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use chime_events::{EventHost, EventHub, EventId, FnListener, Listener};
///
/// struct Sensor {
///     events: EventHub,
///     reading: EventId<i64>,
/// }
///
/// impl Sensor {
///     fn new() -> Self {
///         let events = EventHub::new();
///         let reading = events.register_event("reading");
///         Self { events, reading }
///     }
/// }
///
/// impl EventHost for Sensor {
///     fn event_hub(&self) -> &EventHub {
///         &self.events
///     }
/// }
///
/// let sensor = Sensor::new();
/// let listener: Listener<i64> = Arc::new(FnListener::new("printer", |value: &i64| {
///     println!("reading: {value}");
/// }));
/// sensor.on(sensor.reading, listener)?;
/// sensor.emit(sensor.reading, &42)?;
/// # Ok::<(), chime_events::EventError>(())
/// ```
pub trait EventHost {
    /// The hub holding this host's event state.
    fn event_hub(&self) -> &EventHub;

    /// Register a named event on this host.
    fn register_event<T: 'static>(&self, name: &str) -> EventId<T> {
        self.event_hub().register_event(name)
    }

    /// Emit an event, invoking every registered listener with `arg`.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] if `id` does not belong to this
    /// host.
    fn emit<T: 'static>(&self, id: EventId<T>, arg: &T) -> Result<(), EventError> {
        self.event_hub().emit(id, arg)
    }

    /// Register a listener for an event on this host.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] if `id` does not belong to this
    /// host.
    fn on<T: 'static>(&self, id: EventId<T>, listener: Listener<T>) -> Result<(), EventError> {
        self.event_hub().on(id, listener)
    }

    /// Register a listener that fires at most once.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] if `id` does not belong to this
    /// host.
    fn once<T: 'static>(&self, id: EventId<T>, listener: Listener<T>) -> Result<(), EventError> {
        self.event_hub().once(id, listener)
    }

    /// Unregister a listener; `true` if an instance was found and removed.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] if `id` does not belong to this
    /// host.
    fn off<T: 'static>(&self, id: EventId<T>, listener: &Listener<T>) -> Result<bool, EventError> {
        self.event_hub().off(id, listener)
    }
}

/// A named event exposed as a property on a host object.
///
/// Bound directly to one channel when created, so its operations skip hub
/// resolution entirely. The binding survives the name being re-registered
/// on the hub: a property taken before re-registration keeps addressing
/// the original (now orphaned) channel, mirroring the behavior of a stale
/// [`EventId`].
pub struct EventProperty<T> {
    name: String,
    channel: Arc<MulticastEvent<T>>,
}

impl<T> EventProperty<T> {
    /// The diagnostic name the event was registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Emit the event, invoking every registered listener with `arg`.
    ///
    /// # Panics
    ///
    /// Panics if the channel lock is poisoned, or if a listener panics.
    pub fn emit(&self, arg: &T) {
        self.channel.raise(arg);
    }

    /// Register a listener for the event.
    ///
    /// # Panics
    ///
    /// Panics if the channel lock is poisoned.
    pub fn add_listener(&self, listener: Listener<T>) {
        self.channel.register(listener);
    }

    /// Register a listener that is removed after its first invocation.
    ///
    /// # Panics
    ///
    /// Panics if the channel lock is poisoned.
    pub fn add_one_time_listener(&self, listener: Listener<T>) {
        self.channel.register_once(listener);
    }

    /// Remove a listener; `true` if an instance was found and removed.
    ///
    /// # Panics
    ///
    /// Panics if the channel lock is poisoned.
    pub fn remove_listener(&self, listener: &Listener<T>) -> bool {
        self.channel.unregister(listener)
    }
}

impl<T> fmt::Debug for EventProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventProperty")
            .field("name", &self.name)
            .field("listener_count", &self.channel.len())
            .finish()
    }
}

impl EventHub {
    /// Bind a named-property handle to one of this hub's channels.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] if `id` was not issued by this
    /// hub.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn property<T: 'static>(&self, id: EventId<T>) -> Result<EventProperty<T>, EventError> {
        let (name, channel) = self.resolve(id)?;
        Ok(EventProperty { name, channel })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::FnListener;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Button {
        events: EventHub,
        clicked: EventId<u32>,
    }

    impl Button {
        fn new() -> Self {
            let events = EventHub::new();
            let clicked = events.register_event("clicked");
            Self { events, clicked }
        }
    }

    impl EventHost for Button {
        fn event_hub(&self) -> &EventHub {
            &self.events
        }
    }

    fn counter() -> (Arc<AtomicUsize>, Listener<u32>) {
        let count = Arc::new(AtomicUsize::new(0));
        let hits = Arc::clone(&count);
        let listener: Listener<u32> = Arc::new(FnListener::new("counter", move |_: &u32| {
            hits.fetch_add(1, Ordering::SeqCst);
        }));
        (count, listener)
    }

    #[test]
    fn test_host_trait_forwards_to_hub() {
        let button = Button::new();
        let (count, listener) = counter();

        button.on(button.clicked, Arc::clone(&listener)).unwrap();
        button.emit(button.clicked, &1).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        assert!(button.off(button.clicked, &listener).unwrap());
        button.emit(button.clicked, &1).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_host_once_forwards_to_hub() {
        let button = Button::new();
        let (count, listener) = counter();

        button.once(button.clicked, listener).unwrap();
        button.emit(button.clicked, &1).unwrap();
        button.emit(button.clicked, &1).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_two_hosts_with_same_event_name_do_not_collide() {
        let a = Button::new();
        let b = Button::new();

        let err = a.emit(b.clicked, &1).unwrap_err();
        assert!(matches!(err, EventError::UnknownEvent { .. }));
    }

    #[test]
    fn test_property_forwards_operations() {
        let button = Button::new();
        let clicks = button.events.property(button.clicked).unwrap();
        assert_eq!(clicks.name(), "clicked");

        let (count, listener) = counter();
        clicks.add_listener(Arc::clone(&listener));
        clicks.emit(&1);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        assert!(clicks.remove_listener(&listener));
        assert!(!clicks.remove_listener(&listener));
        clicks.emit(&1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_property_one_time_listener() {
        let button = Button::new();
        let clicks = button.events.property(button.clicked).unwrap();
        let (count, listener) = counter();

        clicks.add_one_time_listener(listener);
        clicks.emit(&1);
        clicks.emit(&1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_property_and_hub_share_one_channel() {
        let button = Button::new();
        let clicks = button.events.property(button.clicked).unwrap();
        let (count, listener) = counter();

        clicks.add_listener(listener);
        button.emit(button.clicked, &1).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_property_for_foreign_id_fails() {
        let button = Button::new();
        let other = Button::new();
        assert!(button.events.property(other.clicked).is_err());
    }
}
