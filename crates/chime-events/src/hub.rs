//! Event hub: maps opaque event identities to their dispatch channels.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::{Arc, RwLock};

use tracing::{debug, trace};
use uuid::Uuid;

use crate::error::EventError;
use crate::listener::Listener;
use crate::multicast::MulticastEvent;

/// Opaque handle for one event channel on one hub.
///
/// A fresh identity is allocated per [`EventHub::register_event`] call, so
/// two registrations of the same name yield distinct handles, and
/// identically-named events on two hubs can never be confused. The payload
/// type is carried in the handle, making `emit` and `on` type-checked at
/// the call site.
///
/// Handles are `Copy` and remain valid for the lifetime of the hub that
/// issued them. Handles from a dropped hub, or presented to a different
/// hub, fail to resolve with [`EventError::UnknownEvent`].
pub struct EventId<T> {
    id: Uuid,
    _payload: PhantomData<fn(&T)>,
}

impl<T> EventId<T> {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            _payload: PhantomData,
        }
    }

    /// The raw identity backing this handle.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.id
    }
}

// Manual impls: the derives would bound `T`, but the handle holds no `T`.
impl<T> Clone for EventId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EventId<T> {}

impl<T> PartialEq for EventId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for EventId<T> {}

impl<T> Hash for EventId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for EventId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventId").field(&self.id).finish()
    }
}

struct EventSlot {
    name: String,
    channel: Arc<dyn Any + Send + Sync>,
}

/// Capability surface a host exposes for its named events.
///
/// The hub owns the mapping from [`EventId`] to its channel. Registration
/// allocates a fresh channel; `emit`, `on`, `once` and `off` resolve the
/// identity and delegate to it. Resolution clones the channel handle and
/// releases the hub lock before any listener runs, so listener bodies
/// execute with no hub lock held and may freely call back into the hub.
#[derive(Default)]
pub struct EventHub {
    events: RwLock<HashMap<Uuid, EventSlot>>,
}

impl EventHub {
    /// Create a hub with no registered events.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: RwLock::new(HashMap::new()),
        }
    }

    /// Register a named event and allocate its empty channel.
    ///
    /// The name is a diagnostic label, not a key: calling this twice with
    /// the same name yields two independent identities and channels, and
    /// the earlier channel keeps working through its own handle.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn register_event<T: 'static>(&self, name: impl Into<String>) -> EventId<T> {
        let name = name.into();
        let id = EventId::new();
        let channel: Arc<MulticastEvent<T>> = Arc::new(MulticastEvent::new());

        let mut events = self.events.write().expect("lock poisoned");
        events.insert(
            id.id,
            EventSlot {
                name: name.clone(),
                channel,
            },
        );
        drop(events);

        debug!(event_name = %name, event_id = %id.id, "Event registered");
        id
    }

    /// Invoke every listener registered for `id`, in order, with `arg`.
    ///
    /// Emitting an event with no listeners succeeds and does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] if `id` was not issued by this
    /// hub.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned, or if a listener panics.
    pub fn emit<T: 'static>(&self, id: EventId<T>, arg: &T) -> Result<(), EventError> {
        let (name, channel) = self.resolve(id)?;
        trace!(event_name = %name, "Emitting event");
        channel.raise(arg);
        Ok(())
    }

    /// Register a listener for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] if `id` was not issued by this
    /// hub.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn on<T: 'static>(&self, id: EventId<T>, listener: Listener<T>) -> Result<(), EventError> {
        let (_, channel) = self.resolve(id)?;
        channel.register(listener);
        Ok(())
    }

    /// Register a listener for `id` that fires at most once.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] if `id` was not issued by this
    /// hub.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn once<T: 'static>(
        &self,
        id: EventId<T>,
        listener: Listener<T>,
    ) -> Result<(), EventError> {
        let (_, channel) = self.resolve(id)?;
        channel.register_once(listener);
        Ok(())
    }

    /// Unregister the first registration instance of `listener` for `id`.
    ///
    /// Returns `true` if an instance was found and removed; removing a
    /// listener that was never registered returns `false`.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] if `id` was not issued by this
    /// hub.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn off<T: 'static>(
        &self,
        id: EventId<T>,
        listener: &Listener<T>,
    ) -> Result<bool, EventError> {
        let (_, channel) = self.resolve(id)?;
        Ok(channel.unregister(listener))
    }

    /// Check whether `id` was issued by this hub.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn contains<T>(&self, id: EventId<T>) -> bool {
        self.events
            .read()
            .expect("lock poisoned")
            .contains_key(&id.id)
    }

    /// Get the number of registered events.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.read().expect("lock poisoned").len()
    }

    /// Check if no events are registered.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().expect("lock poisoned").is_empty()
    }

    pub(crate) fn resolve<T: 'static>(
        &self,
        id: EventId<T>,
    ) -> Result<(String, Arc<MulticastEvent<T>>), EventError> {
        let events = self.events.read().expect("lock poisoned");
        let slot = events
            .get(&id.id)
            .ok_or(EventError::UnknownEvent { id: id.id })?;
        let name = slot.name.clone();
        let channel = Arc::clone(&slot.channel);
        drop(events);

        // The payload type is pinned at registration and carried in the
        // handle, so a failed downcast means the handle is foreign.
        channel
            .downcast::<MulticastEvent<T>>()
            .map(|channel| (name, channel))
            .map_err(|_| EventError::UnknownEvent { id: id.id })
    }
}

impl fmt::Debug for EventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.events.read().map(|events| events.len()).unwrap_or_default();
        f.debug_struct("EventHub")
            .field("event_count", &count)
            .finish()
    }
}
