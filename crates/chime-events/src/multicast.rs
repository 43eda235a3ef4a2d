//! Single-channel multicast dispatch.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::{debug, trace};

use crate::listener::Listener;

/// One registration instance.
///
/// The same listener value may be registered several times; `seq` tells the
/// instances apart, and `once` marks an instance for removal immediately
/// before its first invocation.
struct Entry<T> {
    seq: u64,
    listener: Listener<T>,
    once: bool,
}

impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            seq: self.seq,
            listener: Arc::clone(&self.listener),
            once: self.once,
        }
    }
}

struct Inner<T> {
    entries: Vec<Entry<T>>,
    next_seq: u64,
}

/// A single event channel: the ordered collection of listeners for one
/// event, with registration, removal, and raising.
///
/// Raising walks a snapshot of the listener list taken up front, while
/// registrations and removals apply to the live list. A listener may
/// therefore unregister itself or any peer from inside its own callback
/// without corrupting the in-progress pass: listeners removed before their
/// turn are skipped, and listeners added during the pass first fire on the
/// next raise.
///
/// The internal lock is held only across the snapshot and the per-listener
/// bookkeeping, never across a listener invocation, so re-entrant calls
/// from inside a callback cannot deadlock.
pub struct MulticastEvent<T> {
    inner: Mutex<Inner<T>>,
}

impl<T> MulticastEvent<T> {
    /// Create a new channel with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: Vec::new(),
                next_seq: 0,
            }),
        }
    }

    /// Register a listener, appended after all current listeners.
    ///
    /// No deduplication is performed: registering the same listener twice
    /// means it is invoked twice per raise and takes two [`unregister`]
    /// calls to fully remove.
    ///
    /// [`unregister`]: MulticastEvent::unregister
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn register(&self, listener: Listener<T>) {
        self.push(listener, false);
    }

    /// Register a listener that is removed immediately before its first
    /// invocation, so it observes at most one raise.
    ///
    /// A separate persistent registration of the same listener value is an
    /// independent instance; only the one-time instance is removed after
    /// firing.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn register_once(&self, listener: Listener<T>) {
        self.push(listener, true);
    }

    fn push(&self, listener: Listener<T>, once: bool) {
        let name = listener.name().to_string();
        let mut inner = self.inner.lock().expect("lock poisoned");
        let seq = inner.next_seq;
        inner.next_seq = seq.wrapping_add(1);
        inner.entries.push(Entry {
            seq,
            listener,
            once,
        });
        drop(inner);

        debug!(listener_name = %name, once, "Listener registered");
    }

    /// Unregister the first registration instance of `listener`.
    ///
    /// Returns `true` if an instance was found and removed. Removing a
    /// listener that was never registered returns `false` and has no side
    /// effect. A one-time mark is discarded together with its instance.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn unregister(&self, listener: &Listener<T>) -> bool {
        let mut inner = self.inner.lock().expect("lock poisoned");
        let found = inner
            .entries
            .iter()
            .position(|entry| Arc::ptr_eq(&entry.listener, listener));

        if let Some(index) = found {
            inner.entries.remove(index);
            drop(inner);
            debug!(listener_name = %listener.name(), "Listener unregistered");
            true
        } else {
            false
        }
    }

    /// Invoke every currently registered listener, in registration order,
    /// with `arg`.
    ///
    /// The listener list is snapshotted before the first invocation, then
    /// live state is consulted before each call:
    ///
    /// - listeners added during this pass are not invoked until the next
    ///   raise;
    /// - listeners removed during this pass are not invoked if their turn
    ///   had not yet come;
    /// - a one-time listener is removed from live state *before* it runs,
    ///   so a re-entrant raise from its own callback cannot re-enter it.
    ///
    /// A panicking listener is not isolated: the panic propagates to the
    /// caller and the remaining listeners of this pass are not invoked.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned, or if a listener panics.
    pub fn raise(&self, arg: &T) {
        let snapshot: Vec<Entry<T>> = self.inner.lock().expect("lock poisoned").entries.clone();
        trace!(listener_count = snapshot.len(), "Raising event");

        for entry in snapshot {
            // Consult live state before each call: the entry may have been
            // unregistered by an earlier listener in this same pass, and a
            // one-time entry must be gone before its own invocation starts.
            let invoke = {
                let mut inner = self.inner.lock().expect("lock poisoned");
                match inner.entries.iter().position(|live| live.seq == entry.seq) {
                    Some(index) => {
                        if entry.once {
                            inner.entries.remove(index);
                        }
                        true
                    }
                    None => false,
                }
            };

            if invoke {
                trace!(listener_name = %entry.listener.name(), "Notifying listener");
                entry.listener.on_event(arg);
            }
        }
    }

    /// Get the number of registered listeners.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().expect("lock poisoned").entries.len()
    }

    /// Check if the channel has no listeners.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().expect("lock poisoned").entries.is_empty()
    }

    /// Remove all listeners.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear(&self) {
        self.inner.lock().expect("lock poisoned").entries.clear();
        debug!("All listeners cleared");
    }
}

impl<T> Default for MulticastEvent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for MulticastEvent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self
            .inner
            .lock()
            .map(|inner| inner.entries.len())
            .unwrap_or_default();
        f.debug_struct("MulticastEvent")
            .field("listener_count", &count)
            .finish()
    }
}
