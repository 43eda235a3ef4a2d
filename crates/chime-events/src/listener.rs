//! Listener trait and closure adapter.

use std::marker::PhantomData;
use std::sync::Arc;

/// Shared handle to a listener callback.
///
/// Listener identity is allocation identity: clones of the same `Arc` are
/// the same listener for registration and removal purposes, while two
/// separately created listeners are always distinct, even when their bodies
/// are character-for-character identical.
pub type Listener<T> = Arc<dyn EventListener<T>>;

/// Trait for synchronous event listeners.
///
/// Implement this trait to receive an event's payload each time the event
/// is raised. Note that dispatch is synchronous: the raising call does not
/// return until every listener has run, so `on_event` should return
/// quickly.
pub trait EventListener<T>: Send + Sync {
    /// Called with the event payload when the event is raised.
    fn on_event(&self, arg: &T);

    /// Optional name for debugging.
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "anonymous"
    }
}

/// A listener backed by a plain closure.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use chime_events::{FnListener, Listener, MulticastEvent};
///
/// let event = MulticastEvent::new();
/// let listener: Listener<String> = Arc::new(FnListener::new("greeter", |who: &String| {
///     println!("hello, {who}");
/// }));
/// event.register(listener);
/// event.raise(&"world".to_string());
/// ```
pub struct FnListener<T, F>
where
    F: Fn(&T) + Send + Sync,
{
    name: String,
    handler: F,
    _payload: PhantomData<fn(&T)>,
}

impl<T, F> FnListener<T, F>
where
    F: Fn(&T) + Send + Sync,
{
    /// Create a new closure-backed listener.
    pub fn new(name: impl Into<String>, handler: F) -> Self {
        Self {
            name: name.into(),
            handler,
            _payload: PhantomData,
        }
    }
}

impl<T, F> EventListener<T> for FnListener<T, F>
where
    F: Fn(&T) + Send + Sync,
{
    fn on_event(&self, arg: &T) {
        (self.handler)(arg);
    }

    fn name(&self) -> &str {
        &self.name
    }
}
