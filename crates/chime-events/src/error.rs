//! Error types for event dispatch.

use thiserror::Error;
use uuid::Uuid;

/// Errors produced when resolving event identities.
///
/// Listener callbacks themselves never produce an `EventError`: a listener
/// that panics propagates the panic out of the raising call, and removal of
/// a listener that was never registered is signalled by a `bool`, not an
/// error.
#[derive(Debug, Error)]
pub enum EventError {
    /// The identity was not registered on the resolving hub.
    ///
    /// This signals a programming error (a stale handle, or a handle from a
    /// different hub), not an environmental failure.
    #[error("unknown event id: {id}")]
    UnknownEvent {
        /// The identity that failed to resolve.
        id: Uuid,
    },
}
