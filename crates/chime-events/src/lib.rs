//! Chime Events - multicast event dispatch for composable host objects.
//!
//! This crate provides:
//! - A per-event listener registry with one-time (auto-unregistering)
//!   listeners and safe mutation during dispatch
//! - An event hub mapping opaque, typed event identities to their channels
//! - A host trait so any struct can expose named events without a base type
//!
//! # Architecture
//!
//! A host registers each named event on its [`EventHub`], receiving a
//! typed [`EventId`] handle. Consumers attach listeners with `on`/`once`,
//! detach them with `off`, and the host delivers payloads with `emit`.
//! Each channel is a [`MulticastEvent`] that invokes its listeners in
//! registration order over a snapshot taken at the start of the raise, so
//! listeners may freely add or remove listeners (themselves included)
//! mid-dispatch.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! use chime_events::{EventHub, FnListener, Listener};
//!
//! let hub = EventHub::new();
//! let clicked = hub.register_event::<u32>("clicked");
//!
//! let total = Arc::new(AtomicU32::new(0));
//! let sink = Arc::clone(&total);
//! let listener: Listener<u32> = Arc::new(FnListener::new("adder", move |n: &u32| {
//!     sink.fetch_add(*n, Ordering::SeqCst);
//! }));
//!
//! hub.on(clicked, Arc::clone(&listener))?;
//! hub.emit(clicked, &6)?;
//! hub.emit(clicked, &6)?;
//! assert_eq!(total.load(Ordering::SeqCst), 12);
//!
//! assert!(hub.off(clicked, &listener)?);
//! hub.emit(clicked, &6)?;
//! assert_eq!(total.load(Ordering::SeqCst), 12);
//! # Ok::<(), chime_events::EventError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod host;
mod hub;
mod listener;
mod multicast;

pub use error::EventError;
pub use host::{EventHost, EventProperty};
pub use hub::{EventHub, EventId};
pub use listener::{EventListener, FnListener, Listener};
pub use multicast::MulticastEvent;
