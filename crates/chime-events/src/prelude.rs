//! Prelude module - commonly used types for convenient import.
//!
//! Use `use chime_events::prelude::*;` to import all essential types.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chime_events::prelude::*;
//!
//! let hub = EventHub::new();
//! let ping = hub.register_event::<()>("ping");
//!
//! let listener: Listener<()> = Arc::new(FnListener::new("logger", |_: &()| {
//!     println!("ping");
//! }));
//! hub.on(ping, listener)?;
//! hub.emit(ping, &())?;
//! # Ok::<(), EventError>(())
//! ```

// Dispatch engine
pub use crate::MulticastEvent;

// Hub facade
pub use crate::{EventHub, EventId};

// Listener system
pub use crate::{EventListener, FnListener, Listener};

// Host composition
pub use crate::{EventHost, EventProperty};

// Errors
pub use crate::EventError;
