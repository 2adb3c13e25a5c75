//! Core types for planboard.
//!
//! This crate holds everything that doesn't touch the network or the terminal:
//! - `Event` and `EventTime` as exchanged with the events API
//! - the add/edit `form` model and the request bodies it produces
//! - display `format`ting and user `prefs`
//! - `bridge`, which drives an `EventsApi` implementation and keeps a
//!   refetched copy of the event list

pub mod bridge;
pub mod category;
pub mod config;
pub mod error;
pub mod event;
pub mod form;
pub mod format;
pub mod payload;
pub mod prefs;
pub mod upcoming;
pub mod view;

// Re-export the commonly used types at crate root for convenience
pub use bridge::{CalendarSession, EventsApi};
pub use category::Color;
pub use error::{PlanboardError, PlanboardResult};
pub use event::{Event, EventId, EventTime};
pub use form::{DateClick, EventForm, FormError, FormSubmission};
pub use payload::{EventMove, EventPayload, EventUpdate};
pub use prefs::{FileStore, MemoryStore, PreferenceStore, Preferences};
