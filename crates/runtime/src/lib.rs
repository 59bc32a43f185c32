//! Runtime orchestration for the action overview overlay.
//!
//! The [`Dispatcher`] owns the reference store and the character snapshot,
//! routes each decoded message to the right place, and publishes one
//! projection outcome per completed action on the [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`dispatcher`] handles inbound messages in arrival order
//! - [`events`] provides the topic-based event bus
//! - [`render`] turns reports into plain text
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod render;

pub use dispatcher::{Dispatch, Dispatcher};
pub use error::{Result, RuntimeError};
pub use events::{CharacterEvent, Event, EventBus, ProjectionEvent, ReferenceEvent, Topic};
pub use render::{group_thousands, render_groups, render_text};
