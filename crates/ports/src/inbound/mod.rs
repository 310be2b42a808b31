//! Event payloads the host runtime delivers to the add-ons.

mod events;

pub use events::{ChatMessage, InlineRoll, MessageKind};
