//! Outbound ports onto the host tabletop runtime.
//!
//! The host's object store, canvas, and chat channel sit behind these
//! traits. All calls may be asynchronous on the host side (notes reads are
//! callback-style there), so every method is async here.

mod attribute_port;
mod canvas_port;
mod chat_port;
mod character_port;
mod handout_port;
mod player_port;

pub use attribute_port::AttributePort;
pub use canvas_port::{CanvasPort, GraphicSpec, Layer, PathSpec, TextSpec};
pub use chat_port::ChatPort;
pub use character_port::CharacterPort;
pub use handout_port::HandoutPort;
pub use player_port::PlayerPort;

#[cfg(any(test, feature = "testing"))]
pub use attribute_port::MockAttributePort;
#[cfg(any(test, feature = "testing"))]
pub use canvas_port::MockCanvasPort;
#[cfg(any(test, feature = "testing"))]
pub use character_port::MockCharacterPort;
#[cfg(any(test, feature = "testing"))]
pub use chat_port::MockChatPort;
#[cfg(any(test, feature = "testing"))]
pub use handout_port::MockHandoutPort;
#[cfg(any(test, feature = "testing"))]
pub use player_port::MockPlayerPort;
