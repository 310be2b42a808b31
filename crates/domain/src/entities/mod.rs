//! Host record types, validated at the boundary.
//!
//! These mirror the records the tabletop host exposes through its object
//! store. The host owns them; this crate only gives them explicit shapes.

mod attribute;
mod canvas;
mod character;
mod player;
mod token;

pub use attribute::Attribute;
pub use canvas::{GraphicObject, PathObject};
pub use character::Character;
pub use player::Player;
pub use token::Token;
