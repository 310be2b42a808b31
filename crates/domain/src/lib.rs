pub mod entities;
pub mod error;
pub mod game_systems;
pub mod geometry;
pub mod ids;
pub mod marker;

pub use entities::{Attribute, Character, GraphicObject, PathObject, Player, Token};
pub use error::DomainError;
pub use geometry::BoundingBox;
pub use ids::{CharacterId, HandoutId, ObjectId, PageId, PlayerId};
pub use marker::{MarkerShape, MarkerTemplate, TemplateStore};
