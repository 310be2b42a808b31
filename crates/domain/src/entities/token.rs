use crate::ids::{CharacterId, ObjectId, PageId};

/// A placed, movable game-piece graphic on the tabletop surface.
///
/// `left`/`top` follow the host convention: they are the coordinates of the
/// object's center, not its edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub id: ObjectId,
    pub page_id: PageId,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Character record this token stands for, if any
    pub represents: Option<CharacterId>,
    /// The host's built-in status markers currently shown on the token
    pub status_markers: Vec<String>,
}

impl Token {
    /// Number of built-in host markers, which occupy the leading slots of the
    /// marker row.
    pub fn native_marker_count(&self) -> usize {
        self.status_markers.len()
    }
}
