use crate::geometry::BoundingBox;
use crate::ids::ObjectId;

/// A user-drawn vector path on the canvas.
///
/// `path` holds the host's segment-array geometry string; its point
/// coordinates are local to the object's own bounding box. `left`/`top` are
/// center coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PathObject {
    pub id: ObjectId,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub path: String,
}

impl PathObject {
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.left, self.top, self.width, self.height)
    }
}

/// A placed image graphic on the canvas (tokens are graphics too; this type
/// is for plain image objects selected as marker sources).
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicObject {
    pub id: ObjectId,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub image_source: String,
}

impl GraphicObject {
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.left, self.top, self.width, self.height)
    }
}
