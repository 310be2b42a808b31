//! The two geometry operations the marker feature needs: bounding-box union
//! and vector-path merging.
//!
//! Path geometry strings are JSON arrays of segments, e.g.
//! `[["M",0,0],["L",70,35]]`, with point coordinates local to the owning
//! object's bounding box. Merging re-expresses every point in the union
//! box's local space so the combined string renders as one drawing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::PathObject;
use crate::error::DomainError;

/// An axis-aligned box in host coordinates: `left`/`top` are the box center,
/// matching how the host positions objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// X coordinate of the left edge.
    pub fn left_edge(&self) -> f64 {
        self.left - self.width / 2.0
    }

    /// Y coordinate of the top edge.
    pub fn top_edge(&self) -> f64 {
        self.top - self.height / 2.0
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let left = self.left_edge().min(other.left_edge());
        let top = self.top_edge().min(other.top_edge());
        let right = (self.left_edge() + self.width).max(other.left_edge() + other.width);
        let bottom = (self.top_edge() + self.height).max(other.top_edge() + other.height);

        let width = right - left;
        let height = bottom - top;
        BoundingBox::new(left + width / 2.0, top + height / 2.0, width, height)
    }
}

/// Union bounding box of a non-empty set of drawn paths.
pub fn paths_bounding_box(paths: &[PathObject]) -> Result<BoundingBox, DomainError> {
    let mut boxes = paths.iter().map(PathObject::bounding_box);
    let first = boxes
        .next()
        .ok_or_else(|| DomainError::validation("cannot take the bounding box of no paths"))?;
    Ok(boxes.fold(first, |acc, b| acc.union(&b)))
}

/// Merge several drawn paths into a single geometry string local to their
/// union bounding box. Returns the merged string and the union box.
pub fn merge_paths(paths: &[PathObject]) -> Result<(String, BoundingBox), DomainError> {
    let bbox = paths_bounding_box(paths)?;
    let mut merged: Vec<Value> = Vec::new();

    for path in paths {
        let dx = path.bounding_box().left_edge() - bbox.left_edge();
        let dy = path.bounding_box().top_edge() - bbox.top_edge();
        let segments: Vec<Value> = serde_json::from_str(&path.path)
            .map_err(|e| DomainError::parse(format!("bad path geometry: {e}")))?;

        for segment in segments {
            merged.push(translate_segment(segment, dx, dy)?);
        }
    }

    let merged_str = serde_json::to_string(&merged)
        .map_err(|e| DomainError::parse(format!("could not serialize merged path: {e}")))?;
    Ok((merged_str, bbox))
}

/// Shift every coordinate pair in one segment by (dx, dy). Segments are
/// arrays of the form [command, x1, y1, x2, y2, ...].
fn translate_segment(segment: Value, dx: f64, dy: f64) -> Result<Value, DomainError> {
    let Value::Array(parts) = segment else {
        return Err(DomainError::parse("path segment is not an array"));
    };

    let translated = parts
        .into_iter()
        .enumerate()
        .map(|(i, part)| match (i, part) {
            (0, command) => Ok(command),
            (i, Value::Number(n)) => {
                let v = n
                    .as_f64()
                    .ok_or_else(|| DomainError::parse("non-finite path coordinate"))?;
                // Odd positions are x coordinates, even positions are y
                let shifted = if i % 2 == 1 { v + dx } else { v + dy };
                serde_json::Number::from_f64(shifted)
                    .map(Value::Number)
                    .ok_or_else(|| DomainError::parse("non-finite path coordinate"))
            }
            (_, other) => Err(DomainError::parse(format!(
                "unexpected path segment element: {other}"
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Value::Array(translated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ObjectId;

    fn path(id: &str, left: f64, top: f64, width: f64, height: f64, geometry: &str) -> PathObject {
        PathObject {
            id: ObjectId::new(id),
            left,
            top,
            width,
            height,
            path: geometry.to_string(),
        }
    }

    #[test]
    fn union_of_disjoint_boxes_spans_both() {
        let a = BoundingBox::new(50.0, 50.0, 100.0, 100.0); // edges 0..100
        let b = BoundingBox::new(250.0, 50.0, 100.0, 100.0); // edges 200..300
        let u = a.union(&b);
        assert_eq!(u.left_edge(), 0.0);
        assert_eq!(u.top_edge(), 0.0);
        assert_eq!(u.width, 300.0);
        assert_eq!(u.height, 100.0);
    }

    #[test]
    fn union_of_nested_boxes_is_the_outer_box() {
        let outer = BoundingBox::new(0.0, 0.0, 200.0, 200.0);
        let inner = BoundingBox::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(outer.union(&inner), outer);
    }

    #[test]
    fn merging_a_single_path_keeps_its_geometry() {
        let p = path("p1", 35.0, 35.0, 70.0, 70.0, r#"[["M",0.0,0.0],["L",70.0,70.0]]"#);
        let (merged, bbox) = merge_paths(&[p]).unwrap();
        assert_eq!(merged, r#"[["M",0.0,0.0],["L",70.0,70.0]]"#);
        assert_eq!(bbox, BoundingBox::new(35.0, 35.0, 70.0, 70.0));
    }

    #[test]
    fn merging_translates_points_into_union_space() {
        // Two unit-square paths side by side; the second starts 100px right.
        let a = path("a", 5.0, 5.0, 10.0, 10.0, r#"[["M",0.0,0.0],["L",10.0,10.0]]"#);
        let b = path("b", 105.0, 5.0, 10.0, 10.0, r#"[["M",0.0,0.0],["L",10.0,10.0]]"#);
        let (merged, bbox) = merge_paths(&[a, b]).unwrap();

        assert_eq!(bbox.left_edge(), 0.0);
        assert_eq!(bbox.width, 110.0);

        let segments: Vec<Vec<Value>> = serde_json::from_str(&merged).unwrap();
        assert_eq!(segments.len(), 4);
        // Second path's points shifted by its offset within the union box
        assert_eq!(segments[2][1].as_f64().unwrap(), 100.0);
        assert_eq!(segments[2][2].as_f64().unwrap(), 0.0);
        assert_eq!(segments[3][1].as_f64().unwrap(), 110.0);
    }

    #[test]
    fn merging_no_paths_is_a_validation_error() {
        assert!(matches!(
            merge_paths(&[]),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn malformed_geometry_is_a_parse_error() {
        let p = path("p1", 0.0, 0.0, 10.0, 10.0, "not json");
        assert!(matches!(merge_paths(&[p]), Err(DomainError::Parse(_))));
    }
}
