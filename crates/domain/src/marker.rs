//! Custom status marker templates and their placement math.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::entities::Token;
use crate::error::DomainError;
use crate::geometry::BoundingBox;

/// Host pixels per grid square; markers are laid out in cell units.
pub const CELL_SIZE: f64 = 70.0;

/// Name of the shared handout whose notes hold the template store.
pub const SAVE_HANDOUT_NAME: &str = "SavedCustomStatusMarkers";

/// What a marker template draws: a merged vector path or an image.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerShape {
    /// Merged path geometry string, local to the template bounding box
    Path(String),
    /// Image source URL, normalized to its thumbnail variant
    Image(String),
}

/// A saved, reusable marker definition keyed by status name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TemplateRecord", into = "TemplateRecord")]
pub struct MarkerTemplate {
    pub shape: MarkerShape,
    pub bounding_box: BoundingBox,
}

impl MarkerTemplate {
    pub fn from_path(geometry: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            shape: MarkerShape::Path(geometry.into()),
            bounding_box,
        }
    }

    pub fn from_image(source: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            shape: MarkerShape::Image(normalize_image_source(&source.into())),
            bounding_box,
        }
    }

    /// Uniform scale that fits this template's icon into one third of a cell
    /// regardless of its source aspect ratio.
    pub fn icon_scale(&self) -> f64 {
        let longest = self.bounding_box.width.max(self.bounding_box.height);
        CELL_SIZE / longest / 3.0
    }
}

/// Persisted wire shape of a template: exactly one of the two geometry
/// fields must be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TemplateRecord {
    #[serde(rename = "pathGeometry", skip_serializing_if = "Option::is_none")]
    path_geometry: Option<String>,
    #[serde(rename = "boundingBox")]
    bounding_box: BoundingBox,
    #[serde(rename = "imageSource", skip_serializing_if = "Option::is_none")]
    image_source: Option<String>,
}

impl TryFrom<TemplateRecord> for MarkerTemplate {
    type Error = DomainError;

    fn try_from(record: TemplateRecord) -> Result<Self, Self::Error> {
        let shape = match (record.path_geometry, record.image_source) {
            (Some(path), None) => MarkerShape::Path(path),
            (None, Some(source)) => MarkerShape::Image(source),
            (Some(_), Some(_)) => {
                return Err(DomainError::parse(
                    "marker template has both path geometry and an image source",
                ))
            }
            (None, None) => {
                return Err(DomainError::parse(
                    "marker template has neither path geometry nor an image source",
                ))
            }
        };
        Ok(MarkerTemplate {
            shape,
            bounding_box: record.bounding_box,
        })
    }
}

impl From<MarkerTemplate> for TemplateRecord {
    fn from(template: MarkerTemplate) -> Self {
        let (path_geometry, image_source) = match template.shape {
            MarkerShape::Path(path) => (Some(path), None),
            MarkerShape::Image(source) => (None, Some(source)),
        };
        TemplateRecord {
            path_geometry,
            bounding_box: template.bounding_box,
            image_source,
        }
    }
}

/// The named template collection persisted as one JSON blob in the save
/// handout's notes. Keys stay sorted, which makes listing deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateStore {
    entries: BTreeMap<String, MarkerTemplate>,
}

impl TemplateStore {
    /// Parse the store from handout notes. Absent notes, empty notes, and
    /// the host's literal `"null"` placeholder all read as an empty store.
    pub fn from_notes(notes: Option<&str>) -> Result<Self, DomainError> {
        match notes {
            None => Ok(Self::default()),
            Some(raw) if raw.is_empty() || raw == "null" => Ok(Self::default()),
            Some(raw) => serde_json::from_str(raw)
                .map_err(|e| DomainError::parse(format!("bad template store: {e}"))),
        }
    }

    pub fn to_notes(&self) -> Result<String, DomainError> {
        serde_json::to_string(self)
            .map_err(|e| DomainError::parse(format!("could not serialize template store: {e}")))
    }

    /// Insert or overwrite a template under `name`.
    pub fn insert(&mut self, name: impl Into<String>, template: MarkerTemplate) {
        self.entries.insert(name.into(), template);
    }

    pub fn get(&self, name: &str) -> Option<&MarkerTemplate> {
        self.entries.get(name)
    }

    /// All template names in lexicographic order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static IMAGE_VARIANT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(max|med)\.png").expect("valid image-variant regex"));

/// The host only lets scripts place the thumbnail variant of an uploaded
/// image, so sources are normalized before storage.
pub fn normalize_image_source(source: &str) -> String {
    IMAGE_VARIANT.replace(source, "thumb.png").into_owned()
}

/// Left/top (center coordinates) for the marker occupying `slot_index` on
/// `token`. Slots run right-to-left from the token's top-right corner, after
/// the host's own built-in markers.
pub fn marker_position(token: &Token, slot_index: usize) -> (f64, f64) {
    let occupied = (token.native_marker_count() + slot_index) as f64;
    let left = token.left + token.width / 2.0 - CELL_SIZE / 6.0 - occupied * CELL_SIZE / 3.0;
    let top = token.top - token.height / 2.0 + CELL_SIZE / 6.0;
    (left, top)
}

/// Position of the count badge for a marker icon at (`left`, `top`).
pub fn badge_position(left: f64, top: f64) -> (f64, f64) {
    (left + CELL_SIZE / 8.0, top + CELL_SIZE / 8.0)
}
