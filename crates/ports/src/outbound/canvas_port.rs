use anyhow::Result;
use async_trait::async_trait;
use vttkit_domain::{GraphicObject, ObjectId, PageId, PathObject, Token};

/// Host drawing layer an object lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Objects,
    Map,
    GmLayer,
}

/// Creation request for a vector-path object.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSpec {
    pub page_id: PageId,
    pub layer: Layer,
    pub geometry: String,
    pub stroke: String,
    pub fill: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

/// Creation request for an image graphic.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicSpec {
    pub page_id: PageId,
    pub layer: Layer,
    pub image_source: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Creation request for a text object.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    pub page_id: PageId,
    pub layer: Layer,
    pub text: String,
    pub color: String,
    pub left: f64,
    pub top: f64,
}

/// The host canvas: lookup, creation, and manipulation of placed objects.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CanvasPort: Send + Sync {
    /// The page players are currently viewing; new markers land there.
    async fn player_page(&self) -> Result<PageId>;

    /// Look up a token graphic by id on a page.
    async fn get_token(&self, page_id: &PageId, id: &ObjectId) -> Result<Option<Token>>;

    /// Look up a drawn path by id on a page.
    async fn get_path(&self, page_id: &PageId, id: &ObjectId) -> Result<Option<PathObject>>;

    /// Look up an image graphic by id on a page.
    async fn get_graphic(&self, page_id: &PageId, id: &ObjectId) -> Result<Option<GraphicObject>>;

    async fn create_path(&self, spec: PathSpec) -> Result<ObjectId>;

    async fn create_graphic(&self, spec: GraphicSpec) -> Result<ObjectId>;

    async fn create_text(&self, spec: TextSpec) -> Result<ObjectId>;

    /// Move an object's center to (`left`, `top`).
    async fn set_position(&self, id: &ObjectId, left: f64, top: f64) -> Result<()>;

    /// Raise an object above everything else on its layer.
    async fn bring_to_front(&self, id: &ObjectId) -> Result<()>;

    /// Delete an object from the canvas.
    async fn remove(&self, id: &ObjectId) -> Result<()>;
}
