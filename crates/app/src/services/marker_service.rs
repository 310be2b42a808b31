//! Custom status marker management.
//!
//! Templates persist as one JSON blob in a well-known handout; applied
//! markers live only in this process. After a restart the tracking map is
//! empty and previously placed icons are orphaned on the canvas — a known
//! limitation carried over from the original behavior.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::Mutex;
use vttkit_domain::marker::{
    badge_position, marker_position, MarkerShape, MarkerTemplate, TemplateStore, SAVE_HANDOUT_NAME,
};
use vttkit_domain::{geometry, DomainError, GraphicObject, ObjectId, PathObject, Token};
use vttkit_ports::inbound::ChatMessage;
use vttkit_ports::outbound::{
    CanvasPort, ChatPort, GraphicSpec, HandoutPort, Layer, PathSpec, TextSpec,
};

use crate::error::ScriptError;

const SOURCE: &str = "CustomStatus script";
const ICON_STROKE: &str = "transparent";
const ICON_FILL: &str = "#000";
const BADGE_COLOR: &str = "#f00";

/// One marker instance attached to a token: the icon object plus an
/// optional count badge.
#[derive(Debug, Clone, PartialEq)]
struct AppliedMarker {
    icon: ObjectId,
    badge: Option<ObjectId>,
}

/// What a toggle decided to do, resolved under the tracking-map lock before
/// any host call is made.
enum ToggleAction {
    Create { slot: usize },
    Remove(AppliedMarker),
    Replace { slot: usize, old: AppliedMarker },
}

/// Saves marker templates and applies them to tokens.
pub struct MarkerService {
    canvas: Arc<dyn CanvasPort>,
    handouts: Arc<dyn HandoutPort>,
    chat: Arc<dyn ChatPort>,
    /// token id -> (status name -> applied marker), in application order.
    /// A marker's position in the inner map is its slot index.
    applied: Mutex<HashMap<ObjectId, IndexMap<String, AppliedMarker>>>,
}

impl MarkerService {
    pub fn new(
        canvas: Arc<dyn CanvasPort>,
        handouts: Arc<dyn HandoutPort>,
        chat: Arc<dyn ChatPort>,
    ) -> Self {
        Self {
            canvas,
            handouts,
            chat,
            applied: Mutex::new(HashMap::new()),
        }
    }

    /// `!saveMarker <name>` — persist the sender's selected drawing (or
    /// image) as a reusable marker template.
    #[tracing::instrument(skip(self, msg), fields(who = %msg.who))]
    pub async fn save_marker(&self, msg: &ChatMessage) -> Result<(), ScriptError> {
        let name = second_word(&msg.content)
            .ok_or_else(|| ScriptError::validation("usage: !saveMarker <name>"))?;

        let (paths, graphics) = self.selected_drawings(msg).await?;
        let template = match (paths.is_empty(), graphics.is_empty()) {
            (false, true) => {
                let (geometry, bbox) = geometry::merge_paths(&paths)?;
                MarkerTemplate::from_path(geometry, bbox)
            }
            (true, false) => {
                // Several images selected: first one wins
                let graphic = &graphics[0];
                MarkerTemplate::from_image(graphic.image_source.clone(), graphic.bounding_box())
            }
            (true, true) => {
                return Err(ScriptError::validation(
                    "!saveMarker needs a selected drawing or image",
                ))
            }
            (false, false) => {
                return Err(ScriptError::validation(
                    "!saveMarker cannot mix drawings and images in one selection",
                ))
            }
        };

        self.store_template(&name, template).await?;
        tracing::info!(name = %name, "saved marker template");
        self.chat
            .send(SOURCE, &format!("Created status {name}"))
            .await?;
        Ok(())
    }

    /// `!setMarker <name> [count]` — toggle the marker on every selected
    /// token.
    #[tracing::instrument(skip(self, msg), fields(who = %msg.who))]
    pub async fn set_marker(&self, msg: &ChatMessage) -> Result<(), ScriptError> {
        let mut words = msg.content.split_whitespace().skip(1);
        let name = words
            .next()
            .ok_or_else(|| ScriptError::validation("usage: !setMarker <name> [count]"))?
            .to_string();
        let count = match words.next() {
            None => None,
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
                ScriptError::validation(format!("'{raw}' is not a count badge number"))
            })?),
        };

        let page = self.canvas.player_page().await?;
        for id in &msg.selected {
            if let Some(token) = self.canvas.get_token(&page, id).await? {
                self.toggle(&token, &name, count).await?;
            }
        }
        Ok(())
    }

    /// `!listMarkers` — reply with every saved template name.
    pub async fn list_markers(&self) -> Result<(), ScriptError> {
        let store = self.read_store().await?;
        let listing = store.names().join("<br>");
        self.chat
            .send(SOURCE, &format!("Saved markers: <br/>{listing}"))
            .await?;
        Ok(())
    }

    /// Token moved: recompute every applied marker's position from its slot
    /// index and relocate the objects.
    pub async fn token_changed(&self, token: &Token) -> Result<(), ScriptError> {
        let markers: Vec<AppliedMarker> = {
            let applied = self.applied.lock().await;
            match applied.get(&token.id) {
                Some(entries) => entries.values().cloned().collect(),
                None => return Ok(()),
            }
        };

        for (slot, marker) in markers.iter().enumerate() {
            let (left, top) = marker_position(token, slot);
            self.canvas.set_position(&marker.icon, left, top).await?;
            self.canvas.bring_to_front(&marker.icon).await?;
            if let Some(badge) = &marker.badge {
                let (badge_left, badge_top) = badge_position(left, top);
                self.canvas.set_position(badge, badge_left, badge_top).await?;
                self.canvas.bring_to_front(badge).await?;
            }
        }
        Ok(())
    }

    /// Token destroyed: delete its marker objects and forget the token.
    pub async fn token_destroyed(&self, token_id: &ObjectId) -> Result<(), ScriptError> {
        let Some(markers) = self.applied.lock().await.remove(token_id) else {
            return Ok(());
        };

        tracing::debug!(token = %token_id, count = markers.len(), "clearing markers of destroyed token");
        for marker in markers.values() {
            self.remove_marker_objects(marker).await?;
        }
        Ok(())
    }

    /// Three-way toggle: absent creates, present-without-badge removes,
    /// present-with-badge (or with a new count) replaces in place.
    async fn toggle(
        &self,
        token: &Token,
        name: &str,
        count: Option<i64>,
    ) -> Result<(), ScriptError> {
        let action = {
            let mut applied = self.applied.lock().await;
            let entries = applied.entry(token.id.clone()).or_default();
            match entries.get_index_of(name) {
                None => ToggleAction::Create { slot: entries.len() },
                Some(slot) => {
                    let existing = entries[slot].clone();
                    if existing.badge.is_some() || count.is_some() {
                        ToggleAction::Replace {
                            slot,
                            old: existing,
                        }
                    } else {
                        // shift_remove keeps the remaining slots contiguous
                        entries.shift_remove(name);
                        ToggleAction::Remove(existing)
                    }
                }
            }
        };

        match action {
            ToggleAction::Create { slot } => {
                let marker = self.create_marker_objects(token, name, count, slot).await?;
                self.applied
                    .lock()
                    .await
                    .entry(token.id.clone())
                    .or_default()
                    .insert(name.to_string(), marker);
            }
            ToggleAction::Remove(marker) => {
                self.remove_marker_objects(&marker).await?;
            }
            ToggleAction::Replace { slot, old } => {
                self.remove_marker_objects(&old).await?;
                let marker = self.create_marker_objects(token, name, count, slot).await?;
                // Inserting over the still-present key keeps its slot index
                self.applied
                    .lock()
                    .await
                    .entry(token.id.clone())
                    .or_default()
                    .insert(name.to_string(), marker);
            }
        }
        Ok(())
    }

    /// Instantiate the icon (and badge, if a count was given) for one slot.
    async fn create_marker_objects(
        &self,
        token: &Token,
        name: &str,
        count: Option<i64>,
        slot: usize,
    ) -> Result<AppliedMarker, ScriptError> {
        let template = self.load_template(name).await?;
        let page = self.canvas.player_page().await?;
        let (left, top) = marker_position(token, slot);
        let scale = template.icon_scale();

        let icon = match &template.shape {
            MarkerShape::Path(geometry) => {
                self.canvas
                    .create_path(PathSpec {
                        page_id: page.clone(),
                        layer: Layer::Objects,
                        geometry: geometry.clone(),
                        stroke: ICON_STROKE.to_string(),
                        fill: ICON_FILL.to_string(),
                        left,
                        top,
                        width: template.bounding_box.width,
                        height: template.bounding_box.height,
                        scale_x: scale,
                        scale_y: scale,
                    })
                    .await?
            }
            MarkerShape::Image(source) => {
                self.canvas
                    .create_graphic(GraphicSpec {
                        page_id: page.clone(),
                        layer: Layer::Objects,
                        image_source: source.clone(),
                        left,
                        top,
                        width: template.bounding_box.width * scale,
                        height: template.bounding_box.height * scale,
                    })
                    .await?
            }
        };
        self.canvas.bring_to_front(&icon).await?;

        let badge = match count {
            None => None,
            Some(value) => {
                let (badge_left, badge_top) = badge_position(left, top);
                let badge = self
                    .canvas
                    .create_text(TextSpec {
                        page_id: page,
                        layer: Layer::Objects,
                        text: value.to_string(),
                        color: BADGE_COLOR.to_string(),
                        left: badge_left,
                        top: badge_top,
                    })
                    .await?;
                self.canvas.bring_to_front(&badge).await?;
                Some(badge)
            }
        };

        Ok(AppliedMarker { icon, badge })
    }

    async fn remove_marker_objects(&self, marker: &AppliedMarker) -> Result<(), ScriptError> {
        self.canvas.remove(&marker.icon).await?;
        if let Some(badge) = &marker.badge {
            self.canvas.remove(badge).await?;
        }
        Ok(())
    }

    /// Partition the sender's selection into drawn paths and image graphics.
    async fn selected_drawings(
        &self,
        msg: &ChatMessage,
    ) -> Result<(Vec<PathObject>, Vec<GraphicObject>), ScriptError> {
        let page = self.canvas.player_page().await?;
        let mut paths = Vec::new();
        let mut graphics = Vec::new();
        for id in &msg.selected {
            if let Some(path) = self.canvas.get_path(&page, id).await? {
                paths.push(path);
            } else if let Some(graphic) = self.canvas.get_graphic(&page, id).await? {
                graphics.push(graphic);
            }
        }
        Ok((paths, graphics))
    }

    async fn load_template(&self, name: &str) -> Result<MarkerTemplate, ScriptError> {
        let store = self.read_store().await?;
        store
            .get(name)
            .cloned()
            .ok_or_else(|| DomainError::not_found("marker template", name).into())
    }

    async fn read_store(&self) -> Result<TemplateStore, ScriptError> {
        let Some(handout) = self.handouts.find_by_name(SAVE_HANDOUT_NAME).await? else {
            return Ok(TemplateStore::default());
        };
        let notes = self.handouts.read_notes(&handout).await?;
        Ok(TemplateStore::from_notes(notes.as_deref())?)
    }

    // Read-modify-write on the shared blob; the host may interleave another
    // event between the read and the write, so two concurrent saves can
    // lose one name. Carried over from the original behavior.
    async fn store_template(
        &self,
        name: &str,
        template: MarkerTemplate,
    ) -> Result<(), ScriptError> {
        let handout = match self.handouts.find_by_name(SAVE_HANDOUT_NAME).await? {
            Some(id) => id,
            None => self.handouts.create(SAVE_HANDOUT_NAME).await?,
        };
        let notes = self.handouts.read_notes(&handout).await?;
        let mut store = TemplateStore::from_notes(notes.as_deref())?;
        store.insert(name, template);
        self.handouts
            .write_notes(&handout, &store.to_notes()?)
            .await?;
        Ok(())
    }
}

fn second_word(content: &str) -> Option<String> {
    content.split_whitespace().nth(1).map(str::to_string)
}
