use std::sync::Mutex;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use uuid::Uuid;

use vttkit_domain::{
    Attribute, Character, CharacterId, GraphicObject, HandoutId, ObjectId, PageId, PathObject,
    Player, PlayerId, Token,
};
use vttkit_ports::outbound::{
    AttributePort, CanvasPort, CharacterPort, ChatPort, GraphicSpec, HandoutPort, PathSpec,
    PlayerPort, TextSpec,
};

/// A canvas object created through the ports, kept with its live position.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacedObject {
    Path(PathSpec),
    Graphic(GraphicSpec),
    Text(TextSpec),
}

impl PlacedObject {
    pub fn position(&self) -> (f64, f64) {
        match self {
            PlacedObject::Path(spec) => (spec.left, spec.top),
            PlacedObject::Graphic(spec) => (spec.left, spec.top),
            PlacedObject::Text(spec) => (spec.left, spec.top),
        }
    }

    fn position_mut(&mut self) -> (&mut f64, &mut f64) {
        match self {
            PlacedObject::Path(spec) => (&mut spec.left, &mut spec.top),
            PlacedObject::Graphic(spec) => (&mut spec.left, &mut spec.top),
            PlacedObject::Text(spec) => (&mut spec.left, &mut spec.top),
        }
    }
}

#[derive(Debug, Clone)]
struct HandoutRecord {
    name: String,
    notes: Option<String>,
}

/// In-memory tabletop host: one page, flat object tables, a recorded chat
/// log. Every port is implemented against it.
pub struct InMemoryHost {
    player_page: PageId,
    tokens: DashMap<ObjectId, Token>,
    paths: DashMap<ObjectId, PathObject>,
    graphics: DashMap<ObjectId, GraphicObject>,
    placed: DashMap<ObjectId, PlacedObject>,
    handouts: DashMap<HandoutId, HandoutRecord>,
    characters: DashMap<CharacterId, Character>,
    attributes: DashMap<CharacterId, Vec<Attribute>>,
    players: DashMap<PlayerId, Player>,
    gm_ids: DashSet<PlayerId>,
    chat_log: Mutex<Vec<(String, String)>>,
}

impl InMemoryHost {
    pub fn new(player_page: impl Into<PageId>) -> Self {
        Self {
            player_page: player_page.into(),
            tokens: DashMap::new(),
            paths: DashMap::new(),
            graphics: DashMap::new(),
            placed: DashMap::new(),
            handouts: DashMap::new(),
            characters: DashMap::new(),
            attributes: DashMap::new(),
            players: DashMap::new(),
            gm_ids: DashSet::new(),
            chat_log: Mutex::new(Vec::new()),
        }
    }

    // --- seeding -----------------------------------------------------------

    pub fn seed_token(&self, token: Token) {
        self.tokens.insert(token.id.clone(), token);
    }

    pub fn seed_path(&self, path: PathObject) {
        self.paths.insert(path.id.clone(), path);
    }

    pub fn seed_graphic(&self, graphic: GraphicObject) {
        self.graphics.insert(graphic.id.clone(), graphic);
    }

    pub fn seed_character(&self, character: Character) {
        self.characters.insert(character.id.clone(), character);
    }

    pub fn seed_attribute(&self, character_id: &CharacterId, name: &str, current: &str) {
        self.attributes
            .entry(character_id.clone())
            .or_default()
            .push(Attribute::new(name, current));
    }

    pub fn seed_player(&self, player: Player, is_gm: bool) {
        if is_gm {
            self.gm_ids.insert(player.id.clone());
        }
        self.players.insert(player.id.clone(), player);
    }

    // --- inspection --------------------------------------------------------

    /// Every chat line sent so far, as (source, message) pairs.
    pub fn chat_log(&self) -> Vec<(String, String)> {
        self.chat_log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    /// Canvas objects created through the ports (marker icons and badges).
    pub fn placed_objects(&self) -> Vec<(ObjectId, PlacedObject)> {
        self.placed
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    pub fn placed_position(&self, id: &ObjectId) -> Option<(f64, f64)> {
        self.placed.get(id).map(|obj| obj.position())
    }

    /// Current value of one sheet attribute.
    pub fn attribute_current(&self, character_id: &CharacterId, name: &str) -> Option<String> {
        self.attributes.get(character_id).and_then(|attrs| {
            attrs
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.current.clone())
        })
    }

    /// Notes of a handout addressed by name.
    pub fn handout_notes(&self, name: &str) -> Option<String> {
        self.handouts
            .iter()
            .find(|entry| entry.value().name == name)
            .and_then(|entry| entry.value().notes.clone())
    }

    fn fresh_object_id(&self) -> ObjectId {
        ObjectId::new(Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl ChatPort for InMemoryHost {
    async fn send(&self, source: &str, message: &str) -> Result<()> {
        self.chat_log
            .lock()
            .map_err(|_| anyhow!("chat log poisoned"))?
            .push((source.to_string(), message.to_string()));
        Ok(())
    }
}

#[async_trait]
impl CanvasPort for InMemoryHost {
    async fn player_page(&self) -> Result<PageId> {
        Ok(self.player_page.clone())
    }

    async fn get_token(&self, page_id: &PageId, id: &ObjectId) -> Result<Option<Token>> {
        Ok(self
            .tokens
            .get(id)
            .filter(|token| &token.page_id == page_id)
            .map(|token| token.clone()))
    }

    async fn get_path(&self, _page_id: &PageId, id: &ObjectId) -> Result<Option<PathObject>> {
        Ok(self.paths.get(id).map(|path| path.clone()))
    }

    async fn get_graphic(&self, _page_id: &PageId, id: &ObjectId) -> Result<Option<GraphicObject>> {
        Ok(self.graphics.get(id).map(|graphic| graphic.clone()))
    }

    async fn create_path(&self, spec: PathSpec) -> Result<ObjectId> {
        let id = self.fresh_object_id();
        self.placed.insert(id.clone(), PlacedObject::Path(spec));
        Ok(id)
    }

    async fn create_graphic(&self, spec: GraphicSpec) -> Result<ObjectId> {
        let id = self.fresh_object_id();
        self.placed.insert(id.clone(), PlacedObject::Graphic(spec));
        Ok(id)
    }

    async fn create_text(&self, spec: TextSpec) -> Result<ObjectId> {
        let id = self.fresh_object_id();
        self.placed.insert(id.clone(), PlacedObject::Text(spec));
        Ok(id)
    }

    async fn set_position(&self, id: &ObjectId, left: f64, top: f64) -> Result<()> {
        if let Some(mut placed) = self.placed.get_mut(id) {
            let (l, t) = placed.position_mut();
            *l = left;
            *t = top;
            return Ok(());
        }
        if let Some(mut token) = self.tokens.get_mut(id) {
            token.left = left;
            token.top = top;
            return Ok(());
        }
        bail!("no such object: {id}")
    }

    async fn bring_to_front(&self, id: &ObjectId) -> Result<()> {
        if self.placed.contains_key(id) || self.tokens.contains_key(id) {
            Ok(())
        } else {
            bail!("no such object: {id}")
        }
    }

    async fn remove(&self, id: &ObjectId) -> Result<()> {
        if self.placed.remove(id).is_some() || self.tokens.remove(id).is_some() {
            Ok(())
        } else {
            bail!("no such object: {id}")
        }
    }
}

#[async_trait]
impl HandoutPort for InMemoryHost {
    async fn find_by_name(&self, name: &str) -> Result<Option<HandoutId>> {
        Ok(self
            .handouts
            .iter()
            .find(|entry| entry.value().name == name)
            .map(|entry| entry.key().clone()))
    }

    async fn create(&self, name: &str) -> Result<HandoutId> {
        let id = HandoutId::new(Uuid::new_v4().to_string());
        self.handouts.insert(
            id.clone(),
            HandoutRecord {
                name: name.to_string(),
                notes: None,
            },
        );
        Ok(id)
    }

    async fn read_notes(&self, id: &HandoutId) -> Result<Option<String>> {
        let record = self
            .handouts
            .get(id)
            .ok_or_else(|| anyhow!("no such handout: {id}"))?;
        Ok(record.notes.clone())
    }

    async fn write_notes(&self, id: &HandoutId, notes: &str) -> Result<()> {
        let mut record = self
            .handouts
            .get_mut(id)
            .ok_or_else(|| anyhow!("no such handout: {id}"))?;
        record.notes = Some(notes.to_string());
        Ok(())
    }
}

#[async_trait]
impl CharacterPort for InMemoryHost {
    async fn get(&self, id: &CharacterId) -> Result<Option<Character>> {
        Ok(self.characters.get(id).map(|c| c.clone()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Character>> {
        Ok(self
            .characters
            .iter()
            .find(|entry| entry.value().name.eq_ignore_ascii_case(name))
            .map(|entry| entry.value().clone()))
    }
}

#[async_trait]
impl AttributePort for InMemoryHost {
    async fn list_for_character(&self, character_id: &CharacterId) -> Result<Vec<Attribute>> {
        Ok(self
            .attributes
            .get(character_id)
            .map(|attrs| attrs.clone())
            .unwrap_or_default())
    }

    async fn set_current(&self, character_id: &CharacterId, name: &str, value: f64) -> Result<()> {
        let mut attrs = self
            .attributes
            .get_mut(character_id)
            .ok_or_else(|| anyhow!("character {character_id} has no attributes"))?;
        let attr = attrs
            .iter_mut()
            .find(|a| a.name == name)
            .ok_or_else(|| anyhow!("character {character_id} has no attribute '{name}'"))?;
        attr.current = format_value(value);
        Ok(())
    }
}

#[async_trait]
impl PlayerPort for InMemoryHost {
    async fn get(&self, id: &PlayerId) -> Result<Option<Player>> {
        Ok(self.players.get(id).map(|p| p.clone()))
    }

    async fn is_gm(&self, id: &PlayerId) -> Result<bool> {
        Ok(self.gm_ids.contains(id))
    }
}

/// Attributes hold text; whole numbers are written without a decimal point,
/// the way the host's sheet fields show them.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
