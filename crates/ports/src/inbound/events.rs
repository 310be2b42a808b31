use vttkit_domain::{ObjectId, PlayerId};

/// How the host classified a chat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// A `!command` line addressed to scripts, never shown to players
    Api,
    /// Ordinary table talk
    General,
}

/// A resolved inline dice roll attached to a chat message.
///
/// When the roll drew from a rollable table, `table_items` carries the drawn
/// item names and takes precedence over the numeric total.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineRoll {
    pub total: f64,
    pub table_items: Vec<String>,
}

impl InlineRoll {
    pub fn total(total: f64) -> Self {
        Self {
            total,
            table_items: Vec::new(),
        }
    }

    pub fn table_draw(items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            total: 0.0,
            table_items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// A chat message event, validated at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub kind: MessageKind,
    /// Sender's display name, used for whispered error replies
    pub who: String,
    pub player_id: PlayerId,
    pub content: String,
    /// Ids of the canvas objects the sender had selected
    pub selected: Vec<ObjectId>,
    /// Inline rolls in placeholder order: `$[[0]]`, `$[[1]]`, ...
    pub inline_rolls: Vec<InlineRoll>,
}

impl ChatMessage {
    /// An api-kind message with no selection and no rolls.
    pub fn api(who: impl Into<String>, player_id: PlayerId, content: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Api,
            who: who.into(),
            player_id,
            content: content.into(),
            selected: Vec::new(),
            inline_rolls: Vec::new(),
        }
    }

    pub fn with_selected(mut self, selected: impl IntoIterator<Item = ObjectId>) -> Self {
        self.selected = selected.into_iter().collect();
        self
    }

    pub fn with_inline_rolls(mut self, rolls: impl IntoIterator<Item = InlineRoll>) -> Self {
        self.inline_rolls = rolls.into_iter().collect();
        self
    }
}
