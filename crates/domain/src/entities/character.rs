use crate::ids::{CharacterId, PlayerId};

/// A journal character record with its controller list.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    /// Player ids allowed to control this character; may contain the
    /// wildcard entry `"all"`.
    pub controlled_by: Vec<String>,
}

impl Character {
    /// Whether `player` may act through this character. Game-master checks
    /// happen before this; the wildcard `"all"` opens the character to
    /// everyone.
    pub fn is_controlled_by(&self, player: &PlayerId) -> bool {
        self.controlled_by
            .iter()
            .any(|entry| entry == player.as_str() || entry == "all")
    }
}
