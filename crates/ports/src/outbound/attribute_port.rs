use anyhow::Result;
use async_trait::async_trait;
use vttkit_domain::{Attribute, CharacterId};

/// Per-character sheet attributes in the host object store.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AttributePort: Send + Sync {
    /// All attributes attached to a character.
    async fn list_for_character(&self, character_id: &CharacterId) -> Result<Vec<Attribute>>;

    /// Set the current value of an existing attribute. The attribute must
    /// already exist on the sheet; writing to a missing one is an error.
    async fn set_current(&self, character_id: &CharacterId, name: &str, value: f64) -> Result<()>;
}
