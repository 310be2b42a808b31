use anyhow::Result;
use async_trait::async_trait;
use vttkit_domain::{Character, CharacterId};

/// Journal character records.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CharacterPort: Send + Sync {
    async fn get(&self, id: &CharacterId) -> Result<Option<Character>>;

    /// Case-insensitive lookup by character name; first match wins.
    async fn find_by_name(&self, name: &str) -> Result<Option<Character>>;
}
