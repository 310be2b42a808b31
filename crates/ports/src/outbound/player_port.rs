use anyhow::Result;
use async_trait::async_trait;
use vttkit_domain::{Player, PlayerId};

/// Player accounts and their table roles.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PlayerPort: Send + Sync {
    async fn get(&self, id: &PlayerId) -> Result<Option<Player>>;

    /// Whether the player is a game master at this table.
    async fn is_gm(&self, id: &PlayerId) -> Result<bool>;
}
