use anyhow::Result;
use async_trait::async_trait;
use vttkit_domain::HandoutId;

/// Journal handouts, used as a poor man's key-value store: one well-known
/// handout's notes field persists the marker template blob.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait HandoutPort: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<HandoutId>>;

    async fn create(&self, name: &str) -> Result<HandoutId>;

    /// Read the notes field. On the host this is a callback-style read, so
    /// a different event's handler may run between this and a later write.
    async fn read_notes(&self, id: &HandoutId) -> Result<Option<String>>;

    async fn write_notes(&self, id: &HandoutId, notes: &str) -> Result<()>;
}
