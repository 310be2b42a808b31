use anyhow::Result;
use async_trait::async_trait;

/// The host chat channel.
///
/// `message` is sent verbatim, so whisper directives (`/w name ...`) and
/// inline HTML styling are the caller's responsibility.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ChatPort: Send + Sync {
    /// Send a chat line attributed to `source`.
    async fn send(&self, source: &str, message: &str) -> Result<()>;
}
