use std::sync::Arc;

use anyhow::{anyhow, Result};
use vttkit_domain::PlayerId;
use vttkit_ports::outbound::{ChatPort, PlayerPort};

/// Inline style wrapped around every utility-layer reply.
const REPLY_STYLE: &str =
    "background: #eeffee;border: 1px solid #8B4513;color: #8B4513;font-size: 80%;padding: 1px 3px;";

/// Where a reply goes.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyTarget {
    Public,
    /// Whispered to the game masters
    Gm,
    /// Whispered to one player, addressed by display name
    Player(PlayerId),
}

/// Sends styled chat replies, resolving player ids to display names for
/// whisper directives.
#[derive(Clone)]
pub struct Responder {
    chat: Arc<dyn ChatPort>,
    players: Arc<dyn PlayerPort>,
}

impl Responder {
    pub fn new(chat: Arc<dyn ChatPort>, players: Arc<dyn PlayerPort>) -> Self {
        Self { chat, players }
    }

    pub async fn send(&self, source: &str, message: &str, target: ReplyTarget) -> Result<()> {
        let body = format!("<div style=\"{REPLY_STYLE}\">{message}</div>");
        let line = match target {
            ReplyTarget::Public => body,
            ReplyTarget::Gm => format!("/w gm {body}"),
            ReplyTarget::Player(id) => {
                let player = self
                    .players
                    .get(&id)
                    .await?
                    .ok_or_else(|| anyhow!("unknown player {id}"))?;
                format!("/w {} {body}", player.display_name)
            }
        };
        self.chat.send(source, &line).await
    }
}
