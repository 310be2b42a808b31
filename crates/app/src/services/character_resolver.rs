//! Access-controlled character lookup.

use std::sync::Arc;

use vttkit_domain::{Character, CharacterId, ObjectId, PlayerId};
use vttkit_ports::outbound::{CanvasPort, CharacterPort, PlayerPort};

use crate::chat::{ReplyTarget, Responder};
use crate::error::ScriptError;

const SOURCE: &str = "RUtil";

/// Resolves a free-form character reference to a character record, enforcing
/// controller-list access for non-GM requesters.
///
/// Resolution order: character id, then token id (through the token's
/// `represents` link), then case-insensitive name.
pub struct CharacterResolver {
    characters: Arc<dyn CharacterPort>,
    canvas: Arc<dyn CanvasPort>,
    players: Arc<dyn PlayerPort>,
    responder: Responder,
}

impl CharacterResolver {
    pub fn new(
        characters: Arc<dyn CharacterPort>,
        canvas: Arc<dyn CanvasPort>,
        players: Arc<dyn PlayerPort>,
        responder: Responder,
    ) -> Self {
        Self {
            characters,
            canvas,
            players,
            responder,
        }
    }

    /// Resolve `reference` on behalf of `requester`. Returns `None` both
    /// when nothing matches and when access is denied; denial additionally
    /// whispers the requester and audits to the game masters.
    pub async fn resolve(
        &self,
        reference: &str,
        requester: &PlayerId,
    ) -> Result<Option<Character>, ScriptError> {
        let Some(character) = self.lookup(reference).await? else {
            return Ok(None);
        };

        if self.players.is_gm(requester).await? || character.is_controlled_by(requester) {
            return Ok(Some(character));
        }

        tracing::warn!(
            requester = %requester,
            character = %character.id,
            "denied character access"
        );
        self.responder
            .send(
                SOURCE,
                &format!(
                    "Access denied to {}: you are not allowed to control that character",
                    character.id
                ),
                ReplyTarget::Player(requester.clone()),
            )
            .await?;

        let requester_name = self
            .players
            .get(requester)
            .await?
            .map(|p| p.display_name)
            .unwrap_or_else(|| requester.to_string());
        self.responder
            .send(
                SOURCE,
                &format!(
                    "<b>{}</b> attempted to fetch character <b>{}</b> ({})",
                    requester_name, character.name, character.id
                ),
                ReplyTarget::Gm,
            )
            .await?;

        Ok(None)
    }

    async fn lookup(&self, reference: &str) -> Result<Option<Character>, ScriptError> {
        if let Some(character) = self.characters.get(&CharacterId::new(reference)).await? {
            return Ok(Some(character));
        }

        let page = self.canvas.player_page().await?;
        if let Some(token) = self
            .canvas
            .get_token(&page, &ObjectId::new(reference))
            .await?
        {
            if let Some(represents) = token.represents {
                if let Some(character) = self.characters.get(&represents).await? {
                    return Ok(Some(character));
                }
            }
        }

        Ok(self.characters.find_by_name(reference).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::*;
    use vttkit_domain::{PageId, Player, Token};
    use vttkit_ports::outbound::{
        MockCanvasPort, MockCharacterPort, MockChatPort, MockPlayerPort,
    };

    fn character(id: &str, name: &str, controlled_by: &[&str]) -> Character {
        Character {
            id: CharacterId::new(id),
            name: name.to_string(),
            controlled_by: controlled_by.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn resolver(
        characters: MockCharacterPort,
        canvas: MockCanvasPort,
        players: MockPlayerPort,
        chat: MockChatPort,
    ) -> CharacterResolver {
        let players = Arc::new(players);
        CharacterResolver::new(
            Arc::new(characters),
            Arc::new(canvas),
            players.clone(),
            Responder::new(Arc::new(chat), players),
        )
    }

    #[tokio::test]
    async fn direct_id_lookup_wins() {
        let mut characters = MockCharacterPort::new();
        characters
            .expect_get()
            .with(eq(CharacterId::new("char-1")))
            .returning(|_| Ok(Some(character("char-1", "Bob", &["p1"]))));

        let mut players = MockPlayerPort::new();
        players.expect_is_gm().returning(|_| Ok(false));

        let resolver = resolver(
            characters,
            MockCanvasPort::new(),
            players,
            MockChatPort::new(),
        );
        let found = resolver
            .resolve("char-1", &PlayerId::new("p1"))
            .await
            .unwrap();
        assert_eq!(found.unwrap().name, "Bob");
    }

    #[tokio::test]
    async fn token_reference_follows_the_represents_link() {
        let mut characters = MockCharacterPort::new();
        characters
            .expect_get()
            .with(eq(CharacterId::new("tok-1")))
            .returning(|_| Ok(None));
        characters
            .expect_get()
            .with(eq(CharacterId::new("char-9")))
            .returning(|_| Ok(Some(character("char-9", "Bob", &["all"]))));

        let mut canvas = MockCanvasPort::new();
        canvas
            .expect_player_page()
            .returning(|| Ok(PageId::new("page-1")));
        canvas.expect_get_token().returning(|page_id, id| {
            Ok(Some(Token {
                id: id.clone(),
                page_id: page_id.clone(),
                left: 0.0,
                top: 0.0,
                width: 70.0,
                height: 70.0,
                represents: Some(CharacterId::new("char-9")),
                status_markers: Vec::new(),
            }))
        });

        let mut players = MockPlayerPort::new();
        players.expect_is_gm().returning(|_| Ok(false));

        let resolver = resolver(characters, canvas, players, MockChatPort::new());
        let found = resolver
            .resolve("tok-1", &PlayerId::new("someone"))
            .await
            .unwrap();
        assert_eq!(found.unwrap().id, CharacterId::new("char-9"));
    }

    #[tokio::test]
    async fn name_lookup_is_the_last_resort() {
        let mut characters = MockCharacterPort::new();
        characters.expect_get().returning(|_| Ok(None));
        characters
            .expect_find_by_name()
            .with(eq("bob the brave"))
            .returning(|_| Ok(Some(character("char-1", "Bob the Brave", &["p1"]))));

        let mut canvas = MockCanvasPort::new();
        canvas
            .expect_player_page()
            .returning(|| Ok(PageId::new("page-1")));
        canvas.expect_get_token().returning(|_, _| Ok(None));

        let mut players = MockPlayerPort::new();
        players.expect_is_gm().returning(|_| Ok(true));

        let resolver = resolver(characters, canvas, players, MockChatPort::new());
        let found = resolver
            .resolve("bob the brave", &PlayerId::new("gm-1"))
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn denial_whispers_the_requester_and_audits_the_gms() {
        let mut characters = MockCharacterPort::new();
        characters
            .expect_get()
            .returning(|_| Ok(Some(character("char-1", "Bob", &["owner"]))));

        let mut players = MockPlayerPort::new();
        players.expect_is_gm().returning(|_| Ok(false));
        players.expect_get().returning(|id| {
            Ok(Some(Player {
                id: id.clone(),
                display_name: "Mallory".to_string(),
            }))
        });

        let mut chat = MockChatPort::new();
        chat.expect_send()
            .withf(|_, line| line.starts_with("/w Mallory") && line.contains("Access denied"))
            .once()
            .returning(|_, _| Ok(()));
        chat.expect_send()
            .withf(|_, line| {
                line.starts_with("/w gm")
                    && line.contains("<b>Mallory</b> attempted to fetch character <b>Bob</b>")
            })
            .once()
            .returning(|_, _| Ok(()));

        let resolver = resolver(characters, MockCanvasPort::new(), players, chat);
        let found = resolver
            .resolve("char-1", &PlayerId::new("mallory-id"))
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
