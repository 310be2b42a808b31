//! The `!pfcustodian` command family: Pathfinder carrying capacity and
//! encumbrance, written back to the character sheet.

use std::collections::VecDeque;
use std::sync::Arc;

use vttkit_domain::game_systems::pathfinder;
use vttkit_domain::Character;
use vttkit_ports::inbound::{ChatMessage, MessageKind};
use vttkit_ports::outbound::AttributePort;

use crate::chat::{substitute_inline_rolls, tokenize, ReplyTarget, Responder};
use crate::error::ScriptError;
use crate::services::CharacterResolver;

const SOURCE: &str = "PFCustodian";
const COMMAND: &str = "!pfcustodian";

/// Handles `!pfcustodian <characterRef> <subcommand> [args...]`.
///
/// Subcommands chain within one message and are consumed left to right
/// until the token list is exhausted.
pub struct CustodianService {
    attributes: Arc<dyn AttributePort>,
    resolver: Arc<CharacterResolver>,
    responder: Responder,
}

impl CustodianService {
    pub fn new(
        attributes: Arc<dyn AttributePort>,
        resolver: Arc<CharacterResolver>,
        responder: Responder,
    ) -> Self {
        Self {
            attributes,
            resolver,
            responder,
        }
    }

    /// Process one chat message; non-api messages and other commands pass
    /// through untouched.
    #[tracing::instrument(skip(self, msg), fields(who = %msg.who))]
    pub async fn handle(&self, msg: &ChatMessage) -> Result<(), ScriptError> {
        if msg.kind != MessageKind::Api {
            return Ok(());
        }

        let content = substitute_inline_rolls(msg);
        let mut tokens: VecDeque<String> = tokenize(&content).into();
        match tokens.pop_front() {
            Some(keyword) if keyword.eq_ignore_ascii_case(COMMAND) => {}
            _ => return Ok(()),
        }

        let reference = tokens.pop_front().unwrap_or_default();
        let character = match self.resolver.resolve(&reference, &msg.player_id).await? {
            Some(character) => character,
            None => {
                self.responder
                    .send(
                        SOURCE,
                        "Unable to access requested character.",
                        ReplyTarget::Player(msg.player_id.clone()),
                    )
                    .await?;
                return Ok(());
            }
        };

        while let Some(subcommand) = tokens.pop_front() {
            match subcommand.to_ascii_lowercase().as_str() {
                "carrying-capacity" => {
                    let raw = tokens.pop_front().ok_or_else(|| {
                        ScriptError::validation("carrying-capacity needs a strength score")
                    })?;
                    let strength: i32 = raw.parse().map_err(|_| {
                        ScriptError::validation(format!("'{raw}' is not a strength score"))
                    })?;
                    self.carrying_capacity(&character, strength).await?;
                }
                "encumbrance" => self.encumbrance(&character).await?,
                "rest" => {
                    self.responder
                        .send(
                            SOURCE,
                            "rest is not implemented.",
                            ReplyTarget::Player(msg.player_id.clone()),
                        )
                        .await?;
                }
                other => {
                    self.responder
                        .send(
                            SOURCE,
                            &format!("Unknown command: {other}"),
                            ReplyTarget::Player(msg.player_id.clone()),
                        )
                        .await?;
                }
            }
        }
        Ok(())
    }

    /// Compute the three load thresholds for `strength` and write them to
    /// the sheet.
    async fn carrying_capacity(
        &self,
        character: &Character,
        strength: i32,
    ) -> Result<(), ScriptError> {
        let limits = pathfinder::carrying_capacity(strength);
        tracing::debug!(
            character = %character.name,
            strength,
            light = limits.light,
            medium = limits.medium,
            heavy = limits.heavy,
            "carrying capacity"
        );

        self.attributes
            .set_current(&character.id, "load-light", limits.light)
            .await?;
        self.attributes
            .set_current(&character.id, "load-medium", limits.medium)
            .await?;
        self.attributes
            .set_current(&character.id, "load-heavy", limits.heavy)
            .await?;
        Ok(())
    }

    /// Re-scan the sheet's gear attributes and write the carried-weight
    /// totals. Nothing is cached; every invocation reads the live sheet.
    async fn encumbrance(&self, character: &Character) -> Result<(), ScriptError> {
        let attributes = self.attributes.list_for_character(&character.id).await?;
        let carried = pathfinder::weigh_attributes(&attributes);
        tracing::debug!(
            character = %character.name,
            armor_and_weapons = carried.armor_and_weapons,
            equipment = carried.equipment,
            "encumbrance totals"
        );

        self.attributes
            .set_current(
                &character.id,
                "carried-armor-and-weapons",
                carried.armor_and_weapons,
            )
            .await?;
        self.attributes
            .set_current(&character.id, "carried-equipment", carried.equipment)
            .await?;
        Ok(())
    }
}
