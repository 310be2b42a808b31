//! Top-level event router.
//!
//! The host delivers chat messages and object-lifecycle events one at a
//! time; the router fans them out to the services and isolates each event's
//! failure to that event.

use std::sync::Arc;

use vttkit_domain::{ObjectId, Token};
use vttkit_ports::inbound::ChatMessage;
use vttkit_ports::outbound::ChatPort;

use crate::error::ScriptError;
use crate::services::{CustodianService, MarkerService};

const ERROR_SOURCE: &str = "Script Error";

/// Routes host events to the marker and custodian services.
pub struct ScriptRouter {
    markers: Arc<MarkerService>,
    custodian: Arc<CustodianService>,
    chat: Arc<dyn ChatPort>,
}

impl ScriptRouter {
    pub fn new(
        markers: Arc<MarkerService>,
        custodian: Arc<CustodianService>,
        chat: Arc<dyn ChatPort>,
    ) -> Self {
        Self {
            markers,
            custodian,
            chat,
        }
    }

    /// Handle one chat message. Never fails: validation problems are
    /// whispered back, anything else becomes a generic bad-command reply
    /// with the raw error logged for the operator.
    pub async fn handle_chat(&self, msg: &ChatMessage) {
        match self.dispatch(msg).await {
            Ok(()) => {}
            Err(ScriptError::Validation(reason)) => {
                self.whisper(&msg.who, &reason).await;
            }
            Err(err) => {
                tracing::error!(error = %err, content = %msg.content, "command failed");
                self.whisper(&msg.who, &format!("bad command: {}", msg.content))
                    .await;
            }
        }
    }

    /// Token moved or resized: keep its markers attached.
    pub async fn handle_token_changed(&self, token: &Token) {
        if let Err(err) = self.markers.token_changed(token).await {
            tracing::error!(error = %err, token = %token.id, "failed to move markers");
        }
    }

    /// Token deleted: drop its markers.
    pub async fn handle_token_destroyed(&self, token_id: &ObjectId) {
        if let Err(err) = self.markers.token_destroyed(token_id).await {
            tracing::error!(error = %err, token = %token_id, "failed to clear markers");
        }
    }

    async fn dispatch(&self, msg: &ChatMessage) -> Result<(), ScriptError> {
        // Marker command keywords are case-sensitive prefixes
        if msg.content.starts_with("!saveMarker") {
            self.markers.save_marker(msg).await
        } else if msg.content.starts_with("!setMarker") {
            self.markers.set_marker(msg).await
        } else if msg.content.starts_with("!listMarkers") {
            self.markers.list_markers().await
        } else {
            self.custodian.handle(msg).await
        }
    }

    async fn whisper(&self, who: &str, message: &str) {
        let line = format!("/w {who} {message}");
        if let Err(err) = self.chat.send(ERROR_SOURCE, &line).await {
            tracing::error!(error = %err, "failed to send error reply");
        }
    }
}
