use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    event::{RoomEventError, SignalingMessage},
    room::{models::Participant, repository::RoomRepository},
    websockets::{
        connection_manager::ConnectionManager,
        messages::{MessageType, WebSocketMessage},
    },
};

use super::shared::{MessageBroadcaster, RoomQueryUtils};

/// Relays WebRTC offers, answers and ICE candidates without interpreting them
pub struct SignalingEventHandlers {
    room_repository: Arc<dyn RoomRepository + Send + Sync>,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl SignalingEventHandlers {
    pub fn new(
        room_repository: Arc<dyn RoomRepository + Send + Sync>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            room_repository,
            connection_manager,
        }
    }

    /// Forwards the payload verbatim to its target, or to every other participant
    ///
    /// A target outside the room (or the sender itself) gets nothing.
    pub async fn handle_signal(
        &self,
        room_id: &str,
        sender: &Participant,
        message: SignalingMessage,
    ) -> Result<(), RoomEventError> {
        let recipients =
            RoomQueryUtils::recipients_excluding(&self.room_repository, room_id, &sender.connection_id)
                .await?;

        let recipients = match &message.target {
            Some(target) if recipients.contains(target) => vec![target.clone()],
            Some(target) => {
                warn!(
                    room_id = %room_id,
                    kind = %message.kind,
                    sender = %sender.connection_id,
                    target = %target,
                    "Signaling target is not a peer in this room, dropping"
                );
                return Ok(());
            }
            None => recipients,
        };

        debug!(
            room_id = %room_id,
            kind = %message.kind,
            sender = %sender.connection_id,
            recipients = recipients.len(),
            "Relaying signaling message"
        );

        let outbound = WebSocketMessage::relayed(
            MessageType::relayed_signal(message.kind),
            message.payload,
            sender,
        );
        MessageBroadcaster::broadcast_to_connections(&self.connection_manager, &recipients, &outbound)
            .await
    }
}
