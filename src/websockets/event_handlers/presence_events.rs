use std::sync::Arc;
use tracing::debug;

use crate::{
    event::RoomEventError,
    room::{models::Participant, repository::RoomRepository},
    websockets::{connection_manager::ConnectionManager, messages::WebSocketMessage},
};

use super::shared::{MessageBroadcaster, RoomQueryUtils};

/// Tells the rest of a room when someone arrives or leaves
pub struct PresenceEventHandlers {
    room_repository: Arc<dyn RoomRepository + Send + Sync>,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl PresenceEventHandlers {
    pub fn new(
        room_repository: Arc<dyn RoomRepository + Send + Sync>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            room_repository,
            connection_manager,
        }
    }

    pub async fn handle_participant_joined(
        &self,
        room_id: &str,
        participant: &Participant,
    ) -> Result<(), RoomEventError> {
        let recipients = RoomQueryUtils::recipients_excluding(
            &self.room_repository,
            room_id,
            &participant.connection_id,
        )
        .await?;

        debug!(
            room_id = %room_id,
            connection_id = %participant.connection_id,
            recipients = recipients.len(),
            "Announcing participant joined"
        );

        MessageBroadcaster::broadcast_to_connections(
            &self.connection_manager,
            &recipients,
            &WebSocketMessage::user_joined(participant),
        )
        .await
    }

    pub async fn handle_participant_left(
        &self,
        room_id: &str,
        participant: &Participant,
    ) -> Result<(), RoomEventError> {
        let recipients = RoomQueryUtils::recipients_excluding(
            &self.room_repository,
            room_id,
            &participant.connection_id,
        )
        .await?;

        debug!(
            room_id = %room_id,
            connection_id = %participant.connection_id,
            recipients = recipients.len(),
            "Announcing participant left"
        );

        MessageBroadcaster::broadcast_to_connections(
            &self.connection_manager,
            &recipients,
            &WebSocketMessage::user_left(participant),
        )
        .await
    }
}
