use std::sync::Arc;
use tracing::debug;

use crate::{
    event::{CollabEvent, RoomEventError},
    room::{models::Participant, repository::RoomRepository},
    websockets::{
        connection_manager::ConnectionManager,
        messages::{MessageType, WebSocketMessage},
    },
};

use super::shared::{MessageBroadcaster, RoomQueryUtils};

/// Broadcasts shared interview state (code, language, output, whiteboard, chat)
pub struct CollabEventHandlers {
    room_repository: Arc<dyn RoomRepository + Send + Sync>,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl CollabEventHandlers {
    pub fn new(
        room_repository: Arc<dyn RoomRepository + Send + Sync>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            room_repository,
            connection_manager,
        }
    }

    /// Delivers the event to every current participant except its sender
    pub async fn handle_collab_event(
        &self,
        room_id: &str,
        sender: &Participant,
        event: CollabEvent,
    ) -> Result<(), RoomEventError> {
        let recipients =
            RoomQueryUtils::recipients_excluding(&self.room_repository, room_id, &sender.connection_id)
                .await?;

        debug!(
            room_id = %room_id,
            kind = %event.kind,
            sender = %sender.connection_id,
            recipients = recipients.len(),
            "Broadcasting collaboration event"
        );

        let message = WebSocketMessage::relayed(
            MessageType::relayed_collab(event.kind),
            event.payload,
            sender,
        );
        MessageBroadcaster::broadcast_to_connections(&self.connection_manager, &recipients, &message)
            .await
    }
}
