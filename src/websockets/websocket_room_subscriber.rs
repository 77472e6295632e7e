use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    event::{RoomEvent, RoomEventError, RoomEventHandler},
    room::repository::RoomRepository,
    websockets::connection_manager::ConnectionManager,
};

use super::event_handlers::{CollabEventHandlers, PresenceEventHandlers, SignalingEventHandlers};

/// WebSocket-specific room event handler
///
/// Handles room events by delegating to specialized event handlers:
/// - PresenceEventHandlers: ParticipantJoined, ParticipantLeft
/// - SignalingEventHandlers: Signal
/// - CollabEventHandlers: Collab
///
/// Recipients are resolved from the room's membership at dispatch time.
pub struct WebSocketRoomSubscriber {
    presence_handlers: PresenceEventHandlers,
    signaling_handlers: SignalingEventHandlers,
    collab_handlers: CollabEventHandlers,
}

#[async_trait]
impl RoomEventHandler for WebSocketRoomSubscriber {
    async fn handle_room_event(
        &self,
        room_id: &str,
        event: RoomEvent,
    ) -> Result<(), RoomEventError> {
        match event {
            RoomEvent::ParticipantJoined { participant } => {
                self.presence_handlers
                    .handle_participant_joined(room_id, &participant)
                    .await
            }
            RoomEvent::ParticipantLeft { participant } => {
                self.presence_handlers
                    .handle_participant_left(room_id, &participant)
                    .await
            }
            RoomEvent::Signal { sender, message } => {
                self.signaling_handlers
                    .handle_signal(room_id, &sender, message)
                    .await
            }
            RoomEvent::Collab { sender, event } => {
                self.collab_handlers
                    .handle_collab_event(room_id, &sender, event)
                    .await
            }
        }
    }

    fn handler_name(&self) -> &'static str {
        "WebSocketRoomSubscriber"
    }
}

impl WebSocketRoomSubscriber {
    pub fn new(
        room_repository: Arc<dyn RoomRepository + Send + Sync>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            presence_handlers: PresenceEventHandlers::new(
                Arc::clone(&room_repository),
                Arc::clone(&connection_manager),
            ),
            signaling_handlers: SignalingEventHandlers::new(
                Arc::clone(&room_repository),
                Arc::clone(&connection_manager),
            ),
            collab_handlers: CollabEventHandlers::new(room_repository, connection_manager),
        }
    }
}
