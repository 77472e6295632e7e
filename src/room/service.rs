use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use super::{
    models::{Participant, RoomModel},
    repository::{JoinRoomResult, LeaveRoomResult, RoomRepository},
};
use crate::event::{EventBus, RoomEventHandler, RoomSubscription};
use crate::shared::AppError;

/// Service for room membership and the lifetime of each room's broadcaster
///
/// A room's broadcaster is started when the room is created by a join and
/// aborted when the last participant leaves. Membership changes and
/// broadcaster start/stop happen under one lock, so a room that is deleted
/// and immediately recreated always ends up with exactly one broadcaster.
pub struct RoomService {
    repository: Arc<dyn RoomRepository + Send + Sync>,
    event_bus: EventBus,
    subscriber: Arc<dyn RoomEventHandler>,
    broadcasters: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl RoomService {
    pub fn new(
        repository: Arc<dyn RoomRepository + Send + Sync>,
        event_bus: EventBus,
        subscriber: Arc<dyn RoomEventHandler>,
    ) -> Self {
        Self {
            repository,
            event_bus,
            subscriber,
            broadcasters: Mutex::new(HashMap::new()),
        }
    }

    /// Adds a participant to a room, creating the room and its broadcaster if needed
    #[instrument(skip(self, participant), fields(connection_id = %participant.connection_id))]
    pub async fn join_room(
        &self,
        room_id: &str,
        participant: Participant,
    ) -> Result<JoinRoomResult, AppError> {
        let mut broadcasters = self.broadcasters.lock().await;

        let result = self.repository.join_room(room_id, participant).await?;

        if !broadcasters.contains_key(room_id) {
            let subscription = RoomSubscription::new(
                room_id.to_string(),
                Arc::clone(&self.subscriber),
                self.event_bus.clone(),
            );
            broadcasters.insert(room_id.to_string(), subscription.start().await);
            info!(room_id = %room_id, "Room broadcaster started");
        }

        Ok(result)
    }

    /// Removes a participant; stops the room's broadcaster when the room empties
    #[instrument(skip(self))]
    pub async fn leave_room(
        &self,
        room_id: &str,
        connection_id: &str,
    ) -> Result<LeaveRoomResult, AppError> {
        let mut broadcasters = self.broadcasters.lock().await;

        let result = self.repository.leave_room(room_id, connection_id).await?;

        match &result {
            LeaveRoomResult::RoomDeleted { .. } => {
                if let Some(handle) = broadcasters.remove(room_id) {
                    handle.abort();
                }
                self.event_bus.remove_room(room_id).await;
                info!(room_id = %room_id, "Room forgotten and broadcaster stopped");
            }
            LeaveRoomResult::Success { room, .. } => {
                debug!(
                    room_id = %room_id,
                    participant_count = room.participant_count(),
                    "Participant left room"
                );
            }
            LeaveRoomResult::ParticipantNotInRoom | LeaveRoomResult::RoomNotFound => {
                debug!(room_id = %room_id, "Leave ignored, connection not in room");
            }
        }

        Ok(result)
    }

    /// Gets the room model for internal use (WebSocket handlers, etc.)
    pub async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError> {
        self.repository.get_room(room_id).await
    }

    pub async fn list_rooms(&self) -> Result<Vec<RoomModel>, AppError> {
        self.repository.list_rooms().await
    }

    /// The participant record of a connection, if it is currently joined to the room
    pub async fn get_participant(
        &self,
        room_id: &str,
        connection_id: &str,
    ) -> Result<Option<Participant>, AppError> {
        Ok(self
            .repository
            .get_room(room_id)
            .await?
            .and_then(|room| room.get_participant(connection_id).cloned()))
    }

    /// Records activity in a room by updating its last_activity_at timestamp
    pub async fn record_activity(&self, room_id: &str) -> Result<(), AppError> {
        self.repository.update_last_activity(room_id).await
    }

    /// Number of rooms with a live broadcaster
    pub async fn active_broadcasters(&self) -> usize {
        self.broadcasters.lock().await.len()
    }
}
