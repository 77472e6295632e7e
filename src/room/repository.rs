use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, instrument};

use super::models::{Participant, RoomModel};
use crate::shared::AppError;

/// Result of attempting to join a room
#[derive(Debug, Clone)]
pub enum JoinRoomResult {
    /// Joined the room; `created` is true when this join brought the room into existence
    Joined { room: RoomModel, created: bool },
    /// The connection was already a participant, returns current room data
    AlreadyJoined(RoomModel),
}

impl JoinRoomResult {
    pub fn room(&self) -> &RoomModel {
        match self {
            JoinRoomResult::Joined { room, .. } => room,
            JoinRoomResult::AlreadyJoined(room) => room,
        }
    }
}

/// Result of attempting to leave a room
#[derive(Debug, Clone)]
pub enum LeaveRoomResult {
    /// Left the room, returns updated room data and the removed participant
    Success {
        room: RoomModel,
        participant: Participant,
    },
    /// Participant left and the room was forgotten because it became empty
    RoomDeleted { participant: Participant },
    /// Connection was not in the room
    ParticipantNotInRoom,
    /// Room does not exist
    RoomNotFound,
}

/// Trait for room registry operations
#[async_trait]
pub trait RoomRepository {
    /// Atomically adds a participant, creating the room if it does not exist yet
    async fn join_room(
        &self,
        room_id: &str,
        participant: Participant,
    ) -> Result<JoinRoomResult, AppError>;

    /// Atomically removes a participant, deleting the room when it becomes empty
    async fn leave_room(
        &self,
        room_id: &str,
        connection_id: &str,
    ) -> Result<LeaveRoomResult, AppError>;

    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError>;
    async fn list_rooms(&self) -> Result<Vec<RoomModel>, AppError>;

    /// Updates the last activity timestamp for a room
    async fn update_last_activity(&self, room_id: &str) -> Result<(), AppError>;
}

/// In-memory implementation of RoomRepository
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<String, RoomModel>>,
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }

    fn rooms(&self) -> Result<MutexGuard<'_, HashMap<String, RoomModel>>, AppError> {
        self.rooms.lock().map_err(|_| {
            error!("Room registry lock poisoned");
            AppError::Internal
        })
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    #[instrument(skip(self, participant), fields(connection_id = %participant.connection_id))]
    async fn join_room(
        &self,
        room_id: &str,
        participant: Participant,
    ) -> Result<JoinRoomResult, AppError> {
        let mut rooms = self.rooms()?;

        let created = !rooms.contains_key(room_id);
        let room = rooms.entry(room_id.to_string()).or_insert_with(|| {
            info!(room_id = %room_id, "Room does not exist, creating it on first join");
            RoomModel::new(room_id)
        });

        if !room.add_participant(participant) {
            debug!(room_id = %room_id, "Connection already in room");
            return Ok(JoinRoomResult::AlreadyJoined(room.clone()));
        }
        room.touch();

        info!(
            room_id = %room_id,
            participant_count = room.participant_count(),
            created,
            "Participant joined room"
        );

        Ok(JoinRoomResult::Joined {
            room: room.clone(),
            created,
        })
    }

    #[instrument(skip(self))]
    async fn leave_room(
        &self,
        room_id: &str,
        connection_id: &str,
    ) -> Result<LeaveRoomResult, AppError> {
        let mut rooms = self.rooms()?;

        let room = match rooms.get_mut(room_id) {
            Some(room) => room,
            None => {
                debug!(room_id = %room_id, "Room not found");
                return Ok(LeaveRoomResult::RoomNotFound);
            }
        };

        let participant = match room.remove_participant(connection_id) {
            Some(participant) => participant,
            None => {
                debug!(room_id = %room_id, "Connection not in room");
                return Ok(LeaveRoomResult::ParticipantNotInRoom);
            }
        };

        if room.is_empty() {
            info!(room_id = %room_id, "Room is now empty, deleting");
            rooms.remove(room_id);
            return Ok(LeaveRoomResult::RoomDeleted { participant });
        }

        room.touch();
        info!(
            room_id = %room_id,
            participant_count = room.participant_count(),
            "Participant left room"
        );

        Ok(LeaveRoomResult::Success {
            room: room.clone(),
            participant,
        })
    }

    #[instrument(skip(self))]
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError> {
        Ok(self.rooms()?.get(room_id).cloned())
    }

    #[instrument(skip(self))]
    async fn list_rooms(&self) -> Result<Vec<RoomModel>, AppError> {
        let rooms = self.rooms()?;
        debug!(room_count = rooms.len(), "Listing rooms");
        Ok(rooms.values().cloned().collect())
    }

    async fn update_last_activity(&self, room_id: &str) -> Result<(), AppError> {
        let mut rooms = self.rooms()?;
        match rooms.get_mut(room_id) {
            Some(room) => {
                room.last_activity_at = Utc::now();
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Room {} not found", room_id))),
        }
    }
}
