use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::{Participant, RoomModel};

/// Public view of a participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantResponse {
    pub connection_id: String,
    pub user_id: String,
    pub display_name: String,
    pub joined_at: DateTime<Utc>,
}

impl From<&Participant> for ParticipantResponse {
    fn from(participant: &Participant) -> Self {
        Self {
            connection_id: participant.connection_id.clone(),
            user_id: participant.user_id.clone(),
            display_name: participant.display_name.clone(),
            joined_at: participant.joined_at,
        }
    }
}

/// Response for room inspection endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomResponse {
    pub id: String,
    pub participant_count: usize,
    pub participants: Vec<ParticipantResponse>,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl From<&RoomModel> for RoomResponse {
    fn from(room: &RoomModel) -> Self {
        Self {
            id: room.id.clone(),
            participant_count: room.participant_count(),
            participants: room.participants.iter().map(Into::into).collect(),
            created_at: room.created_at,
            last_activity_at: room.last_activity_at,
        }
    }
}
