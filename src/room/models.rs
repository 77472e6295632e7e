use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single WebSocket connection joined to a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub connection_id: String, // Minted per WebSocket connection
    pub user_id: String,       // From the session token
    pub display_name: String,
    pub joined_at: DateTime<Utc>,
}

impl Participant {
    pub fn new(
        connection_id: impl Into<String>,
        user_id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            connection_id: connection_id.into(),
            user_id: user_id.into(),
            display_name: display_name.into(),
            joined_at: Utc::now(),
        }
    }
}

/// In-memory model of an interview room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomModel {
    pub id: String,                     // Interview id supplied by the client
    pub participants: Vec<Participant>, // Join order
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl RoomModel {
    /// Creates an empty room with the given id
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            participants: vec![],
            created_at: now,
            last_activity_at: now,
        }
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Check if a connection is joined to this room
    pub fn has_participant(&self, connection_id: &str) -> bool {
        self.participants
            .iter()
            .any(|p| p.connection_id == connection_id)
    }

    pub fn get_participant(&self, connection_id: &str) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| p.connection_id == connection_id)
    }

    /// Connection ids of everyone in the room
    pub fn connection_ids(&self) -> Vec<String> {
        self.participants
            .iter()
            .map(|p| p.connection_id.clone())
            .collect()
    }

    /// Everyone in the room except the given connection
    pub fn peers_of(&self, connection_id: &str) -> Vec<&Participant> {
        self.participants
            .iter()
            .filter(|p| p.connection_id != connection_id)
            .collect()
    }

    /// Add a participant; returns false if the connection was already present
    pub fn add_participant(&mut self, participant: Participant) -> bool {
        if self.has_participant(&participant.connection_id) {
            return false;
        }
        self.participants.push(participant);
        true
    }

    /// Remove a participant by connection id, returning it if present
    pub fn remove_participant(&mut self, connection_id: &str) -> Option<Participant> {
        let index = self
            .participants
            .iter()
            .position(|p| p.connection_id == connection_id)?;
        Some(self.participants.remove(index))
    }

    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_participant_is_idempotent() {
        let mut room = RoomModel::new("interview-1");
        assert!(room.add_participant(Participant::new("c1", "u1", "Alice")));
        assert!(!room.add_participant(Participant::new("c1", "u1", "Alice")));
        assert_eq!(room.participant_count(), 1);
    }

    #[test]
    fn test_same_user_on_two_connections_is_two_participants() {
        let mut room = RoomModel::new("interview-1");
        room.add_participant(Participant::new("c1", "u1", "Alice"));
        room.add_participant(Participant::new("c2", "u1", "Alice"));
        assert_eq!(room.connection_ids(), vec!["c1", "c2"]);
    }

    #[test]
    fn test_peers_exclude_self() {
        let mut room = RoomModel::new("interview-1");
        room.add_participant(Participant::new("c1", "u1", "Alice"));
        room.add_participant(Participant::new("c2", "u2", "Bob"));

        let peers = room.peers_of("c1");
        assert_eq!(peers.len(), 1);
        assert_eq!(peers[0].connection_id, "c2");
    }

    #[test]
    fn test_remove_participant() {
        let mut room = RoomModel::new("interview-1");
        room.add_participant(Participant::new("c1", "u1", "Alice"));

        assert!(room.remove_participant("missing").is_none());
        let removed = room.remove_participant("c1").unwrap();
        assert_eq!(removed.display_name, "Alice");
        assert!(room.is_empty());
    }
}
