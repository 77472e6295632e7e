use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::event::{CollabKind, SignalKind};
use crate::room::models::Participant;

/// Message types for WebSocket communication
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MessageType {
    // Client -> Server
    JoinRoom,
    LeaveRoom,
    CallUser,
    MakeAnswer,
    IceCandidate,
    CodeChange,
    LanguageChange,
    CodeOutput,
    WhiteboardChange,
    SendMessage,

    // Server -> Client
    RoomJoined,
    UserJoined,
    UserLeft,
    CallMade,
    AnswerMade,
    ReceiveIceCandidate,
    ReceiveCodeChange,
    ReceiveLanguageChange,
    ReceiveCodeOutput,
    ReceiveWhiteboardChange,
    ReceiveMessage,
    Error,
}

impl MessageType {
    /// Whether clients are allowed to send this message type
    pub fn is_client_event(&self) -> bool {
        matches!(
            self,
            MessageType::JoinRoom | MessageType::LeaveRoom
        ) || self.signal_kind().is_some()
            || self.collab_kind().is_some()
    }

    /// The signaling kind carried by an inbound signaling event
    pub fn signal_kind(&self) -> Option<SignalKind> {
        match self {
            MessageType::CallUser => Some(SignalKind::Offer),
            MessageType::MakeAnswer => Some(SignalKind::Answer),
            MessageType::IceCandidate => Some(SignalKind::IceCandidate),
            _ => None,
        }
    }

    /// The collaboration kind carried by an inbound shared-state event
    pub fn collab_kind(&self) -> Option<CollabKind> {
        match self {
            MessageType::CodeChange => Some(CollabKind::CodeChange),
            MessageType::LanguageChange => Some(CollabKind::LanguageChange),
            MessageType::CodeOutput => Some(CollabKind::CodeOutput),
            MessageType::WhiteboardChange => Some(CollabKind::WhiteboardChange),
            MessageType::SendMessage => Some(CollabKind::ChatMessage),
            _ => None,
        }
    }

    /// Outbound message type used when relaying a signaling message
    pub fn relayed_signal(kind: SignalKind) -> Self {
        match kind {
            SignalKind::Offer => MessageType::CallMade,
            SignalKind::Answer => MessageType::AnswerMade,
            SignalKind::IceCandidate => MessageType::ReceiveIceCandidate,
        }
    }

    /// Outbound message type used when broadcasting shared state
    pub fn relayed_collab(kind: CollabKind) -> Self {
        match kind {
            CollabKind::CodeChange => MessageType::ReceiveCodeChange,
            CollabKind::LanguageChange => MessageType::ReceiveLanguageChange,
            CollabKind::CodeOutput => MessageType::ReceiveCodeOutput,
            CollabKind::WhiteboardChange => MessageType::ReceiveWhiteboardChange,
            CollabKind::ChatMessage => MessageType::ReceiveMessage,
        }
    }
}

/// Metadata for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessageMeta {
    pub timestamp: DateTime<Utc>,
    /// Connection id of the participant the message originates from
    pub sender: Option<String>,
    pub user_id: Option<String>,
}

/// Base structure for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default)]
    pub payload: serde_json::Value,
    pub meta: Option<WebSocketMessageMeta>,
}

/// Server-to-Client message payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantPayload {
    pub connection_id: String,
    pub user_id: String,
    pub display_name: String,
}

impl From<&Participant> for ParticipantPayload {
    fn from(participant: &Participant) -> Self {
        Self {
            connection_id: participant.connection_id.clone(),
            user_id: participant.user_id.clone(),
            display_name: participant.display_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomJoinedPayload {
    pub room_id: String,
    /// The joiner's own connection id, used by peers to address signaling
    pub connection_id: String,
    /// Everyone already in the room, excluding the joiner
    pub peers: Vec<ParticipantPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

fn to_payload<T: Serialize>(payload: T) -> serde_json::Value {
    serde_json::to_value(payload).unwrap_or(serde_json::Value::Null)
}

/// Helper functions for creating messages
impl WebSocketMessage {
    pub fn new(message_type: MessageType, payload: serde_json::Value) -> Self {
        Self {
            message_type,
            payload,
            meta: Some(WebSocketMessageMeta {
                timestamp: Utc::now(),
                sender: None,
                user_id: None,
            }),
        }
    }

    /// Wrap a client payload, unchanged, for delivery to peers
    pub fn relayed(message_type: MessageType, payload: serde_json::Value, sender: &Participant) -> Self {
        Self {
            message_type,
            payload,
            meta: Some(WebSocketMessageMeta {
                timestamp: Utc::now(),
                sender: Some(sender.connection_id.clone()),
                user_id: Some(sender.user_id.clone()),
            }),
        }
    }

    /// Create a ROOM_JOINED message
    pub fn room_joined(room_id: String, connection_id: String, peers: Vec<ParticipantPayload>) -> Self {
        let payload = RoomJoinedPayload {
            room_id,
            connection_id,
            peers,
        };
        Self::new(MessageType::RoomJoined, to_payload(payload))
    }

    /// Create a USER_JOINED message
    pub fn user_joined(participant: &Participant) -> Self {
        Self::relayed(
            MessageType::UserJoined,
            to_payload(ParticipantPayload::from(participant)),
            participant,
        )
    }

    /// Create a USER_LEFT message
    pub fn user_left(participant: &Participant) -> Self {
        Self::relayed(
            MessageType::UserLeft,
            to_payload(ParticipantPayload::from(participant)),
            participant,
        )
    }

    /// Create an ERROR message
    pub fn error(message: impl Into<String>) -> Self {
        let payload = ErrorPayload {
            message: message.into(),
        };
        Self::new(MessageType::Error, to_payload(payload))
    }

    /// Sender connection id from the metadata, if any
    pub fn sender(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.sender.as_deref())
    }
}
