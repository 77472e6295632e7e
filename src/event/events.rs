use serde::Serialize;
use strum_macros::{AsRefStr, Display};

use crate::room::models::Participant;

/// The three kinds of WebRTC signaling payloads relayed between peers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SignalKind {
    Offer,
    Answer,
    IceCandidate,
}

/// Classes of shared interview state broadcast to the rest of the room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CollabKind {
    CodeChange,
    LanguageChange,
    CodeOutput,
    WhiteboardChange,
    ChatMessage,
}

/// An opaque signaling payload, optionally addressed to one connection
#[derive(Debug, Clone, Serialize)]
pub struct SignalingMessage {
    pub kind: SignalKind,
    /// Connection id of the intended receiver; `None` means every other participant
    pub target: Option<String>,
    pub payload: serde_json::Value,
}

impl SignalingMessage {
    /// Wraps a client payload, reading the optional `to` field as the target.
    /// The payload itself is kept verbatim.
    pub fn new(kind: SignalKind, payload: serde_json::Value) -> Self {
        let target = payload
            .get("to")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        Self {
            kind,
            target,
            payload,
        }
    }
}

/// A real-time collaboration payload relayed within a room
#[derive(Debug, Clone, Serialize)]
pub struct CollabEvent {
    pub kind: CollabKind,
    pub payload: serde_json::Value,
}

impl CollabEvent {
    pub fn new(kind: CollabKind, payload: serde_json::Value) -> Self {
        Self { kind, payload }
    }
}

/// Events flowing through a room's broadcast channel
///
/// Events represent facts about things that have already happened in a room.
/// The per-room subscription turns them into WebSocket frames.
#[derive(Debug, Clone, Serialize)]
pub enum RoomEvent {
    /// A participant joined the room
    ParticipantJoined { participant: Participant },

    /// A participant left the room, explicitly or by disconnecting
    ParticipantLeft { participant: Participant },

    /// A signaling message to relay to one or all peers
    Signal {
        sender: Participant,
        message: SignalingMessage,
    },

    /// Shared state to broadcast to every other participant
    Collab {
        sender: Participant,
        event: CollabEvent,
    },
}

impl RoomEvent {
    /// Get a short name of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            RoomEvent::ParticipantJoined { .. } => "participant_joined",
            RoomEvent::ParticipantLeft { .. } => "participant_left",
            RoomEvent::Signal { .. } => "signal",
            RoomEvent::Collab { .. } => "collab",
        }
    }

    /// Connection id of the participant this event originates from
    pub fn origin(&self) -> &str {
        match self {
            RoomEvent::ParticipantJoined { participant } => &participant.connection_id,
            RoomEvent::ParticipantLeft { participant } => &participant.connection_id,
            RoomEvent::Signal { sender, .. } => &sender.connection_id,
            RoomEvent::Collab { sender, .. } => &sender.connection_id,
        }
    }
}
