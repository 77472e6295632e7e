use async_trait::async_trait;
use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, WebSocket},
        Path, Query, State, WebSocketUpgrade,
    },
    http::{header::SEC_WEBSOCKET_PROTOCOL, HeaderMap},
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::event::{CollabEvent, EventBus, RoomEvent, SignalingMessage};
use crate::room::{
    repository::{JoinRoomResult, LeaveRoomResult},
    service::RoomService,
};
use crate::session::SessionClaims;
use crate::shared::{AppError, AppState};
use crate::websockets::connection_manager::ConnectionManager;
use crate::websockets::messages::{MessageType, ParticipantPayload, WebSocketMessage};

use super::socket::{Connection, ConnectionInfo, MessageHandler, SocketWrapper};

/// Message handler for receiving WebSocket messages from the client
///
/// Membership changes are applied directly; everything destined for other
/// participants goes through the room's broadcast channel.
pub struct WebsocketReceiveHandler {
    room_service: Arc<RoomService>,
    connection_manager: Arc<dyn ConnectionManager>,
    event_bus: EventBus,
}

impl WebsocketReceiveHandler {
    pub fn new(
        room_service: Arc<RoomService>,
        connection_manager: Arc<dyn ConnectionManager>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            room_service,
            connection_manager,
            event_bus,
        }
    }

    pub fn from_state(app_state: &AppState) -> Self {
        Self::new(
            Arc::clone(&app_state.room_service),
            Arc::clone(&app_state.connection_manager),
            app_state.event_bus.clone(),
        )
    }

    /// Joins the connection to its room and announces it to the peers
    ///
    /// `room-joined` is queued straight onto the joiner's socket, while peer
    /// traffic goes through the room's broadcaster, which resolves recipients
    /// when it dispatches. An event a peer emitted just before this join can
    /// therefore reach the joiner ahead of its own `room-joined`. Clients must
    /// accept relayed frames before `room-joined`; nothing emitted before the
    /// join is replayed later.
    pub async fn join(&self, connection: &ConnectionInfo) -> Result<(), AppError> {
        let result = self
            .room_service
            .join_room(&connection.room_id, connection.participant())
            .await?;

        let room = result.room();
        let peers = room
            .peers_of(&connection.connection_id)
            .into_iter()
            .map(ParticipantPayload::from)
            .collect();

        self.reply(
            connection,
            &WebSocketMessage::room_joined(
                connection.room_id.clone(),
                connection.connection_id.clone(),
                peers,
            ),
        )
        .await;

        if let JoinRoomResult::Joined { room, created } = &result {
            info!(
                room_id = %connection.room_id,
                connection_id = %connection.connection_id,
                user_id = %connection.user_id,
                created = *created,
                "Participant joined room"
            );

            if let Some(participant) = room.get_participant(&connection.connection_id) {
                self.event_bus
                    .emit_to_room(
                        &connection.room_id,
                        RoomEvent::ParticipantJoined {
                            participant: participant.clone(),
                        },
                    )
                    .await;
            }
        }

        Ok(())
    }

    /// Removes the connection from its room and tells whoever remains
    ///
    /// Safe to call for connections that never joined or already left.
    pub async fn leave(&self, connection: &ConnectionInfo) -> Result<(), AppError> {
        let result = self
            .room_service
            .leave_room(&connection.room_id, &connection.connection_id)
            .await?;

        if let LeaveRoomResult::Success { participant, .. } = result {
            self.event_bus
                .emit_to_room(
                    &connection.room_id,
                    RoomEvent::ParticipantLeft { participant },
                )
                .await;
        }

        Ok(())
    }

    /// Publishes a signaling or shared-state event from a joined participant
    async fn relay(&self, connection: &ConnectionInfo, ws_message: WebSocketMessage) {
        let message_type = ws_message.message_type;

        let sender = match self
            .room_service
            .get_participant(&connection.room_id, &connection.connection_id)
            .await
        {
            Ok(Some(participant)) => participant,
            Ok(None) => {
                debug!(
                    connection_id = %connection.connection_id,
                    message_type = %message_type,
                    "Event from connection that has not joined"
                );
                self.reply_error(
                    connection,
                    format!("Join the room before sending {}", message_type),
                )
                .await;
                return;
            }
            Err(e) => {
                warn!(room_id = %connection.room_id, error = %e, "Failed to look up sender");
                return;
            }
        };

        let event = if let Some(kind) = message_type.signal_kind() {
            RoomEvent::Signal {
                sender,
                message: SignalingMessage::new(kind, ws_message.payload),
            }
        } else if let Some(kind) = message_type.collab_kind() {
            RoomEvent::Collab {
                sender,
                event: CollabEvent::new(kind, ws_message.payload),
            }
        } else {
            debug!(message_type = %message_type, "Unhandled message type");
            return;
        };

        if let Err(e) = self.room_service.record_activity(&connection.room_id).await {
            debug!(room_id = %connection.room_id, error = %e, "Failed to record activity");
        }

        self.event_bus
            .emit_to_room(&connection.room_id, event)
            .await;
    }

    async fn reply(&self, connection: &ConnectionInfo, message: &WebSocketMessage) {
        match serde_json::to_string(message) {
            Ok(json) => {
                self.connection_manager
                    .send_to_connection(&connection.connection_id, &json)
                    .await
            }
            Err(e) => warn!(error = %e, "Failed to serialize reply"),
        }
    }

    async fn reply_error(&self, connection: &ConnectionInfo, message: String) {
        self.reply(connection, &WebSocketMessage::error(message)).await;
    }
}

#[async_trait]
impl MessageHandler for WebsocketReceiveHandler {
    async fn handle_message(&self, connection: &ConnectionInfo, message: String) {
        let ws_message = match serde_json::from_str::<WebSocketMessage>(&message) {
            Ok(ws_message) => ws_message,
            Err(e) => {
                warn!(
                    connection_id = %connection.connection_id,
                    room_id = %connection.room_id,
                    error = %e,
                    "Failed to parse WebSocket message"
                );
                self.reply_error(connection, format!("Malformed message: {}", e))
                    .await;
                return;
            }
        };

        debug!(
            connection_id = %connection.connection_id,
            room_id = %connection.room_id,
            message_type = %ws_message.message_type,
            "Received message"
        );

        if !ws_message.message_type.is_client_event() {
            self.reply_error(
                connection,
                format!("{} is not accepted from clients", ws_message.message_type),
            )
            .await;
            return;
        }

        let outcome = match ws_message.message_type {
            MessageType::JoinRoom => self.join(connection).await,
            MessageType::LeaveRoom => self.leave(connection).await,
            _ => {
                self.relay(connection, ws_message).await;
                Ok(())
            }
        };

        if let Err(e) = outcome {
            warn!(
                connection_id = %connection.connection_id,
                room_id = %connection.room_id,
                error = %e,
                "Failed to process membership change"
            );
            self.reply_error(connection, e.to_string()).await;
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WebSocketQuery {
    pub token: Option<String>,
}

/// WebSocket endpoint that authenticates via Sec-WebSocket-Protocol header or `token` query
/// GET /ws/:room_id
///
/// Authentication is checked before the upgrade headers so a missing token is
/// always reported as 401.
pub async fn websocket_handler(
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    Path(room_id): Path<String>,
    Query(query): Query<WebSocketQuery>,
    headers: HeaderMap,
    State(app_state): State<AppState>,
) -> Result<Response, AppError> {
    info!(room_id = %room_id, "WebSocket connection requested");

    let protocol_token = headers
        .get(SEC_WEBSOCKET_PROTOCOL)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').map(str::trim).find(|s| !s.is_empty()))
        .map(str::to_string);

    let token = protocol_token
        .clone()
        .or(query.token)
        .ok_or_else(|| {
            warn!(room_id = %room_id, "Missing session token on WebSocket request");
            AppError::Unauthorized("Missing authentication token".to_string())
        })?;

    let claims = app_state.session_service.validate_session(&token)?;

    info!(
        room_id = %room_id,
        user_id = %claims.user_id,
        "WebSocket authentication successful"
    );

    let ws = ws.map_err(|rejection| {
        warn!(room_id = %room_id, error = %rejection, "Request is not a WebSocket upgrade");
        AppError::BadRequest(rejection.body_text())
    })?;

    let mut ws = ws.max_message_size(app_state.config.max_message_bytes);
    if let Some(protocol) = protocol_token {
        // Browsers drop the connection unless the offered protocol is echoed back
        ws = ws.protocols([protocol]);
    }

    Ok(ws.on_upgrade(move |socket| handle_websocket_connection(socket, room_id, claims, app_state)))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(
    socket: WebSocket,
    room_id: String,
    claims: SessionClaims,
    app_state: AppState,
) {
    let info = ConnectionInfo {
        connection_id: Uuid::new_v4().to_string(),
        room_id,
        user_id: claims.user_id,
        display_name: claims.display_name,
    };

    serve_connection(Box::new(socket), info, app_state).await;
}

/// Runs one connection to completion and cleans up after it
///
/// Whatever ends the connection, it is unregistered and removed from its room,
/// and the remaining participants are told it left.
pub async fn serve_connection(
    socket: Box<dyn SocketWrapper>,
    info: ConnectionInfo,
    app_state: AppState,
) {
    info!(
        room_id = %info.room_id,
        connection_id = %info.connection_id,
        user_id = %info.user_id,
        "WebSocket connection established"
    );

    // Create the outbound channel (app -> client)
    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();
    app_state
        .connection_manager
        .add_connection(info.connection_id.clone(), outbound_sender)
        .await;

    let message_handler = Arc::new(WebsocketReceiveHandler::from_state(&app_state));
    let connection = Connection::new(
        info.clone(),
        socket,
        outbound_receiver,
        message_handler.clone(),
    );

    match connection.run().await {
        Ok(()) => {
            info!(
                room_id = %info.room_id,
                connection_id = %info.connection_id,
                "WebSocket connection closed cleanly"
            );
        }
        Err(e) => {
            warn!(
                room_id = %info.room_id,
                connection_id = %info.connection_id,
                error = %e,
                "WebSocket connection error"
            );
        }
    }

    app_state
        .connection_manager
        .remove_connection(&info.connection_id)
        .await;

    if let Err(e) = message_handler.leave(&info).await {
        warn!(
            room_id = %info.room_id,
            connection_id = %info.connection_id,
            error = %e,
            "Failed to remove disconnected participant"
        );
    }

    info!(
        room_id = %info.room_id,
        connection_id = %info.connection_id,
        "WebSocket connection cleaned up"
    );
}
