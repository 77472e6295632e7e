use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::config::RelayConfig;
use crate::event::EventBus;
use crate::room::{
    repository::{InMemoryRoomRepository, RoomRepository},
    service::RoomService,
};
use crate::session::{service::SessionService, token::TokenConfig};
use crate::websockets::{ConnectionManager, InMemoryConnectionManager, WebSocketRoomSubscriber};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub session_service: Arc<SessionService>,
    pub room_service: Arc<RoomService>,
    pub connection_manager: Arc<dyn ConnectionManager>,
    pub event_bus: EventBus,
}

impl AppState {
    /// Wires the in-memory implementations together from process configuration
    pub fn new(config: RelayConfig) -> Self {
        Self::from_parts(
            config,
            Arc::new(InMemoryRoomRepository::new()),
            Arc::new(InMemoryConnectionManager::new()),
        )
    }

    pub fn from_parts(
        config: RelayConfig,
        room_repository: Arc<dyn RoomRepository + Send + Sync>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        let event_bus = EventBus::new(config.room_channel_capacity);

        let subscriber = Arc::new(WebSocketRoomSubscriber::new(
            Arc::clone(&room_repository),
            Arc::clone(&connection_manager),
        ));
        let room_service = Arc::new(RoomService::new(
            room_repository,
            event_bus.clone(),
            subscriber,
        ));

        let token_config = TokenConfig::new(&config.jwt_secret, config.session_expiration_hours);
        let session_service = Arc::new(SessionService::new(token_config));

        Self {
            config: Arc::new(config),
            session_service,
            room_service,
            connection_manager,
            event_bus,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("JWT error: {0}")]
    JwtError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::JwtError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
