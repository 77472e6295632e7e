use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::room;
use crate::session;
use crate::shared::{AppError, AppState};
use crate::websockets;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub rooms: usize,
    pub connections: usize,
}

/// GET /health
pub async fn health(State(app_state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let rooms = app_state.room_service.list_rooms().await?.len();
    let connections = app_state.connection_manager.connection_count().await;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        rooms,
        connections,
    }))
}

fn build_cors_layer(origin: Option<&str>) -> CorsLayer {
    let allow_origin = match origin {
        None | Some("*") => AllowOrigin::any(),
        Some(origin) => match HeaderValue::from_str(origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Invalid CORS origin, allowing any");
                AllowOrigin::any()
            }
        },
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Builds the full HTTP surface of the relay
pub fn router(app_state: AppState) -> Router {
    let protected = Router::new()
        .route("/rooms", get(room::list_rooms))
        .route("/rooms/:room_id", get(room::get_room))
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            session::jwt_auth,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/session", post(session::create_session))
        .route("/ws/:room_id", get(websockets::websocket_handler))
        .merge(protected)
        .layer(build_cors_layer(app_state.config.cors_origin.as_deref()))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
