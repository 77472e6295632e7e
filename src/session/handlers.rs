use axum::{body::Bytes, extract::State, Json};
use tracing::{info, instrument, warn};

use super::types::{SessionRequest, SessionResponse};
use crate::shared::{AppError, AppState};

/// HTTP handler for creating a new session
///
/// POST /session
/// Returns a signed token identifying the user for WebSocket connections.
/// An empty body is accepted and yields a guest identity.
#[instrument(name = "create_session", skip(state, body))]
pub async fn create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SessionResponse>, AppError> {
    let request = if body.is_empty() {
        SessionRequest::default()
    } else {
        serde_json::from_slice::<SessionRequest>(&body).map_err(|e| {
            warn!(error = %e, "Malformed session request body");
            AppError::BadRequest(format!("Malformed session request: {}", e))
        })?
    };

    let session = state.session_service.create_session(request)?;

    info!(
        user_id = %session.user_id,
        token_length = session.token.len(),
        "Session created successfully"
    );

    Ok(Json(session))
}
