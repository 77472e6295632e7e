use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    generators::{DisplayNameGenerator, PetNameGenerator, UserIdGenerator, UuidGenerator},
    token::TokenConfig,
    types::{SessionClaims, SessionRequest, SessionResponse},
};
use crate::shared::AppError;

/// Service for issuing and validating session tokens
///
/// Sessions are stateless: everything the relay needs to know about a user
/// travels inside the signed token.
pub struct SessionService {
    token_config: TokenConfig,
    user_ids: Arc<dyn UserIdGenerator>,
    display_names: Arc<dyn DisplayNameGenerator>,
}

impl SessionService {
    pub fn new(token_config: TokenConfig) -> Self {
        Self::with_generators(
            token_config,
            Arc::new(UuidGenerator),
            Arc::new(PetNameGenerator::new()),
        )
    }

    pub fn with_generators(
        token_config: TokenConfig,
        user_ids: Arc<dyn UserIdGenerator>,
        display_names: Arc<dyn DisplayNameGenerator>,
    ) -> Self {
        Self {
            token_config,
            user_ids,
            display_names,
        }
    }

    /// Issues a token, filling in a user id and display name when missing
    #[instrument(skip(self, request))]
    pub fn create_session(&self, request: SessionRequest) -> Result<SessionResponse, AppError> {
        let user_id = match request.user_id.map(|s| s.trim().to_string()) {
            Some(id) if !id.is_empty() => id,
            _ => self.user_ids.generate(),
        };
        let display_name = match request.display_name.map(|s| s.trim().to_string()) {
            Some(name) if !name.is_empty() => name,
            _ => self.display_names.generate(),
        };

        let token = self.token_config.create_token(&user_id, &display_name)?;

        info!(user_id = %user_id, display_name = %display_name, "Session issued");

        Ok(SessionResponse {
            token,
            user_id,
            display_name,
        })
    }

    /// Validates a session token and returns its claims
    pub fn validate_session(&self, token: &str) -> Result<SessionClaims, AppError> {
        self.token_config.validate_token(token).map_err(|e| {
            warn!(error = %e, "Session validation failed");
            AppError::Unauthorized("Invalid or expired session token".to_string())
        })
    }
}
