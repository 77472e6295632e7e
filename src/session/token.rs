use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, instrument};

use super::types::SessionClaims;
use crate::shared::AppError;

/// Configuration for JWT token operations
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    pub expiration_hours: i64,
}

impl TokenConfig {
    pub fn new(secret: &str, expiration_hours: i64) -> Self {
        Self {
            secret: secret.to_string(),
            expiration_hours,
        }
    }

    /// Creates a new JWT token for the given user
    #[instrument(skip(self, display_name))]
    pub fn create_token(&self, user_id: &str, display_name: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = Duration::try_hours(self.expiration_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                debug!(
                    expiration_hours = self.expiration_hours,
                    "Token expiration overflows the calendar"
                );
                AppError::JwtError("Token expiration out of range".to_string())
            })?
            .timestamp() as usize;

        debug!(
            expiration_hours = self.expiration_hours,
            exp_timestamp = exp,
            "Creating JWT token with expiration"
        );

        let claims = SessionClaims {
            user_id: user_id.to_string(),
            display_name: display_name.to_string(),
            exp,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| {
            debug!(error = %e, "Failed to encode JWT token");
            AppError::JwtError(e.to_string())
        })
    }

    /// Validates a JWT token and returns the claims if valid
    #[instrument(skip(self, token))]
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, AppError> {
        decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| {
            debug!(
                user_id = %data.claims.user_id,
                exp = data.claims.exp,
                "JWT token decoded successfully"
            );
            data.claims
        })
        .map_err(|e| {
            debug!(error = %e, "Failed to decode JWT token");
            AppError::JwtError(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_validate_token() {
        let config = TokenConfig::new("test-secret", 1);

        let token = config.create_token("user-1", "Ada").unwrap();
        assert!(!token.is_empty());

        let claims = config.validate_token(&token).unwrap();
        assert_eq!(claims.user_id, "user-1");
        assert_eq!(claims.display_name, "Ada");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_invalid_token() {
        let config = TokenConfig::new("test-secret", 1);
        let result = config.validate_token("invalid.token.here");
        assert!(matches!(result, Err(AppError::JwtError(_))));
    }

    #[test]
    fn test_token_with_different_secret() {
        let issuer = TokenConfig::new("secret-a", 1);
        let other = TokenConfig::new("secret-b", 1);

        let token = issuer.create_token("user", "User").unwrap();

        assert!(issuer.validate_token(&token).is_ok());
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_oversized_lifetime_is_an_error_not_a_panic() {
        let config = TokenConfig::new("test-secret", 10_000_000_000);

        assert!(matches!(
            config.create_token("user", "User"),
            Err(AppError::JwtError(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Past the default 60s leeway
        let config = TokenConfig::new("test-secret", -1);
        let token = config.create_token("user", "User").unwrap();

        assert!(matches!(
            config.validate_token(&token),
            Err(AppError::JwtError(_))
        ));
    }
}
