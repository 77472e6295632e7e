use serde::{Deserialize, Serialize};

/// JWT claims structure identifying the user behind a connection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    pub user_id: String,
    pub display_name: String,
    pub exp: usize, // Expiration timestamp (standard JWT claim)
    pub iat: usize, // Issued at timestamp (standard JWT claim)
}

/// Request body for session creation; both fields are optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Response structure for session creation endpoint
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionResponse {
    pub token: String,
    pub user_id: String,
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json;

    #[test]
    fn test_session_claims_serialization() {
        let claims = SessionClaims {
            user_id: "user-1".to_string(),
            display_name: "Ada".to_string(),
            exp: 1234567890,
            iat: 1234567800,
        };

        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("user-1"));

        let deserialized: SessionClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, claims);
    }

    #[test]
    fn test_session_request_fields_are_optional() {
        let request: SessionRequest = serde_json::from_str("{}").unwrap();
        assert!(request.user_id.is_none());
        assert!(request.display_name.is_none());
    }
}
