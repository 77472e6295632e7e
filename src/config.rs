use std::str::FromStr;
use tracing::warn;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";
const DEFAULT_SESSION_EXPIRATION_HOURS: i64 = 24;
const MAX_SESSION_EXPIRATION_HOURS: i64 = 24 * 365 * 10;
const DEFAULT_ROOM_CHANNEL_CAPACITY: usize = 100;
const DEFAULT_MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// Process configuration, read from environment variables
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Address the HTTP/WebSocket listener binds to
    pub bind_addr: String,
    /// Secret used to sign and verify session tokens
    pub jwt_secret: String,
    /// Lifetime of an issued session token
    pub session_expiration_hours: i64,
    /// Capacity of each room's broadcast channel before slow broadcasters lag
    pub room_channel_capacity: usize,
    /// Largest WebSocket frame accepted from a client
    pub max_message_bytes: usize,
    /// Allowed CORS origin; `None` or `*` means permissive
    pub cors_origin: Option<String>,
}

impl RelayConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("RELAY_BIND_ADDR")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            session_expiration_hours: session_expiration_hours(parse_env(
                "SESSION_EXPIRATION_HOURS",
                DEFAULT_SESSION_EXPIRATION_HOURS,
            )),
            room_channel_capacity: parse_env(
                "ROOM_CHANNEL_CAPACITY",
                DEFAULT_ROOM_CHANNEL_CAPACITY,
            )
            .max(1),
            max_message_bytes: parse_env("MAX_MESSAGE_BYTES", DEFAULT_MAX_MESSAGE_BYTES),
            cors_origin: std::env::var("CORS_ORIGIN").ok().filter(|s| !s.is_empty()),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            session_expiration_hours: DEFAULT_SESSION_EXPIRATION_HOURS,
            room_channel_capacity: DEFAULT_ROOM_CHANNEL_CAPACITY,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
            cors_origin: None,
        }
    }
}

/// Token lifetimes outside `1..=MAX_SESSION_EXPIRATION_HOURS` fall back to the default
fn session_expiration_hours(hours: i64) -> i64 {
    if (1..=MAX_SESSION_EXPIRATION_HOURS).contains(&hours) {
        hours
    } else {
        warn!(
            hours,
            max = MAX_SESSION_EXPIRATION_HOURS,
            "Session expiration out of range, using default"
        );
        DEFAULT_SESSION_EXPIRATION_HOURS
    }
}

/// Reads and parses an env var, falling back to `default` when unset or malformed
fn parse_env<T: FromStr + Copy>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(key = %key, value = %raw, "Ignoring malformed environment variable");
                default
            }
        },
        Err(_) => default,
    }
}
