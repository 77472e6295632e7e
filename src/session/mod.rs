// Public API - what other modules can use
pub use handlers::create_session;
pub use middleware::jwt_auth;
pub use types::SessionClaims;

// Internal modules
mod generators;
mod handlers;
mod middleware;
pub mod service;
pub mod token;
pub mod types;
