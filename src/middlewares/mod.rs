pub mod auth;
pub mod cors;

pub use auth::AuthGateMiddleware;
pub use cors::create_cors;
