pub mod auth;
pub mod resources;

pub use auth::auth_config;
pub use resources::{resource_config, resources_config};
