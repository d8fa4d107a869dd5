pub mod console_service;

pub use console_service::*;
