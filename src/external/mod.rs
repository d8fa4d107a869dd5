pub mod client;
pub mod envelope;
pub mod resource;

pub use client::*;
pub use envelope::*;
pub use resource::*;
