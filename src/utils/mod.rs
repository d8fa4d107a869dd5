pub mod phone;
pub mod time_range;
pub mod youtube;

pub use phone::*;
pub use time_range::*;
pub use youtube::*;
