pub mod algobot;
pub mod bot;
pub mod category;
pub mod chapter;
pub mod common;
pub mod company;
pub mod contact;
pub mod coupon;
pub mod course;
pub mod course_session;
pub mod customer;
pub mod pagination;
pub mod payment;
pub mod telegram;
pub mod utility_setting;

pub use algobot::*;
pub use bot::*;
pub use category::*;
pub use chapter::*;
pub use common::*;
pub use company::*;
pub use contact::*;
pub use coupon::*;
pub use course::*;
pub use course_session::*;
pub use customer::*;
pub use pagination::*;
pub use payment::*;
pub use telegram::*;
pub use utility_setting::*;
