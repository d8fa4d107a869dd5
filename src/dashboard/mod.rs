pub mod dialog;
pub mod list_page;
pub mod pagination;
pub mod search;
pub mod session;
pub mod toast;

pub use dialog::*;
pub use list_page::*;
pub use pagination::*;
pub use search::*;
pub use session::*;
pub use toast::*;
