pub mod context;
pub mod error;
pub mod session;

pub use context::AppContext;
pub use error::{Result, TributaryError};
pub use session::Session;
