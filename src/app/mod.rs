pub mod api;
pub mod cli;
mod context;
mod session;

pub use context::AppContext;
pub use session::Session;
