pub mod ai;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod knowledge;
pub mod logger;
pub mod server;

pub use config::Settings;
pub use dispatcher::{DispatchResult, Dispatcher};
pub use error::{Result, TourError};
pub use knowledge::{KnowledgeBase, LocationEntry};
