//! Core utilities, configuration, and the bot's domain rules

pub mod config;
pub mod error;
pub mod logging;
pub mod profit;
pub mod requisites;
pub mod wizard;

// Re-exports for convenience
pub use config::BotSettings;
pub use error::{AppError, AppResult};
pub use logging::{init_logger, log_chat_configuration};
