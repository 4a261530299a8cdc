//! Cardflow - Telegram bot for an affiliate team's payment requisites
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging and the domain rules
//! - `storage`: SQLite pool, migrations and repositories
//! - `telegram`: bot setup, dialogue states and the handler tree
//! - `i18n`: the bot's lexicon

pub mod cli;
pub mod core;
pub mod i18n;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use core::{config, AppError, AppResult};
pub use storage::{create_pool, get_connection, DbConnection, DbPool};
