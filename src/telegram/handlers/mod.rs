//! Telegram bot handler tree configuration
//!
//! The same tree runs in production and in the integration tests, which feed
//! it through a mocked bot.

mod admin;
mod commands;
mod profile;
mod profit;
mod registration;
mod schema;
mod types;
mod work_panel;

pub use schema::schema;
pub use types::{HandlerDeps, HandlerError, HandlerResult};
