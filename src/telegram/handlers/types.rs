//! Handler types, dependencies, and small shared helpers

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode, User};

use crate::core::config::BotSettings;
use crate::storage::{get_connection, DbConnection, DbPool};

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type HandlerResult = Result<(), HandlerError>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub db_pool: Arc<DbPool>,
    pub settings: BotSettings,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(db_pool: Arc<DbPool>, settings: BotSettings) -> Self {
        Self { db_pool, settings }
    }

    /// Pooled connection, logged on failure.
    pub fn conn(&self) -> Result<DbConnection, r2d2::Error> {
        get_connection(&self.db_pool).inspect_err(|e| log::error!("Failed to get DB connection: {}", e))
    }
}

/// Telegram user id as stored in the database.
pub fn user_id_of(user: &User) -> i64 {
    user.id.0 as i64
}

/// Sender of a message; channel posts have none.
pub fn sender_id(msg: &Message) -> Option<i64> {
    msg.from.as_ref().map(user_id_of)
}

/// `send_message` in HTML mode.
pub fn send_html(bot: &Bot, chat_id: ChatId, text: impl Into<String>) -> <Bot as Requester>::SendMessage {
    bot.send_message(chat_id, text).parse_mode(ParseMode::Html)
}

/// Trimmed message text; empty for non-text messages.
pub fn text_of(msg: &Message) -> &str {
    msg.text().map(str::trim).unwrap_or_default()
}
