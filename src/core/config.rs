//! Configuration constants for the bot

use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;
use teloxide::types::ChatId;

/// Database file path
/// Read from DATABASE_PATH environment variable
/// Default: database.sqlite
pub static DATABASE_PATH: Lazy<String> =
    Lazy::new(|| env::var("DATABASE_PATH").unwrap_or_else(|_| "database.sqlite".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Chat receiving registration applications and profit checks
pub static ADMIN_CHAT_ID: Lazy<Option<ChatId>> = Lazy::new(|| parse_chat_id("ADMIN_CHAT_ID"));

/// Chat receiving requisite and stop-list change notifications
pub static TEAM_CHAT_ID: Lazy<Option<ChatId>> = Lazy::new(|| parse_chat_id("TEAM_CHAT_ID"));

/// Password seeded into admin_settings on first start
pub static DEFAULT_ADMIN_PASSWORD: Lazy<String> =
    Lazy::new(|| env::var("DEFAULT_ADMIN_PASSWORD").unwrap_or_else(|_| "123".to_string()));

/// Photo shown together with the main menu welcome
pub static MAIN_MENU_PHOTO_URL: Lazy<String> = Lazy::new(|| {
    env::var("MAIN_MENU_PHOTO_URL")
        .unwrap_or_else(|_| "https://v3b.fal.media/files/b/0a8690dc/QSyhB55qF6iHyZgPpivYl.png".to_string())
});

/// Team chat invite rendered in the main menu welcome
pub static TEAM_CHAT_LINK: Lazy<String> =
    Lazy::new(|| env::var("TEAM_CHAT_LINK").unwrap_or_else(|_| "https://t.me/+VOfK0G4A8n45ZGIy".to_string()));

fn parse_chat_id(var: &str) -> Option<ChatId> {
    let raw = env::var(var).ok()?;
    match raw.trim().parse::<i64>() {
        Ok(id) => Some(ChatId(id)),
        Err(e) => {
            log::warn!("Ignoring {}={:?}: {}", var, raw, e);
            None
        }
    }
}

/// Snapshot of the runtime settings handlers need.
///
/// Built from the environment in production; tests construct it directly.
#[derive(Clone, Debug)]
pub struct BotSettings {
    pub admin_chat_id: Option<ChatId>,
    pub team_chat_id: Option<ChatId>,
    pub default_admin_password: String,
    pub main_menu_photo_url: String,
    pub team_chat_link: String,
}

impl BotSettings {
    pub fn from_env() -> Self {
        Self {
            admin_chat_id: *ADMIN_CHAT_ID,
            team_chat_id: *TEAM_CHAT_ID,
            default_admin_password: DEFAULT_ADMIN_PASSWORD.clone(),
            main_menu_photo_url: MAIN_MENU_PHOTO_URL.clone(),
            team_chat_link: TEAM_CHAT_LINK.clone(),
        }
    }
}

/// Requisites configuration
pub mod requisites {
    /// Number of card slots shown to users
    pub const CARD_SLOTS: i64 = 3;

    /// Fee percentage of a freshly seeded card slot
    pub const DEFAULT_PERCENTAGE: i64 = 75;

    /// Longest accepted unique tag
    pub const MAX_TAG_LEN: usize = 32;
}

/// Retry configuration
pub mod retry {
    use super::Duration;

    /// Maximum number of retries for dispatcher reconnection
    pub const MAX_DISPATCHER_RETRIES: u32 = 5;

    /// Delay between dispatcher retry attempts (in seconds)
    pub const DISPATCHER_RETRY_DELAY_SECS: u64 = 5;

    /// Dispatcher retry delay duration
    pub fn dispatcher_delay() -> Duration {
        Duration::from_secs(DISPATCHER_RETRY_DELAY_SECS)
    }

    /// Base for exponential backoff calculation
    pub const EXPONENTIAL_BACKOFF_BASE: u64 = 2;
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}
