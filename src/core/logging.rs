//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - A startup summary of the chat configuration

use anyhow::Result;
use simplelog::*;
use std::fs::OpenOptions;

use crate::core::config::BotSettings;

/// Initialize logger for both console and file output
///
/// The log file is appended to, so restarts keep the previous history.
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to initialize logger
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .map_err(|e| anyhow::anyhow!("Failed to open log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs which notification chats are configured
///
/// Missing chats are not fatal: notifications to them are skipped with a warning.
pub fn log_chat_configuration(settings: &BotSettings) {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    match settings.admin_chat_id {
        Some(chat) => log::info!("✅ ADMIN_CHAT_ID: {}", chat.0),
        None => log::warn!("⚠️  ADMIN_CHAT_ID: not set, applications and profit checks will not be delivered"),
    }
    match settings.team_chat_id {
        Some(chat) => log::info!("✅ TEAM_CHAT_ID: {}", chat.0),
        None => log::warn!("⚠️  TEAM_CHAT_ID: not set, requisite change notices are disabled"),
    }
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::NamedTempFile;

    #[test]
    fn test_init_logger_accepts_existing_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        // A second init in the same process fails on the global logger,
        // so only the file handling is asserted here.
        let _ = init_logger(path);
        assert!(temp_file.path().exists());
    }

    #[test]
    fn test_init_logger_rejects_missing_directory() {
        let result = init_logger("/nonexistent-dir/cardflow/app.log");
        assert!(result.is_err());
    }
}
