//! Bot initialization and command definitions

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::core::config;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Я умею:")]
pub enum Command {
    #[command(description = "главное меню / регистрация")]
    Start,
    #[command(description = "админ панель")]
    Admin,
    #[command(description = "отменить текущее действие")]
    Cancel,
    #[command(description = "начать или закончить смену (для сотрудников)")]
    Shift,
    #[command(description = "список учеников (для кураторов)")]
    Students,
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Failed to create bot (invalid URL, missing token, etc.)
pub fn create_bot() -> anyhow::Result<Bot> {
    if config::BOT_TOKEN.is_empty() {
        anyhow::bail!("BOT_TOKEN (or TELOXIDE_TOKEN) is not set");
    }
    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;

    // Check if local Bot API server is configured
    let bot = if let Ok(bot_api_url) = std::env::var("BOT_API_URL") {
        log::info!("Using custom Bot API URL: {}", bot_api_url);
        let url = url::Url::parse(&bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
        Bot::with_client(config::BOT_TOKEN.as_str(), client).set_api_url(url)
    } else {
        Bot::with_client(config::BOT_TOKEN.as_str(), client)
    };

    Ok(bot)
}

/// Sets up bot commands in Telegram UI
///
/// `/shift` and `/students` are left out of the menu; they only make sense
/// for staff and curators.
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    use teloxide::types::BotCommand;

    bot.set_my_commands(vec![
        BotCommand::new("start", "главное меню / регистрация"),
        BotCommand::new("admin", "админ панель"),
        BotCommand::new("cancel", "отменить текущее действие"),
    ])
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        assert!(matches!(Command::parse("/start", "cardflow_bot"), Ok(Command::Start)));
        assert!(matches!(Command::parse("/shift", "cardflow_bot"), Ok(Command::Shift)));
        assert!(matches!(Command::parse("/admin@cardflow_bot", "cardflow_bot"), Ok(Command::Admin)));
        assert!(Command::parse("/unknown", "cardflow_bot").is_err());
    }
}
