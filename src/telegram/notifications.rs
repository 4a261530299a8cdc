//! Best-effort notifications to the admin chat, the team chat and users
//!
//! A failed or unconfigured notification is logged and otherwise ignored;
//! the action that triggered it has already been committed.

use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};

use crate::core::config::BotSettings;
use crate::i18n::t_with;

/// Sends an HTML message, logging instead of failing.
///
/// Returns whether the message was delivered.
pub async fn notify_chat(bot: &Bot, chat_id: Option<ChatId>, text: &str, purpose: &str) -> bool {
    let Some(chat_id) = chat_id else {
        log::warn!("Skipping {} notification: chat is not configured", purpose);
        return false;
    };

    match bot.send_message(chat_id, text).parse_mode(ParseMode::Html).await {
        Ok(_) => {
            log::info!("Sent {} notification to chat {}", purpose, chat_id.0);
            true
        }
        Err(e) => {
            log::error!("Failed to send {} notification to chat {}: {}", purpose, chat_id.0, e);
            false
        }
    }
}

pub async fn notify_user(bot: &Bot, user_id: i64, text: &str, purpose: &str) -> bool {
    notify_chat(bot, Some(ChatId(user_id)), text, purpose).await
}

pub async fn notify_admin(bot: &Bot, settings: &BotSettings, text: &str, purpose: &str) -> bool {
    notify_chat(bot, settings.admin_chat_id, text, purpose).await
}

pub async fn notify_team(bot: &Bot, settings: &BotSettings, text: &str, purpose: &str) -> bool {
    notify_chat(bot, settings.team_chat_id, text, purpose).await
}

/// A card slot got a new number or bank.
pub async fn notify_team_requisite_changed(bot: &Bot, settings: &BotSettings, card_order: i64) {
    let text = t_with(
        "team-notification-requisite-changed",
        &[("card_order", &card_order.to_string())],
    );
    notify_team(bot, settings, &text, "requisite change").await;
}

/// A stop-list entry was added; the slot order is preferred over the raw entry.
pub async fn notify_team_card_stopped(bot: &Bot, settings: &BotSettings, entry: &str, card_order: Option<i64>) {
    let text = match card_order {
        Some(order) => t_with(
            "team-notification-card-stopped-with-order",
            &[("card_order", &order.to_string())],
        ),
        None => t_with(
            "team-notification-card-stopped",
            &[("card_number", &teloxide::utils::html::escape(entry))],
        ),
    };
    notify_team(bot, settings, &text, "card stopped").await;
}

pub async fn notify_team_card_released(bot: &Bot, settings: &BotSettings, entry: &str, card_order: Option<i64>) {
    let text = match card_order {
        Some(order) => t_with(
            "team-notification-card-removed-from-stop",
            &[("card_order", &order.to_string())],
        ),
        None => {
            log::warn!("Card order not found for stop entry {:?}, notifying with the entry itself", entry);
            t_with(
                "team-notification-card-removed-from-stop-with-number",
                &[("card_number", &teloxide::utils::html::escape(entry))],
            )
        }
    };
    notify_team(bot, settings, &text, "card released").await;
}
