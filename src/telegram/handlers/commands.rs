//! Slash commands and main menu buttons

use teloxide::prelude::*;
use teloxide::types::ReplyMarkup;

use super::types::{sender_id, text_of, HandlerDeps, HandlerResult};
use super::{admin, profile, registration, work_panel};
use crate::i18n::t;
use crate::storage::users;
use crate::telegram::bot::Command;
use crate::telegram::keyboards::main_menu_keyboard;
use crate::telegram::state::MyDialogue;

/// Entry point for every recognized command, whatever the current state.
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    dialogue: MyDialogue,
    deps: HandlerDeps,
) -> HandlerResult {
    log::info!("Command {:?} from chat {}", cmd, msg.chat.id.0);

    match cmd {
        Command::Start => registration::start(bot, msg, dialogue, deps).await,
        Command::Admin => admin::enter(bot, msg, dialogue).await,
        Command::Cancel => cancel(bot, msg, dialogue, deps).await,
        Command::Shift => work_panel::toggle_shift(bot, msg, deps).await,
        Command::Students => profile::list_students(bot, msg, deps).await,
    }
}

/// `/cancel`: drops any wizard in progress.
async fn cancel(bot: Bot, msg: Message, dialogue: MyDialogue, deps: HandlerDeps) -> HandlerResult {
    dialogue.exit().await?;

    let registered = match sender_id(&msg) {
        Some(user_id) => {
            let conn = deps.conn()?;
            users::get_user(&conn, user_id)?.is_some_and(|u| u.registration_complete)
        }
        None => false,
    };
    let keyboard = if registered {
        ReplyMarkup::Keyboard(main_menu_keyboard())
    } else {
        ReplyMarkup::kb_remove()
    };

    bot.send_message(msg.chat.id, t("cancel-done")).reply_markup(keyboard).await?;
    Ok(())
}

/// Main menu buttons pressed outside of any wizard.
pub async fn handle_idle_message(bot: Bot, msg: Message, deps: HandlerDeps) -> HandlerResult {
    let text = text_of(&msg);

    if text == t("button-main-menu") {
        registration::show_main_menu(&bot, msg.chat.id, &deps.settings).await
    } else if text == t("button-profile") {
        profile::on_profile_button(bot, msg, deps).await
    } else if text == t("button-work-panel") {
        work_panel::on_work_panel_button(bot, msg, deps).await
    } else {
        bot.send_message(msg.chat.id, t("unknown-input")).await?;
        Ok(())
    }
}
