//! `/start`, the registration wizard and the main menu

use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile, ParseMode, ReplyMarkup};
use teloxide::utils::html::escape;

use super::types::{send_html, sender_id, text_of, user_id_of, HandlerDeps, HandlerResult};
use crate::core::config::BotSettings;
use crate::core::wizard::Experience;
use crate::i18n::{t, t_with};
use crate::storage::users;
use crate::telegram::keyboards::{continue_keyboard, experience_keyboard, main_menu_keyboard};
use crate::telegram::notifications::notify_admin;
use crate::telegram::state::{MyDialogue, State};

/// Main menu welcome: the photo with caption, or plain text when the photo fails.
pub async fn show_main_menu(bot: &Bot, chat_id: ChatId, settings: &BotSettings) -> HandlerResult {
    let caption = t_with("main-menu-welcome", &[("chat_link", &escape(&settings.team_chat_link))]);

    match url::Url::parse(&settings.main_menu_photo_url) {
        Ok(photo_url) => {
            let sent = bot
                .send_photo(chat_id, InputFile::url(photo_url))
                .caption(caption.clone())
                .parse_mode(ParseMode::Html)
                .reply_markup(main_menu_keyboard())
                .await;
            match sent {
                Ok(_) => return Ok(()),
                Err(e) => log::warn!("Failed to send main menu photo to {}: {}", chat_id.0, e),
            }
        }
        Err(e) => log::warn!("Invalid MAIN_MENU_PHOTO_URL {:?}: {}", settings.main_menu_photo_url, e),
    }

    send_html(bot, chat_id, caption).reply_markup(main_menu_keyboard()).await?;
    Ok(())
}

/// `/start`: registered users get the main menu, everyone else starts the wizard.
pub async fn start(bot: Bot, msg: Message, dialogue: MyDialogue, deps: HandlerDeps) -> HandlerResult {
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user_id_of(from);

    let user = {
        let conn = deps.conn()?;
        users::add_user(&conn, user_id, from.username.as_deref(), Some(from.first_name.as_str()))?;
        users::get_user(&conn, user_id)?
    };

    if user.is_some_and(|u| u.registration_complete) {
        log::info!("User {} opened the main menu", user_id);
        dialogue.exit().await?;
        return show_main_menu(&bot, msg.chat.id, &deps.settings).await;
    }

    log::info!("User {} started registration", user_id);
    send_html(
        &bot,
        msg.chat.id,
        t_with("welcome-new-user", &[("user_first_name", &escape(&from.first_name))]),
    )
    .reply_markup(continue_keyboard())
    .await?;
    dialogue.update(State::RegistrationWelcome).await?;
    Ok(())
}

pub async fn welcome(bot: Bot, msg: Message, dialogue: MyDialogue) -> HandlerResult {
    if text_of(&msg) != t("button-continue") {
        let first_name = msg.from.as_ref().map(|u| escape(&u.first_name)).unwrap_or_default();
        send_html(&bot, msg.chat.id, t_with("welcome-new-user", &[("user_first_name", &first_name)]))
            .reply_markup(continue_keyboard())
            .await?;
        return Ok(());
    }

    bot.send_message(msg.chat.id, t("experience-question"))
        .reply_markup(experience_keyboard())
        .await?;
    dialogue.update(State::RegistrationExperience).await?;
    Ok(())
}

pub async fn experience(bot: Bot, msg: Message, dialogue: MyDialogue) -> HandlerResult {
    let Some(experience) = Experience::from_answer(text_of(&msg), &t("button-yes"), &t("button-no")) else {
        bot.send_message(msg.chat.id, t("experience-invalid"))
            .reply_markup(experience_keyboard())
            .await?;
        return Ok(());
    };

    bot.send_message(msg.chat.id, t("time-commitment-question"))
        .reply_markup(ReplyMarkup::kb_remove())
        .await?;
    dialogue.update(State::RegistrationTimeCommitment { experience }).await?;
    Ok(())
}

pub async fn time_commitment(bot: Bot, msg: Message, dialogue: MyDialogue, experience: Experience) -> HandlerResult {
    let answer = text_of(&msg);
    if answer.is_empty() {
        bot.send_message(msg.chat.id, t("time-commitment-question")).await?;
        return Ok(());
    }

    bot.send_message(msg.chat.id, t("source-question")).await?;
    dialogue
        .update(State::RegistrationSource {
            experience,
            time_commitment: answer.to_string(),
        })
        .await?;
    Ok(())
}

/// Last step: persists the answers and forwards the application to the admin chat.
pub async fn source(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    (experience, time_commitment): (Experience, String),
    deps: HandlerDeps,
) -> HandlerResult {
    let source = text_of(&msg);
    if source.is_empty() {
        bot.send_message(msg.chat.id, t("source-question")).await?;
        return Ok(());
    }
    let Some(user_id) = sender_id(&msg) else {
        return Ok(());
    };

    {
        let conn = deps.conn()?;
        users::complete_registration(&conn, user_id, &experience.to_string(), &time_commitment, source)?;
    }
    log::info!("User {} completed registration", user_id);

    let from = msg.from.as_ref();
    let not_available = t("not-available");
    let experience_caption = match experience {
        Experience::Yes => t("button-yes"),
        Experience::No => t("button-no"),
    };
    let application = t_with(
        "admin-new-application",
        &[
            ("user_id", &user_id.to_string()),
            (
                "username",
                &from.and_then(|u| u.username.as_deref()).map(escape).unwrap_or(not_available.clone()),
            ),
            (
                "user_first_name",
                &from.map(|u| escape(&u.first_name)).unwrap_or(not_available),
            ),
            ("experience", &experience_caption),
            ("time_commitment", &escape(&time_commitment)),
            ("source", &escape(source)),
        ],
    );
    notify_admin(&bot, &deps.settings, &application, "registration application").await;

    bot.send_message(msg.chat.id, t("application-accepted"))
        .reply_markup(main_menu_keyboard())
        .await?;
    dialogue.exit().await?;
    Ok(())
}
