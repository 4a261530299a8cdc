//! Profile card, direct requisites, custom tag and curator choice

use chrono::Local;
use teloxide::prelude::*;
use teloxide::types::{ChatId, MaybeInaccessibleMessage};

use super::types::{send_html, sender_id, text_of, user_id_of, HandlerDeps, HandlerResult};
use crate::core::requisites::resolve;
use crate::core::wizard::normalize_tag;
use crate::i18n::{t, t_with};
use crate::storage::{curators, profit_checks, requisites, settings, stop_list, users};
use crate::telegram::keyboards::{curators_inline_keyboard, main_menu_keyboard, profile_inline_keyboard};
use crate::telegram::notifications::notify_user;
use crate::telegram::render::{bullet_list, profile_text, requisites_text, user_label};
use crate::telegram::state::{MyDialogue, State};

/// Sends the profile card of `user_id` to `chat_id`.
pub async fn show_profile(bot: &Bot, chat_id: ChatId, user_id: i64, deps: &HandlerDeps) -> HandlerResult {
    let loaded = {
        let conn = deps.conn()?;
        match users::get_user(&conn, user_id)? {
            Some(user) => {
                let curator = users::get_user_curator(&conn, user_id)?;
                let totals = profit_checks::get_user_profit_statistics(&conn, user_id)?;
                Some((user, curator, totals))
            }
            None => None,
        }
    };

    let Some((user, curator, totals)) = loaded else {
        log::warn!("Profile requested by unknown user {}", user_id);
        bot.send_message(chat_id, t("profile-load-error")).await?;
        return Ok(());
    };

    let text = profile_text(&user, curator.as_deref(), totals, Local::now().date_naive());
    send_html(bot, chat_id, text).reply_markup(profile_inline_keyboard()).await?;
    Ok(())
}

pub async fn on_profile_button(bot: Bot, msg: Message, deps: HandlerDeps) -> HandlerResult {
    let Some(user_id) = sender_id(&msg) else {
        return Ok(());
    };
    show_profile(&bot, msg.chat.id, user_id, &deps).await
}

/// Current card slots merged with the stop-list.
pub async fn direct_requisites(bot: Bot, q: CallbackQuery, deps: HandlerDeps) -> HandlerResult {
    bot.answer_callback_query(q.id.clone()).await?;
    let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) else {
        return Ok(());
    };

    let resolved = {
        let conn = deps.conn()?;
        resolve(
            requisites::get_all_requisites(&conn)?,
            &stop_list::get_stopped_cards(&conn)?,
            settings::get_personal_requisites_link(&conn)?,
        )
    };
    log::info!(
        "User {} requested requisites: {} active, {} stopped",
        q.from.id.0,
        resolved.active_cards().count(),
        resolved.cards.len() - resolved.active_cards().count()
    );

    send_html(&bot, chat_id, requisites_text(&resolved)).await?;
    Ok(())
}

/// Drops the inline keyboard of the message a button was pressed on.
pub async fn remove_inline_keyboard(bot: &Bot, message: Option<&MaybeInaccessibleMessage>) {
    if let Some(message) = message {
        if let Err(e) = bot.edit_message_reply_markup(message.chat().id, message.id()).await {
            log::warn!("Failed to remove inline keyboard: {}", e);
        }
    }
}

pub async fn custom_tag(bot: Bot, q: CallbackQuery, dialogue: MyDialogue) -> HandlerResult {
    bot.answer_callback_query(q.id.clone()).await?;
    remove_inline_keyboard(&bot, q.message.as_ref()).await;
    let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) else {
        return Ok(());
    };

    bot.send_message(chat_id, t("request-unique-tag")).await?;
    dialogue.update(State::ProfileUniqueTag).await?;
    Ok(())
}

pub async fn receive_unique_tag(bot: Bot, msg: Message, dialogue: MyDialogue, deps: HandlerDeps) -> HandlerResult {
    let Some(user_id) = sender_id(&msg) else {
        return Ok(());
    };
    let tag = match normalize_tag(text_of(&msg)) {
        Ok(tag) => tag,
        Err(e) => {
            log::info!("User {} entered an invalid tag: {}", user_id, e);
            bot.send_message(msg.chat.id, t("unique-tag-invalid")).await?;
            return Ok(());
        }
    };

    {
        let conn = deps.conn()?;
        users::set_unique_tag(&conn, user_id, Some(&tag))?;
    }
    log::info!("User {} set unique tag #{}", user_id, tag);

    bot.send_message(msg.chat.id, t("unique-tag-saved"))
        .reply_markup(main_menu_keyboard())
        .await?;
    dialogue.exit().await?;
    show_profile(&bot, msg.chat.id, user_id, &deps).await
}

pub async fn choose_curator(bot: Bot, q: CallbackQuery, deps: HandlerDeps) -> HandlerResult {
    bot.answer_callback_query(q.id.clone()).await?;
    let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) else {
        return Ok(());
    };

    let list = {
        let conn = deps.conn()?;
        curators::get_curators(&conn)?
    };
    if list.is_empty() {
        bot.send_message(chat_id, t("no-curators")).await?;
        return Ok(());
    }

    bot.send_message(chat_id, t("choose-curator-prompt"))
        .reply_markup(curators_inline_keyboard(&list))
        .await?;
    Ok(())
}

/// Links the user to the picked curator and tells the curator about it.
pub async fn pick_curator(bot: Bot, q: CallbackQuery, curator_id: i64, deps: HandlerDeps) -> HandlerResult {
    let user_id = user_id_of(&q.from);

    let picked = {
        let conn = deps.conn()?;
        match curators::get_curator(&conn, curator_id)? {
            Some(curator) => {
                users::set_user_curator(&conn, user_id, Some(curator.user_id))?;
                let student = users::get_user(&conn, user_id)?;
                Some((curator, student))
            }
            None => None,
        }
    };

    let Some((curator, student)) = picked else {
        bot.answer_callback_query(q.id.clone())
            .text(t("curator-not-found"))
            .show_alert(true)
            .await?;
        return Ok(());
    };

    bot.answer_callback_query(q.id.clone()).await?;
    remove_inline_keyboard(&bot, q.message.as_ref()).await;
    log::info!("User {} picked curator {}", user_id, curator.user_id);

    if let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) {
        send_html(
            &bot,
            chat_id,
            t_with("curator-selected", &[("curator", &teloxide::utils::html::escape(&curator.username))]),
        )
        .await?;
    }

    let student = student.map(|s| user_label(&s)).unwrap_or_else(|| user_id.to_string());
    notify_user(
        &bot,
        curator.user_id,
        &t_with("curator-new-student", &[("student", &student)]),
        "new student",
    )
    .await;
    Ok(())
}

/// `/students`: a curator's students.
pub async fn list_students(bot: Bot, msg: Message, deps: HandlerDeps) -> HandlerResult {
    let Some(user_id) = sender_id(&msg) else {
        return Ok(());
    };

    let students = {
        let conn = deps.conn()?;
        if !curators::is_curator(&conn, user_id)? {
            None
        } else {
            Some(users::get_students(&conn, user_id)?)
        }
    };

    let text = match students {
        None => t("students-not-curator"),
        Some(list) if list.is_empty() => t("students-empty"),
        Some(list) => {
            let lines = bullet_list(list.iter().map(|s| s.display_name()), "students-empty");
            t_with("students-list", &[("students", &lines)])
        }
    };
    send_html(&bot, msg.chat.id, text).await?;
    Ok(())
}
