//! Profit check submission and the admin decision

use teloxide::prelude::*;
use teloxide::types::{FileId, InputFile, ParseMode};
use teloxide::utils::html::escape;

use super::types::{sender_id, text_of, HandlerDeps, HandlerResult};
use crate::core::profit::{decide, Decision, ProfitCheck, WorkflowError};
use crate::core::wizard::parse_profit_amount;
use crate::i18n::{t, t_with};
use crate::storage::{profit_checks, users, User};
use crate::telegram::keyboards::{check_decision_keyboard, main_menu_keyboard};
use crate::telegram::notifications::notify_user;
use crate::telegram::render::user_label;
use crate::telegram::state::{MyDialogue, State};

pub async fn submit_profit(bot: Bot, q: CallbackQuery, dialogue: MyDialogue) -> HandlerResult {
    bot.answer_callback_query(q.id.clone()).await?;
    let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) else {
        return Ok(());
    };

    bot.send_message(chat_id, t("profit-request-amount")).await?;
    dialogue.update(State::ProfitAmount).await?;
    Ok(())
}

pub async fn receive_amount(bot: Bot, msg: Message, dialogue: MyDialogue) -> HandlerResult {
    let amount = match parse_profit_amount(text_of(&msg)) {
        Ok(amount) => amount,
        Err(_) => {
            bot.send_message(msg.chat.id, t("profit-invalid-amount")).await?;
            return Ok(());
        }
    };

    bot.send_message(msg.chat.id, t("profit-request-photo")).await?;
    dialogue.update(State::ProfitPhoto { amount }).await?;
    Ok(())
}

/// Caption of the check in the admin chat.
fn admin_caption(check: &ProfitCheck, author: &str) -> String {
    t_with(
        "profit-admin-check",
        &[
            ("check_id", &check.id.to_string()),
            ("user", author),
            ("user_id", &check.user_id.to_string()),
            ("amount", &check.amount.to_string()),
        ],
    )
}

/// Stores the check as pending and posts it to the admin chat with decision buttons.
pub async fn receive_photo(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    amount: i64,
    deps: HandlerDeps,
) -> HandlerResult {
    let Some(photo) = msg.photo().and_then(|sizes| sizes.last()) else {
        bot.send_message(msg.chat.id, t("profit-photo-required")).await?;
        return Ok(());
    };
    let Some(user_id) = sender_id(&msg) else {
        return Ok(());
    };
    let file_id = photo.file.id.0.clone();

    let (check, author) = {
        let conn = deps.conn()?;
        let check_id = profit_checks::create_profit_check(&conn, user_id, amount, Some(&file_id))?;
        let check = profit_checks::get_profit_check(&conn, check_id)?;
        let author = users::get_user(&conn, user_id)?
            .map(|u| user_label(&u))
            .unwrap_or_else(|| user_id.to_string());
        (check, author)
    };
    let Some(check) = check else {
        bot.send_message(msg.chat.id, t("profit-submit-error")).await?;
        return Ok(());
    };
    log::info!("User {} submitted profit check #{} for {}", user_id, check.id, amount);

    match deps.settings.admin_chat_id {
        Some(admin_chat) => {
            let posted = bot
                .send_photo(admin_chat, InputFile::file_id(FileId(file_id)))
                .caption(admin_caption(&check, &author))
                .parse_mode(ParseMode::Html)
                .reply_markup(check_decision_keyboard(check.id))
                .await;
            if let Err(e) = posted {
                log::error!("Failed to post profit check #{} to the admin chat: {}", check.id, e);
            }
        }
        None => log::warn!("Profit check #{} not posted: ADMIN_CHAT_ID is not set", check.id),
    }

    bot.send_message(
        msg.chat.id,
        t_with("profit-submitted", &[("check_id", &check.id.to_string())]),
    )
    .reply_markup(main_menu_keyboard())
    .await?;
    dialogue.exit().await?;
    Ok(())
}

/// Runs the transition in storage and loads the check's author.
///
/// The outer error is a database failure, the inner one a refused transition.
fn apply_decision(
    conn: &rusqlite::Connection,
    check_id: i64,
    decision: Decision,
) -> rusqlite::Result<Result<(ProfitCheck, Option<User>), WorkflowError>> {
    let Some(check) = profit_checks::get_profit_check(conn, check_id)? else {
        return Ok(Err(WorkflowError::NotFound(check_id)));
    };
    if let Err(e) = decide(&check, decision) {
        return Ok(Err(e));
    }

    let processed = match decision {
        Decision::Approve => profit_checks::approve_profit_check(conn, check_id)?,
        Decision::Reject => profit_checks::reject_profit_check(conn, check_id)?,
    };
    let Some(processed) = processed else {
        // Another click processed the check in between
        let status = profit_checks::get_profit_check(conn, check_id)?.map(|c| c.status);
        return Ok(Err(match status {
            Some(status) => WorkflowError::AlreadyProcessed { id: check_id, status },
            None => WorkflowError::NotFound(check_id),
        }));
    };

    let student = users::get_user(conn, processed.user_id)?;
    Ok(Ok((processed, student)))
}

/// Approve/reject button in the admin chat.
pub async fn decide_check(
    bot: Bot,
    q: CallbackQuery,
    decision: Decision,
    check_id: i64,
    deps: HandlerDeps,
) -> HandlerResult {
    let chat_id = q.message.as_ref().map(|m| m.chat().id);
    if chat_id.is_none() || chat_id != deps.settings.admin_chat_id {
        log::warn!(
            "User {} tried to decide profit check #{} outside the admin chat",
            q.from.id.0,
            check_id
        );
        bot.answer_callback_query(q.id.clone())
            .text(t("profit-check-wrong-chat"))
            .show_alert(true)
            .await?;
        return Ok(());
    }

    let outcome = {
        let conn = deps.conn()?;
        apply_decision(&conn, check_id, decision)?
    };

    let (check, student) = match outcome {
        Ok(done) => done,
        Err(e) => {
            log::warn!("Profit check decision refused: {}", e);
            let key = match e {
                WorkflowError::NotFound(_) => "profit-check-not-found",
                _ => "profit-check-already-processed",
            };
            bot.answer_callback_query(q.id.clone()).text(t(key)).show_alert(true).await?;
            return Ok(());
        }
    };

    bot.answer_callback_query(q.id.clone()).await?;
    let admin = escape(&match &q.from.username {
        Some(name) => format!("@{}", name),
        None => q.from.id.0.to_string(),
    });
    log::info!("Profit check #{} {} by {}", check.id, check.status, admin);

    if let Some(message) = q.message.as_ref() {
        let author = student.as_ref().map(user_label).unwrap_or_else(|| check.user_id.to_string());
        let verdict_key = match decision {
            Decision::Approve => "profit-check-approved-admin",
            Decision::Reject => "profit-check-rejected-admin",
        };
        let caption = admin_caption(&check, &author) + &t_with(verdict_key, &[("admin", &admin)]);
        // Editing without a reply markup also removes the decision buttons
        if let Err(e) = bot
            .edit_message_caption(message.chat().id, message.id())
            .caption(caption)
            .parse_mode(ParseMode::Html)
            .await
        {
            log::warn!("Failed to update the admin message of check #{}: {}", check.id, e);
        }
    }

    let amount = check.amount.to_string();
    match decision {
        Decision::Approve => {
            notify_user(
                &bot,
                check.user_id,
                &t_with("profit-approved-user", &[("amount", &amount)]),
                "profit approved",
            )
            .await;
            if let Some(curator_id) = student.as_ref().and_then(|s| s.curator_id) {
                let label = student.as_ref().map(user_label).unwrap_or_default();
                notify_user(
                    &bot,
                    curator_id,
                    &t_with("profit-curator-notification", &[("student", &label), ("amount", &amount)]),
                    "student profit",
                )
                .await;
            }
        }
        Decision::Reject => {
            notify_user(
                &bot,
                check.user_id,
                &t_with("profit-rejected-user", &[("amount", &amount)]),
                "profit rejected",
            )
            .await;
        }
    }
    Ok(())
}
