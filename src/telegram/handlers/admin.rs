//! Password-protected admin panel
//!
//! Every finished action (saved value, refused lookup) ends on the admin menu
//! again. Inputs that cannot be parsed keep the current step and re-prompt.

use rusqlite::Connection;
use teloxide::prelude::*;
use teloxide::types::{ChatId, KeyboardMarkup};
use teloxide::utils::html::escape;

use super::profile::remove_inline_keyboard;
use super::registration::show_main_menu;
use super::types::{send_html, text_of, HandlerDeps, HandlerError, HandlerResult};
use crate::core::requisites::find_card_order;
use crate::core::wizard::{parse_staff_input, CardDraft, CardField, CardStep, InputError, UserRef};
use crate::i18n::{t, t_with};
use crate::storage::{curators, profit_checks, requisites, settings, stop_list, users, User};
use crate::telegram::keyboards::{
    admin_back_to_admin_menu_keyboard, admin_bans_menu_keyboard, admin_choose_card_keyboard,
    admin_curators_menu_keyboard, admin_main_menu_keyboard, admin_staff_menu_keyboard,
    admin_stopped_cards_menu_keyboard,
};
use crate::telegram::notifications::{notify_team_card_released, notify_team_card_stopped, notify_team_requisite_changed};
use crate::telegram::render::{bullet_list, curator_list, staff_lines, user_label};
use crate::telegram::state::{MyDialogue, State};

async fn reply(bot: &Bot, chat_id: ChatId, text: String) -> HandlerResult {
    send_html(bot, chat_id, text)
        .reply_markup(admin_back_to_admin_menu_keyboard())
        .await?;
    Ok(())
}

async fn prompt(bot: &Bot, chat_id: ChatId, key: &str, keyboard: KeyboardMarkup) -> HandlerResult {
    send_html(bot, chat_id, t(key)).reply_markup(keyboard).await?;
    Ok(())
}

pub async fn show_admin_menu(bot: &Bot, chat_id: ChatId, dialogue: &MyDialogue) -> HandlerResult {
    prompt(bot, chat_id, "admin-main-menu-text", admin_main_menu_keyboard()).await?;
    dialogue.update(State::AdminMenu).await?;
    Ok(())
}

/// `/admin`
pub async fn enter(bot: Bot, msg: Message, dialogue: MyDialogue) -> HandlerResult {
    prompt(&bot, msg.chat.id, "admin-password-request", admin_back_to_admin_menu_keyboard()).await?;
    dialogue.update(State::AdminPassword).await?;
    Ok(())
}

/// The "back to admin menu" button in any unlocked admin state.
pub async fn back_to_menu(bot: Bot, msg: Message, dialogue: MyDialogue) -> HandlerResult {
    show_admin_menu(&bot, msg.chat.id, &dialogue).await
}

/// Whether the message is the "back to admin menu" button pressed behind the password.
pub fn is_back_to_admin_menu(msg: Message, state: State) -> bool {
    state.is_admin_authenticated() && text_of(&msg) == t("admin-button-back-to-admin-main-menu")
}

pub async fn password(bot: Bot, msg: Message, dialogue: MyDialogue, deps: HandlerDeps) -> HandlerResult {
    let stored = {
        let conn = deps.conn()?;
        settings::get_admin_password(&conn, &deps.settings.default_admin_password)?
    };

    if msg.text() == Some(stored.as_str()) {
        log::info!("Admin panel unlocked in chat {}", msg.chat.id.0);
        return show_admin_menu(&bot, msg.chat.id, &dialogue).await;
    }

    log::warn!("Wrong admin password in chat {}", msg.chat.id.0);
    prompt(&bot, msg.chat.id, "admin-incorrect-password", admin_back_to_admin_menu_keyboard()).await
}

/// Admin main menu buttons.
pub async fn menu(bot: Bot, msg: Message, dialogue: MyDialogue, deps: HandlerDeps) -> HandlerResult {
    let chat_id = msg.chat.id;
    let text = text_of(&msg);
    let back = admin_back_to_admin_menu_keyboard;

    if text == t("admin-button-edit-requisites") {
        send_html(&bot, chat_id, t("admin-choose-card-to-edit"))
            .reply_markup(admin_choose_card_keyboard())
            .await?;
        dialogue.update(State::AdminChooseCard).await?;
    } else if text == t("admin-button-manage-stopped-cards") {
        show_stop_menu(&bot, chat_id, &dialogue, &deps).await?;
    } else if text == t("admin-button-change-password") {
        prompt(&bot, chat_id, "admin-new-password-request", back()).await?;
        dialogue.update(State::AdminNewPassword).await?;
    } else if text == t("admin-button-edit-personal-link") {
        prompt(&bot, chat_id, "admin-personal-link-request", back()).await?;
        dialogue.update(State::AdminPersonalLink).await?;
    } else if text == t("admin-button-curators") {
        show_curator_menu(&bot, chat_id, &dialogue, &deps).await?;
    } else if text == t("admin-button-staff") {
        show_staff_menu(&bot, chat_id, &dialogue, &deps).await?;
    } else if text == t("admin-button-bans") {
        show_ban_menu(&bot, chat_id, &dialogue, &deps).await?;
    } else if text == t("admin-button-statistics") {
        let (totals, users_count) = {
            let conn = deps.conn()?;
            (profit_checks::get_statistics(&conn)?, users::count_users(&conn)?)
        };
        send_html(
            &bot,
            chat_id,
            t_with(
                "admin-statistics",
                &[
                    ("profits_count", &totals.count.to_string()),
                    ("profits_amount", &totals.amount.to_string()),
                    ("users_count", &users_count.to_string()),
                ],
            ),
        )
        .reply_markup(admin_main_menu_keyboard())
        .await?;
    } else if text == t("admin-button-back-to-bot-main-menu") {
        log::info!("Admin left the panel in chat {}", chat_id.0);
        dialogue.exit().await?;
        show_main_menu(&bot, chat_id, &deps.settings).await?;
    } else {
        show_admin_menu(&bot, chat_id, &dialogue).await?;
    }
    Ok(())
}

// --- Password and personal link ---

pub async fn new_password(bot: Bot, msg: Message, dialogue: MyDialogue, deps: HandlerDeps) -> HandlerResult {
    let new_password = text_of(&msg);
    if new_password.is_empty() {
        reply(&bot, msg.chat.id, t("admin-no-changes")).await?;
    } else {
        {
            let conn = deps.conn()?;
            settings::update_admin_password(&conn, new_password)?;
        }
        log::info!("Admin password changed from chat {}", msg.chat.id.0);
        reply(&bot, msg.chat.id, t("admin-password-changed")).await?;
    }
    show_admin_menu(&bot, msg.chat.id, &dialogue).await
}

pub async fn personal_link(bot: Bot, msg: Message, dialogue: MyDialogue, deps: HandlerDeps) -> HandlerResult {
    let link = text_of(&msg);
    let key = if link.is_empty() {
        "admin-no-changes"
    } else {
        let conn = deps.conn()?;
        if link == "-" {
            settings::update_personal_requisites_link(&conn, None)?;
            "admin-personal-link-removed"
        } else {
            settings::update_personal_requisites_link(&conn, Some(link))?;
            "admin-personal-link-saved"
        }
    };
    log::info!("Personal requisites link update: {}", key);
    reply(&bot, msg.chat.id, t(key)).await?;
    show_admin_menu(&bot, msg.chat.id, &dialogue).await
}

// --- Card wizard ---

fn card_prompt(draft: &CardDraft) -> String {
    t_with(
        draft.pending_field().prompt_key(),
        &[("card_order", &draft.card_order.to_string())],
    )
}

/// Typed text while the card picker is shown.
pub async fn choose_card_text(bot: Bot, msg: Message) -> HandlerResult {
    send_html(&bot, msg.chat.id, t("admin-choose-card-to-edit"))
        .reply_markup(admin_choose_card_keyboard())
        .await?;
    Ok(())
}

/// A card slot button was pressed.
pub async fn start_card_edit(bot: Bot, q: CallbackQuery, card_order: i64, dialogue: MyDialogue) -> HandlerResult {
    let Ok(draft) = CardDraft::new(card_order) else {
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };
    bot.answer_callback_query(q.id.clone()).await?;
    remove_inline_keyboard(&bot, q.message.as_ref()).await;

    let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) else {
        return Ok(());
    };
    log::info!("Editing card {} from chat {}", card_order, chat_id.0);
    reply(&bot, chat_id, card_prompt(&draft)).await?;
    dialogue.update(State::AdminCard { draft }).await?;
    Ok(())
}

fn card_input_error_text(field: CardField, error: &InputError) -> String {
    match error {
        InputError::MaxBelowMin { min, .. } => t_with("admin-invalid-max-amount", &[("min_amount", &min.to_string())]),
        InputError::Empty => t("admin-empty-value"),
        _ if field == CardField::Percentage => t("admin-invalid-percentage"),
        _ => t("admin-invalid-amount"),
    }
}

/// One answer of the card wizard.
pub async fn card_step(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    draft: CardDraft,
    deps: HandlerDeps,
) -> HandlerResult {
    let field = draft.pending_field();
    let step = match draft.accept(text_of(&msg)) {
        Ok(step) => step,
        Err(e) => {
            log::info!("Card wizard input refused at {:?}: {}", field, e);
            return reply(&bot, msg.chat.id, card_input_error_text(field, &e)).await;
        }
    };

    let requisite = match step {
        CardStep::Next(draft) => {
            reply(&bot, msg.chat.id, card_prompt(&draft)).await?;
            dialogue.update(State::AdminCard { draft }).await?;
            return Ok(());
        }
        CardStep::Done(requisite) => requisite,
    };

    let previous = {
        let conn = deps.conn()?;
        let previous = requisites::get_requisite_by_order(&conn, requisite.card_order)?;
        requisites::update_requisite(&conn, &requisite)?;
        previous
    };
    log::info!("Card {} updated", requisite.card_order);

    let order = requisite.card_order.to_string();
    reply(
        &bot,
        msg.chat.id,
        t_with("admin-requisite-updated-success", &[("card_order", &order)]),
    )
    .await?;

    let changed = previous.is_some_and(|old| old.bank_name != requisite.bank_name || old.card_number != requisite.card_number);
    if changed {
        notify_team_requisite_changed(&bot, &deps.settings, requisite.card_order).await;
    }

    show_admin_menu(&bot, msg.chat.id, &dialogue).await
}

// --- Stop-list ---

async fn show_stop_menu(bot: &Bot, chat_id: ChatId, dialogue: &MyDialogue, deps: &HandlerDeps) -> HandlerResult {
    let entries = {
        let conn = deps.conn()?;
        stop_list::get_stopped_cards(&conn)?
    };
    send_html(
        bot,
        chat_id,
        t_with(
            "admin-stopped-cards-menu",
            &[("stopped_cards_list", &bullet_list(entries, "admin-stopped-cards-empty"))],
        ),
    )
    .reply_markup(admin_stopped_cards_menu_keyboard())
    .await?;
    dialogue.update(State::AdminStopMenu).await?;
    Ok(())
}

pub async fn stop_menu(bot: Bot, msg: Message, dialogue: MyDialogue, deps: HandlerDeps) -> HandlerResult {
    let text = text_of(&msg);
    if text == t("admin-button-add-stopped-card") {
        prompt(&bot, msg.chat.id, "admin-request-stopped-card-to-add", admin_back_to_admin_menu_keyboard()).await?;
        dialogue.update(State::AdminStopAdd).await?;
    } else if text == t("admin-button-remove-stopped-card") {
        prompt(&bot, msg.chat.id, "admin-request-stopped-card-to-remove", admin_back_to_admin_menu_keyboard()).await?;
        dialogue.update(State::AdminStopRemove).await?;
    } else {
        show_stop_menu(&bot, msg.chat.id, &dialogue, &deps).await?;
    }
    Ok(())
}

/// Slot a stop entry refers to: exact number first, then the resolver heuristics.
fn card_order_for_entry(conn: &Connection, entry: &str) -> rusqlite::Result<Option<i64>> {
    if let Some(order) = requisites::get_card_order_by_number(conn, entry)? {
        return Ok(Some(order));
    }
    Ok(find_card_order(&requisites::get_all_requisites(conn)?, entry))
}

pub async fn stop_add(bot: Bot, msg: Message, dialogue: MyDialogue, deps: HandlerDeps) -> HandlerResult {
    let entry = text_of(&msg);
    if entry.is_empty() {
        reply(&bot, msg.chat.id, t("admin-no-changes")).await?;
        return show_admin_menu(&bot, msg.chat.id, &dialogue).await;
    }

    let (inserted, card_order) = {
        let conn = deps.conn()?;
        let inserted = stop_list::add_stopped_card(&conn, entry)?;
        (inserted, card_order_for_entry(&conn, entry)?)
    };
    let escaped = escape(entry);

    if inserted {
        log::info!("Stop-list entry {:?} added (card {:?})", entry, card_order);
        reply(&bot, msg.chat.id, t_with("admin-stopped-card-added", &[("card_number", &escaped)])).await?;
        notify_team_card_stopped(&bot, &deps.settings, entry, card_order).await;
    } else {
        reply(
            &bot,
            msg.chat.id,
            t_with("admin-stopped-card-already-listed", &[("card_number", &escaped)]),
        )
        .await?;
    }
    show_admin_menu(&bot, msg.chat.id, &dialogue).await
}

pub async fn stop_remove(bot: Bot, msg: Message, dialogue: MyDialogue, deps: HandlerDeps) -> HandlerResult {
    let entry = text_of(&msg);
    if entry.is_empty() {
        reply(&bot, msg.chat.id, t("admin-no-changes")).await?;
        return show_admin_menu(&bot, msg.chat.id, &dialogue).await;
    }

    let removed = {
        let conn = deps.conn()?;
        let card_order = card_order_for_entry(&conn, entry)?;
        stop_list::remove_stopped_card(&conn, entry)?.then_some(card_order)
    };
    let escaped = escape(entry);

    match removed {
        Some(card_order) => {
            log::info!("Stop-list entry {:?} removed (card {:?})", entry, card_order);
            reply(&bot, msg.chat.id, t_with("admin-stopped-card-removed", &[("card_number", &escaped)])).await?;
            notify_team_card_released(&bot, &deps.settings, entry, card_order).await;
        }
        None => {
            reply(&bot, msg.chat.id, t_with("admin-stopped-card-not-found", &[("card_number", &escaped)])).await?;
        }
    }
    show_admin_menu(&bot, msg.chat.id, &dialogue).await
}

// --- User lookups shared by curators, staff and bans ---

/// Parses the typed user and looks it up.
///
/// `Ok(None)` means a reply was already sent: either a re-prompt (state kept)
/// or "not found" followed by the admin menu.
async fn lookup_user(
    bot: &Bot,
    chat_id: ChatId,
    dialogue: &MyDialogue,
    deps: &HandlerDeps,
    user_ref: Result<UserRef, InputError>,
) -> Result<Option<User>, HandlerError> {
    let user_ref = match user_ref {
        Ok(user_ref) => user_ref,
        Err(_) => {
            reply(bot, chat_id, t("admin-invalid-user-ref")).await?;
            return Ok(None);
        }
    };

    let user = {
        let conn = deps.conn()?;
        users::find_user(&conn, &user_ref)?
    };
    if user.is_none() {
        let typed = match &user_ref {
            UserRef::Id(id) => id.to_string(),
            UserRef::Username(name) => format!("@{}", name),
        };
        reply(bot, chat_id, t_with("admin-user-not-found", &[("user", &escape(&typed))])).await?;
        show_admin_menu(bot, chat_id, dialogue).await?;
    }
    Ok(user)
}

// --- Curators ---

async fn show_curator_menu(bot: &Bot, chat_id: ChatId, dialogue: &MyDialogue, deps: &HandlerDeps) -> HandlerResult {
    let list = {
        let conn = deps.conn()?;
        curators::get_curators(&conn)?
    };
    send_html(bot, chat_id, t_with("admin-curators-menu", &[("curators", &curator_list(&list))]))
        .reply_markup(admin_curators_menu_keyboard())
        .await?;
    dialogue.update(State::AdminCuratorMenu).await?;
    Ok(())
}

pub async fn curator_menu(bot: Bot, msg: Message, dialogue: MyDialogue, deps: HandlerDeps) -> HandlerResult {
    let text = text_of(&msg);
    if text == t("admin-button-add-curator") {
        prompt(&bot, msg.chat.id, "admin-request-curator-to-add", admin_back_to_admin_menu_keyboard()).await?;
        dialogue.update(State::AdminCuratorAdd).await?;
    } else if text == t("admin-button-remove-curator") {
        prompt(&bot, msg.chat.id, "admin-request-curator-to-remove", admin_back_to_admin_menu_keyboard()).await?;
        dialogue.update(State::AdminCuratorRemove).await?;
    } else {
        show_curator_menu(&bot, msg.chat.id, &dialogue, &deps).await?;
    }
    Ok(())
}

pub async fn curator_add(bot: Bot, msg: Message, dialogue: MyDialogue, deps: HandlerDeps) -> HandlerResult {
    let chat_id = msg.chat.id;
    let Some(user) = lookup_user(&bot, chat_id, &dialogue, &deps, UserRef::parse(text_of(&msg))).await? else {
        return Ok(());
    };
    let Some(username) = user.username.as_deref() else {
        reply(&bot, chat_id, t("admin-curator-needs-username")).await?;
        return show_admin_menu(&bot, chat_id, &dialogue).await;
    };

    {
        let conn = deps.conn()?;
        curators::add_curator(&conn, user.user_id, username)?;
    }
    log::info!("User {} is now a curator", user.user_id);
    reply(&bot, chat_id, t_with("admin-curator-added", &[("curator", &escape(username))])).await?;
    show_admin_menu(&bot, chat_id, &dialogue).await
}

pub async fn curator_remove(bot: Bot, msg: Message, dialogue: MyDialogue, deps: HandlerDeps) -> HandlerResult {
    let chat_id = msg.chat.id;
    let username = text_of(&msg).trim_start_matches('@');
    if username.is_empty() {
        return reply(&bot, chat_id, t("admin-invalid-user-ref")).await;
    }

    let removed = {
        let conn = deps.conn()?;
        curators::remove_curator(&conn, username)?
    };
    let key = if removed {
        log::info!("Curator @{} removed", username);
        "admin-curator-removed"
    } else {
        "admin-curator-not-found"
    };
    reply(&bot, chat_id, t_with(key, &[("curator", &escape(username))])).await?;
    show_admin_menu(&bot, chat_id, &dialogue).await
}

// --- Staff ---

async fn show_staff_menu(bot: &Bot, chat_id: ChatId, dialogue: &MyDialogue, deps: &HandlerDeps) -> HandlerResult {
    let staff = {
        let conn = deps.conn()?;
        users::get_staff(&conn)?
    };
    let lines = if staff.is_empty() {
        t("admin-staff-empty")
    } else {
        staff_lines(&staff)
    };
    send_html(bot, chat_id, t_with("admin-staff-menu", &[("staff", &lines)]))
        .reply_markup(admin_staff_menu_keyboard())
        .await?;
    dialogue.update(State::AdminStaffMenu).await?;
    Ok(())
}

pub async fn staff_menu(bot: Bot, msg: Message, dialogue: MyDialogue, deps: HandlerDeps) -> HandlerResult {
    let text = text_of(&msg);
    if text == t("admin-button-add-staff") {
        prompt(&bot, msg.chat.id, "admin-request-staff-to-add", admin_back_to_admin_menu_keyboard()).await?;
        dialogue.update(State::AdminStaffAdd).await?;
    } else if text == t("admin-button-remove-staff") {
        prompt(&bot, msg.chat.id, "admin-request-staff-to-remove", admin_back_to_admin_menu_keyboard()).await?;
        dialogue.update(State::AdminStaffRemove).await?;
    } else {
        show_staff_menu(&bot, msg.chat.id, &dialogue, &deps).await?;
    }
    Ok(())
}

pub async fn staff_add(bot: Bot, msg: Message, dialogue: MyDialogue, deps: HandlerDeps) -> HandlerResult {
    let chat_id = msg.chat.id;
    let (user_ref, position) = match parse_staff_input(text_of(&msg)) {
        Ok(parsed) => parsed,
        Err(_) => return reply(&bot, chat_id, t("admin-staff-invalid-input")).await,
    };
    let Some(user) = lookup_user(&bot, chat_id, &dialogue, &deps, Ok(user_ref)).await? else {
        return Ok(());
    };

    {
        let conn = deps.conn()?;
        users::set_staff(&conn, user.user_id, &position)?;
    }
    log::info!("User {} joined staff as {:?}", user.user_id, position);
    reply(
        &bot,
        chat_id,
        t_with(
            "admin-staff-added",
            &[("user", &user_label(&user)), ("position", &escape(&position))],
        ),
    )
    .await?;
    show_admin_menu(&bot, chat_id, &dialogue).await
}

pub async fn staff_remove(bot: Bot, msg: Message, dialogue: MyDialogue, deps: HandlerDeps) -> HandlerResult {
    let chat_id = msg.chat.id;
    let Some(user) = lookup_user(&bot, chat_id, &dialogue, &deps, UserRef::parse(text_of(&msg))).await? else {
        return Ok(());
    };

    let removed = {
        let conn = deps.conn()?;
        users::clear_staff(&conn, user.user_id)?
    };
    let key = if removed {
        log::info!("User {} left staff", user.user_id);
        "admin-staff-removed"
    } else {
        "admin-staff-not-staff"
    };
    reply(&bot, chat_id, t_with(key, &[("user", &user_label(&user))])).await?;
    show_admin_menu(&bot, chat_id, &dialogue).await
}

// --- Bans ---

async fn show_ban_menu(bot: &Bot, chat_id: ChatId, dialogue: &MyDialogue, deps: &HandlerDeps) -> HandlerResult {
    let banned = {
        let conn = deps.conn()?;
        users::get_banned_users(&conn)?
    };
    let list = bullet_list(banned.iter().map(User::display_name), "admin-bans-empty");
    send_html(bot, chat_id, t_with("admin-bans-menu", &[("users", &list)]))
        .reply_markup(admin_bans_menu_keyboard())
        .await?;
    dialogue.update(State::AdminBanMenu).await?;
    Ok(())
}

pub async fn ban_menu(bot: Bot, msg: Message, dialogue: MyDialogue, deps: HandlerDeps) -> HandlerResult {
    let text = text_of(&msg);
    if text == t("admin-button-ban") {
        prompt(&bot, msg.chat.id, "admin-request-ban", admin_back_to_admin_menu_keyboard()).await?;
        dialogue.update(State::AdminBan).await?;
    } else if text == t("admin-button-unban") {
        prompt(&bot, msg.chat.id, "admin-request-unban", admin_back_to_admin_menu_keyboard()).await?;
        dialogue.update(State::AdminUnban).await?;
    } else {
        show_ban_menu(&bot, msg.chat.id, &dialogue, &deps).await?;
    }
    Ok(())
}

pub async fn ban(bot: Bot, msg: Message, dialogue: MyDialogue, deps: HandlerDeps) -> HandlerResult {
    let chat_id = msg.chat.id;
    let Some(user) = lookup_user(&bot, chat_id, &dialogue, &deps, UserRef::parse(text_of(&msg))).await? else {
        return Ok(());
    };

    {
        let conn = deps.conn()?;
        users::set_banned(&conn, user.user_id, true)?;
    }
    log::info!("User {} banned", user.user_id);
    reply(&bot, chat_id, t_with("admin-user-banned", &[("user", &user_label(&user))])).await?;
    show_admin_menu(&bot, chat_id, &dialogue).await
}

pub async fn unban(bot: Bot, msg: Message, dialogue: MyDialogue, deps: HandlerDeps) -> HandlerResult {
    let chat_id = msg.chat.id;
    let Some(user) = lookup_user(&bot, chat_id, &dialogue, &deps, UserRef::parse(text_of(&msg))).await? else {
        return Ok(());
    };

    let key = if user.is_banned {
        let conn = deps.conn()?;
        users::set_banned(&conn, user.user_id, false)?;
        log::info!("User {} unbanned", user.user_id);
        "admin-user-unbanned"
    } else {
        "admin-user-not-banned"
    };
    reply(&bot, chat_id, t_with(key, &[("user", &user_label(&user))])).await?;
    show_admin_menu(&bot, chat_id, &dialogue).await
}

/// The inline "back to admin menu" button under the card picker.
pub async fn admin_main_menu_callback(bot: Bot, q: CallbackQuery, dialogue: MyDialogue, state: State) -> HandlerResult {
    bot.answer_callback_query(q.id.clone()).await?;
    if !state.is_admin_authenticated() {
        return Ok(());
    }
    remove_inline_keyboard(&bot, q.message.as_ref()).await;
    if let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) {
        show_admin_menu(&bot, chat_id, &dialogue).await?;
    }
    Ok(())
}
