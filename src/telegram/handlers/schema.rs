//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;

use super::commands::{handle_command, handle_idle_message};
use super::types::{user_id_of, HandlerDeps, HandlerError, HandlerResult};
use super::{admin, profile, profit, registration, work_panel};
use crate::i18n::t;
use crate::storage::users;
use crate::telegram::bot::Command;
use crate::telegram::callback::CallbackAction;
use crate::telegram::state::{DialogueStorage, MyDialogue, State};

/// Creates the dispatcher schema for the bot.
///
/// The tree expects a [`HandlerDeps`] and an `Arc<DialogueStorage>` in the
/// dispatcher's dependency map. Production and integration tests share it.
pub fn schema() -> UpdateHandler<HandlerError> {
    dptree::entry()
        // Banned users are stopped before anything else
        .branch(banned_message_guard())
        .branch(banned_callback_guard())
        .branch(message_handler())
        .branch(callback_handler())
        .branch(unknown_callback_handler())
}

/// Whether the sender is banned. Storage failures let the update through.
fn sender_banned(deps: &HandlerDeps, user: Option<&teloxide::types::User>) -> bool {
    let Some(user) = user else {
        return false;
    };
    let user_id = user_id_of(user);
    match deps.conn() {
        Ok(conn) => users::is_banned(&conn, user_id).unwrap_or_else(|e| {
            log::error!("Failed to check ban status of {}: {}", user_id, e);
            false
        }),
        Err(_) => false,
    }
}

fn banned_message_guard() -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message, deps: HandlerDeps| sender_banned(&deps, msg.from.as_ref()))
        .endpoint(|bot: Bot, msg: Message| async move {
            log::info!("Ignoring message from banned user in chat {}", msg.chat.id.0);
            if msg.chat.is_private() {
                bot.send_message(msg.chat.id, t("user-banned-message")).await?;
            }
            Ok(())
        })
}

fn banned_callback_guard() -> UpdateHandler<HandlerError> {
    Update::filter_callback_query()
        .filter(|q: CallbackQuery, deps: HandlerDeps| sender_banned(&deps, Some(&q.from)))
        .endpoint(|bot: Bot, q: CallbackQuery| async move {
            log::info!("Ignoring callback from banned user {}", q.from.id.0);
            bot.answer_callback_query(q.id.clone())
                .text(t("user-banned-message"))
                .show_alert(true)
                .await?;
            Ok(())
        })
}

/// Private-chat messages, routed by command first and dialogue state second.
fn message_handler() -> UpdateHandler<HandlerError> {
    use dptree::case;

    Update::filter_message()
        .filter(|msg: Message| msg.chat.is_private())
        .enter_dialogue::<Message, DialogueStorage, State>()
        .branch(dptree::entry().filter_command::<Command>().endpoint(handle_command))
        .branch(dptree::filter(admin::is_back_to_admin_menu).endpoint(admin::back_to_menu))
        .branch(case![State::Idle].endpoint(handle_idle_message))
        // Registration
        .branch(case![State::RegistrationWelcome].endpoint(registration::welcome))
        .branch(case![State::RegistrationExperience].endpoint(registration::experience))
        .branch(case![State::RegistrationTimeCommitment { experience }].endpoint(registration::time_commitment))
        .branch(case![State::RegistrationSource { experience, time_commitment }].endpoint(registration::source))
        // Profile and profit checks
        .branch(case![State::ProfileUniqueTag].endpoint(profile::receive_unique_tag))
        .branch(case![State::ProfitAmount].endpoint(profit::receive_amount))
        .branch(case![State::ProfitPhoto { amount }].endpoint(profit::receive_photo))
        // Admin panel
        .branch(case![State::AdminPassword].endpoint(admin::password))
        .branch(case![State::AdminMenu].endpoint(admin::menu))
        .branch(case![State::AdminNewPassword].endpoint(admin::new_password))
        .branch(case![State::AdminPersonalLink].endpoint(admin::personal_link))
        .branch(case![State::AdminChooseCard].endpoint(admin::choose_card_text))
        .branch(case![State::AdminCard { draft }].endpoint(admin::card_step))
        .branch(case![State::AdminStopMenu].endpoint(admin::stop_menu))
        .branch(case![State::AdminStopAdd].endpoint(admin::stop_add))
        .branch(case![State::AdminStopRemove].endpoint(admin::stop_remove))
        .branch(case![State::AdminCuratorMenu].endpoint(admin::curator_menu))
        .branch(case![State::AdminCuratorAdd].endpoint(admin::curator_add))
        .branch(case![State::AdminCuratorRemove].endpoint(admin::curator_remove))
        .branch(case![State::AdminStaffMenu].endpoint(admin::staff_menu))
        .branch(case![State::AdminStaffAdd].endpoint(admin::staff_add))
        .branch(case![State::AdminStaffRemove].endpoint(admin::staff_remove))
        .branch(case![State::AdminBanMenu].endpoint(admin::ban_menu))
        .branch(case![State::AdminBan].endpoint(admin::ban))
        .branch(case![State::AdminUnban].endpoint(admin::unban))
}

/// Inline button presses with data we understand.
fn callback_handler() -> UpdateHandler<HandlerError> {
    Update::filter_callback_query()
        .filter_map(|q: CallbackQuery| q.data.as_deref().and_then(CallbackAction::parse))
        .enter_dialogue::<CallbackQuery, DialogueStorage, State>()
        .endpoint(handle_callback)
}

async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    action: CallbackAction,
    dialogue: MyDialogue,
    state: State,
    deps: HandlerDeps,
) -> HandlerResult {
    log::debug!("Callback {} from user {}", action, q.from.id.0);

    match action {
        CallbackAction::DirectRequisites => profile::direct_requisites(bot, q, deps).await,
        CallbackAction::CustomTag => profile::custom_tag(bot, q, dialogue).await,
        CallbackAction::ChooseCurator => profile::choose_curator(bot, q, deps).await,
        CallbackAction::Curator(curator_id) => profile::pick_curator(bot, q, curator_id, deps).await,
        CallbackAction::SubmitProfit => profit::submit_profit(bot, q, dialogue).await,
        CallbackAction::EditCard(card_order) if state.is_admin_authenticated() => {
            admin::start_card_edit(bot, q, card_order, dialogue).await
        }
        CallbackAction::EditCard(_) => {
            bot.answer_callback_query(q.id.clone()).await?;
            Ok(())
        }
        CallbackAction::AdminMainMenu => admin::admin_main_menu_callback(bot, q, dialogue, state).await,
        CallbackAction::Check { decision, check_id } => profit::decide_check(bot, q, decision, check_id, deps).await,
        CallbackAction::Work(direction) => work_panel::on_direction(bot, q, direction).await,
    }
}

/// Stale or foreign buttons: stop the client spinner and do nothing else.
fn unknown_callback_handler() -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(|bot: Bot, q: CallbackQuery| async move {
        log::debug!("Unhandled callback data {:?}", q.data);
        bot.answer_callback_query(q.id.clone()).await?;
        Ok(())
    })
}
