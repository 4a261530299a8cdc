//! Reply and inline keyboards

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

use crate::core::config::requisites::CARD_SLOTS;
use crate::core::profit::Decision;
use crate::i18n::{t, t_with};
use crate::storage::curators::Curator;
use crate::telegram::callback::{CallbackAction, WorkDirection};

fn reply_keyboard(rows: &[&[&str]]) -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = rows
        .iter()
        .map(|row| row.iter().map(|key| KeyboardButton::new(t(key))).collect())
        .collect();
    KeyboardMarkup::new(rows).resize_keyboard()
}

fn inline_button(caption: String, action: CallbackAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(caption, action.to_string())
}

pub fn continue_keyboard() -> KeyboardMarkup {
    reply_keyboard(&[&["button-continue"]]).one_time_keyboard()
}

pub fn experience_keyboard() -> KeyboardMarkup {
    reply_keyboard(&[&["button-yes", "button-no"]]).one_time_keyboard()
}

pub fn main_menu_keyboard() -> KeyboardMarkup {
    reply_keyboard(&[&["button-main-menu", "button-profile"], &["button-work-panel"]])
}

pub fn profile_inline_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            inline_button(t("inline-button-direct-requisites"), CallbackAction::DirectRequisites),
            inline_button(t("inline-button-custom-tag"), CallbackAction::CustomTag),
        ],
        vec![
            inline_button(t("inline-button-choose-curator"), CallbackAction::ChooseCurator),
            inline_button(t("inline-button-submit-profit"), CallbackAction::SubmitProfit),
        ],
    ])
}

pub fn curators_inline_keyboard(curators: &[Curator]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        curators
            .iter()
            .map(|c| vec![inline_button(format!("@{}", c.username), CallbackAction::Curator(c.user_id))]),
    )
}

pub fn work_panel_directions_keyboard() -> InlineKeyboardMarkup {
    let button = |direction: WorkDirection| inline_button(t(direction.caption_key()), CallbackAction::Work(direction));
    InlineKeyboardMarkup::new(vec![
        vec![button(WorkDirection::Escort), button(WorkDirection::Trade)],
        vec![button(WorkDirection::Mreo)],
        vec![button(WorkDirection::MtzShop), button(WorkDirection::Vape)],
    ])
}

pub fn check_decision_keyboard(check_id: i64) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        inline_button(
            t("check-button-approve"),
            CallbackAction::Check {
                decision: Decision::Approve,
                check_id,
            },
        ),
        inline_button(
            t("check-button-reject"),
            CallbackAction::Check {
                decision: Decision::Reject,
                check_id,
            },
        ),
    ]])
}

// --- Admin keyboards ---

pub fn admin_main_menu_keyboard() -> KeyboardMarkup {
    reply_keyboard(&[
        &["admin-button-edit-requisites", "admin-button-manage-stopped-cards"],
        &["admin-button-change-password", "admin-button-edit-personal-link"],
        &["admin-button-curators", "admin-button-staff"],
        &["admin-button-bans", "admin-button-statistics"],
        &["admin-button-back-to-bot-main-menu"],
    ])
}

pub fn admin_choose_card_keyboard() -> InlineKeyboardMarkup {
    let cards: Vec<InlineKeyboardButton> = (1..=CARD_SLOTS)
        .map(|order| {
            inline_button(
                t_with("admin-button-card-template", &[("card_order", &order.to_string())]),
                CallbackAction::EditCard(order),
            )
        })
        .collect();
    InlineKeyboardMarkup::new(vec![
        cards,
        vec![inline_button(
            t("admin-button-back-to-admin-main-menu"),
            CallbackAction::AdminMainMenu,
        )],
    ])
}

pub fn admin_stopped_cards_menu_keyboard() -> KeyboardMarkup {
    reply_keyboard(&[
        &["admin-button-add-stopped-card", "admin-button-remove-stopped-card"],
        &["admin-button-back-to-admin-main-menu"],
    ])
}

pub fn admin_curators_menu_keyboard() -> KeyboardMarkup {
    reply_keyboard(&[
        &["admin-button-add-curator", "admin-button-remove-curator"],
        &["admin-button-back-to-admin-main-menu"],
    ])
}

pub fn admin_staff_menu_keyboard() -> KeyboardMarkup {
    reply_keyboard(&[
        &["admin-button-add-staff", "admin-button-remove-staff"],
        &["admin-button-back-to-admin-main-menu"],
    ])
}

pub fn admin_bans_menu_keyboard() -> KeyboardMarkup {
    reply_keyboard(&[
        &["admin-button-ban", "admin-button-unban"],
        &["admin-button-back-to-admin-main-menu"],
    ])
}

pub fn admin_back_to_admin_menu_keyboard() -> KeyboardMarkup {
    reply_keyboard(&[&["admin-button-back-to-admin-main-menu"]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_card_keyboard_has_one_button_per_slot() {
        let keyboard = admin_choose_card_keyboard();
        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(keyboard.inline_keyboard[0].len(), CARD_SLOTS as usize);
        assert_eq!(keyboard.inline_keyboard[0][2].text, "Карта 3");
    }

    #[test]
    fn test_main_menu_layout() {
        let keyboard = main_menu_keyboard();
        assert_eq!(keyboard.keyboard.len(), 2);
        assert_eq!(keyboard.keyboard[0][1].text, t("button-profile"));
    }
}
