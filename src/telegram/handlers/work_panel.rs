//! Work panel, direction stubs and staff shifts

use teloxide::prelude::*;

use super::types::{send_html, sender_id, HandlerDeps, HandlerResult};
use crate::i18n::{t, t_with};
use crate::storage::users;
use crate::telegram::callback::WorkDirection;
use crate::telegram::keyboards::work_panel_directions_keyboard;
use crate::telegram::render::staff_lines;

pub async fn on_work_panel_button(bot: Bot, msg: Message, deps: HandlerDeps) -> HandlerResult {
    let on_shift: Vec<_> = {
        let conn = deps.conn()?;
        users::get_staff(&conn)?.into_iter().filter(|s| s.is_on_shift).collect()
    };

    let staff = if on_shift.is_empty() {
        t("work-panel-no-staff")
    } else {
        staff_lines(&on_shift)
    };
    send_html(&bot, msg.chat.id, t_with("work-panel-text", &[("staff", &staff)]))
        .reply_markup(work_panel_directions_keyboard())
        .await?;
    Ok(())
}

/// Directions are not wired to anything yet; the press gets a short notice.
pub async fn on_direction(bot: Bot, q: CallbackQuery, direction: WorkDirection) -> HandlerResult {
    let notice = match direction {
        WorkDirection::Trade => t("work-direction-trade-soon"),
        other => t_with("work-direction-stub", &[("direction", &t(other.caption_key()))]),
    };
    log::info!("User {} opened work direction {}", q.from.id.0, direction);
    bot.answer_callback_query(q.id.clone()).text(notice).await?;
    Ok(())
}

/// `/shift` for staff members.
pub async fn toggle_shift(bot: Bot, msg: Message, deps: HandlerDeps) -> HandlerResult {
    let Some(user_id) = sender_id(&msg) else {
        return Ok(());
    };

    let toggled = {
        let conn = deps.conn()?;
        users::toggle_shift(&conn, user_id)?
    };
    let key = match toggled {
        Some(true) => "shift-started",
        Some(false) => "shift-ended",
        None => "shift-not-staff",
    };
    if let Some(on_shift) = toggled {
        log::info!("Staff {} is now {}", user_id, if on_shift { "on shift" } else { "off shift" });
    }
    bot.send_message(msg.chat.id, t(key)).await?;
    Ok(())
}
