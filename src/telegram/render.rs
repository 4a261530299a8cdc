//! Message texts assembled from stored data
//!
//! Everything a user typed is HTML-escaped here, since messages go out in HTML mode.

use chrono::NaiveDate;
use teloxide::utils::html::escape;

use crate::core::profit::ProfitTotals;
use crate::core::requisites::ResolvedRequisites;
use crate::i18n::{t, t_with};
use crate::storage::curators::Curator;
use crate::storage::User;

/// The "direct requisites" message: every slot in order, stopped ones blanked.
pub fn requisites_text(resolved: &ResolvedRequisites) -> String {
    let mut text = t("direct-requisites-header");

    for card in &resolved.cards {
        let req = &card.requisite;
        let order = req.card_order.to_string();
        if card.is_stopped() {
            text.push_str(&t_with("card-stopped-template", &[("card_order", &order)]));
            continue;
        }
        text.push_str(&t_with(
            "card-template",
            &[
                ("card_order", &order),
                ("min_amount", &req.min_amount.to_string()),
                ("max_amount", &req.max_amount.to_string()),
                ("card_number", &escape(&req.card_number)),
                ("card_name", &escape(&req.card_name)),
                ("bank_name", &escape(&req.bank_name)),
                ("percentage", &req.percentage.to_string()),
            ],
        ));
    }

    if let Some(link) = &resolved.personal_link {
        text.push_str(&t_with("personal-requisites-contact", &[("link", &escape(link))]));
    }

    if !resolved.unmatched_stops.is_empty() {
        let list = resolved
            .unmatched_stops
            .iter()
            .map(|entry| escape(entry))
            .collect::<Vec<_>>()
            .join(", ");
        text.push_str(&t_with("stopped-cards-display", &[("stopped_cards_list", &list)]));
    }

    text.trim_end().to_string()
}

pub fn profile_text(user: &User, curator: Option<&str>, totals: ProfitTotals, today: NaiveDate) -> String {
    let unique_tag = match &user.unique_tag {
        Some(tag) => format!("#{}", escape(tag)),
        None => t("profile-tag-not-set"),
    };
    let curator = match curator {
        Some(name) => format!("@{}", escape(name)),
        None => t("profile-curator-not-set"),
    };
    let username = user.username.as_deref().map(escape).unwrap_or_else(|| t("not-available"));

    t_with(
        "profile-text",
        &[
            ("username", &username),
            ("user_id", &user.user_id.to_string()),
            ("unique_tag", &unique_tag),
            ("current_date", &today.format("%d.%m.%Y").to_string()),
            ("curator", &curator),
            ("profits_count", &totals.count.to_string()),
            ("profits_amount", &totals.amount.to_string()),
        ],
    )
}

/// `@username` or the id, escaped.
pub fn user_label(user: &User) -> String {
    escape(&user.display_name())
}

/// One line per staff member with the shift marker.
pub fn staff_lines(staff: &[User]) -> String {
    staff
        .iter()
        .map(|member| {
            let key = if member.is_on_shift {
                "staff-line-on-shift"
            } else {
                "staff-line-off-shift"
            };
            let position = member.position.as_deref().map(escape).unwrap_or_default();
            t_with(key, &[("user", &user_label(member)), ("position", &position)])
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `- item` lines, or the given placeholder for an empty list.
pub fn bullet_list<I>(items: I, empty_key: &str) -> String
where
    I: IntoIterator<Item = String>,
{
    let lines: Vec<String> = items.into_iter().map(|item| format!("- {}", escape(&item))).collect();
    if lines.is_empty() {
        t(empty_key)
    } else {
        lines.join("\n")
    }
}

pub fn curator_list(curators: &[Curator]) -> String {
    bullet_list(
        curators.iter().map(|c| format!("@{} ({})", c.username, c.user_id)),
        "admin-curators-empty",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::requisites::{resolve, Requisite};

    fn card(order: i64, number: &str) -> Requisite {
        Requisite {
            card_order: order,
            card_number: number.to_string(),
            card_name: format!("Holder {}", order),
            bank_name: "Bank".to_string(),
            min_amount: 1000,
            max_amount: 5000,
            percentage: 75,
        }
    }

    fn user() -> User {
        User {
            user_id: 42,
            username: Some("wolf".to_string()),
            first_name: Some("Волк".to_string()),
            registration_complete: true,
            experience: Some("yes".to_string()),
            time_commitment: None,
            source: None,
            unique_tag: None,
            curator_id: None,
            role: None,
            position: None,
            is_on_shift: false,
            is_banned: false,
        }
    }

    #[test]
    fn test_stopped_card_is_blanked() {
        let resolved = resolve(
            vec![card(1, "2200 0000 0000 1111"), card(2, "2200 0000 0000 2222")],
            &["2222".to_string(), "9999 8888".to_string()],
            Some("https://t.me/owner".to_string()),
        );
        let text = requisites_text(&resolved);

        assert!(text.contains("2200 0000 0000 1111"));
        assert!(!text.contains("2200 0000 0000 2222"));
        assert!(!text.contains("Holder 2"));
        assert!(text.contains("https://t.me/owner"));
        assert!(text.contains("9999 8888"));
        assert!(!text.contains("\\n"));
    }

    #[test]
    fn test_card_fields_are_escaped() {
        let mut evil = card(1, "2200 1111");
        evil.card_name = "<b>Boss</b>".to_string();
        let text = requisites_text(&resolve(vec![evil], &[], None));

        assert!(text.contains("&lt;b&gt;Boss&lt;/b&gt;"));
    }

    #[test]
    fn test_profile_text_formats_date_and_placeholders() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let text = profile_text(&user(), None, ProfitTotals { count: 2, amount: 30000 }, today);

        assert!(text.contains("09.03.2026"));
        assert!(text.contains("(не установлен)"));
        assert!(text.contains("(не выбран)"));
        assert!(text.contains("30000"));

        let mut tagged = user();
        tagged.unique_tag = Some("wolf_7".to_string());
        let text = profile_text(&tagged, Some("boss"), ProfitTotals::default(), today);
        assert!(text.contains("#wolf_7"));
        assert!(text.contains("@boss"));
    }

    #[test]
    fn test_bullet_list_placeholder() {
        assert_eq!(bullet_list(Vec::new(), "admin-stopped-cards-empty"), "(нет стопнутых карт)");
        assert_eq!(bullet_list(vec!["1".to_string(), "2".to_string()], "x"), "- 1\n- 2");
    }
}
