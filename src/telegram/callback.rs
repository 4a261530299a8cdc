//! Typed inline-button payloads
//!
//! Callback data is parsed once at the routing edge; handlers match on
//! [`CallbackAction`] instead of comparing strings.

use std::fmt;
use std::str::FromStr;

use crate::core::profit::Decision;

/// Work panel directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum WorkDirection {
    Escort,
    Trade,
    Mreo,
    MtzShop,
    Vape,
}

impl WorkDirection {
    pub fn caption_key(self) -> &'static str {
        match self {
            Self::Escort => "button-escort",
            Self::Trade => "button-trade-soon",
            Self::Mreo => "button-mreo",
            Self::MtzShop => "button-mtz-shop",
            Self::Vape => "button-vape",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    DirectRequisites,
    CustomTag,
    ChooseCurator,
    Curator(i64),
    SubmitProfit,
    EditCard(i64),
    AdminMainMenu,
    Check { decision: Decision, check_id: i64 },
    Work(WorkDirection),
}

impl CallbackAction {
    /// `None` for data this bot never produced.
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "direct_requisites" => return Some(Self::DirectRequisites),
            "custom_tag" => return Some(Self::CustomTag),
            "choose_curator" => return Some(Self::ChooseCurator),
            "submit_profit" => return Some(Self::SubmitProfit),
            "admin_main_menu" => return Some(Self::AdminMainMenu),
            _ => {}
        }

        let (kind, rest) = data.split_once(':')?;
        match kind {
            "curator" => rest.parse().ok().map(Self::Curator),
            "edit_card" => rest.parse().ok().map(Self::EditCard),
            "work" => WorkDirection::from_str(rest).ok().map(Self::Work),
            "check" => {
                let (decision, id) = rest.split_once(':')?;
                Some(Self::Check {
                    decision: Decision::from_str(decision).ok()?,
                    check_id: id.parse().ok()?,
                })
            }
            _ => None,
        }
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectRequisites => f.write_str("direct_requisites"),
            Self::CustomTag => f.write_str("custom_tag"),
            Self::ChooseCurator => f.write_str("choose_curator"),
            Self::Curator(id) => write!(f, "curator:{}", id),
            Self::SubmitProfit => f.write_str("submit_profit"),
            Self::EditCard(order) => write!(f, "edit_card:{}", order),
            Self::AdminMainMenu => f.write_str("admin_main_menu"),
            Self::Check { decision, check_id } => write!(f, "check:{}:{}", decision, check_id),
            Self::Work(direction) => write!(f, "work:{}", direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parses_plain_actions() {
        assert_eq!(CallbackAction::parse("direct_requisites"), Some(CallbackAction::DirectRequisites));
        assert_eq!(CallbackAction::parse("admin_main_menu"), Some(CallbackAction::AdminMainMenu));
    }

    #[test]
    fn test_parses_actions_with_payload() {
        assert_eq!(CallbackAction::parse("curator:42"), Some(CallbackAction::Curator(42)));
        assert_eq!(CallbackAction::parse("edit_card:3"), Some(CallbackAction::EditCard(3)));
        assert_eq!(
            CallbackAction::parse("check:reject:17"),
            Some(CallbackAction::Check {
                decision: Decision::Reject,
                check_id: 17
            })
        );
        assert_eq!(
            CallbackAction::parse("work:mtz_shop"),
            Some(CallbackAction::Work(WorkDirection::MtzShop))
        );
    }

    #[test]
    fn test_rejects_foreign_data() {
        assert_eq!(CallbackAction::parse("menu:back"), None);
        assert_eq!(CallbackAction::parse("check:maybe:1"), None);
        assert_eq!(CallbackAction::parse("edit_card:x"), None);
        assert_eq!(CallbackAction::parse(""), None);
    }

    #[test]
    fn test_encoded_data_parses_back() {
        let action = CallbackAction::Check {
            decision: Decision::Approve,
            check_id: 9,
        };
        assert_eq!(action.to_string(), "check:approve:9");
        assert_eq!(CallbackAction::parse(&action.to_string()), Some(action));
    }
}
