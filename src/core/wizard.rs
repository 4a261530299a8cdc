//! Input validation and accumulated data for the linear wizards
//!
//! Handlers keep the partially collected values inside the dialogue state;
//! everything here is pure so each step can be checked without Telegram.

use crate::core::config::requisites::{CARD_SLOTS, MAX_TAG_LEN};
use crate::core::requisites::Requisite;

/// Why a wizard step refused the input. The step stays where it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("empty input")]
    Empty,
    #[error("not a whole number")]
    NotANumber,
    #[error("amount must not be negative")]
    NegativeAmount,
    #[error("amount must be positive")]
    NonPositiveAmount,
    #[error("max amount {max} is below min amount {min}")]
    MaxBelowMin { min: i64, max: i64 },
    #[error("percentage must be within 0..=100")]
    PercentageOutOfRange,
    #[error("card slot must be within 1..=3")]
    UnknownCardSlot,
    #[error("tag may only contain letters, digits and underscores")]
    InvalidTag,
    #[error("tag is longer than 32 characters")]
    TagTooLong,
}

/// Registration answer to "do you have experience?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Experience {
    Yes,
    No,
}

impl Experience {
    /// Matches the reply keyboard captions; anything else is rejected.
    pub fn from_answer(text: &str, yes_caption: &str, no_caption: &str) -> Option<Self> {
        let text = text.trim();
        if text == yes_caption {
            Some(Self::Yes)
        } else if text == no_caption {
            Some(Self::No)
        } else {
            None
        }
    }
}

/// Card fields, in the order the admin wizard asks for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Number,
    Name,
    Bank,
    MinAmount,
    MaxAmount,
    Percentage,
}

impl CardField {
    /// Lexicon key of the prompt for this field.
    pub fn prompt_key(self) -> &'static str {
        match self {
            Self::Number => "admin-request-card-number",
            Self::Name => "admin-request-card-name",
            Self::Bank => "admin-request-bank-name",
            Self::MinAmount => "admin-request-min-amount",
            Self::MaxAmount => "admin-request-max-amount",
            Self::Percentage => "admin-request-percentage",
        }
    }
}

/// Card values collected so far for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    pub card_order: i64,
    pub card_number: Option<String>,
    pub card_name: Option<String>,
    pub bank_name: Option<String>,
    pub min_amount: Option<i64>,
    pub max_amount: Option<i64>,
}

/// Outcome of feeding one answer into a [`CardDraft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardStep {
    /// More answers are needed, see [`CardDraft::pending_field`]
    Next(CardDraft),
    /// All fields collected
    Done(Requisite),
}

impl CardDraft {
    pub fn new(card_order: i64) -> Result<Self, InputError> {
        if !(1..=CARD_SLOTS).contains(&card_order) {
            return Err(InputError::UnknownCardSlot);
        }
        Ok(Self {
            card_order,
            card_number: None,
            card_name: None,
            bank_name: None,
            min_amount: None,
            max_amount: None,
        })
    }

    /// The field the next answer fills in.
    pub fn pending_field(&self) -> CardField {
        if self.card_number.is_none() {
            CardField::Number
        } else if self.card_name.is_none() {
            CardField::Name
        } else if self.bank_name.is_none() {
            CardField::Bank
        } else if self.min_amount.is_none() {
            CardField::MinAmount
        } else if self.max_amount.is_none() {
            CardField::MaxAmount
        } else {
            CardField::Percentage
        }
    }

    /// Applies the admin's answer to the pending field.
    pub fn accept(mut self, input: &str) -> Result<CardStep, InputError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(InputError::Empty);
        }

        match self.pending_field() {
            CardField::Number => self.card_number = Some(input.to_string()),
            CardField::Name => self.card_name = Some(input.to_string()),
            CardField::Bank => self.bank_name = Some(input.to_string()),
            CardField::MinAmount => self.min_amount = Some(parse_amount(input)?),
            CardField::MaxAmount => {
                let max = parse_amount(input)?;
                let min = self.min_amount.unwrap_or_default();
                if max < min {
                    return Err(InputError::MaxBelowMin { min, max });
                }
                self.max_amount = Some(max);
            }
            CardField::Percentage => {
                let percentage = parse_percentage(input)?;
                return Ok(CardStep::Done(Requisite {
                    card_order: self.card_order,
                    card_number: self.card_number.unwrap_or_default(),
                    card_name: self.card_name.unwrap_or_default(),
                    bank_name: self.bank_name.unwrap_or_default(),
                    min_amount: self.min_amount.unwrap_or_default(),
                    max_amount: self.max_amount.unwrap_or_default(),
                    percentage,
                }));
            }
        }

        Ok(CardStep::Next(self))
    }
}

fn parse_integer(input: &str) -> Result<i64, InputError> {
    input.trim().parse::<i64>().map_err(|_| InputError::NotANumber)
}

/// Deposit bounds: whole, non-negative.
pub fn parse_amount(input: &str) -> Result<i64, InputError> {
    let value = parse_integer(input)?;
    if value < 0 {
        return Err(InputError::NegativeAmount);
    }
    Ok(value)
}

pub fn parse_percentage(input: &str) -> Result<i64, InputError> {
    let value = parse_integer(input)?;
    if !(0..=100).contains(&value) {
        return Err(InputError::PercentageOutOfRange);
    }
    Ok(value)
}

/// Amount claimed in a profit check: whole and strictly positive.
pub fn parse_profit_amount(input: &str) -> Result<i64, InputError> {
    let value = parse_integer(&input.replace([' ', '_'], ""))?;
    if value <= 0 {
        return Err(InputError::NonPositiveAmount);
    }
    Ok(value)
}

/// Normalizes a custom profile tag: trims, drops a leading `#`.
pub fn normalize_tag(input: &str) -> Result<String, InputError> {
    let tag = input.trim();
    let tag = tag.strip_prefix('#').unwrap_or(tag).trim();
    if tag.is_empty() {
        return Err(InputError::Empty);
    }
    if tag.chars().count() > MAX_TAG_LEN {
        return Err(InputError::TagTooLong);
    }
    if !tag.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(InputError::InvalidTag);
    }
    Ok(tag.to_string())
}

/// A user typed by an admin: `@username`, `username` or a numeric id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRef {
    Id(i64),
    Username(String),
}

impl UserRef {
    pub fn parse(input: &str) -> Result<Self, InputError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(InputError::Empty);
        }
        if let Ok(id) = input.parse::<i64>() {
            return Ok(Self::Id(id));
        }
        let name = input.strip_prefix('@').unwrap_or(input);
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(InputError::InvalidTag);
        }
        Ok(Self::Username(name.to_string()))
    }
}

/// Splits `<user> <position...>` entered when adding staff.
pub fn parse_staff_input(input: &str) -> Result<(UserRef, String), InputError> {
    let input = input.trim();
    let (who, position) = match input.split_once(char::is_whitespace) {
        Some((who, rest)) => (who, rest.trim()),
        None => (input, ""),
    };
    let user = UserRef::parse(who)?;
    if position.is_empty() {
        return Err(InputError::Empty);
    }
    Ok((user, position.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn feed(mut draft: CardDraft, answers: &[&str]) -> Result<CardStep, InputError> {
        let (last, head) = answers.split_last().expect("answers");
        for answer in head {
            draft = match draft.accept(answer)? {
                CardStep::Next(next) => next,
                CardStep::Done(_) => panic!("wizard finished early"),
            };
        }
        draft.accept(last)
    }

    #[test]
    fn test_card_wizard_collects_all_fields_in_order() {
        let draft = CardDraft::new(2).unwrap();
        assert_eq!(draft.pending_field(), CardField::Number);

        let step = feed(
            draft,
            &["2200 7001 2345 6789", "Иван И.", "Т-Банк", "1000", "50000", "80"],
        )
        .unwrap();

        assert_eq!(
            step,
            CardStep::Done(Requisite {
                card_order: 2,
                card_number: "2200 7001 2345 6789".to_string(),
                card_name: "Иван И.".to_string(),
                bank_name: "Т-Банк".to_string(),
                min_amount: 1000,
                max_amount: 50000,
                percentage: 80,
            })
        );
    }

    #[test]
    fn test_card_wizard_keeps_step_on_invalid_number() {
        let draft = CardDraft::new(1).unwrap();
        let draft = match feed(draft, &["1111", "Name", "Bank"]).unwrap() {
            CardStep::Next(d) => d,
            CardStep::Done(_) => panic!("not done yet"),
        };
        assert_eq!(draft.pending_field(), CardField::MinAmount);

        assert_eq!(draft.clone().accept("много"), Err(InputError::NotANumber));
        assert_eq!(draft.clone().accept("-5"), Err(InputError::NegativeAmount));
        assert_eq!(draft.pending_field(), CardField::MinAmount);
    }

    #[test]
    fn test_card_wizard_rejects_max_below_min() {
        let draft = CardDraft::new(1).unwrap();
        let result = feed(draft, &["1111", "Name", "Bank", "5000", "100"]);
        assert_eq!(result, Err(InputError::MaxBelowMin { min: 5000, max: 100 }));
    }

    #[test]
    fn test_card_wizard_percentage_bounds() {
        let draft = CardDraft::new(3).unwrap();
        let result = feed(draft.clone(), &["1111", "Name", "Bank", "0", "0", "101"]);
        assert_eq!(result, Err(InputError::PercentageOutOfRange));

        let result = feed(draft, &["1111", "Name", "Bank", "0", "0", "0"]);
        assert!(matches!(result, Ok(CardStep::Done(r)) if r.percentage == 0));
    }

    #[test]
    fn test_card_slot_bounds() {
        assert_eq!(CardDraft::new(0), Err(InputError::UnknownCardSlot));
        assert_eq!(CardDraft::new(4), Err(InputError::UnknownCardSlot));
    }

    #[test]
    fn test_experience_only_accepts_captions() {
        assert_eq!(Experience::from_answer("Да", "Да", "Нет"), Some(Experience::Yes));
        assert_eq!(Experience::from_answer(" Нет ", "Да", "Нет"), Some(Experience::No));
        assert_eq!(Experience::from_answer("да", "Да", "Нет"), None);
        assert_eq!(Experience::Yes.to_string(), "yes");
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("#wolf_7"), Ok("wolf_7".to_string()));
        assert_eq!(normalize_tag("  Волк "), Ok("Волк".to_string()));
        assert_eq!(normalize_tag("#"), Err(InputError::Empty));
        assert_eq!(normalize_tag("two words"), Err(InputError::InvalidTag));
        assert_eq!(normalize_tag(&"a".repeat(33)), Err(InputError::TagTooLong));
    }

    #[test]
    fn test_profit_amount() {
        assert_eq!(parse_profit_amount("15 000"), Ok(15000));
        assert_eq!(parse_profit_amount("0"), Err(InputError::NonPositiveAmount));
        assert_eq!(parse_profit_amount("abc"), Err(InputError::NotANumber));
    }

    #[test]
    fn test_user_ref_and_staff_input() {
        assert_eq!(UserRef::parse("@dealer"), Ok(UserRef::Username("dealer".to_string())));
        assert_eq!(UserRef::parse("123456"), Ok(UserRef::Id(123456)));
        assert_eq!(UserRef::parse("@"), Err(InputError::InvalidTag));

        assert_eq!(
            parse_staff_input("@dealer старший менеджер"),
            Ok((UserRef::Username("dealer".to_string()), "старший менеджер".to_string()))
        );
        assert_eq!(parse_staff_input("@dealer"), Err(InputError::Empty));
    }
}
