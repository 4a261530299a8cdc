//! Requisites resolution against the stop-list
//!
//! The admin keeps a handful of card slots and a free-form stop-list. Admins
//! type stop entries by hand, so an entry may be the full number, the slot
//! order ("2", "#2", "карта 2") or a fragment such as the last four digits.
//! [`resolve`] pairs every card with the first heuristic that stops it.

/// A payment card slot shown to users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requisite {
    pub card_order: i64,
    pub card_number: String,
    pub card_name: String,
    pub bank_name: String,
    pub min_amount: i64,
    pub max_amount: i64,
    pub percentage: i64,
}

impl Requisite {
    /// Digit-only projection of the card number.
    pub fn digits(&self) -> String {
        digits_of(&self.card_number)
    }

    /// A slot that was never filled in (number is `-` or has no digits).
    pub fn is_placeholder(&self) -> bool {
        self.digits().is_empty()
    }
}

/// Which heuristic matched a stop entry to a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopMatch {
    Exact,
    Order,
    Substring,
}

/// A card together with the stop entry that disabled it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCard {
    pub requisite: Requisite,
    pub stopped_by: Option<(String, StopMatch)>,
}

impl ResolvedCard {
    pub fn is_stopped(&self) -> bool {
        self.stopped_by.is_some()
    }
}

/// Result of merging the card table with the stop-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequisites {
    pub cards: Vec<ResolvedCard>,
    /// Stop entries that did not refer to any configured card
    pub unmatched_stops: Vec<String>,
    pub personal_link: Option<String>,
}

impl ResolvedRequisites {
    pub fn active_cards(&self) -> impl Iterator<Item = &Requisite> {
        self.cards.iter().filter(|c| !c.is_stopped()).map(|c| &c.requisite)
    }
}

/// Keeps only ASCII digits.
pub fn digits_of(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Parses a slot reference such as `2`, `#2`, `№ 2`, `card #2` or `Карта №2`.
///
/// At most two digits are accepted so a card fragment is never read as an order.
pub fn parse_card_reference(entry: &str) -> Option<i64> {
    let lowered = entry.trim().to_lowercase();
    let mut rest = lowered.as_str();
    for word in ["карта", "card"] {
        if let Some(stripped) = rest.strip_prefix(word) {
            rest = stripped.trim_start();
            break;
        }
    }
    for sign in ["#", "№"] {
        if let Some(stripped) = rest.strip_prefix(sign) {
            rest = stripped.trim_start();
            break;
        }
    }
    let rest = rest.trim();
    if rest.is_empty() || rest.len() > 2 || !rest.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    rest.parse().ok()
}

/// Checks a single stop entry against a single card.
pub fn match_stop_entry(card: &Requisite, entry: &str) -> Option<StopMatch> {
    let entry_trimmed = entry.trim();
    if entry_trimmed.is_empty() {
        return None;
    }

    let card_digits = card.digits();
    let entry_digits = digits_of(entry_trimmed);

    if !card.is_placeholder()
        && (entry_trimmed == card.card_number.trim() || (!entry_digits.is_empty() && entry_digits == card_digits))
    {
        return Some(StopMatch::Exact);
    }

    if parse_card_reference(entry_trimmed) == Some(card.card_order) {
        return Some(StopMatch::Order);
    }

    if !card.is_placeholder() {
        let fragment_in_card = entry_digits.len() >= 4 && card_digits.contains(&entry_digits);
        let card_in_entry = card_digits.len() >= 4 && entry_digits.contains(&card_digits);
        if fragment_in_card || card_in_entry {
            return Some(StopMatch::Substring);
        }
    }

    None
}

/// Merges the ordered card slots with the stop-list.
///
/// Every card keeps its position; a stopped card remembers the first stop
/// entry (in stop-list order) that matched it and how.
pub fn resolve(
    requisites: Vec<Requisite>,
    stopped_cards: &[String],
    personal_link: Option<String>,
) -> ResolvedRequisites {
    let mut used = vec![false; stopped_cards.len()];

    let cards = requisites
        .into_iter()
        .map(|requisite| {
            let mut stopped_by = None;
            for (idx, entry) in stopped_cards.iter().enumerate() {
                if let Some(how) = match_stop_entry(&requisite, entry) {
                    // Later entries hitting an already stopped card still
                    // count as matched, so they are not listed as "other".
                    used[idx] = true;
                    if stopped_by.is_none() {
                        stopped_by = Some((entry.clone(), how));
                    }
                }
            }
            ResolvedCard { requisite, stopped_by }
        })
        .collect();

    let unmatched_stops = stopped_cards
        .iter()
        .zip(&used)
        .filter(|(_, matched)| !**matched)
        .map(|(entry, _)| entry.clone())
        .collect();

    ResolvedRequisites {
        cards,
        unmatched_stops,
        personal_link: personal_link.filter(|link| !link.trim().is_empty()),
    }
}

/// Finds the slot a stop entry refers to, used for team notifications.
pub fn find_card_order(requisites: &[Requisite], entry: &str) -> Option<i64> {
    requisites
        .iter()
        .find(|card| match_stop_entry(card, entry).is_some())
        .map(|card| card.card_order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn card(order: i64, number: &str) -> Requisite {
        Requisite {
            card_order: order,
            card_number: number.to_string(),
            card_name: format!("Holder {}", order),
            bank_name: "Bank".to_string(),
            min_amount: 1000,
            max_amount: 50000,
            percentage: 75,
        }
    }

    fn cards() -> Vec<Requisite> {
        vec![
            card(1, "2200 7001 2345 6789"),
            card(2, "4276-1600-1111-2222"),
            card(3, "-"),
        ]
    }

    #[test]
    fn test_exact_match_ignores_separators() {
        let c = card(1, "2200 7001 2345 6789");
        assert_eq!(match_stop_entry(&c, "2200700123456789"), Some(StopMatch::Exact));
        assert_eq!(match_stop_entry(&c, " 2200 7001 2345 6789 "), Some(StopMatch::Exact));
    }

    #[test]
    fn test_order_reference_forms() {
        assert_eq!(parse_card_reference("2"), Some(2));
        assert_eq!(parse_card_reference("#3"), Some(3));
        assert_eq!(parse_card_reference("№ 1"), Some(1));
        assert_eq!(parse_card_reference("Карта 2"), Some(2));
        assert_eq!(parse_card_reference("card 1"), Some(1));
        assert_eq!(parse_card_reference("Карта №2"), Some(2));
        assert_eq!(parse_card_reference("card #2"), Some(2));
        assert_eq!(parse_card_reference("КАРТА № 3"), Some(3));
        assert_eq!(parse_card_reference("#card 2"), None);
        assert_eq!(parse_card_reference("6789"), None);
        assert_eq!(parse_card_reference("карта"), None);
        assert_eq!(parse_card_reference(""), None);
    }

    #[test]
    fn test_substring_match_on_last_digits() {
        let c = card(2, "4276-1600-1111-2222");
        assert_eq!(match_stop_entry(&c, "2222"), Some(StopMatch::Substring));
        assert_eq!(match_stop_entry(&c, "*2222"), Some(StopMatch::Substring));
        assert_eq!(
            match_stop_entry(&c, "4276 1600 1111 2222 Сбер"),
            Some(StopMatch::Exact),
            "extra letters do not change the digit projection"
        );
        assert_eq!(match_stop_entry(&c, "Сбер 4276160011112222 до пятницы 15"), Some(StopMatch::Substring));
        assert_eq!(match_stop_entry(&c, "222"), None, "three digits are too short");
    }

    #[test]
    fn test_placeholder_only_stops_by_order() {
        let c = card(3, "-");
        assert_eq!(match_stop_entry(&c, "-"), None);
        assert_eq!(match_stop_entry(&c, "3"), Some(StopMatch::Order));
    }

    #[test]
    fn test_resolve_blanks_stopped_cards_and_keeps_order() {
        let stops = vec!["6789".to_string(), "9999 0000 1111 2222".to_string()];
        let resolved = resolve(cards(), &stops, Some("https://t.me/owner".to_string()));

        assert_eq!(resolved.cards.len(), 3);
        assert_eq!(
            resolved.cards[0].stopped_by,
            Some(("6789".to_string(), StopMatch::Substring))
        );
        assert!(!resolved.cards[1].is_stopped());
        assert!(!resolved.cards[2].is_stopped());
        assert_eq!(resolved.unmatched_stops, vec!["9999 0000 1111 2222".to_string()]);
        assert_eq!(resolved.personal_link.as_deref(), Some("https://t.me/owner"));

        let active: Vec<i64> = resolved.active_cards().map(|c| c.card_order).collect();
        assert_eq!(active, vec![2, 3]);
    }

    #[test]
    fn test_resolve_first_entry_wins_and_duplicates_are_not_unmatched() {
        let stops = vec!["2".to_string(), "2222".to_string()];
        let resolved = resolve(cards(), &stops, None);

        assert_eq!(resolved.cards[1].stopped_by, Some(("2".to_string(), StopMatch::Order)));
        assert!(resolved.unmatched_stops.is_empty());
    }

    #[test]
    fn test_resolve_stops_card_by_numbered_reference() {
        let stops = vec!["Карта №2".to_string(), "card #3".to_string()];
        let resolved = resolve(cards(), &stops, None);

        assert_eq!(resolved.cards[1].stopped_by, Some(("Карта №2".to_string(), StopMatch::Order)));
        assert_eq!(resolved.cards[2].stopped_by, Some(("card #3".to_string(), StopMatch::Order)));
        assert!(resolved.unmatched_stops.is_empty());
        assert_eq!(resolved.active_cards().map(|c| c.card_order).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_resolve_drops_blank_link() {
        let resolved = resolve(cards(), &[], Some("  ".to_string()));
        assert_eq!(resolved.personal_link, None);
    }

    #[test]
    fn test_find_card_order() {
        let all = cards();
        assert_eq!(find_card_order(&all, "4276160011112222"), Some(2));
        assert_eq!(find_card_order(&all, "#3"), Some(3));
        assert_eq!(find_card_order(&all, "0000"), None);
    }
}
