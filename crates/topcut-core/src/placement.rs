// Narrow the full participant list to the decks that made the cut.

use tracing::debug;

use crate::model::Deck;

/// Decks whose final placement is within `effective_top`, best first.
///
/// Decks without a placement (event still running) are left out, so an
/// in-progress event yields an empty list. The sort is stable, so duplicate
/// placements keep their input order.
pub fn select_top_decks(all_decks: &[Deck], effective_top: u32) -> Vec<Deck> {
    let mut top: Vec<Deck> = all_decks
        .iter()
        .filter(|deck| deck.placement.is_some_and(|p| p <= effective_top))
        .cloned()
        .collect();

    top.sort_by_key(|deck| deck.placement);

    debug!(
        "selected {} of {} decks for top {}",
        top.len(),
        all_decks.len(),
        effective_top
    );
    top
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(username: &str, placement: Option<u32>) -> Deck {
        Deck {
            deck_id: format!("deck-{username}"),
            melee_player_username: username.into(),
            placement,
            deck_name: String::new(),
            leader_card_id: String::new(),
            base_card_id: String::new(),
        }
    }

    fn usernames(decks: &[Deck]) -> Vec<&str> {
        decks.iter().map(|d| d.melee_player_username.as_str()).collect()
    }

    #[test]
    fn sorts_ascending_and_cuts_at_top() {
        let decks = vec![
            deck("e", Some(5)),
            deck("b", Some(2)),
            deck("x", None),
            deck("d", Some(4)),
            deck("a", Some(1)),
            deck("c", Some(3)),
        ];
        let top = select_top_decks(&decks, 4);
        assert_eq!(usernames(&top), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn no_placements_yields_empty() {
        let decks = vec![deck("a", None), deck("b", None)];
        assert!(select_top_decks(&decks, 8).is_empty());
        assert!(select_top_decks(&[], 8).is_empty());
    }

    #[test]
    fn duplicate_placements_keep_input_order() {
        let decks = vec![deck("late", Some(3)), deck("first", Some(1)), deck("early", Some(3))];
        let top = select_top_decks(&decks, 4);
        assert_eq!(usernames(&top), vec!["first", "late", "early"]);
    }

    #[test]
    fn input_is_not_modified() {
        let decks = vec![deck("b", Some(2)), deck("a", Some(1))];
        let before = decks.clone();
        let _ = select_top_decks(&decks, 2);
        assert_eq!(decks, before);
    }
}
