// Final standings grouped into placement bands (1st, 2nd, 3rd-4th, ...).

use serde::Serialize;

use crate::model::Deck;

/// Flat standings never list more than this many decks.
pub const FLAT_STANDINGS_LIMIT: usize = 8;

/// A labelled tier of the final standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementBand {
    pub label: String,
    pub decks: Vec<Deck>,
}

/// Group the top-cut decks into placement bands.
///
/// For power-of-two depths the bands are 1st, 2nd, 3rd-4th, 5th-8th,
/// 9th-16th and so on, keeping only bands that fit within `effective_top`
/// and have at least one deck. A deck joins the band that covers its
/// placement value, whatever its position in `top_decks`. Any other depth falls back to a flat list of
/// at most eight decks, each captioned with its own placement.
pub fn group_placements(top_decks: &[Deck], effective_top: u32) -> Vec<PlacementBand> {
    if !effective_top.is_power_of_two() {
        return flat_placements(top_decks);
    }

    band_ranges(effective_top)
        .into_iter()
        .filter_map(|(low, high)| {
            let decks: Vec<Deck> = top_decks
                .iter()
                .filter(|deck| deck.placement.is_some_and(|p| (low..=high).contains(&p)))
                .cloned()
                .collect();
            if decks.is_empty() {
                None
            } else {
                Some(PlacementBand {
                    label: band_label(low, high),
                    decks,
                })
            }
        })
        .collect()
}

fn flat_placements(top_decks: &[Deck]) -> Vec<PlacementBand> {
    top_decks
        .iter()
        .filter_map(|deck| {
            deck.placement.map(|p| PlacementBand {
                label: ordinal(p),
                decks: vec![deck.clone()],
            })
        })
        .take(FLAT_STANDINGS_LIMIT)
        .collect()
}

/// Inclusive placement ranges whose ceiling fits within `effective_top`:
/// (1,1), (2,2), (3,4), (5,8), (9,16), ...
fn band_ranges(effective_top: u32) -> Vec<(u32, u32)> {
    let mut ranges = Vec::new();
    let (mut low, mut high) = (1u32, 1u32);
    while high <= effective_top {
        ranges.push((low, high));
        low = high + 1;
        match high.checked_mul(2) {
            Some(next) => high = next,
            None => break,
        }
    }
    ranges
}

fn band_label(low: u32, high: u32) -> String {
    if low == high {
        ordinal(low)
    } else {
        format!("{}-{}", ordinal(low), ordinal(high))
    }
}

/// English ordinal: 1st, 2nd, 3rd, 4th, ..., 11th, 12th, 13th, 21st.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
