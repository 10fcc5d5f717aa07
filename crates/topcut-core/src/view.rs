// Top-cut view: runs the whole pipeline for one tournament and one
// requested depth.
//
// attendance -> effective top -> top decks -> { bracket, standings }
//
// The bracket and the standings are computed independently; a tournament
// with placements but no match log still gets standings.

use serde::Serialize;
use tracing::debug;

use crate::attendance::{effective_top_or_requested, RequestedTop};
use crate::bracket::{build_bracket, Bracket};
use crate::model::{Deck, Match, TournamentSummary};
use crate::placement::select_top_decks;
use crate::standings::{group_placements, PlacementBand};

/// Everything a page needs to show a tournament's top cut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopCutView {
    pub requested_top: RequestedTop,
    pub effective_top: u32,
    pub top_decks: Vec<Deck>,
    pub bracket: Option<Bracket>,
    pub standings: Vec<PlacementBand>,
}

impl TopCutView {
    pub fn compute(
        summary: &TournamentSummary,
        decks: &[Deck],
        matches: &[Match],
        requested_top: RequestedTop,
    ) -> Self {
        let effective_top = effective_top_or_requested(summary.attendance, requested_top);
        let top_decks = select_top_decks(decks, effective_top);
        let bracket = build_bracket(matches, &top_decks, effective_top);
        let standings = group_placements(&top_decks, effective_top);

        debug!(
            "top cut: requested {}, attendance {}, effective {}, {} bands, bracket: {}",
            requested_top.value(),
            summary.attendance,
            effective_top,
            standings.len(),
            bracket.as_ref().map_or(0, Bracket::len)
        );

        TopCutView {
            requested_top,
            effective_top,
            top_decks,
            bracket,
            standings,
        }
    }

    /// Whether the requested depth was scaled down for a small event.
    pub fn is_rescaled(&self) -> bool {
        self.effective_top != self.requested_top.value()
    }

    /// False when neither a bracket nor standings can be shown.
    pub fn has_data(&self) -> bool {
        self.bracket.is_some() || !self.standings.is_empty()
    }

    /// Standings decks in display order, for stepping through players.
    pub fn standings_order(&self) -> impl Iterator<Item = &Deck> + '_ {
        self.standings.iter().flat_map(|band| band.decks.iter())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
