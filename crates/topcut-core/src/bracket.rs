// Single-elimination bracket reconstruction.
//
// Match records carry only a round number and two usernames. We rebuild the
// bracket from the final backwards: the final round is taken as-is, then each
// earlier round is ordered so that the two matches feeding a later match sit
// next to each other beneath it.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::model::{Deck, Match, MatchResult};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A displayable pairing. Players missing from the top cut render as TBD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketMatch {
    pub player1: Option<Deck>,
    pub player2: Option<Deck>,
    pub winner: Option<Deck>,
    /// Games won by player 1.
    pub game_wins: u32,
    /// Games lost by player 1.
    pub game_losses: u32,
    pub game_draws: u32,
}

impl BracketMatch {
    /// Resolve a raw match against the top-cut player index.
    pub fn resolve(record: &Match, players: &PlayerIndex<'_>) -> Self {
        let player1 = players.get(&record.p1_username).cloned();
        let player2 = record
            .p2_username
            .as_deref()
            .and_then(|username| players.get(username))
            .cloned();
        let winner = match record.result {
            MatchResult::Player1Win => player1.clone(),
            MatchResult::Player2Win => player2.clone(),
            MatchResult::Undecided(_) => None,
        };

        BracketMatch {
            player1,
            player2,
            winner,
            game_wins: record.game_wins,
            game_losses: record.game_losses,
            game_draws: record.game_draws,
        }
    }

    /// Whether either slot holds `username`.
    pub fn involves(&self, username: &str) -> bool {
        [&self.player1, &self.player2]
            .into_iter()
            .flatten()
            .any(|deck| deck.melee_player_username == username)
    }

    pub fn is_winner(&self, username: &str) -> bool {
        self.winner
            .as_ref()
            .is_some_and(|deck| deck.melee_player_username == username)
    }
}

/// One column of the bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    /// Source round number; `None` for a placeholder where the match log had
    /// no round to fill this slot.
    pub round_number: Option<i32>,
    pub matches: Vec<BracketMatch>,
}

impl Round {
    fn placeholder() -> Self {
        Round {
            round_number: None,
            matches: Vec::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.round_number.is_none()
    }
}

/// Rounds in chronological order, earliest first and the final last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bracket {
    pub rounds: Vec<Round>,
}

impl Bracket {
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// The deciding match, if the final round holds one.
    pub fn final_match(&self) -> Option<&BracketMatch> {
        self.rounds.last().and_then(|round| round.matches.first())
    }

    pub fn champion(&self) -> Option<&Deck> {
        self.final_match().and_then(|m| m.winner.as_ref())
    }

    /// Display title of the round at `index` (0 = earliest).
    pub fn round_title(&self, index: usize) -> String {
        round_title(self.rounds.len().saturating_sub(index + 1))
    }
}

/// Name for a round `from_final` steps before the final.
pub fn round_title(from_final: usize) -> String {
    match from_final {
        0 => "Final".to_string(),
        1 => "Semifinals".to_string(),
        2 => "Quarterfinals".to_string(),
        n => format!("Round of {}", 2u64 << n.min(62)),
    }
}

/// Number of elimination rounds needed to cut `effective_top` players down to
/// one. Depths that are not powers of two round up.
pub fn required_rounds(effective_top: u32) -> usize {
    effective_top.max(1).next_power_of_two().trailing_zeros() as usize
}

// ---------------------------------------------------------------------------
// Player index
// ---------------------------------------------------------------------------

/// Username lookup over the top-cut decks.
#[derive(Debug, Default)]
pub struct PlayerIndex<'a> {
    by_username: HashMap<&'a str, &'a Deck>,
}

impl<'a> PlayerIndex<'a> {
    pub fn from_decks(decks: &'a [Deck]) -> Self {
        let by_username = decks
            .iter()
            .map(|deck| (deck.melee_player_username.as_str(), deck))
            .collect();
        PlayerIndex { by_username }
    }

    pub fn get(&self, username: &str) -> Option<&'a Deck> {
        self.by_username.get(username).copied()
    }
}

// ---------------------------------------------------------------------------
// Reconstruction
// ---------------------------------------------------------------------------

/// Rebuild the elimination bracket for the top `effective_top` players.
///
/// Returns `None` when there is nothing to show (no match log, or no deck
/// has a final placement yet). Otherwise the bracket always has exactly
/// `required_rounds(effective_top)` rounds; rounds the match log cannot
/// supply are empty placeholders.
pub fn build_bracket(matches: &[Match], top_decks: &[Deck], effective_top: u32) -> Option<Bracket> {
    if matches.is_empty() || top_decks.is_empty() {
        debug!(
            "no bracket: {} matches, {} top decks",
            matches.len(),
            top_decks.len()
        );
        return None;
    }

    let players = PlayerIndex::from_decks(top_decks);
    let finals_rounds = finals_round_numbers(matches, required_rounds(effective_top));
    debug!("bracket rounds (final first): {:?}", finals_rounds);

    // Built final-first; index 0 is the final.
    let mut from_final: Vec<Round> = Vec::with_capacity(finals_rounds.len());
    for round_number in finals_rounds {
        let Some(number) = round_number else {
            from_final.push(Round::placeholder());
            continue;
        };

        let candidates = bracket_matches_in_round(matches, number);
        let placed = match from_final.last() {
            None => candidates
                .iter()
                .map(|record| BracketMatch::resolve(record, &players))
                .collect(),
            Some(parent) => reconcile_round(&parent.matches, &candidates, &players),
        };

        from_final.push(Round {
            round_number: Some(number),
            matches: placed,
        });
    }

    from_final.reverse();
    Some(Bracket { rounds: from_final })
}

/// The round numbers that make up the bracket, final first, padded with
/// `None` when the log holds fewer distinct rounds than required.
pub fn finals_round_numbers(matches: &[Match], required: usize) -> Vec<Option<i32>> {
    let distinct: BTreeSet<i32> = matches.iter().map(|m| m.round).collect();

    let mut rounds: Vec<Option<i32>> = distinct.into_iter().rev().take(required).map(Some).collect();
    rounds.resize(required, None);
    rounds
}

/// Every non-bye match of `round`, in log order. Players outside the cut
/// resolve to TBD later on; the match itself is still kept.
fn bracket_matches_in_round(matches: &[Match], round: i32) -> Vec<&Match> {
    matches
        .iter()
        .filter(|m| m.round == round && !m.is_bye)
        .collect()
}

/// Order one round's matches beneath the already-placed later round.
///
/// For every parent match, left to right, the match won by the parent's
/// player 1 is placed first and the match won by its player 2 second. Each
/// candidate is placed at most once. Candidates that feed no parent (gaps in
/// the log, opponents that never reported) are appended afterwards in input
/// order, so nothing is dropped.
pub fn reconcile_round(
    parents: &[BracketMatch],
    candidates: &[&Match],
    players: &PlayerIndex<'_>,
) -> Vec<BracketMatch> {
    let mut placed = vec![false; candidates.len()];
    let mut ordered = Vec::with_capacity(candidates.len());

    for parent in parents {
        for slot in [&parent.player1, &parent.player2] {
            let Some(deck) = slot else {
                continue;
            };
            if let Some(idx) = feeding_match(candidates, &placed, &deck.melee_player_username) {
                placed[idx] = true;
                ordered.push(BracketMatch::resolve(candidates[idx], players));
            }
        }
    }

    let attached = ordered.len();
    ordered.extend(
        candidates
            .iter()
            .zip(&placed)
            .filter(|(_, &was_placed)| !was_placed)
            .map(|(record, _)| BracketMatch::resolve(record, players)),
    );

    if ordered.len() > attached {
        debug!(
            "{} of {} matches did not feed a later match",
            ordered.len() - attached,
            ordered.len()
        );
    }
    ordered
}

/// Index of the first unplaced candidate won by `username`.
fn feeding_match(candidates: &[&Match], placed: &[bool], username: &str) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .find(|(idx, record)| !placed[*idx] && record.winner_username() == Some(username))
        .map(|(idx, _)| idx)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
