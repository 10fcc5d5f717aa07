// Tournament input records: participant decks, per-round matches, and event
// metadata. All of these arrive already loaded and are only ever borrowed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Result codes (as exported by the pairing software)
// ---------------------------------------------------------------------------

pub const RESULT_P1_WIN: i32 = 3;
pub const RESULT_P2_WIN: i32 = 0;

/// Outcome of a single match.
///
/// Only two codes carry a decided winner; every other code (draws, unreported
/// results, codes we don't recognize) is kept verbatim as `Undecided`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum MatchResult {
    Player1Win,
    Player2Win,
    Undecided(i32),
}

impl MatchResult {
    pub fn is_decided(&self) -> bool {
        !matches!(self, MatchResult::Undecided(_))
    }
}

impl From<i32> for MatchResult {
    fn from(code: i32) -> Self {
        match code {
            RESULT_P1_WIN => MatchResult::Player1Win,
            RESULT_P2_WIN => MatchResult::Player2Win,
            other => MatchResult::Undecided(other),
        }
    }
}

impl From<MatchResult> for i32 {
    fn from(result: MatchResult) -> Self {
        match result {
            MatchResult::Player1Win => RESULT_P1_WIN,
            MatchResult::Player2Win => RESULT_P2_WIN,
            MatchResult::Undecided(code) => code,
        }
    }
}

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

/// One pairing in one round, as recorded by the tournament organizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Round number; later rounds have larger numbers.
    pub round: i32,
    pub p1_username: String,
    /// Absent for byes and for pairings whose opponent dropped.
    #[serde(default)]
    pub p2_username: Option<String>,
    pub result: MatchResult,
    #[serde(default)]
    pub is_bye: bool,
    /// Games won by player 1.
    #[serde(default, alias = "gameWin")]
    pub game_wins: u32,
    /// Games lost by player 1.
    #[serde(default, alias = "gameLose")]
    pub game_losses: u32,
    #[serde(default, alias = "gameDraw")]
    pub game_draws: u32,
}

impl Match {
    /// Username of the player who won this match, if a winner was decided.
    pub fn winner_username(&self) -> Option<&str> {
        match self.result {
            MatchResult::Player1Win => Some(self.p1_username.as_str()),
            MatchResult::Player2Win => self.p2_username.as_deref(),
            MatchResult::Undecided(_) => None,
        }
    }

    /// Whether `username` sat in either seat of this match.
    pub fn involves(&self, username: &str) -> bool {
        self.p1_username == username || self.p2_username.as_deref() == Some(username)
    }
}

// ---------------------------------------------------------------------------
// Deck
// ---------------------------------------------------------------------------

/// A registered participant and the deck they played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub deck_id: String,
    pub melee_player_username: String,
    /// Final standing (1 = champion). `None` until the event concludes.
    #[serde(default)]
    pub placement: Option<u32>,
    #[serde(default)]
    pub deck_name: String,
    #[serde(default)]
    pub leader_card_id: String,
    #[serde(default)]
    pub base_card_id: String,
}

// ---------------------------------------------------------------------------
// Tournament summary
// ---------------------------------------------------------------------------

/// Event-level metadata. Only `attendance` feeds the pipeline; the rest is
/// display information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSummary {
    #[serde(default)]
    pub attendance: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
