// Library root: the pure top-cut pipeline (attendance rescaling, top-deck
// selection, bracket reconstruction, placement bands).

pub mod attendance;
pub mod bracket;
pub mod model;
pub mod placement;
pub mod standings;
pub mod view;

pub use attendance::{effective_top_or_requested, select_effective_top, RequestedTop};
pub use bracket::{build_bracket, Bracket, BracketMatch, Round};
pub use model::{Deck, Match, MatchResult, TournamentSummary};
pub use placement::select_top_decks;
pub use standings::{group_placements, PlacementBand};
pub use view::TopCutView;
