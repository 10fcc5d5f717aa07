// Plain-text report: tournament header, bracket by round, standings.
//
// Used by `topcut --plain` and handy for piping into other tools.

use std::fmt::Write;

use topcut_core::{Bracket, BracketMatch, Deck, PlacementBand, TopCutView, TournamentSummary};

pub const NO_DATA: &str = "No tournament data available";
pub const TBD: &str = "TBD";

/// Render the whole report.
pub fn render_report(summary: &TournamentSummary, view: &TopCutView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", header_line(summary, view));
    out.push('\n');

    if !view.has_data() {
        let _ = writeln!(out, "{NO_DATA}");
        return out;
    }

    match &view.bracket {
        Some(bracket) => write_bracket(&mut out, bracket),
        None => {
            let _ = writeln!(out, "Bracket: no match results recorded");
        }
    }
    out.push('\n');
    write_standings(&mut out, &view.standings);
    out
}

/// One-line summary: name, date, attendance, depth shown.
pub fn header_line(summary: &TournamentSummary, view: &TopCutView) -> String {
    let mut parts: Vec<String> = Vec::new();
    parts.push(summary.name.clone().unwrap_or_else(|| "Tournament".to_string()));
    if let Some(date) = summary.date {
        parts.push(date.format("%Y-%m-%d").to_string());
    }
    if summary.attendance > 0 {
        parts.push(format!("{} players", summary.attendance));
    }
    if view.is_rescaled() {
        parts.push(format!(
            "Top {} (requested {})",
            view.effective_top,
            view.requested_top.value()
        ));
    } else {
        parts.push(format!("Top {}", view.effective_top));
    }
    parts.join(" | ")
}

fn write_bracket(out: &mut String, bracket: &Bracket) {
    for (idx, round) in bracket.rounds.iter().enumerate() {
        let _ = writeln!(out, "== {} ==", bracket.round_title(idx));
        if round.matches.is_empty() {
            let _ = writeln!(out, "  (no results)");
            continue;
        }
        for m in &round.matches {
            let _ = writeln!(out, "  {}", match_line(m));
        }
    }
}

/// `*alice 2-1 bob`: winner starred, score from player 1's side.
pub fn match_line(m: &BracketMatch) -> String {
    let side = |slot: &Option<Deck>| -> String {
        match slot {
            Some(deck) if m.is_winner(&deck.melee_player_username) => {
                format!("*{}", deck.melee_player_username)
            }
            Some(deck) => deck.melee_player_username.clone(),
            None => TBD.to_string(),
        }
    };
    format!("{} {} {}", side(&m.player1), score(m), side(&m.player2))
}

/// Game score from player 1's side; draws only when any were played.
pub fn score(m: &BracketMatch) -> String {
    if m.game_draws > 0 {
        format!("{}-{}-{}", m.game_wins, m.game_losses, m.game_draws)
    } else {
        format!("{}-{}", m.game_wins, m.game_losses)
    }
}

fn write_standings(out: &mut String, standings: &[PlacementBand]) {
    let _ = writeln!(out, "== Standings ==");
    for band in standings {
        for deck in &band.decks {
            let _ = writeln!(out, "  {:<8} {}", band.label, deck_line(deck));
        }
    }
}

pub fn deck_line(deck: &Deck) -> String {
    if deck.deck_name.is_empty() {
        deck.melee_player_username.clone()
    } else {
        format!("{} ({})", deck.melee_player_username, deck.deck_name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
