// Integration tests for the top-cut pipeline.
//
// These exercise the public API end to end: attendance rescaling, top-deck
// selection, bracket reconstruction and placement bands, on fixtures shaped
// like real event exports (Swiss rounds followed by a single-elimination
// cut, shuffled record order, byes, gaps).

use topcut_core::bracket::required_rounds;
use topcut_core::*;

// ===========================================================================
// Test helpers
// ===========================================================================

fn deck(username: &str, placement: Option<u32>) -> Deck {
    Deck {
        deck_id: format!("deck-{username}"),
        melee_player_username: username.into(),
        placement,
        deck_name: format!("{} Aggro", username.to_uppercase()),
        leader_card_id: format!("LDR-{username}"),
        base_card_id: format!("BASE-{username}"),
    }
}

fn result(round: i32, p1: &str, p2: &str, code: i32) -> Match {
    Match {
        round,
        p1_username: p1.into(),
        p2_username: Some(p2.into()),
        result: MatchResult::from(code),
        is_bye: false,
        game_wins: if code == 3 { 2 } else { 1 },
        game_losses: if code == 3 { 1 } else { 2 },
        game_draws: 0,
    }
}

fn beats(round: i32, winner: &str, loser: &str) -> Match {
    result(round, winner, loser, 3)
}

fn bye(round: i32, username: &str) -> Match {
    Match {
        round,
        p1_username: username.into(),
        p2_username: None,
        result: MatchResult::from(3),
        is_bye: true,
        game_wins: 2,
        game_losses: 0,
        game_draws: 0,
    }
}

/// Eight decks placed the way the fixture bracket plays out:
/// A champion, E finalist, C/G semifinalists, B/D/F/H quarterfinalists.
fn eight_decks() -> Vec<Deck> {
    vec![
        deck("a", Some(1)),
        deck("e", Some(2)),
        deck("c", Some(3)),
        deck("g", Some(4)),
        deck("b", Some(5)),
        deck("d", Some(6)),
        deck("f", Some(7)),
        deck("h", Some(8)),
    ]
}

/// Quarterfinals in round 4, semifinals in round 5, final in round 6, with
/// Swiss rounds before and records shuffled.
fn eight_player_log() -> Vec<Match> {
    vec![
        beats(5, "e", "g"),
        beats(4, "g", "h"),
        beats(6, "a", "e"),
        beats(2, "b", "a"),
        beats(4, "c", "d"),
        bye(1, "a"),
        beats(5, "a", "c"),
        beats(4, "e", "f"),
        beats(3, "x", "y"),
        beats(4, "a", "b"),
        beats(1, "c", "e"),
    ]
}

fn name(deck: &Option<Deck>) -> Option<&str> {
    deck.as_ref().map(|d| d.melee_player_username.as_str())
}

fn pairs(round: &Round) -> Vec<(Option<&str>, Option<&str>)> {
    round
        .matches
        .iter()
        .map(|m| (name(&m.player1), name(&m.player2)))
        .collect()
}

fn winners(round: &Round) -> Vec<Option<&str>> {
    round.matches.iter().map(|m| name(&m.winner)).collect()
}

fn summary(attendance: u32) -> TournamentSummary {
    TournamentSummary {
        attendance,
        name: Some("Fixture Open".into()),
        date: None,
    }
}

// ===========================================================================
// Bracket reconstruction
// ===========================================================================

#[test]
fn eight_player_bracket_reconstruction() {
    let top = select_top_decks(&eight_decks(), 8);
    let bracket = build_bracket(&eight_player_log(), &top, 8).expect("bracket");

    assert_eq!(bracket.len(), 3);
    let (quarters, semis, final_round) = (&bracket.rounds[0], &bracket.rounds[1], &bracket.rounds[2]);

    assert_eq!(final_round.round_number, Some(6));
    assert_eq!(winners(final_round), vec![Some("a")]);
    assert_eq!(pairs(final_round), vec![(Some("a"), Some("e"))]);

    assert_eq!(semis.round_number, Some(5));
    assert_eq!(winners(semis), vec![Some("a"), Some("e")]);

    assert_eq!(quarters.round_number, Some(4));
    assert_eq!(winners(quarters), vec![Some("a"), Some("c"), Some("e"), Some("g")]);

    // Each semifinal sits directly above its two quarterfinals.
    for (i, semi) in semis.matches.iter().enumerate() {
        let left = &quarters.matches[2 * i];
        let right = &quarters.matches[2 * i + 1];
        assert_eq!(name(&semi.player1), name(&left.winner));
        assert_eq!(name(&semi.player2), name(&right.winner));
    }
}

#[test]
fn bracket_is_idempotent() {
    let top = select_top_decks(&eight_decks(), 8);
    let log = eight_player_log();
    let first = build_bracket(&log, &top, 8);
    let second = build_bracket(&log, &top, 8);
    assert_eq!(first, second);
}

#[test]
fn bracket_length_matches_depth() {
    let log = eight_player_log();
    for effective_top in [2u32, 4, 8, 16, 32, 64, 128] {
        let top = select_top_decks(&eight_decks(), effective_top);
        let bracket = build_bracket(&log, &top, effective_top).expect("bracket");
        assert_eq!(bracket.len(), required_rounds(effective_top));
        assert_eq!(bracket.len(), effective_top.trailing_zeros() as usize);
    }
}

#[test]
fn byes_never_reach_the_bracket() {
    let mut log = eight_player_log();
    log.push(bye(6, "e"));
    log.push(bye(5, "g"));
    let top = select_top_decks(&eight_decks(), 8);
    let bracket = build_bracket(&log, &top, 8).expect("bracket");

    for round in &bracket.rounds {
        for m in &round.matches {
            assert!(m.player2.is_some(), "bye leaked into round {:?}", round.round_number);
        }
    }
    let total: usize = bracket.rounds.iter().map(|r| r.matches.len()).sum();
    assert_eq!(total, 7);
}

#[test]
fn undecided_final_has_no_winner() {
    let mut log = eight_player_log();
    for m in log.iter_mut().filter(|m| m.round == 6) {
        m.result = MatchResult::from(1);
    }
    let top = select_top_decks(&eight_decks(), 8);
    let bracket = build_bracket(&log, &top, 8).expect("bracket");
    assert!(bracket.champion().is_none());
    // Semifinals still attach under the undecided final's two players.
    assert_eq!(winners(&bracket.rounds[1]), vec![Some("a"), Some("e")]);
}

#[test]
fn missing_quarterfinal_is_appended_as_unattached_gap() {
    // c's quarterfinal was never reported; a stray unrelated match remains.
    let log: Vec<Match> = eight_player_log()
        .into_iter()
        .filter(|m| !(m.round == 4 && m.p1_username == "c"))
        .chain([result(4, "b", "d", 2)])
        .collect();
    let top = select_top_decks(&eight_decks(), 8);
    let bracket = build_bracket(&log, &top, 8).expect("bracket");

    let quarters = &bracket.rounds[0];
    assert_eq!(winners(quarters), vec![Some("a"), Some("e"), Some("g"), None]);
    assert_eq!(pairs(quarters)[3], (Some("b"), Some("d")));
}

#[test]
fn short_log_pads_earliest_rounds() {
    let log = vec![beats(2, "a", "c"), beats(2, "e", "g"), beats(3, "a", "e")];
    let top = select_top_decks(&eight_decks(), 8);
    let bracket = build_bracket(&log, &top, 8).expect("bracket");
    assert_eq!(bracket.len(), 3);
    assert!(bracket.rounds[0].is_placeholder());
    assert!(bracket.rounds[0].matches.is_empty());
    assert_eq!(bracket.rounds[1].matches.len(), 2);
}

// ===========================================================================
// Whole pipeline
// ===========================================================================

#[test]
fn small_event_scenario() {
    let view = TopCutView::compute(&summary(15), &eight_decks(), &eight_player_log(), RequestedTop::Top8);
    assert_eq!(view.effective_top, 4);

    let bracket = view.bracket.as_ref().expect("bracket");
    assert_eq!(bracket.len(), 2);
    assert_eq!(bracket.round_title(0), "Semifinals");
    assert_eq!(winners(&bracket.rounds[0]), vec![Some("a"), Some("e")]);

    let labels: Vec<&str> = view.standings.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["1st", "2nd", "3rd-4th"]);
    assert!(!labels.contains(&"5th-8th"));
}

#[test]
fn large_event_shows_full_top_eight() {
    let view = TopCutView::compute(&summary(300), &eight_decks(), &eight_player_log(), RequestedTop::Top8);
    assert_eq!(view.effective_top, 8);

    let sizes: Vec<usize> = view.standings.iter().map(|b| b.decks.len()).collect();
    let labels: Vec<&str> = view.standings.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(sizes, vec![1, 1, 2, 4]);
    assert_eq!(labels, vec!["1st", "2nd", "3rd-4th", "5th-8th"]);
}

#[test]
fn standings_survive_missing_match_log() {
    let view = TopCutView::compute(&summary(300), &eight_decks(), &[], RequestedTop::Top8);
    assert!(view.bracket.is_none());
    assert_eq!(view.standings.len(), 4);
    assert!(view.has_data());
}

#[test]
fn identifiers_correlate_bracket_and_standings() {
    let view = TopCutView::compute(&summary(300), &eight_decks(), &eight_player_log(), RequestedTop::Top8);
    let bracket = view.bracket.as_ref().expect("bracket");

    for deck in view.standings_order() {
        let appears = bracket
            .rounds
            .iter()
            .any(|round| round.matches.iter().any(|m| m.involves(&deck.melee_player_username)));
        assert!(appears, "{} missing from bracket", deck.melee_player_username);
    }
}

#[test]
fn inputs_are_left_untouched() {
    let decks = eight_decks();
    let log = eight_player_log();
    let (decks_before, log_before) = (decks.clone(), log.clone());
    let _ = TopCutView::compute(&summary(300), &decks, &log, RequestedTop::Top16);
    assert_eq!(decks, decks_before);
    assert_eq!(log, log_before);
}
