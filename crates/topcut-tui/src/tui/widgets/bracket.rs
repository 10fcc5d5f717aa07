// Bracket widget: one column per elimination round, earliest on the left.
//
// Each match is a three-row block (player 1, score, player 2). Blocks in
// round `r` are spaced `4 * 2^r` rows apart so every match sits level with
// the midpoint of the two matches that fed it.
//
//   ┌ alice          ┌ alice
//   │ 2-0      ...   │ 2-1
//   └ hank           └ carol
//
// Winners are green, the player selected in the standings is reversed.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use topcut_core::{Bracket, BracketMatch, Deck, Round, TopCutView};

use crate::report::{score, NO_DATA, TBD};
use crate::tui::ViewState;

const BLOCK_HEIGHT: usize = 3;
const GAP: usize = 1;

/// Render the bracket panel into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(panel_title(&state.view));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(bracket) = state.view.bracket.as_ref() else {
        let message = if state.view.has_data() {
            "  No match results recorded."
        } else {
            NO_DATA
        };
        let paragraph = Paragraph::new(message).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, inner);
        return;
    };

    let rounds = bracket.len();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, rounds as u32); rounds])
        .split(inner);

    let height = column_height(bracket);
    let highlight = state.highlighted_username();
    let scroll = u16::try_from(state.bracket_scroll).unwrap_or(u16::MAX);

    for (idx, (round, column)) in bracket.rounds.iter().zip(columns.iter()).enumerate() {
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(*column);

        let header = Paragraph::new(Line::from(Span::styled(
            column_title(bracket, idx),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(header, sections[0]);

        let body = Paragraph::new(round_lines(round, idx, height, highlight)).scroll((scroll, 0));
        frame.render_widget(body, sections[1]);
    }
}

fn panel_title(view: &TopCutView) -> String {
    if view.is_rescaled() {
        format!(
            " Top Cut: Top {} (requested {}) ",
            view.effective_top,
            view.requested_top.value()
        )
    } else {
        format!(" Top Cut: Top {} ", view.effective_top)
    }
}

/// Round title, with the source round number when the log supplied one.
pub fn column_title(bracket: &Bracket, idx: usize) -> String {
    let title = bracket.round_title(idx);
    match bracket.rounds.get(idx).and_then(|round| round.round_number) {
        Some(number) => format!("{title} (R{number})"),
        None => title,
    }
}

fn stride(round_idx: usize) -> usize {
    (BLOCK_HEIGHT + GAP) << round_idx
}

/// First row of the match in `slot` of round `round_idx`.
pub fn match_top(round_idx: usize, slot: usize) -> usize {
    let stride = stride(round_idx);
    slot * stride + (stride - GAP) / 2 - BLOCK_HEIGHT / 2
}

/// Rows needed to lay out every round, including matches appended past
/// the expected slot count.
pub fn column_height(bracket: &Bracket) -> usize {
    let rounds = bracket.len();
    bracket
        .rounds
        .iter()
        .enumerate()
        .map(|(idx, round)| {
            let expected = 1usize << (rounds - 1 - idx);
            round.matches.len().max(expected) * stride(idx)
        })
        .max()
        .unwrap_or(0)
}

/// Scrollable height of the bracket body; 0 without a bracket.
pub fn content_height(view: &TopCutView) -> usize {
    view.bracket.as_ref().map_or(0, column_height)
}

/// Lines for one bracket column, `height` rows tall.
pub fn round_lines(
    round: &Round,
    round_idx: usize,
    height: usize,
    highlight: Option<&str>,
) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default(); height];

    if round.matches.is_empty() {
        if let Some(first) = lines.first_mut() {
            *first = Line::from(Span::styled(
                "  no results",
                Style::default().fg(Color::DarkGray),
            ));
        }
        return lines;
    }

    for (slot, m) in round.matches.iter().enumerate() {
        let top = match_top(round_idx, slot);
        if top + BLOCK_HEIGHT > height {
            break;
        }
        lines[top] = player_line("┌ ", &m.player1, m, highlight);
        lines[top + 1] = Line::from(vec![
            Span::raw("│ "),
            Span::styled(score(m), Style::default().fg(Color::Gray)),
        ]);
        lines[top + 2] = player_line("└ ", &m.player2, m, highlight);
    }
    lines
}

fn player_line(
    connector: &'static str,
    slot: &Option<Deck>,
    m: &BracketMatch,
    highlight: Option<&str>,
) -> Line<'static> {
    let Some(deck) = slot else {
        return Line::from(vec![
            Span::raw(connector),
            Span::styled(TBD, Style::default().fg(Color::DarkGray)),
        ]);
    };

    let username = deck.melee_player_username.as_str();
    let mut style = if m.is_winner(username) {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else if m.winner.is_some() {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::White)
    };
    if highlight == Some(username) {
        style = style.add_modifier(Modifier::REVERSED);
    }

    Line::from(vec![
        Span::raw(connector),
        Span::styled(username.to_string(), style),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
