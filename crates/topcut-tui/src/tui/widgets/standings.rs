// Standings widget: placement bands with the selected player highlighted.
//
// "1st      alice   Vader Aggro"
// "3rd-4th  carol   Han Tempo"
// Scrolls to keep the selection visible.

use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use ratatui::Frame;

use topcut_core::{Deck, PlacementBand};

use crate::tui::ViewState;

/// Render the standings panel into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let rows = standings_rows(&state.view.standings);
    if rows.is_empty() {
        let paragraph = Paragraph::new("  No final placements yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Standings"));
        frame.render_widget(paragraph, area);
        return;
    }

    // Visible row count: subtract 2 for borders
    let visible_rows = (area.height as usize).saturating_sub(2).max(1);
    let total = rows.len();
    let offset = scroll_offset(state.selected, visible_rows, total);

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows)
        .map(|(idx, (label, deck))| format_row(label, deck, idx == state.selected))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Standings ({})", total)),
    );
    frame.render_widget(list, area);

    if total > visible_rows {
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(visible_rows)).position(offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

/// One `(band label, deck)` pair per deck, in display order.
pub fn standings_rows(standings: &[PlacementBand]) -> Vec<(&str, &Deck)> {
    standings
        .iter()
        .flat_map(|band| band.decks.iter().map(move |deck| (band.label.as_str(), deck)))
        .collect()
}

/// First visible row so that `selected` stays on screen.
pub fn scroll_offset(selected: usize, visible_rows: usize, total: usize) -> usize {
    let max_offset = total.saturating_sub(visible_rows);
    selected
        .saturating_sub(visible_rows.saturating_sub(1))
        .min(max_offset)
}

fn format_row<'a>(label: &str, deck: &Deck, selected: bool) -> ListItem<'a> {
    let base = if selected {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::styled(format!(" {:<8} ", label), base.fg(Color::Yellow)),
        Span::styled(
            deck.melee_player_username.clone(),
            base.fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ];
    if !deck.deck_name.is_empty() {
        spans.push(Span::styled(
            format!("  {}", deck.deck_name),
            base.fg(Color::Gray),
        ));
    }
    ListItem::new(Line::from(spans))
}

/// Plain text of one standings row (for testing).
pub fn format_row_text(label: &str, deck: &Deck) -> String {
    if deck.deck_name.is_empty() {
        format!("{:<8} {}", label, deck.melee_player_username)
    } else {
        format!("{:<8} {}  {}", label, deck.melee_player_username, deck.deck_name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
