// Status bar widget: event header, depth tabs, champion.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use topcut_core::{RequestedTop, TopCutView};

use crate::report::header_line;
use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [event header] | [depth tabs] | [champion]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let header_style = if state.view.is_rescaled() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", header_line(&state.event.tournament, &state.view)),
        header_style,
    )];

    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
    spans.extend(top_spans(state.requested_top));

    if let Some(champion) = champion_label(&state.view) {
        spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            champion,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Depth selector spans with the requested size highlighted.
/// E.g. "[Top 4] [Top 8] [Top 16]"
pub fn top_spans(active: RequestedTop) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for top in RequestedTop::ALL {
        let style = if top == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}]", top), style));
        spans.push(Span::raw(" "));
    }
    spans
}

pub fn champion_label(view: &TopCutView) -> Option<String> {
    view.bracket
        .as_ref()
        .and_then(|bracket| bracket.champion())
        .map(|deck| format!("Champion: {}", deck.melee_player_username))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
