// TUI viewer: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the loaded event and the top-cut view
// computed from it. Key presses mutate the state (requested depth, selected
// player, bracket scroll) and the frame is redrawn after every event.

pub mod input;
pub mod layout;
pub mod widgets;

use crossterm::event::{self, Event};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{DefaultTerminal, Frame};
use tracing::{debug, info};

use topcut_core::{Deck, RequestedTop, TopCutView};

use crate::data::EventData;
use layout::{build_layout, AppLayout};

/// Commands the viewer hands back to the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    Quit,
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Viewer state: the event on screen plus everything the keys can change.
pub struct ViewState {
    /// The loaded tournament; never modified by the viewer.
    pub event: EventData,
    /// Depth the user asked for; the view may show less for small events.
    pub requested_top: RequestedTop,
    /// Pipeline output for `event` at `requested_top`.
    pub view: TopCutView,
    /// Index into the standings order of the highlighted player.
    pub selected: usize,
    /// First visible row of the bracket columns.
    pub bracket_scroll: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(EventData::default(), RequestedTop::default())
    }
}

impl ViewState {
    pub fn new(event: EventData, requested_top: RequestedTop) -> Self {
        let view = TopCutView::compute(
            &event.tournament,
            &event.decks,
            &event.matches,
            requested_top,
        );
        ViewState {
            event,
            requested_top,
            view,
            selected: 0,
            bracket_scroll: 0,
        }
    }

    /// Re-run the pipeline for the current requested depth.
    pub fn recompute(&mut self) {
        self.view = TopCutView::compute(
            &self.event.tournament,
            &self.event.decks,
            &self.event.matches,
            self.requested_top,
        );
        let count = self.standings_len();
        self.selected = self.selected.min(count.saturating_sub(1));
        self.bracket_scroll = 0;
        debug!(
            "recomputed view: requested {}, effective {}",
            self.requested_top.value(),
            self.view.effective_top
        );
    }

    pub fn set_requested_top(&mut self, requested_top: RequestedTop) {
        if self.requested_top != requested_top {
            self.requested_top = requested_top;
            self.recompute();
        }
    }

    /// Top 4 -> Top 8 -> Top 16 -> Top 4.
    pub fn cycle_top(&mut self) {
        self.set_requested_top(self.requested_top.next());
    }

    pub fn standings_len(&self) -> usize {
        self.view.standings_order().count()
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.standings_len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_deck(&self) -> Option<&Deck> {
        self.view.standings_order().nth(self.selected)
    }

    /// Username to highlight in the bracket.
    pub fn highlighted_username(&self) -> Option<&str> {
        self.selected_deck()
            .map(|deck| deck.melee_player_username.as_str())
    }

    pub fn scroll_bracket_down(&mut self, rows: usize) {
        let max = widgets::bracket::content_height(&self.view);
        self.bracket_scroll = (self.bracket_scroll + rows).min(max.saturating_sub(1));
    }

    pub fn scroll_bracket_up(&mut self, rows: usize) {
        self.bracket_scroll = self.bracket_scroll.saturating_sub(rows);
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete viewer frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::bracket::render(frame, layout.bracket, state);
    widgets::standings::render(frame, layout.standings, state);
    render_help_bar(frame, &layout);
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout) {
    let text = " q:Quit | t:Top 4/8/16 | j/k:Select player | PgUp/PgDn:Scroll bracket";
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the viewer until the user quits.
///
/// Enters the alternate screen, installs a panic hook that restores the
/// terminal, then blocks on keyboard input and redraws after every event.
/// The terminal is restored on both clean exit and error.
pub fn run(mut view_state: ViewState) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = event_loop(&mut terminal, &mut view_state);

    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, view_state: &mut ViewState) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| render_frame(frame, view_state))?;

        match event::read()? {
            Event::Key(key_event) => {
                if let Some(UserCommand::Quit) = input::handle_key(key_event, view_state) {
                    info!("quit requested");
                    return Ok(());
                }
            }
            // Resize and mouse events just trigger a redraw.
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
