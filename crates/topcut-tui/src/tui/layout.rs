// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +-------------------------------+------------------+
// | Bracket (68%)                 | Standings (32%)  |
// |                               |                  |
// +-------------------------------+------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each viewer zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: event name, date, attendance, depth shown.
    pub status_bar: Rect,
    /// Left panel: one column per elimination round.
    pub bracket: Rect,
    /// Right panel: placement bands.
    pub standings: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the viewer layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(6),    // bracket + standings
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(vertical[1]);

    AppLayout {
        status_bar: vertical[0],
        bracket: horizontal[0],
        standings: horizontal[1],
        help_bar: vertical[2],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_area() -> Rect {
        Rect::new(0, 0, 160, 50)
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(test_area());
        let rects = [
            ("status_bar", layout.status_bar),
            ("bracket", layout.bracket),
            ("standings", layout.standings),
            ("help_bar", layout.help_bar),
        ];
        for (name, rect) in &rects {
            assert!(
                rect.width > 0 && rect.height > 0,
                "{} has zero area: {:?}",
                name,
                rect
            );
        }
    }

    #[test]
    fn layout_bars_are_one_row() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.help_bar.height, 1);
        assert_eq!(layout.status_bar.y, 0);
        assert!(layout.help_bar.y > layout.bracket.y);
    }

    #[test]
    fn layout_panels_share_the_middle() {
        let layout = build_layout(test_area());
        assert_eq!(layout.bracket.height, layout.standings.height);
        assert_eq!(layout.bracket.y, layout.standings.y);
        assert!(layout.bracket.width > layout.standings.width);
    }

    #[test]
    fn layout_bracket_left_of_standings() {
        let layout = build_layout(test_area());
        assert_eq!(layout.bracket.x, 0);
        assert_eq!(layout.standings.x, layout.bracket.width);
    }
}
