// Screen layout: panel arrangement and sizing.
//
// Divides the terminal area into fixed zones for the lineup builder:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------+-----------------------+
// | Board / Picker (60%)     | Sidebar (40%)         |
// |                          | +- Teams (40%) ------+|
// |                          | +- Saved (60%) ------+|
// +--------------------------+-----------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: lineup name, formation, fill count, latest notice.
    pub status_bar: Rect,
    /// Left side: formation board, or the player picker while choosing.
    pub board: Rect,
    /// Right sidebar top: teams available for auto-fill.
    pub teams: Rect,
    /// Right sidebar bottom: saved lineups.
    pub saved: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: status(1) | middle(fill) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(10),   // middle section (board + sidebar)
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let status_bar = vertical[0];
    let middle = vertical[1];
    let help_bar = vertical[2];

    // Horizontal: board (60%) | sidebar (40%)
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(middle);

    let board = horizontal[0];
    let sidebar = horizontal[1];

    // Sidebar vertical: teams (40%) | saved (60%)
    let sidebar_sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(sidebar);

    let teams = sidebar_sections[0];
    let saved = sidebar_sections[1];

    AppLayout {
        status_bar,
        board,
        teams,
        saved,
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// A reasonable terminal size for testing.
    fn test_area() -> Rect {
        Rect::new(0, 0, 140, 45)
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(test_area());
        let rects = [
            ("status_bar", layout.status_bar),
            ("board", layout.board),
            ("teams", layout.teams),
            ("saved", layout.saved),
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
    fn layout_bars_are_single_rows() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.help_bar.height, 1);
    }

    #[test]
    fn layout_board_wider_than_sidebar() {
        let layout = build_layout(test_area());
        assert!(layout.board.width > layout.teams.width);
    }

    #[test]
    fn layout_sidebar_sections_stack_vertically() {
        let layout = build_layout(test_area());
        assert!(layout.teams.y < layout.saved.y);
        assert_eq!(layout.teams.width, layout.saved.width);
    }

    #[test]
    fn layout_fits_within_area() {
        let area = test_area();
        let layout = build_layout(area);
        for rect in [
            layout.status_bar,
            layout.board,
            layout.teams,
            layout.saved,
            layout.help_bar,
        ] {
            assert!(rect.x + rect.width <= area.width, "{rect:?}");
            assert!(rect.y + rect.height <= area.height, "{rect:?}");
        }
    }

    #[test]
    fn layout_small_terminal_still_valid() {
        let layout = build_layout(Rect::new(0, 0, 40, 16));
        for rect in [
            layout.status_bar,
            layout.board,
            layout.teams,
            layout.saved,
            layout.help_bar,
        ] {
            assert!(rect.width > 0 && rect.height > 0, "{rect:?}");
        }
    }
}
