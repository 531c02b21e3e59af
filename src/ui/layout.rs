//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows reserved for the information panel (borders included).
const PANEL_HEIGHT: u16 = 11;

/// Primary screen layout: 3D stage on top, information panel below, and a
/// one-line status bar.
pub struct AppLayout {
    pub stage_area: Rect,
    pub panel_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(6), // stage (takes all remaining space)
                Constraint::Length(PANEL_HEIGHT), // information panel
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            stage_area: chunks[0],
            panel_area: chunks[1],
            status_area: chunks[2],
        }
    }
}

/// `true` if the cell `(col, row)` lies inside `area`.
pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_stack_without_overlap() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 40));
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.status_area.y, 39);
        assert_eq!(layout.panel_area.height, PANEL_HEIGHT);
        assert_eq!(layout.stage_area.y, 0);
        assert_eq!(layout.stage_area.bottom(), layout.panel_area.y);
    }

    #[test]
    fn point_in_rect_edges() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(point_in_rect(r, 2, 3));
        assert!(point_in_rect(r, 5, 4));
        assert!(!point_in_rect(r, 6, 4));
        assert!(!point_in_rect(r, 2, 5));
    }
}
