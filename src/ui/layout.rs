//! Screen regions.

use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

const TOAST_WIDTH: u16 = 56;
const TOAST_HEIGHT: u16 = 3;

/// UI layout areas.
pub struct Layout {
    /// Navbar (top line).
    pub status_area: Rect,
    pub tab_area: Rect,
    /// APY / CDR / TVL strip.
    pub stats_area: Rect,
    pub main_area: Rect,
    /// Bottom-right toast slot, overlaid.
    pub notification_area: Rect,
}

impl Layout {
    pub fn new(area: Rect) -> Self {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        let width = TOAST_WIDTH.min(area.width);
        let height = TOAST_HEIGHT.min(area.height);
        let notification_area = Rect {
            x: area.x + area.width - width,
            y: area.y + area.height - height,
            width,
            height,
        };

        Self {
            status_area: chunks[0],
            tab_area: chunks[1],
            stats_area: chunks[2],
            main_area: chunks[3],
            notification_area,
        }
    }
}

/// Create a centered popup area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_stack_vertically() {
        let layout = Layout::new(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.status_area, Rect::new(0, 0, 120, 1));
        assert_eq!(layout.tab_area.y, 1);
        assert_eq!(layout.stats_area, Rect::new(0, 2, 120, 3));
        assert_eq!(layout.main_area, Rect::new(0, 5, 120, 35));
        assert_eq!(layout.notification_area, Rect::new(64, 37, 56, 3));
    }

    #[test]
    fn test_toast_fits_narrow_terminal() {
        let layout = Layout::new(Rect::new(0, 0, 40, 2));
        assert_eq!(layout.notification_area, Rect::new(0, 0, 40, 2));
    }
}
