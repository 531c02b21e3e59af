//! Position indicator — category label plus one dot per item, rendered in
//! the top-right corner of the stage border.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::items::Category;
use crate::ui::theme::Theme;

const ACTIVE_DOT: &str = "●";
const IDLE_DOT: &str = "○";

pub struct PositionIndicator {
    pub category: Category,
    pub item_count: usize,
    pub active: usize,
}

impl PositionIndicator {
    fn label(&self) -> String {
        let dots: Vec<&str> = (0..self.item_count)
            .map(|i| if i == self.active { ACTIVE_DOT } else { IDLE_DOT })
            .collect();
        format!(" {} {} ", self.category, dots.join(" "))
    }
}

impl Widget for PositionIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = self.label();
        let label_width = label.chars().count() as u16;
        if area.height == 0 || area.width < label_width + 4 {
            return;
        }

        // Top-right, inside the border (leave 1 col for the border char).
        let x = area.x + area.width.saturating_sub(label_width + 2);
        let y = area.y;

        let line = Line::from(Span::styled(label, Theme::indicator_style()));
        buf.set_line(x, y, &line, label_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_marks_active_dot() {
        let ind = PositionIndicator {
            category: Category::Action,
            item_count: 3,
            active: 1,
        };
        assert_eq!(ind.label(), " Action ○ ● ○ ");
    }

    #[test]
    fn renders_on_top_border() {
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        PositionIndicator {
            category: Category::Info,
            item_count: 2,
            active: 0,
        }
        .render(area, &mut buf);
        let top: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(top.contains("Info ● ○"), "{top:?}");
    }
}
