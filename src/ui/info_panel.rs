//! Information panel — title, description, features and call-to-action of
//! the displayed item, drawn with the transition's opacity and offset.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::core::items::Item;
use crate::ui::theme::{faded, Theme};

/// Feature bullets shown inline before the rest are left to the detail overlay.
const INLINE_FEATURES: usize = 3;

pub struct InfoPanel<'a> {
    pub item: Option<&'a Item>,
    /// `0..=1`, from the panel transition.
    pub opacity: f64,
    /// Rows; negative slides up, positive slides down.
    pub offset: f64,
}

/// Text lines for `item` at `opacity`.
pub fn panel_lines(item: &Item, opacity: f64) -> Vec<Line<'static>> {
    let title = Style::default()
        .fg(faded(Theme::PANEL_TITLE, opacity))
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(faded(Theme::PANEL_TEXT, opacity));
    let feature = Style::default().fg(faded(Theme::PANEL_FEATURE, opacity));
    let cta = Style::default()
        .fg(faded(Theme::PANEL_CTA, opacity))
        .add_modifier(Modifier::BOLD | Modifier::REVERSED);

    let mut lines = vec![
        Line::from(Span::styled(item.title, title)),
        Line::from(Span::styled(item.description, text)),
    ];
    if !item.features.is_empty() {
        lines.push(Line::raw(""));
        for f in item.features.iter().take(INLINE_FEATURES) {
            lines.push(Line::from(Span::styled(format!("  • {f}"), feature)));
        }
        if item.features.len() > INLINE_FEATURES {
            lines.push(Line::from(Span::styled(
                format!("  … {} more", item.features.len() - INLINE_FEATURES),
                feature,
            )));
        }
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(format!(" {} ", item.cta), cta)));
    lines
}

/// Apply a vertical slide to `inner`: positive offsets push the content
/// down (shrinking the area), negative ones scroll its top out of view.
/// Returns the area to draw into and the paragraph scroll.
fn slide(inner: Rect, offset: f64) -> (Rect, u16) {
    let rows = offset.round();
    if rows >= 0.0 {
        let down = (rows as u16).min(inner.height);
        let area = Rect::new(inner.x, inner.y + down, inner.width, inner.height - down);
        (area, 0)
    } else {
        (inner, (-rows) as u16)
    }
}

impl<'a> Widget for InfoPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(item) = self.item else {
            return;
        };
        let (content, scroll) = slide(inner, self.offset);
        if content.height == 0 {
            return;
        }
        Paragraph::new(panel_lines(item, self.opacity))
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .render(content, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::items::{Catalog, Category};

    fn item() -> Item {
        Catalog::builtin()
            .unwrap()
            .set(Category::Info)
            .get(0)
            .unwrap()
            .clone()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn slide_moves_content() {
        let inner = Rect::new(1, 1, 20, 8);
        assert_eq!(slide(inner, 0.0), (inner, 0));
        assert_eq!(slide(inner, 2.2), (Rect::new(1, 3, 20, 6), 0));
        assert_eq!(slide(inner, -1.6), (inner, 2));
        assert_eq!(slide(inner, 50.0).0.height, 0);
    }

    #[test]
    fn features_and_cta_are_listed() {
        let lines = panel_lines(&item(), 1.0);
        let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(text[0], "Core");
        assert!(text.iter().any(|l| l.contains("• Six equal faces")));
        assert_eq!(text.last().unwrap(), " Learn more ");
    }

    #[test]
    fn title_renders_on_first_inner_row_at_rest() {
        let area = Rect::new(0, 0, 60, 11);
        let mut buf = Buffer::empty(area);
        let it = item();
        InfoPanel {
            item: Some(&it),
            opacity: 1.0,
            offset: 0.0,
        }
        .render(area, &mut buf);
        assert!(row_text(&buf, 1).contains("Core"));
    }

    #[test]
    fn positive_offset_pushes_title_down() {
        let area = Rect::new(0, 0, 60, 11);
        let mut buf = Buffer::empty(area);
        let it = item();
        InfoPanel {
            item: Some(&it),
            opacity: 0.5,
            offset: 2.0,
        }
        .render(area, &mut buf);
        assert!(!row_text(&buf, 1).contains("Core"));
        assert!(row_text(&buf, 3).contains("Core"));
    }
}
