//! Popup overlay widgets — settings menu, controls submenu and the
//! feature-detail overlay.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::app::settings::{SettingsItem, SETTINGS_ITEMS};
use crate::app::state::AppState;
use crate::config::{Action, AppConfig};
use crate::core::items::Item;

fn popup_block(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn row_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

// ───────────────────────────────────────── settings popup ────

/// Settings menu popup overlay.
pub struct SettingsPopup<'a> {
    pub state: &'a AppState,
}

impl<'a> Widget for SettingsPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (SETTINGS_ITEMS.len() as u16) + 6;
        let popup = centered_fixed(44, height, area);
        Clear.render(popup, buf);

        let block = popup_block("Settings");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::raw("")];
        for (i, item) in SETTINGS_ITEMS.iter().enumerate() {
            let selected = i == self.state.settings_selected;
            let prefix = if selected { " ▸ " } else { "   " };
            let label = Span::styled(format!("{prefix}{:<20}", item.label()), row_style(selected));

            let value = match item {
                SettingsItem::Submenu { .. } => Span::raw(""),
                SettingsItem::Toggle { get, .. } => {
                    if get(self.state) {
                        Span::styled("[ON]", Style::default().fg(Color::Green))
                    } else {
                        Span::styled("[OFF]", Style::default().fg(Color::DarkGray))
                    }
                }
                SettingsItem::Cycle { value, .. } => {
                    Span::styled(value(self.state), Style::default().fg(Color::Yellow))
                }
            };
            lines.push(Line::from(vec![label, value]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter/Space: change  Esc: close",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── controls popup ────

/// Interactive controls / keybinding popup overlay.
pub struct ControlsPopup<'a> {
    pub config: &'a AppConfig,
    pub selected: usize,
    pub awaiting_rebind: bool,
}

impl<'a> Widget for ControlsPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // actions + blank + reset + blank + hint + leading blank + 2 border
        let height = (Action::ALL.len() as u16) + 7;
        let popup = centered_fixed(56, height, area);
        Clear.render(popup, buf);

        let block = popup_block("Controls");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::raw("")];

        for (i, &action) in Action::ALL.iter().enumerate() {
            let selected = i == self.selected;
            let rebinding = selected && self.awaiting_rebind;
            let prefix = if selected { " ▸ " } else { "   " };

            let keys_display = if rebinding {
                "Press a key…".to_string()
            } else {
                self.config.display_bindings(action)
            };

            let mut key_style = Style::default().fg(Color::Yellow);
            if selected {
                key_style = key_style.bg(Color::DarkGray);
            }
            if rebinding {
                key_style = key_style.add_modifier(Modifier::BOLD);
            }

            // Label left-aligned, keys right-aligned.
            let label_col = format!("{prefix}{:<24}", action.label());
            let keys_width = (inner.width as usize)
                .saturating_sub(label_col.chars().count())
                .max(1);
            let keys_col = format!("{keys_display:>keys_width$}");

            lines.push(Line::from(vec![
                Span::styled(label_col, row_style(selected)),
                Span::styled(keys_col, key_style),
            ]));
        }

        let reset_selected = self.selected == Action::ALL.len();
        let reset_prefix = if reset_selected { " ▸ " } else { "   " };
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!("{reset_prefix}⟳ Reset to defaults"),
            row_style(reset_selected),
        )));

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter: add key  Del: clear  Esc: back",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── details popup ─────

/// Full feature list of the active item, shown over the dimmed stage.
pub struct DetailsPopup<'a> {
    pub item: &'a Item,
}

impl<'a> Widget for DetailsPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let feature_rows = self.item.features.len().max(1) as u16;
        let popup = centered_fixed(52, feature_rows + 9, area);
        Clear.render(popup, buf);

        let block = popup_block(self.item.title);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let dim = Style::default().fg(Color::DarkGray);
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} model", self.item.shape.label()),
                dim,
            )),
            Line::raw(""),
            Line::from(self.item.description),
            Line::raw(""),
        ];
        if self.item.features.is_empty() {
            lines.push(Line::from(Span::styled("No feature list for this model.", dim)));
        }
        for feature in self.item.features {
            lines.push(Line::from(Span::styled(
                format!("• {feature}"),
                Style::default().fg(Color::Yellow),
            )));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "Esc: close  ←/→: rotate",
            dim,
        )));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
