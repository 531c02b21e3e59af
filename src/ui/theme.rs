//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Panel background the fade blends toward.
pub const BACKGROUND: (u8, u8, u8) = (0, 0, 0);

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── stage ──────────────────────────────────────────────────
    pub const ACTIVE_MODEL: Color = Color::Rgb(120, 220, 255);
    pub const IDLE_MODEL: Color = Color::Rgb(110, 110, 130);
    pub const DIMMED_MODEL: Color = Color::Rgb(50, 50, 60);
    pub const ORBIT: Color = Color::Rgb(60, 60, 75);

    // ── info panel (RGB so opacity can blend them) ─────────────
    pub const PANEL_TITLE: (u8, u8, u8) = (120, 220, 255);
    pub const PANEL_TEXT: (u8, u8, u8) = (220, 220, 220);
    pub const PANEL_FEATURE: (u8, u8, u8) = (240, 200, 90);
    pub const PANEL_CTA: (u8, u8, u8) = (90, 220, 120);

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn indicator_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }
}

/// Blend `rgb` toward the background by `opacity` (1 = full colour).
pub fn faded(rgb: (u8, u8, u8), opacity: f64) -> Color {
    let t = opacity.clamp(0.0, 1.0);
    let mix = |c: u8, bg: u8| (bg as f64 + (c as f64 - bg as f64) * t).round() as u8;
    Color::Rgb(
        mix(rgb.0, BACKGROUND.0),
        mix(rgb.1, BACKGROUND.1),
        mix(rgb.2, BACKGROUND.2),
    )
}
