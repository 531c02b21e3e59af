//! A terminal carousel of 3D wireframe models.
//!
//! Drag across the stage (or use the arrow keys) to rotate the next model to
//! the front; the information panel fades out, swaps and fades back in.
//! Run with `--list` to print the built-in models and exit.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::core::controller::{CarouselController, CarouselEvent};
use crate::core::items::{Catalog, Category};
use crate::ui::{
    indicator::PositionIndicator, info_panel::InfoPanel, layout::AppLayout, popup, stage::Stage,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Swipeable 3D model carousel")]
struct Cli {
    /// Item set to start on (`info` or `action`).
    #[arg(long, default_value = "info", value_parser = parse_category)]
    category: Category,

    /// Swipe threshold for this run (overrides the config file).
    #[arg(long, value_parser = parse_threshold)]
    threshold: Option<f64>,

    /// Animation frame rate.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(10..=120))]
    fps: u32,

    /// Print the built-in models and exit.
    #[arg(long)]
    list: bool,

    /// Don't write setting changes back to the config file.
    #[arg(long)]
    no_save: bool,
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse().map_err(|e: crate::core::carousel::CarouselError| e.to_string())
}

fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err("threshold must be a finite number".to_string())
    }
}

fn print_catalog(catalog: &Catalog) {
    for category in [Category::Info, Category::Action] {
        let set = catalog.set(category);
        println!("{} ({} models)", set.name(), set.len());
        for (i, item) in set.items().iter().enumerate() {
            println!(
                "  {i}. {:<10} [{}] {:<11} {}",
                item.title,
                item.id,
                item.shape.label(),
                item.description
            );
            for feature in item.features {
                println!("       • {feature}");
            }
        }
    }
}

// ───────────────────────────────────────── drawing ──────────

fn draw(frame: &mut ratatui::Frame<'_>, state: &AppState) {
    let layout = AppLayout::from_area(frame.area());
    let carousel = &state.carousel;
    let items = carousel.item_set();

    let stage_block = Block::default()
        .title(format!(" {} ", env!("CARGO_PKG_NAME")))
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style());
    let stage = Stage {
        items,
        placements: carousel.placements(),
        radius: carousel.tuning().radius,
        spin: carousel.spin(),
        scale: carousel.scene_scale(),
        dimmed: state.active_view != ActiveView::Carousel,
        block: None,
    }
    .block(stage_block);
    frame.render_widget(stage, layout.stage_area);
    frame.render_widget(
        PositionIndicator {
            category: carousel.category(),
            item_count: items.len(),
            active: carousel.active_index(),
        },
        layout.stage_area,
    );

    frame.render_widget(
        InfoPanel {
            item: carousel.displayed_item(),
            opacity: carousel.panel_opacity(),
            offset: carousel.panel_offset(),
        },
        layout.panel_area,
    );

    let status_text = match state.active_view {
        ActiveView::Carousel if state.swipe.is_dragging() => {
            format!("dragging {:+} cols", state.swipe.live_columns())
        }
        ActiveView::Carousel => state
            .status_message
            .clone()
            .unwrap_or_else(|| state.config.status_bar_hint()),
        ActiveView::Details | ActiveView::SettingsMenu | ActiveView::ControlsSubmenu => {
            String::new()
        }
    };
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);

    match state.active_view {
        ActiveView::Details => {
            if let Some(item) = carousel.active_item() {
                frame.render_widget(popup::DetailsPopup { item }, frame.area());
            }
        }
        ActiveView::SettingsMenu => {
            frame.render_widget(popup::SettingsPopup { state }, frame.area());
        }
        ActiveView::ControlsSubmenu => {
            frame.render_widget(
                popup::ControlsPopup {
                    config: &state.config,
                    selected: state.controls_selected,
                    awaiting_rebind: state.awaiting_rebind,
                },
                frame.area(),
            );
        }
        ActiveView::Carousel => {}
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (silent unless RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // stderr also hosts the TUI; only log when redirected
        .init();

    let cli = Cli::parse();
    let catalog = Catalog::builtin().context("built-in catalog")?;

    if cli.list {
        print_catalog(&catalog);
        return Ok(());
    }

    let mut config = config::AppConfig::load();
    if let Some(threshold) = cli.threshold {
        config.override_threshold(threshold);
    }
    let carousel = CarouselController::new(catalog, cli.category, config.tuning());
    let mut state = AppState::new(carousel, config);
    state.persist_config = !cli.no_save && cli.threshold.is_none();
    tracing::debug!(category = %cli.category, fps = cli.fps, "starting");

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state, cli.fps).await;

    // ── teardown (always, even if the loop failed) ────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    state: &mut AppState,
    fps: u32,
) -> Result<()> {
    let mut events = spawn_event_reader();
    let mut frames = tokio::time::interval(Duration::from_secs(1) / fps);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut last_frame = Instant::now();
    let mut dirty = true;

    loop {
        if dirty {
            let size = terminal.size()?;
            state.terminal_area = Rect::new(0, 0, size.width, size.height);
            terminal.draw(|frame| draw(frame, &*state))?;
            dirty = false;
        }

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m),
                    AppEvent::Resize => {}
                }
                dirty = true;
            }

            _ = frames.tick() => {
                let now = Instant::now();
                let dt = now - last_frame;
                last_frame = now;
                // Only redraw while something is moving.
                if state.carousel.is_animating() {
                    handler::dispatch(state, CarouselEvent::Tick(dt));
                    dirty = true;
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
