//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::controller::CarouselController;

use super::gesture::SwipeTracker;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Carousel,
    /// Feature list of the active item over a dimmed stage.
    Details,
    SettingsMenu,
    ControlsSubmenu,
}

/// Top-level application state.
pub struct AppState {
    /// Rotation, active item, panel transition.
    pub carousel: CarouselController,
    /// Drag in progress on the stage, if any.
    pub swipe: SwipeTracker,
    /// User configuration (bindings + tuning).
    pub config: AppConfig,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
    /// Currently highlighted item in the controls submenu.
    pub controls_selected: usize,
    /// When `true`, the controls submenu is waiting for the user to press
    /// a key to rebind the action at `controls_selected`.
    pub awaiting_rebind: bool,
    /// Last known terminal size, for mouse hit-testing.
    pub terminal_area: Rect,
    /// Write config changes to disk (off for in-memory sessions).
    pub persist_config: bool,
}

impl AppState {
    pub fn new(carousel: CarouselController, config: AppConfig) -> Self {
        Self {
            carousel,
            swipe: SwipeTracker::default(),
            config,
            active_view: ActiveView::default(),
            should_quit: false,
            status_message: None,
            settings_selected: 0,
            controls_selected: 0,
            awaiting_rebind: false,
            terminal_area: Rect::default(),
            persist_config: true,
        }
    }

    /// Push the config's tuning into the live controller.
    pub fn apply_tuning(&mut self) {
        self.carousel.set_tuning(self.config.tuning());
    }

    /// Persist config, reporting failure in the status bar.
    pub fn save_config(&mut self) {
        if !self.persist_config {
            return;
        }
        if let Err(err) = self.config.save() {
            tracing::warn!("saving config failed: {err:#}");
            self.status_message = Some(format!("Could not save config: {err}"));
        }
    }
}
