//! Input handling — maps key/mouse events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::{Action, KeyBind};
use crate::core::controller::{CarouselEvent, Effect};
use crate::ui::layout::{point_in_rect, AppLayout};

use super::settings::{SettingsItem, SETTINGS_ITEMS};
use super::state::{ActiveView, AppState};

/// Keyboard and wheel steps are fed to the swipe policy as gestures of this
/// many thresholds, so they always count as a swipe.
const SYNTHETIC_SWIPE_FACTOR: f64 = 2.0;

/// Total selectable rows in the controls submenu (actions + "Reset").
pub fn controls_item_count() -> usize {
    Action::ALL.len() + 1
}

/// Run one event through the carousel and surface what happened.
pub fn dispatch(state: &mut AppState, event: CarouselEvent) {
    for effect in state.carousel.update(event) {
        match effect {
            Effect::CategoryChanged { category } => {
                state.status_message = Some(format!("Showing {category} models"));
            }
            Effect::ActiveIndexChanged { index } => {
                tracing::debug!(index, "active index changed");
                state.status_message = None;
            }
            Effect::RotateTo { target } => tracing::debug!(target, "rotating"),
            Effect::ContentSwapped { index } => tracing::debug!(index, "content swapped"),
            Effect::TransitionFinished { index } => tracing::debug!(index, "transition done"),
        }
    }
}

/// A gesture that moves the carousel one step in `sign` direction
/// (negative = next item).
fn step_carousel(state: &mut AppState, sign: f64) {
    let translation_x = sign * state.config.swipe_threshold * SYNTHETIC_SWIPE_FACTOR;
    dispatch(state, CarouselEvent::SwipeEnd { translation_x });
}

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Carousel => handle_carousel_key(state, key),
        ActiveView::Details => handle_details_key(state, key),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
        ActiveView::ControlsSubmenu => {
            if state.awaiting_rebind {
                handle_rebind_key(state, key);
            } else {
                handle_controls_key(state, key);
            }
        }
    }
}

// ── Carousel view (configurable bindings) ───────────────────────

fn handle_carousel_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Next => step_carousel(state, -1.0),
        Action::Previous => step_carousel(state, 1.0),
        Action::ToggleCategory => {
            state.swipe.cancel();
            dispatch(state, CarouselEvent::ToggleCategory);
        }
        Action::ToggleDetails => {
            state.swipe.cancel();
            state.active_view = ActiveView::Details;
        }
        Action::ToggleSpin => {
            state.config.auto_spin = !state.config.auto_spin;
            state.apply_tuning();
            state.save_config();
        }
        Action::OpenSettings => {
            state.swipe.cancel();
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::Quit => state.should_quit = true,
    }
}

// ── Feature-detail overlay ──────────────────────────────────────

fn handle_details_key(state: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        state.active_view = ActiveView::Carousel;
        return;
    }
    match state.config.match_key(key) {
        Some(Action::ToggleDetails) => state.active_view = ActiveView::Carousel,
        // The overlay follows the carousel while it rotates underneath.
        Some(Action::Next) => step_carousel(state, -1.0),
        Some(Action::Previous) => step_carousel(state, 1.0),
        Some(Action::Quit) => state.should_quit = true,
        _ => {}
    }
}

// ── Settings menu (hardcoded navigation) ────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Carousel;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected < SETTINGS_ITEMS.len() - 1 {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                match item {
                    SettingsItem::Submenu { view, .. } => {
                        state.active_view = *view;
                        state.controls_selected = 0;
                    }
                    SettingsItem::Toggle { get, set, .. } => {
                        let current = get(state);
                        set(state, !current);
                    }
                    SettingsItem::Cycle { cycle, .. } => {
                        cycle(state);
                    }
                }
            }
        }
        _ => {}
    }
}

// ── Controls submenu (interactive rebinding) ────────────────────

fn handle_controls_key(state: &mut AppState, key: KeyEvent) {
    let item_count = controls_item_count();

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            state.active_view = ActiveView::Carousel;
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.active_view = ActiveView::SettingsMenu;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.controls_selected = state.controls_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.controls_selected < item_count - 1 {
                state.controls_selected += 1;
            }
        }
        KeyCode::Enter => {
            if state.controls_selected < Action::ALL.len() {
                state.awaiting_rebind = true;
            } else {
                state.config.reset_defaults();
                state.save_config();
                state.status_message = Some("Key bindings reset".into());
            }
        }
        KeyCode::Delete | KeyCode::Backspace => {
            if let Some(&action) = Action::ALL.get(state.controls_selected) {
                state.config.bindings.insert(action, Vec::new());
                state.save_config();
            }
        }
        _ => {}
    }
}

/// Capture the next key press as a new binding.
fn handle_rebind_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.code == KeyCode::Esc {
        state.awaiting_rebind = false;
        return;
    }

    // Ctrl+C stays reserved for quitting (handled before we get here).
    let Some(&action) = Action::ALL.get(state.controls_selected) else {
        state.awaiting_rebind = false;
        return;
    };
    state.config.add_binding(action, KeyBind::from_key_event(key));
    state.save_config();
    state.awaiting_rebind = false;
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    match state.active_view {
        ActiveView::Carousel => {}
        ActiveView::Details => {
            if let MouseEventKind::Down(_) = mouse.kind {
                state.active_view = ActiveView::Carousel;
            }
            return;
        }
        ActiveView::SettingsMenu | ActiveView::ControlsSubmenu => return,
    }

    let layout = AppLayout::from_area(state.terminal_area);
    let on_stage = point_in_rect(layout.stage_area, mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if on_stage {
                state.swipe.begin(mouse.column);
            } else if point_in_rect(layout.panel_area, mouse.column, mouse.row) {
                state.active_view = ActiveView::Details;
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            state.swipe.update(mouse.column);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            // Releases count wherever they land; only the press must be on
            // the stage.
            if let Some(translation_x) = state.swipe.end(mouse.column, state.config.drag_scale) {
                tracing::debug!(translation_x, "drag released");
                dispatch(state, CarouselEvent::SwipeEnd { translation_x });
            }
        }
        MouseEventKind::ScrollDown if on_stage => step_carousel(state, -1.0),
        MouseEventKind::ScrollUp if on_stage => step_carousel(state, 1.0),
        _ => {}
    }
}
