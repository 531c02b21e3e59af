//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and UI renderers consume the same source of truth without cross-importing.

use super::state::{ActiveView, AppState};

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Opens a submenu.
    Submenu {
        label: &'static str,
        view: ActiveView,
    },
    /// Boolean toggle — reads/writes via accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submenu { label, .. }
            | Self::Toggle { label, .. }
            | Self::Cycle { label, .. } => label,
        }
    }
}

/// Next entry of `options` after the one closest to `current`.
fn next_option<T: Copy + PartialOrd + Into<f64>>(options: &[T], current: T) -> T {
    let current: f64 = current.into();
    let idx = options
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            let da = (Into::<f64>::into(**a) - current).abs();
            let db = (Into::<f64>::into(**b) - current).abs();
            da.total_cmp(&db)
        })
        .map_or(0, |(i, _)| i);
    options[(idx + 1) % options.len()]
}

/// Save, push tuning into the controller and report the new value.
fn commit(s: &mut AppState, message: String) {
    s.apply_tuning();
    s.save_config();
    s.status_message = Some(message);
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Submenu {
        label: "Controls",
        view: ActiveView::ControlsSubmenu,
    },
    SettingsItem::Toggle {
        label: "Auto Spin",
        get: |s| s.config.auto_spin,
        set: |s, v| {
            s.config.auto_spin = v;
            commit(s, format!("Auto spin: {}", if v { "on" } else { "off" }));
        },
    },
    SettingsItem::Cycle {
        label: "Swipe Threshold",
        value: |s| format!("{}", s.config.swipe_threshold),
        cycle: |s| {
            const THRESHOLDS: &[f64] = &[30.0, 50.0, 80.0, 120.0];
            s.config.swipe_threshold = next_option(THRESHOLDS, s.config.swipe_threshold);
            commit(s, format!("Swipe threshold: {}", s.config.swipe_threshold));
        },
    },
    SettingsItem::Cycle {
        label: "Spring Tension",
        value: |s| format!("{}", s.config.spring_tension),
        cycle: |s| {
            const TENSIONS: &[f64] = &[120.0, 200.0, 300.0, 450.0];
            s.config.spring_tension = next_option(TENSIONS, s.config.spring_tension);
            commit(s, format!("Spring tension: {}", s.config.spring_tension));
        },
    },
    SettingsItem::Cycle {
        label: "Spring Friction",
        value: |s| format!("{}", s.config.spring_friction),
        cycle: |s| {
            const FRICTIONS: &[f64] = &[12.0, 20.0, 30.0, 45.0];
            s.config.spring_friction = next_option(FRICTIONS, s.config.spring_friction);
            commit(s, format!("Spring friction: {}", s.config.spring_friction));
        },
    },
    SettingsItem::Cycle {
        label: "Fade Duration",
        value: |s| format!("{}ms", s.config.fade_ms),
        cycle: |s| {
            const FADES: &[u32] = &[120, 200, 350, 500];
            s.config.fade_ms = next_option(FADES, s.config.fade_ms as u32) as u64;
            commit(s, format!("Fade duration: {}ms", s.config.fade_ms));
        },
    },
    SettingsItem::Cycle {
        label: "Carousel Radius",
        value: |s| format!("{:.1}", s.config.radius),
        cycle: |s| {
            const RADII: &[f64] = &[1.8, 2.4, 3.0];
            s.config.radius = next_option(RADII, s.config.radius);
            commit(s, format!("Carousel radius: {:.1}", s.config.radius));
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_option_wraps_and_snaps_to_nearest() {
        let opts = [30.0, 50.0, 80.0];
        assert_eq!(next_option(&opts, 50.0), 80.0);
        assert_eq!(next_option(&opts, 80.0), 30.0);
        // Off-list values continue from the closest entry.
        assert_eq!(next_option(&opts, 52.0), 80.0);
        assert_eq!(next_option(&[120u32, 200, 350], 200), 350);
    }

    #[test]
    fn labels_are_unique() {
        let mut labels: Vec<_> = SETTINGS_ITEMS.iter().map(|i| i.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), SETTINGS_ITEMS.len());
    }
}
