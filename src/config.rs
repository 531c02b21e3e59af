//! User configuration — keybindings, carousel tuning and persistence.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/model-carousel/config.toml`
//! (default `~/.config/model-carousel/config.toml`).

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::controller::Tuning;
use crate::core::spring::SpringParams;

/// Accepted swipe thresholds, whether from the config file or `--threshold`.
pub const SWIPE_THRESHOLD_RANGE: RangeInclusive<f64> = 1.0..=1000.0;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the carousel screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Next,
    Previous,
    ToggleCategory,
    ToggleDetails,
    ToggleSpin,
    OpenSettings,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the controls menu).
    pub const ALL: &[Action] = &[
        Action::Next,
        Action::Previous,
        Action::ToggleCategory,
        Action::ToggleDetails,
        Action::ToggleSpin,
        Action::OpenSettings,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::Next => "Next Model",
            Action::Previous => "Previous Model",
            Action::ToggleCategory => "Switch Info / Action",
            Action::ToggleDetails => "Feature Details",
            Action::ToggleSpin => "Toggle Auto Spin",
            Action::OpenSettings => "Open Settings",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::Next => "next",
            Action::Previous => "previous",
            Action::ToggleCategory => "toggle_category",
            Action::ToggleDetails => "toggle_details",
            Action::ToggleSpin => "toggle_spin",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Only these modifiers take part in matching; SUPER/HYPER/META are ignored.
fn modifier_mask() -> KeyModifiers {
    KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = modifier_mask();
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Create a binding from a raw key event (used during rebinding).
    pub fn from_key_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers & modifier_mask(),
        }
    }

    /// User-friendly display string (e.g. `"Alt+←"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        self.render(true)
    }

    /// Config-file form (e.g. `"Alt+Left"`).
    fn to_config_string(&self) -> String {
        self.render(false)
    }

    fn render(&self, arrows: bool) -> String {
        let mut s = String::new();
        for (flag, name) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(name);
            }
        }
        let key = match (self.code, arrows) {
            (KeyCode::Up, true) => "↑".into(),
            (KeyCode::Down, true) => "↓".into(),
            (KeyCode::Left, true) => "←".into(),
            (KeyCode::Right, true) => "→".into(),
            (KeyCode::Up, false) => "Up".into(),
            (KeyCode::Down, false) => "Down".into(),
            (KeyCode::Left, false) => "Left".into(),
            (KeyCode::Right, false) => "Right".into(),
            (KeyCode::Char(' '), _) => "Space".into(),
            (KeyCode::Char(c), _) => c.to_string(),
            (KeyCode::Enter, _) => "Enter".into(),
            (KeyCode::Esc, _) => "Esc".into(),
            (KeyCode::Tab, _) => "Tab".into(),
            (KeyCode::BackTab, _) => "BackTab".into(),
            (KeyCode::Home, _) => "Home".into(),
            (KeyCode::End, _) => "End".into(),
            (KeyCode::PageUp, _) => "PageUp".into(),
            (KeyCode::PageDown, _) => "PageDown".into(),
            (KeyCode::F(n), _) => format!("F{n}"),
            (other, _) => format!("{other:?}"),
        };
        s.push_str(&key);
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Left"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        for part in mods {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => KeyCode::F(k[1..].parse().ok()?),
            // Keep the original case for single characters (`N` ≠ `n`).
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── errors ────────────

/// Problems found while reading the config file.  None of these are fatal:
/// the offending line is skipped and the default kept.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("line {line}: expected `key = value`")]
    Malformed { line: usize },

    #[error("line {line}: unknown key `{key}`")]
    UnknownKey { line: usize, key: String },

    #[error("line {line}: invalid value `{value}` for `{key}`")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },
}

// ───────────────────────────────────────── config ────────────

/// Application configuration — keybindings and carousel tuning.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Gesture displacement (in gesture units) a swipe must exceed.
    pub swipe_threshold: f64,
    /// Gesture units per terminal column of mouse drag.
    pub drag_scale: f64,
    pub spring_tension: f64,
    pub spring_friction: f64,
    /// Duration of each half of the panel transition.
    pub fade_ms: u64,
    /// Panel slide distance in rows.
    pub slide_rows: f64,
    /// Ring radius in world units.
    pub radius: f64,
    pub auto_spin: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let tuning = Tuning::default();
        Self {
            bindings: Self::default_bindings(),
            swipe_threshold: tuning.swipe_threshold,
            drag_scale: 8.0,
            spring_tension: tuning.spring.tension,
            spring_friction: tuning.spring.friction,
            fade_ms: tuning.fade.as_millis() as u64,
            slide_rows: tuning.slide_rows,
            radius: tuning.radius,
            auto_spin: tuning.auto_spin,
        }
    }
}

impl AppConfig {
    /// Built-in bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(Next, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(Previous, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(ToggleCategory, vec![KeyBind::new(Tab, n), KeyBind::new(Char('c'), n)]);
        m.insert(ToggleDetails, vec![KeyBind::new(Enter, n), KeyBind::new(Char('d'), n)]);
        m.insert(ToggleSpin, vec![KeyBind::new(Char('s'), n)]);
        m.insert(OpenSettings, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Controller tuning derived from this config.
    pub fn tuning(&self) -> Tuning {
        Tuning {
            swipe_threshold: self.swipe_threshold,
            spring: SpringParams {
                tension: self.spring_tension,
                friction: self.spring_friction,
            },
            fade: Duration::from_millis(self.fade_ms),
            slide_rows: self.slide_rows,
            radius: self.radius,
            auto_spin: self.auto_spin,
            ..Tuning::default()
        }
    }

    /// Replace the swipe threshold for this run, clamped like the file value.
    pub fn override_threshold(&mut self, threshold: f64) {
        if threshold.is_finite() {
            self.swipe_threshold =
                threshold.clamp(*SWIPE_THRESHOLD_RANGE.start(), *SWIPE_THRESHOLD_RANGE.end());
        }
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, bind)| bind.matches(event))
            .max_by_key(|(_, bind)| bind.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    /// Add a binding for `action`.  Removes this key from any other action
    /// to prevent conflicts, then appends it to `action`'s bindings.
    pub fn add_binding(&mut self, action: Action, bind: KeyBind) {
        for binds in self.bindings.values_mut() {
            binds.retain(|b| b != &bind);
        }
        self.bindings.entry(action).or_default().push(bind);
    }

    /// Restore all bindings to the built-in defaults.
    pub fn reset_defaults(&mut self) {
        self.bindings = Self::default_bindings();
    }

    /// Format the binding list for a given action (e.g. `"→/l"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "drag or {}/{}: rotate | {}: info/action | {}: details | {}: settings",
            self.short_binding(Action::Previous),
            self.short_binding(Action::Next),
            self.short_binding(Action::ToggleCategory),
            self.short_binding(Action::ToggleDetails),
            self.short_binding(Action::OpenSettings),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        let Ok(contents) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        let (config, errors) = Self::parse(&contents);
        for err in errors {
            tracing::warn!("{}: {err}", path.display());
        }
        config
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    /// Parse config text.  Bad lines are reported and skipped; everything
    /// not mentioned keeps its default.
    pub fn parse(s: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut errors = Vec::new();

        for (i, raw) in s.lines().enumerate() {
            let line = i + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') || text.starts_with('[') {
                continue;
            }
            let Some((key, value)) = text.split_once('=') else {
                errors.push(ConfigError::Malformed { line });
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');
            if let Err(err) = config.apply(line, key, value) {
                errors.push(err);
            }
        }

        (config, errors)
    }

    fn apply(&mut self, line: usize, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            line,
            key: key.to_string(),
            value: value.to_string(),
        };
        let number = |lo: f64, hi: f64| -> Result<f64, ConfigError> {
            value
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|v| v.clamp(lo, hi))
                .ok_or_else(invalid)
        };

        match key {
            "swipe_threshold" => {
                self.swipe_threshold =
                    number(*SWIPE_THRESHOLD_RANGE.start(), *SWIPE_THRESHOLD_RANGE.end())?
            }
            "drag_scale" => self.drag_scale = number(0.5, 100.0)?,
            "spring_tension" => self.spring_tension = number(10.0, 1000.0)?,
            "spring_friction" => self.spring_friction = number(1.0, 200.0)?,
            "fade_ms" => self.fade_ms = number(0.0, 2000.0)? as u64,
            "slide_rows" => self.slide_rows = number(0.0, 10.0)?,
            "radius" => self.radius = number(0.5, 6.0)?,
            "auto_spin" => {
                self.auto_spin = match value {
                    "true" => true,
                    "false" => false,
                    _ => return Err(invalid()),
                }
            }
            _ => {
                let Some(action) = Action::from_config_key(key) else {
                    return Err(ConfigError::UnknownKey {
                        line,
                        key: key.to_string(),
                    });
                };
                let parsed: Vec<KeyBind> = value
                    .split(',')
                    .map(|part| part.trim().trim_matches('"'))
                    .filter(|part| !part.is_empty())
                    .map(|part| KeyBind::parse(part).ok_or_else(invalid))
                    .collect::<Result<_, _>>()?;
                // An empty list is a deliberate "unbound".
                self.bindings.insert(action, parsed);
            }
        }
        Ok(())
    }

    pub fn serialise(&self) -> String {
        let mut lines = vec![
            "# model-carousel configuration".to_string(),
            String::new(),
            "# Carousel".to_string(),
            format!("swipe_threshold = {}", self.swipe_threshold),
            format!("drag_scale = {}", self.drag_scale),
            format!("spring_tension = {}", self.spring_tension),
            format!("spring_friction = {}", self.spring_friction),
            format!("fade_ms = {}", self.fade_ms),
            format!("slide_rows = {}", self.slide_rows),
            format!("radius = {}", self.radius),
            format!("auto_spin = {}", self.auto_spin),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            let keys: Vec<String> = self
                .bindings
                .get(&action)
                .map(|binds| binds.iter().map(|b| b.to_config_string()).collect())
                .unwrap_or_default();
            lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/model-carousel/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn defaults_match_carousel_tuning() {
        let tuning = AppConfig::default().tuning();
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn threshold_override_is_clamped_like_the_file() {
        let mut config = AppConfig::default();
        config.override_threshold(0.0);
        assert_eq!(config.swipe_threshold, 1.0);
        config.override_threshold(1e9);
        assert_eq!(config.swipe_threshold, 1000.0);
        config.override_threshold(f64::NAN);
        assert_eq!(config.swipe_threshold, 1000.0);
        config.override_threshold(75.0);
        assert_eq!(config.swipe_threshold, 75.0);
    }

    #[test]
    fn parses_tuning_and_bindings() {
        let text = "\
# comment
[carousel]
swipe_threshold = 80
spring_tension = 300
auto_spin = false
next = Ctrl+n, Down
quit =
";
        let (config, errors) = AppConfig::parse(text);
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(config.swipe_threshold, 80.0);
        assert_eq!(config.spring_tension, 300.0);
        assert!(!config.auto_spin);
        assert_eq!(
            config.bindings[&Action::Next],
            vec![
                KeyBind::new(KeyCode::Char('n'), KeyModifiers::CONTROL),
                KeyBind::new(KeyCode::Down, KeyModifiers::NONE),
            ]
        );
        assert!(config.bindings[&Action::Quit].is_empty());
        // Untouched keys keep defaults.
        assert_eq!(config.fade_ms, 200);
    }

    #[test]
    fn bad_lines_are_reported_and_skipped() {
        let text = "nonsense\nwobble = 3\nradius = far\nfade_ms = 99999\nnext = Hyper+x\n";
        let (config, errors) = AppConfig::parse(text);
        assert_eq!(
            errors,
            vec![
                ConfigError::Malformed { line: 1 },
                ConfigError::UnknownKey {
                    line: 2,
                    key: "wobble".into()
                },
                ConfigError::InvalidValue {
                    line: 3,
                    key: "radius".into(),
                    value: "far".into()
                },
                ConfigError::InvalidValue {
                    line: 5,
                    key: "next".into(),
                    value: "Hyper+x".into()
                },
            ]
        );
        assert_eq!(config.radius, AppConfig::default().radius);
        assert_eq!(config.fade_ms, 2000);
        assert_eq!(config.bindings[&Action::Next], AppConfig::default_bindings()[&Action::Next]);
    }

    #[test]
    fn serialised_config_reads_back() {
        let mut config = AppConfig::default();
        config.swipe_threshold = 65.0;
        config.auto_spin = false;
        config.add_binding(Action::Quit, KeyBind::new(KeyCode::Esc, KeyModifiers::NONE));
        let (back, errors) = AppConfig::parse(&config.serialise());
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(back.swipe_threshold, 65.0);
        assert!(!back.auto_spin);
        assert_eq!(back.bindings, config.bindings);
    }

    #[test]
    fn match_key_prefers_more_modifiers() {
        let mut config = AppConfig::default();
        config.add_binding(Action::Quit, KeyBind::new(KeyCode::Right, KeyModifiers::ALT));
        assert_eq!(
            config.match_key(key(KeyCode::Right, KeyModifiers::ALT)),
            Some(Action::Quit)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Right, KeyModifiers::NONE)),
            Some(Action::Next)
        );
        assert_eq!(config.match_key(key(KeyCode::F(9), KeyModifiers::NONE)), None);
    }

    #[test]
    fn add_binding_steals_key_from_other_action() {
        let mut config = AppConfig::default();
        let l = KeyBind::new(KeyCode::Char('l'), KeyModifiers::NONE);
        config.add_binding(Action::ToggleSpin, l.clone());
        assert!(!config.bindings[&Action::Next].contains(&l));
        assert_eq!(
            config.match_key(key(KeyCode::Char('l'), KeyModifiers::NONE)),
            Some(Action::ToggleSpin)
        );
    }

    #[test]
    fn display_uses_arrows() {
        let config = AppConfig::default();
        assert_eq!(config.display_bindings(Action::Next), "→/l");
        assert_eq!(
            KeyBind::new(KeyCode::Left, KeyModifiers::ALT).to_config_string(),
            "Alt+Left"
        );
    }
}
