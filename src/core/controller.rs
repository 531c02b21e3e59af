//! Carousel controller — the single owner of rotation, active index, panel
//! transition and category.  All mutation goes through [`CarouselController::update`].

use std::time::Duration;

use super::carousel::{self, Placement};
use super::items::{Catalog, Category, Item, ItemSet};
use super::spring::{Spring, SpringParams};
use super::transition::{PanelTransition, Phase, TransitionEvent};

/// Tunable numbers.  Nothing here changes which item ends up active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub swipe_threshold: f64,
    pub spring: SpringParams,
    pub fade: Duration,
    pub slide_rows: f64,
    pub radius: f64,
    /// Self-rotation speed of each model, radians per second.
    pub spin_speed: f64,
    pub auto_spin: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            swipe_threshold: carousel::DEFAULT_SWIPE_THRESHOLD,
            spring: SpringParams::default(),
            fade: super::transition::DEFAULT_FADE,
            slide_rows: super::transition::DEFAULT_SLIDE_ROWS,
            radius: 2.4,
            spin_speed: 0.6,
            auto_spin: true,
        }
    }
}

/// Inputs to the reducer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselEvent {
    /// A completed horizontal gesture.
    SwipeEnd { translation_x: f64 },
    /// Switch between the info and action item sets.
    ToggleCategory,
    /// Advance every animation by `dt`.
    Tick(Duration),
}

/// What the reducer did, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    RotateTo { target: f64 },
    ActiveIndexChanged { index: usize },
    ContentSwapped { index: usize },
    TransitionFinished { index: usize },
    CategoryChanged { category: Category },
}

pub struct CarouselController {
    catalog: Catalog,
    category: Category,
    tuning: Tuning,
    /// Where the last swipe asked the carousel to go.
    target_angle: f64,
    /// Angle actually shown this frame.
    angle: Spring,
    active_index: usize,
    panel: PanelTransition,
    /// Stage scale for the category-toggle pop-in.
    scene_scale: Spring,
    /// Per-model self-rotation.
    spin: f64,
}

impl CarouselController {
    pub fn new(catalog: Catalog, category: Category, tuning: Tuning) -> Self {
        Self {
            catalog,
            category,
            target_angle: 0.0,
            angle: Spring::new(0.0, tuning.spring),
            active_index: 0,
            panel: PanelTransition::new(0, tuning.fade, tuning.slide_rows),
            scene_scale: Spring::new(1.0, tuning.spring),
            spin: 0.0,
            tuning,
        }
    }

    /// Apply one event and report what changed.
    pub fn update(&mut self, event: CarouselEvent) -> Vec<Effect> {
        match event {
            CarouselEvent::SwipeEnd { translation_x } => self.handle_swipe_end(translation_x),
            CarouselEvent::ToggleCategory => self.toggle_category(),
            CarouselEvent::Tick(dt) => self.tick(dt),
        }
    }

    fn handle_swipe_end(&mut self, translation_x: f64) -> Vec<Effect> {
        let item_count = self.item_set().len();
        let Some(step) = carousel::step(item_count) else {
            return Vec::new();
        };
        let Some(direction) = carousel::classify_swipe(translation_x, self.tuning.swipe_threshold)
        else {
            tracing::debug!(translation_x, "gesture below swipe threshold");
            return Vec::new();
        };

        let mut effects = Vec::new();
        self.target_angle += direction.angle_sign() * step;
        self.angle.animate_to(self.target_angle);
        effects.push(Effect::RotateTo {
            target: self.target_angle,
        });
        tracing::debug!(?direction, target = self.target_angle, "swipe");

        let index = carousel::derive_active_index(self.target_angle, item_count);
        if index != self.active_index {
            self.active_index = index;
            effects.push(Effect::ActiveIndexChanged { index });
            if let Some(TransitionEvent::Started { to }) = self.panel.request(index) {
                tracing::debug!(to, "panel transition started");
            }
        }
        effects
    }

    /// Full reset onto the other item set; the stage pops in instead of the
    /// panel fading.
    fn toggle_category(&mut self) -> Vec<Effect> {
        self.category = self.category.toggled();
        self.target_angle = 0.0;
        self.angle.snap_to(0.0);
        self.active_index = 0;
        self.panel.reset(0);
        self.scene_scale.snap_to(0.0);
        self.scene_scale.animate_to(1.0);
        tracing::debug!(category = %self.category, "category toggled");
        vec![Effect::CategoryChanged {
            category: self.category,
        }]
    }

    fn tick(&mut self, dt: Duration) -> Vec<Effect> {
        self.angle.tick(dt);
        self.scene_scale.tick(dt);
        if self.tuning.auto_spin {
            self.spin = (self.spin + self.tuning.spin_speed * dt.as_secs_f64())
                % std::f64::consts::TAU;
        }

        self.panel
            .tick(dt)
            .into_iter()
            .filter_map(|event| match event {
                TransitionEvent::Swapped { to } => {
                    tracing::debug!(to, "panel content swapped");
                    Some(Effect::ContentSwapped { index: to })
                }
                TransitionEvent::Finished { shown } => {
                    tracing::debug!(shown, "panel transition finished");
                    Some(Effect::TransitionFinished { index: shown })
                }
                TransitionEvent::Started { to } => {
                    tracing::debug!(to, "queued panel transition started");
                    None
                }
            })
            .collect()
    }

    // ── tuning ──────────────────────────────────────────────────

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn set_tuning(&mut self, tuning: Tuning) {
        self.angle.set_params(tuning.spring);
        self.scene_scale.set_params(tuning.spring);
        self.panel.set_timing(tuning.fade, tuning.slide_rows);
        self.tuning = tuning;
    }

    // ── read-only views for rendering ───────────────────────────

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn item_set(&self) -> &ItemSet {
        self.catalog.set(self.category)
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    #[cfg(test)]
    pub fn target_angle(&self) -> f64 {
        self.target_angle
    }

    /// Interpolated angle for this frame.
    pub fn angle(&self) -> f64 {
        self.angle.value()
    }

    pub fn scene_scale(&self) -> f64 {
        self.scene_scale.value()
    }

    pub fn spin(&self) -> f64 {
        self.spin
    }

    /// Item whose content the panel shows right now (lags the active index
    /// during a transition).
    pub fn displayed_item(&self) -> Option<&Item> {
        self.item_set().get(self.panel.displayed())
    }

    pub fn active_item(&self) -> Option<&Item> {
        self.item_set().get(self.active_index)
    }

    #[cfg(test)]
    pub fn panel_phase(&self) -> Phase {
        self.panel.phase()
    }

    pub fn panel_opacity(&self) -> f64 {
        self.panel.opacity()
    }

    pub fn panel_offset(&self) -> f64 {
        self.panel.offset()
    }

    /// Per-item placement at the interpolated angle.
    pub fn placements(&self) -> Vec<Placement> {
        carousel::placements(
            self.angle(),
            self.item_set().len(),
            self.tuning.radius,
            self.active_index,
        )
    }

    /// True while anything on screen is still moving.
    pub fn is_animating(&self) -> bool {
        !self.angle.is_settled()
            || !self.scene_scale.is_settled()
            || self.panel.phase() != Phase::Idle
            || self.tuning.auto_spin
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn controller(category: Category) -> CarouselController {
        CarouselController::new(Catalog::builtin().unwrap(), category, Tuning::default())
    }

    fn swipe(c: &mut CarouselController, dx: f64) -> Vec<Effect> {
        c.update(CarouselEvent::SwipeEnd { translation_x: dx })
    }

    fn settle(c: &mut CarouselController) -> Vec<Effect> {
        let mut effects = Vec::new();
        for _ in 0..400 {
            effects.extend(c.update(CarouselEvent::Tick(FRAME)));
        }
        effects
    }

    #[test]
    fn swipe_left_on_three_items_runs_one_transition() {
        let mut c = controller(Category::Action);
        assert_eq!(c.item_set().len(), 3);

        let effects = swipe(&mut c, -100.0);
        let target = -TAU / 3.0;
        assert_eq!(
            effects,
            vec![
                Effect::RotateTo { target },
                Effect::ActiveIndexChanged { index: 1 }
            ]
        );
        assert_eq!(c.active_index(), 1);
        assert_eq!(c.panel_phase(), Phase::FadingOut);
        // Content still shows the old item until the fade-out settles.
        assert_eq!(c.displayed_item().unwrap().id, "launch");

        let effects = settle(&mut c);
        assert_eq!(
            effects,
            vec![
                Effect::ContentSwapped { index: 1 },
                Effect::TransitionFinished { index: 1 }
            ]
        );
        assert_eq!(c.displayed_item().unwrap().id, "explore");
        assert_eq!(c.panel_opacity(), 1.0);
        assert_eq!(c.panel_offset(), 0.0);
        assert!((c.angle() - target).abs() < 1e-9);
    }

    #[test]
    fn small_gestures_change_nothing() {
        let mut c = controller(Category::Info);
        for dx in [-50.0, 50.0, 0.0, 12.5, -49.9] {
            assert!(swipe(&mut c, dx).is_empty());
        }
        assert_eq!(c.target_angle(), 0.0);
        assert_eq!(c.active_index(), 0);
        assert_eq!(c.panel_phase(), Phase::Idle);
    }

    #[test]
    fn opposite_swipes_round_trip() {
        for (first, second) in [(-80.0, 80.0), (80.0, -80.0)] {
            let mut c = controller(Category::Info);
            swipe(&mut c, first);
            swipe(&mut c, second);
            assert!(c.target_angle().abs() < 1e-12);
            assert_eq!(c.active_index(), 0);
            settle(&mut c);
            assert_eq!(c.displayed_item().unwrap().id, "core");
            assert_eq!(c.panel_phase(), Phase::Idle);
        }
    }

    #[test]
    fn three_left_swipes_wrap_around() {
        let mut c = controller(Category::Action);
        for expected in [1, 2, 0] {
            swipe(&mut c, -200.0);
            assert_eq!(c.active_index(), expected);
        }
        settle(&mut c);
        assert_eq!(c.displayed_item().unwrap().id, "launch");
    }

    #[test]
    fn right_swipe_from_zero_wraps_to_last() {
        let mut c = controller(Category::Info);
        swipe(&mut c, 60.0);
        assert_eq!(c.active_index(), 3);
        settle(&mut c);
        assert_eq!(c.displayed_item().unwrap().id, "beam");
    }

    #[test]
    fn toggle_resets_without_fading() {
        let mut c = controller(Category::Info);
        swipe(&mut c, -100.0);
        swipe(&mut c, -100.0);
        settle(&mut c);
        assert_eq!(c.active_index(), 2);

        let effects = c.update(CarouselEvent::ToggleCategory);
        assert_eq!(
            effects,
            vec![Effect::CategoryChanged {
                category: Category::Action
            }]
        );
        assert_eq!(c.item_set().len(), 3);
        assert_eq!(c.active_index(), 0);
        assert_eq!(c.target_angle(), 0.0);
        assert_eq!(c.angle(), 0.0);
        assert_eq!(c.panel_phase(), Phase::Idle);
        assert_eq!(c.displayed_item().unwrap().id, "launch");
        assert_eq!(c.scene_scale(), 0.0);

        let effects = settle(&mut c);
        assert!(effects.is_empty());
        assert!((c.scene_scale() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn toggle_mid_transition_drops_it() {
        let mut c = controller(Category::Info);
        swipe(&mut c, -100.0);
        c.update(CarouselEvent::Tick(FRAME));
        c.update(CarouselEvent::ToggleCategory);
        assert_eq!(c.panel_phase(), Phase::Idle);
        assert!(settle(&mut c).is_empty());
    }

    #[test]
    fn target_is_always_a_whole_number_of_steps() {
        let mut c = controller(Category::Info);
        let step = TAU / 4.0;
        for dx in [-90.0, -90.0, 70.0, -300.0, 51.0, -51.0, -51.0] {
            swipe(&mut c, dx);
            let steps = c.target_angle() / step;
            assert!((steps - steps.round()).abs() < 1e-9);
            assert!(c.active_index() < 4);
        }
    }

    #[test]
    fn placements_follow_interpolated_angle() {
        let mut c = controller(Category::Action);
        swipe(&mut c, -100.0);
        settle(&mut c);
        let ps = c.placements();
        assert_eq!(ps.len(), 3);
        let front = ps.iter().find(|p| p.active).unwrap();
        assert_eq!(front.index, 1);
        assert!((front.z - c.tuning().radius).abs() < 1e-6);
    }

    #[test]
    fn custom_threshold_applies() {
        let mut c = controller(Category::Info);
        c.set_tuning(Tuning {
            swipe_threshold: 120.0,
            ..Tuning::default()
        });
        assert!(swipe(&mut c, -100.0).is_empty());
        assert_eq!(swipe(&mut c, -121.0).len(), 2);
    }
}
