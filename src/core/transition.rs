//! Information-panel transition — the fade-out / swap / fade-in sequence that
//! accompanies every active-index change.
//!
//! ```text
//!   Idle ──request──▶ FadingOut ──both tweens done──▶ Swapped
//!    ▲                                                   │ next tick
//!    └──────────── fade-in done ◀──── FadingIn ◀─────────┘
//! ```
//!
//! The displayed index only changes on the `FadingOut → Swapped` edge, and
//! `FadingIn` never starts on the same tick as the swap, so the new content
//! is always applied (and drawn once) before it fades back in.

use std::time::Duration;

use super::spring::Tween;

/// Default duration of each half of the transition.
pub const DEFAULT_FADE: Duration = Duration::from_millis(200);
/// Default slide distance in terminal rows.
pub const DEFAULT_SLIDE_ROWS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FadingOut,
    Swapped,
    FadingIn,
}

/// Notifications emitted as the state machine advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEvent {
    Started { to: usize },
    Swapped { to: usize },
    Finished { shown: usize },
}

#[derive(Debug, Clone)]
pub struct PanelTransition {
    phase: Phase,
    /// Index whose content the panel currently shows.
    displayed: usize,
    /// Index the in-flight fade-out will swap to.
    target: usize,
    /// Latest index requested while the swap was already done.
    queued: Option<usize>,
    opacity: Tween,
    offset: Tween,
    fade: Duration,
    slide: f64,
}

impl PanelTransition {
    pub fn new(displayed: usize, fade: Duration, slide: f64) -> Self {
        Self {
            phase: Phase::Idle,
            displayed,
            target: displayed,
            queued: None,
            opacity: Tween::at(1.0),
            offset: Tween::at(0.0),
            fade,
            slide,
        }
    }

    /// Apply new timing; takes effect from the next phase.
    pub fn set_timing(&mut self, fade: Duration, slide: f64) {
        self.fade = fade;
        self.slide = slide;
    }

    /// Ask the panel to show `index`.
    ///
    /// * `Idle` — starts a fade-out unless `index` is already shown.
    /// * `FadingOut` — retargets the pending swap.
    /// * `Swapped` / `FadingIn` — queues `index` (latest wins) for when the
    ///   panel is idle again.
    pub fn request(&mut self, index: usize) -> Option<TransitionEvent> {
        match self.phase {
            Phase::Idle => {
                if index == self.displayed {
                    return None;
                }
                self.start_fade_out(index);
                Some(TransitionEvent::Started { to: index })
            }
            Phase::FadingOut => {
                self.target = index;
                None
            }
            Phase::Swapped | Phase::FadingIn => {
                self.queued = Some(index);
                None
            }
        }
    }

    /// Drop any transition and show `index` immediately.
    pub fn reset(&mut self, index: usize) {
        self.phase = Phase::Idle;
        self.displayed = index;
        self.target = index;
        self.queued = None;
        self.opacity = Tween::at(1.0);
        self.offset = Tween::at(0.0);
    }

    /// Advance by `dt`.  At most one phase edge is crossed per call, apart
    /// from `FadingIn → Idle` immediately chaining into a queued fade-out.
    pub fn tick(&mut self, dt: Duration) -> Vec<TransitionEvent> {
        let mut events = Vec::new();
        match self.phase {
            Phase::Idle => {}
            Phase::FadingOut => {
                // Same clock for both tweens.
                self.opacity.tick(dt);
                self.offset.tick(dt);
                if self.opacity.is_finished() && self.offset.is_finished() {
                    self.displayed = self.target;
                    self.opacity = Tween::at(0.0);
                    self.offset = Tween::at(self.slide);
                    self.phase = Phase::Swapped;
                    events.push(TransitionEvent::Swapped { to: self.displayed });
                }
            }
            Phase::Swapped => {
                self.opacity = Tween::new(0.0, 1.0, self.fade);
                self.offset = Tween::new(self.slide, 0.0, self.fade);
                self.phase = Phase::FadingIn;
            }
            Phase::FadingIn => {
                self.opacity.tick(dt);
                self.offset.tick(dt);
                if self.opacity.is_finished() && self.offset.is_finished() {
                    self.opacity = Tween::at(1.0);
                    self.offset = Tween::at(0.0);
                    self.phase = Phase::Idle;
                    events.push(TransitionEvent::Finished { shown: self.displayed });
                    if let Some(next) = self.queued.take() {
                        events.extend(self.request(next));
                    }
                }
            }
        }
        events
    }

    fn start_fade_out(&mut self, index: usize) {
        self.target = index;
        self.opacity = Tween::new(self.opacity.value(), 0.0, self.fade);
        self.offset = Tween::new(self.offset.value(), -self.slide, self.fade);
        self.phase = Phase::FadingOut;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn displayed(&self) -> usize {
        self.displayed
    }

    /// Panel opacity in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        self.opacity.value().clamp(0.0, 1.0)
    }

    /// Vertical panel offset in rows (negative = up).
    pub fn offset(&self) -> f64 {
        self.offset.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn panel() -> PanelTransition {
        PanelTransition::new(0, DEFAULT_FADE, DEFAULT_SLIDE_ROWS)
    }

    /// Tick until the current transition finishes, recording the phase after
    /// every tick.
    fn drive(p: &mut PanelTransition) -> (Vec<Phase>, Vec<TransitionEvent>) {
        let mut phases = Vec::new();
        let mut events = Vec::new();
        for _ in 0..200 {
            let tick = p.tick(FRAME);
            let finished = tick
                .iter()
                .any(|e| matches!(e, TransitionEvent::Finished { .. }));
            events.extend(tick);
            phases.push(p.phase());
            if finished || p.phase() == Phase::Idle {
                break;
            }
        }
        (phases, events)
    }

    #[test]
    fn request_for_shown_index_is_ignored() {
        let mut p = panel();
        assert_eq!(p.request(0), None);
        assert_eq!(p.phase(), Phase::Idle);
    }

    #[test]
    fn full_sequence_visits_every_phase_in_order() {
        let mut p = panel();
        assert_eq!(p.request(1), Some(TransitionEvent::Started { to: 1 }));
        assert_eq!(p.phase(), Phase::FadingOut);

        let (phases, events) = drive(&mut p);
        let mut seen = phases.clone();
        seen.dedup();
        assert_eq!(
            seen,
            vec![Phase::FadingOut, Phase::Swapped, Phase::FadingIn, Phase::Idle]
        );
        assert_eq!(
            events,
            vec![
                TransitionEvent::Swapped { to: 1 },
                TransitionEvent::Finished { shown: 1 }
            ]
        );
        assert_eq!(p.displayed(), 1);
        assert_eq!(p.opacity(), 1.0);
        assert_eq!(p.offset(), 0.0);
    }

    #[test]
    fn content_swaps_only_after_fade_out_settles() {
        let mut p = panel();
        p.request(2);
        while p.phase() == Phase::FadingOut {
            assert_eq!(p.displayed(), 0);
            p.tick(FRAME);
        }
        assert_eq!(p.phase(), Phase::Swapped);
        assert_eq!(p.displayed(), 2);
        assert_eq!(p.opacity(), 0.0);
        // Snapped to the pre-fade-in displacement, below the rest position.
        assert_eq!(p.offset(), DEFAULT_SLIDE_ROWS);
    }

    #[test]
    fn fade_out_halves_share_a_clock() {
        let mut p = panel();
        p.request(1);
        p.tick(Duration::from_millis(100));
        assert!((p.opacity() - 0.5).abs() < 1e-9);
        assert!((p.offset() + DEFAULT_SLIDE_ROWS / 2.0).abs() < 1e-9);
    }

    #[test]
    fn request_during_fade_out_retargets() {
        let mut p = panel();
        p.request(1);
        p.tick(FRAME);
        assert_eq!(p.request(2), None);
        let (_, events) = drive(&mut p);
        assert_eq!(
            events,
            vec![
                TransitionEvent::Swapped { to: 2 },
                TransitionEvent::Finished { shown: 2 }
            ]
        );
    }

    #[test]
    fn request_during_fade_in_is_queued() {
        let mut p = panel();
        p.request(1);
        while p.phase() != Phase::FadingIn {
            p.tick(FRAME);
        }
        p.request(2);
        p.request(3);
        let (_, events) = drive(&mut p);
        assert_eq!(
            events,
            vec![
                TransitionEvent::Finished { shown: 1 },
                TransitionEvent::Started { to: 3 }
            ]
        );
        assert_eq!(p.phase(), Phase::FadingOut);
        drive(&mut p);
        assert_eq!(p.displayed(), 3);
    }

    #[test]
    fn queued_request_for_shown_index_does_not_restart() {
        let mut p = panel();
        p.request(1);
        while p.phase() != Phase::FadingIn {
            p.tick(FRAME);
        }
        p.request(1);
        let (_, events) = drive(&mut p);
        assert_eq!(events, vec![TransitionEvent::Finished { shown: 1 }]);
        assert_eq!(p.phase(), Phase::Idle);
    }

    #[test]
    fn reset_cancels_in_flight_transition() {
        let mut p = panel();
        p.request(1);
        p.tick(FRAME);
        p.reset(0);
        assert_eq!(p.phase(), Phase::Idle);
        assert_eq!(p.displayed(), 0);
        assert_eq!(p.opacity(), 1.0);
        assert!(p.tick(FRAME).is_empty());
    }
}
