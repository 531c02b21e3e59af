//! Animators — a damped spring for the carousel angle and a fixed-duration
//! tween for the panel fade/slide.
//!
//! Both are advanced by the frame loop with an explicit `dt`, so they are
//! deterministic under test (feed fixed steps, no wall clock).

use std::time::Duration;

/// Integration substep.  Small enough that stiff springs stay stable.
const SUBSTEP: f64 = 0.001;
/// Rest thresholds for displacement and speed.
const REST_DISPLACEMENT: f64 = 0.001;
const REST_SPEED: f64 = 0.001;

/// Spring tuning expressed the way designers usually give it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub tension: f64,
    pub friction: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            tension: 200.0,
            friction: 30.0,
        }
    }
}

impl SpringParams {
    /// Origami-style conversion from tension/friction to stiffness/damping
    /// (unit mass).
    pub fn stiffness_damping(self) -> (f64, f64) {
        let stiffness = (self.tension - 30.0) * 3.62 + 194.0;
        let damping = (self.friction - 8.0) * 3.0 + 25.0;
        (stiffness.max(1.0), damping.max(0.0))
    }
}

/// Damped spring pulling `value` toward `target`.
#[derive(Debug, Clone)]
pub struct Spring {
    value: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
}

impl Spring {
    pub fn new(value: f64, params: SpringParams) -> Self {
        let (stiffness, damping) = params.stiffness_damping();
        Self {
            value,
            velocity: 0.0,
            target: value,
            stiffness,
            damping,
        }
    }

    /// Retune without disturbing the motion in flight.
    pub fn set_params(&mut self, params: SpringParams) {
        let (stiffness, damping) = params.stiffness_damping();
        self.stiffness = stiffness;
        self.damping = damping;
    }

    /// Start interpolating from the current value (and velocity) to `target`.
    pub fn animate_to(&mut self, target: f64) {
        self.target = target;
    }

    /// Jump to `value` and stop.
    pub fn snap_to(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Advance the simulation by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        if self.is_settled() {
            return;
        }
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let h = remaining.min(SUBSTEP);
            // Semi-implicit Euler: velocity first, then position.
            let accel = -self.stiffness * (self.value - self.target) - self.damping * self.velocity;
            self.velocity += accel * h;
            self.value += self.velocity * h;
            remaining -= h;
        }
        if (self.value - self.target).abs() < REST_DISPLACEMENT && self.velocity.abs() < REST_SPEED {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// True once the spring rests exactly on its target.
    pub fn is_settled(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }
}

/// Cubic ease-in-out over `t ∈ [0, 1]`.
fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Fixed-duration interpolation between two values.
#[derive(Debug, Clone)]
pub struct Tween {
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// A tween that is already finished at `value`.
    pub fn at(value: f64) -> Self {
        Self::new(value, value, Duration::ZERO)
    }

    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    pub fn value(&self) -> f64 {
        if self.is_finished() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * ease_in_out(t)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.tick(Duration::from_millis(16));
        }
    }

    #[test]
    fn default_params_convert_like_origami() {
        let (k, c) = SpringParams::default().stiffness_damping();
        assert!((k - 809.4).abs() < 1e-9);
        assert!((c - 91.0).abs() < 1e-9);
    }

    #[test]
    fn spring_settles_on_target() {
        let mut s = Spring::new(0.0, SpringParams::default());
        s.animate_to(-2.0);
        assert!(!s.is_settled());
        run(&mut s, 120);
        assert!(s.is_settled());
        assert_eq!(s.value(), -2.0);
    }

    #[test]
    fn default_spring_does_not_overshoot() {
        let mut s = Spring::new(0.0, SpringParams::default());
        s.animate_to(1.0);
        for _ in 0..200 {
            s.tick(Duration::from_millis(5));
            assert!(s.value() <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn retarget_mid_flight_keeps_continuity() {
        let mut s = Spring::new(0.0, SpringParams::default());
        s.animate_to(1.0);
        run(&mut s, 3);
        let mid = s.value();
        s.animate_to(0.0);
        assert_eq!(s.value(), mid);
        run(&mut s, 200);
        assert_eq!(s.value(), 0.0);
    }

    #[test]
    fn tween_hits_endpoints_and_midpoint() {
        let mut t = Tween::new(0.0, 1.0, Duration::from_millis(200));
        assert_eq!(t.value(), 0.0);
        t.tick(Duration::from_millis(100));
        assert!((t.value() - 0.5).abs() < 1e-9);
        t.tick(Duration::from_millis(500));
        assert!(t.is_finished());
        assert_eq!(t.value(), 1.0);
    }

    #[test]
    fn zero_length_tween_is_finished() {
        let t = Tween::at(3.0);
        assert!(t.is_finished());
        assert_eq!(t.value(), 3.0);
    }
}
