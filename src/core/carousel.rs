//! Carousel geometry — angular step, active-index derivation, swipe policy
//! and per-item placement.
//!
//! Everything here is pure arithmetic over `(angle, item_count)` so the
//! controller and the renderer agree on which item is in front.

use std::f64::consts::TAU;

/// Default horizontal displacement a swipe must exceed to count.
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 50.0;

/// Domain errors raised while assembling carousel data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CarouselError {
    #[error("item set `{0}` has no items")]
    EmptyItemSet(String),

    #[error("unknown category `{0}` (expected `info` or `action`)")]
    UnknownCategory(String),
}

/// Angular distance between adjacent items.  `None` for an empty carousel.
pub fn step(item_count: usize) -> Option<f64> {
    if item_count == 0 {
        None
    } else {
        Some(TAU / item_count as f64)
    }
}

/// Index of the item facing the viewer for a given carousel angle.
///
/// Uses `((n - round(angle / step)) mod n + n) mod n` so negative angles and
/// rounding right at a wrap boundary still land in `[0, n)`.  An empty
/// carousel maps everything to 0.
pub fn derive_active_index(angle: f64, item_count: usize) -> usize {
    let Some(step) = step(item_count) else {
        return 0;
    };
    let n = item_count as i64;
    let steps = (angle / step).round();
    // Huge accumulated angles: reduce in float space first so the i64 cast
    // can't saturate.
    let steps = (steps % item_count as f64) as i64;
    (((n - steps) % n + n) % n) as usize
}

/// Direction of a completed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger/mouse moved toward negative x; brings the next item forward.
    Left,
    /// Moved toward positive x; brings the previous item forward.
    Right,
}

impl SwipeDirection {
    /// Signed change of the target angle, in steps.
    pub fn angle_sign(self) -> f64 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }
}

/// Classify a gesture by its horizontal displacement.  Strict inequality:
/// exactly `±threshold` is a tap, not a swipe.  NaN never swipes.
pub fn classify_swipe(translation_x: f64, threshold: f64) -> Option<SwipeDirection> {
    if translation_x < -threshold {
        Some(SwipeDirection::Left)
    } else if translation_x > threshold {
        Some(SwipeDirection::Right)
    } else {
        None
    }
}

/// Rest angle of item `index` on the ring, before carousel rotation.
pub fn item_angle(index: usize, item_count: usize) -> f64 {
    step(item_count).map_or(0.0, |s| s * index as f64)
}

/// Where a single item sits in the scene for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub index: usize,
    /// Horizontal position (positive = right of the viewer).
    pub x: f64,
    /// Depth (positive = toward the viewer).
    pub z: f64,
    /// Whether this is the active (front) item.
    pub active: bool,
}

/// Place every item of an `item_count` ring rotated by `angle`.
pub fn placements(angle: f64, item_count: usize, radius: f64, active: usize) -> Vec<Placement> {
    (0..item_count)
        .map(|index| {
            let a = item_angle(index, item_count) + angle;
            Placement {
                index,
                x: radius * a.sin(),
                z: radius * a.cos(),
                active: index == active,
            }
        })
        .collect()
}
