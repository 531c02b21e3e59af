//! Mouse-drag gesture tracking.
//!
//! A left-button press inside the stage starts a drag; the matching release
//! ends it and yields the horizontal displacement in gesture units
//! (`columns × drag_scale`), which is what the carousel's swipe policy
//! expects.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragState {
    start_column: u16,
    current_column: u16,
}

/// Tracks at most one drag at a time.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    drag: Option<DragState>,
}

impl SwipeTracker {
    /// Begin a drag at `column`, replacing any drag that never ended.
    pub fn begin(&mut self, column: u16) {
        self.drag = Some(DragState {
            start_column: column,
            current_column: column,
        });
    }

    pub fn update(&mut self, column: u16) {
        if let Some(drag) = self.drag.as_mut() {
            drag.current_column = column;
        }
    }

    /// End the drag at `column`.  `None` if no drag was in progress.
    pub fn end(&mut self, column: u16, drag_scale: f64) -> Option<f64> {
        let drag = self.drag.take()?;
        Some((column as f64 - drag.start_column as f64) * drag_scale)
    }

    /// Abandon the drag (e.g. when an overlay opens).
    pub fn cancel(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Live displacement in columns, for drag feedback.
    pub fn live_columns(&self) -> i32 {
        self.drag
            .map_or(0, |d| d.current_column as i32 - d.start_column as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_left_yields_negative_translation() {
        let mut t = SwipeTracker::default();
        t.begin(40);
        t.update(35);
        assert_eq!(t.live_columns(), -5);
        assert_eq!(t.end(30, 8.0), Some(-80.0));
        assert!(!t.is_dragging());
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut t = SwipeTracker::default();
        assert_eq!(t.end(10, 8.0), None);
        t.update(12);
        assert_eq!(t.live_columns(), 0);
    }

    #[test]
    fn cancel_drops_the_drag() {
        let mut t = SwipeTracker::default();
        t.begin(5);
        t.cancel();
        assert_eq!(t.end(50, 8.0), None);
    }
}
