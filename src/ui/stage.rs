//! 3D stage — projects every carousel model onto a braille canvas.
//!
//! Models are drawn far-to-near so the front item's edges win where they
//! overlap.  The whole ring scales with the category-toggle pop-in, and the
//! stage is drawn dimmed while an overlay sits on top of it.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Points},
        Block, Borders, Widget,
    },
};

use crate::core::carousel::Placement;
use crate::core::items::ItemSet;
use crate::core::mesh::{multiply_matrix_vector, rotation_x, rotation_y, Camera};
use crate::ui::theme::Theme;

/// Ring sits this far below the camera's eye line.
const RING_Y: f64 = 0.0;
/// Models float half a unit above the ring.
const MODEL_LIFT: f64 = 0.5;
/// Front model is drawn larger than the rest.
const ACTIVE_SCALE: f64 = 1.35;
/// Slight forward tilt so tops of models are visible.
const MODEL_TILT: f64 = 0.35;
/// Points along the floor ring.
const ORBIT_SEGMENTS: usize = 96;
/// Terminal cells are roughly twice as tall as wide.
const CELL_ASPECT: f64 = 2.0;

pub struct Stage<'a> {
    pub items: &'a ItemSet,
    pub placements: Vec<Placement>,
    pub radius: f64,
    /// Per-model self-rotation.
    pub spin: f64,
    /// Whole-scene scale (category toggle pop-in).
    pub scale: f64,
    /// Draw in muted colours (overlay open).
    pub dimmed: bool,
    pub block: Option<Block<'a>>,
}

/// One projected edge ready for the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: [f64; 2],
    pub to: [f64; 2],
    pub color: Color,
}

impl<'a> Stage<'a> {
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn model_color(&self, active: bool) -> Color {
        match (self.dimmed, active) {
            (true, _) => Theme::DIMMED_MODEL,
            (false, true) => Theme::ACTIVE_MODEL,
            (false, false) => Theme::IDLE_MODEL,
        }
    }

    /// Project every model edge, far-to-near.
    pub fn segments(&self, camera: &Camera) -> Vec<Segment> {
        let mut order: Vec<&Placement> = self.placements.iter().collect();
        order.sort_by(|a, b| a.z.total_cmp(&b.z));

        let tilt = rotation_x(MODEL_TILT);
        let spin = rotation_y(self.spin);
        let mut out = Vec::new();
        for placement in order {
            let Some(item) = self.items.get(placement.index) else {
                continue;
            };
            let mesh = item.shape.mesh();
            let size = if placement.active { ACTIVE_SCALE } else { 1.0 } * self.scale;
            let color = self.model_color(placement.active);

            let world: Vec<Option<[f64; 2]>> = mesh
                .vertices
                .iter()
                .map(|v| {
                    let local = multiply_matrix_vector(&tilt, &multiply_matrix_vector(&spin, v));
                    camera.project([
                        placement.x * self.scale + local[0] * size,
                        RING_Y + MODEL_LIFT * self.scale + local[1] * size,
                        placement.z * self.scale + local[2] * size,
                    ])
                })
                .collect();

            for &(a, b) in &mesh.edges {
                if let (Some(from), Some(to)) = (world[a], world[b]) {
                    out.push(Segment { from, to, color });
                }
            }
        }
        out
    }

    /// Floor ring under the models.
    fn orbit_points(&self, camera: &Camera) -> Vec<(f64, f64)> {
        let r = self.radius * self.scale;
        (0..ORBIT_SEGMENTS)
            .filter_map(|i| {
                let a = std::f64::consts::TAU * i as f64 / ORBIT_SEGMENTS as f64;
                camera
                    .project([r * a.sin(), RING_Y - 0.1, r * a.cos()])
                    .map(|p| (p[0], p[1]))
            })
            .collect()
    }

    fn paint(&self, ctx: &mut Context<'_>, camera: &Camera) {
        let orbit = self.orbit_points(camera);
        ctx.draw(&Points {
            coords: &orbit,
            color: Theme::ORBIT,
        });
        ctx.layer();
        for seg in self.segments(camera) {
            ctx.draw(&CanvasLine::new(
                seg.from[0],
                seg.from[1],
                seg.to[0],
                seg.to[1],
                seg.color,
            ));
        }
    }
}

impl<'a> Widget for Stage<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self
            .block
            .clone()
            .unwrap_or_else(|| Block::default().borders(Borders::ALL));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        // Keep world units square on screen.
        let half_h = 1.0;
        let half_w = half_h * inner.width as f64 / (inner.height as f64 * CELL_ASPECT);
        let camera = Camera::default();

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-half_w, half_w])
            .y_bounds([-half_h, half_h])
            .paint(|ctx| self.paint(ctx, &camera))
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::carousel::placements;
    use crate::core::items::{Catalog, Category};

    fn stage(items: &ItemSet, dimmed: bool) -> Stage<'_> {
        Stage {
            items,
            placements: placements(0.0, items.len(), 2.4, 0),
            radius: 2.4,
            spin: 0.0,
            scale: 1.0,
            dimmed,
            block: None,
        }
    }

    #[test]
    fn front_model_is_drawn_last() {
        let catalog = Catalog::builtin().unwrap();
        let items = catalog.set(Category::Action);
        let segs = stage(items, false).segments(&Camera::default());
        let last = segs.last().unwrap();
        assert_eq!(last.color, Theme::ACTIVE_MODEL);
        assert_eq!(segs.first().unwrap().color, Theme::IDLE_MODEL);
    }

    #[test]
    fn dimmed_stage_uses_muted_colour() {
        let catalog = Catalog::builtin().unwrap();
        let items = catalog.set(Category::Info);
        let segs = stage(items, true).segments(&Camera::default());
        assert!(segs.iter().all(|s| s.color == Theme::DIMMED_MODEL));
    }

    #[test]
    fn collapsed_scene_projects_to_a_point() {
        let catalog = Catalog::builtin().unwrap();
        let items = catalog.set(Category::Info);
        let mut s = stage(items, false);
        s.scale = 0.0;
        let segs = s.segments(&Camera::default());
        assert!(!segs.is_empty());
        assert!(segs.iter().all(|seg| seg.from == seg.to));
    }

    #[test]
    fn renders_without_panicking_in_tiny_areas() {
        let catalog = Catalog::builtin().unwrap();
        let items = catalog.set(Category::Info);
        for (w, h) in [(0, 0), (2, 2), (3, 10), (80, 24)] {
            let area = Rect::new(0, 0, w, h);
            let mut buf = Buffer::empty(area);
            stage(items, false).render(area, &mut buf);
        }
    }
}
