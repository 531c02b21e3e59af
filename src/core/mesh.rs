//! Built-in wireframe models and the small amount of 3D math needed to put
//! them on screen.

/// Shapes available to carousel items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelShape {
    Cube,
    Pyramid,
    Octahedron,
    Prism,
    Diamond,
}

/// Vertices (model space, roughly unit-sized) plus edges as index pairs.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<[f64; 3]>,
    pub edges: Vec<(usize, usize)>,
}

impl ModelShape {
    pub fn label(self) -> &'static str {
        match self {
            ModelShape::Cube => "cube",
            ModelShape::Pyramid => "pyramid",
            ModelShape::Octahedron => "octahedron",
            ModelShape::Prism => "prism",
            ModelShape::Diamond => "diamond",
        }
    }

    pub fn mesh(self) -> Mesh {
        match self {
            ModelShape::Cube => {
                let h = 0.5;
                let vertices = vec![
                    [-h, -h, -h],
                    [h, -h, -h],
                    [h, h, -h],
                    [-h, h, -h],
                    [-h, -h, h],
                    [h, -h, h],
                    [h, h, h],
                    [-h, h, h],
                ];
                #[rustfmt::skip]
                let edges = vec![
                    (0, 1), (1, 2), (2, 3), (3, 0),
                    (4, 5), (5, 6), (6, 7), (7, 4),
                    (0, 4), (1, 5), (2, 6), (3, 7),
                ];
                Mesh { vertices, edges }
            }
            ModelShape::Pyramid => {
                let h = 0.5;
                let vertices = vec![
                    [-h, -h, -h],
                    [h, -h, -h],
                    [h, -h, h],
                    [-h, -h, h],
                    [0.0, 0.6, 0.0],
                ];
                #[rustfmt::skip]
                let edges = vec![
                    (0, 1), (1, 2), (2, 3), (3, 0),
                    (0, 4), (1, 4), (2, 4), (3, 4),
                ];
                Mesh { vertices, edges }
            }
            ModelShape::Octahedron => {
                let r = 0.6;
                let vertices = vec![
                    [r, 0.0, 0.0],
                    [-r, 0.0, 0.0],
                    [0.0, r, 0.0],
                    [0.0, -r, 0.0],
                    [0.0, 0.0, r],
                    [0.0, 0.0, -r],
                ];
                let mut edges = Vec::new();
                // Every pair except opposite poles.
                for a in 0..6 {
                    for b in (a + 1)..6 {
                        if a / 2 != b / 2 {
                            edges.push((a, b));
                        }
                    }
                }
                Mesh { vertices, edges }
            }
            ModelShape::Prism => {
                let h = 0.5;
                let s = 0.45;
                let vertices = vec![
                    [-s, -h, s],
                    [s, -h, s],
                    [0.0, -h, -s],
                    [-s, h, s],
                    [s, h, s],
                    [0.0, h, -s],
                ];
                #[rustfmt::skip]
                let edges = vec![
                    (0, 1), (1, 2), (2, 0),
                    (3, 4), (4, 5), (5, 3),
                    (0, 3), (1, 4), (2, 5),
                ];
                Mesh { vertices, edges }
            }
            ModelShape::Diamond => {
                // Hexagonal girdle with a short crown and a deep pavilion.
                let mut vertices = Vec::with_capacity(8);
                for i in 0..6 {
                    let a = std::f64::consts::TAU * i as f64 / 6.0;
                    vertices.push([0.5 * a.cos(), 0.15, 0.5 * a.sin()]);
                }
                vertices.push([0.0, 0.4, 0.0]);
                vertices.push([0.0, -0.6, 0.0]);
                let mut edges = Vec::new();
                for i in 0..6 {
                    edges.push((i, (i + 1) % 6));
                    edges.push((i, 6));
                    edges.push((i, 7));
                }
                Mesh { vertices, edges }
            }
        }
    }
}

/// Multiplies a 3x3 matrix by a 3-dimensional vector.
pub fn multiply_matrix_vector(matrix: &[[f64; 3]; 3], vector: &[f64; 3]) -> [f64; 3] {
    let mut result = [0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            result[i] += matrix[i][j] * vector[j];
        }
    }
    result
}

/// Rotation about the Y axis.
pub fn rotation_y(angle: f64) -> [[f64; 3]; 3] {
    let (s, c) = angle.sin_cos();
    [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]]
}

/// Rotation about the X axis.
pub fn rotation_x(angle: f64) -> [[f64; 3]; 3] {
    let (s, c) = angle.sin_cos();
    [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]]
}

/// Pinhole camera looking down -z at the ring from slightly above.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Camera position on the z axis.
    pub distance: f64,
    /// Camera height above the ring plane.
    pub height: f64,
    /// Focal length in normalised screen units.
    pub focal: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            distance: 7.0,
            height: 1.2,
            focal: 2.2,
        }
    }
}

impl Camera {
    /// Project a world-space point to normalised screen space
    /// (`x` right, `y` up, origin at the centre).  `None` when the point is
    /// at or behind the camera plane.
    pub fn project(&self, p: [f64; 3]) -> Option<[f64; 2]> {
        let depth = self.distance - p[2];
        if depth <= 0.05 {
            return None;
        }
        Some([
            p[0] * self.focal / depth,
            (p[1] - self.height) * self.focal / depth,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAPES: [ModelShape; 5] = [
        ModelShape::Cube,
        ModelShape::Pyramid,
        ModelShape::Octahedron,
        ModelShape::Prism,
        ModelShape::Diamond,
    ];

    #[test]
    fn edges_reference_existing_vertices() {
        for shape in SHAPES {
            let mesh = shape.mesh();
            assert!(!mesh.edges.is_empty(), "{}", shape.label());
            for &(a, b) in &mesh.edges {
                assert!(a < mesh.vertices.len() && b < mesh.vertices.len());
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn edge_counts() {
        assert_eq!(ModelShape::Cube.mesh().edges.len(), 12);
        assert_eq!(ModelShape::Octahedron.mesh().edges.len(), 12);
        assert_eq!(ModelShape::Diamond.mesh().edges.len(), 18);
    }

    #[test]
    fn quarter_turn_about_y() {
        let p = multiply_matrix_vector(&rotation_y(std::f64::consts::FRAC_PI_2), &[0.0, 0.0, 1.0]);
        assert!((p[0] - 1.0).abs() < 1e-12);
        assert!(p[2].abs() < 1e-12);
    }

    #[test]
    fn nearer_points_project_larger() {
        let cam = Camera::default();
        let near = cam.project([1.0, cam.height, 2.0]).unwrap();
        let far = cam.project([1.0, cam.height, -2.0]).unwrap();
        assert!(near[0] > far[0]);
        assert_eq!(near[1], 0.0);
        assert!(cam.project([0.0, 0.0, cam.distance]).is_none());
    }
}
