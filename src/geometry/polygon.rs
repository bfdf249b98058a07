//! Cell polygon
//!
//! Ordered vertex list with edge access, containment, Sutherland–Hodgman
//! clipping and a fan triangulation kept for renderers.

use glam::DVec2;

use super::Window;

/// A simple polygon, stored as an ordered ring of vertices (closing edge implied)
///
/// The winding is whatever the builder produced; cells coming out of the
/// tessellation are counter-clockwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    vertices: Vec<DVec2>,
    /// Fan triangulation over `vertices`, filled by [`Polygon::triangulate`]
    triangles: Vec<[usize; 3]>,
}

impl Polygon {
    pub fn new(vertices: Vec<DVec2>) -> Self {
        Self {
            vertices,
            triangles: Vec::new(),
        }
    }

    /// Append a vertex at the end of the ring
    ///
    /// Invalidates the triangulation.
    pub fn add_vertex(&mut self, vertex: DVec2) {
        self.vertices.push(vertex);
        self.triangles.clear();
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Edge `i`, going from vertex `i` to vertex `i + 1` (wrapping)
    ///
    /// # Panics
    ///
    /// Panics if the polygon has no vertices or `i` is out of range.
    pub fn edge(&self, i: usize) -> (DVec2, DVec2) {
        let n = self.vertices.len();
        (self.vertices[i], self.vertices[(i + 1) % n])
    }

    /// All edges, closing edge included
    pub fn edges(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        (0..self.vertices.len()).map(move |i| self.edge(i))
    }

    /// Triangles produced by the last call to [`Polygon::triangulate`]
    #[inline]
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Even-odd containment test
    ///
    /// Points exactly on an edge shared by two cells end up in exactly one of
    /// them, since both cells see the same edge coordinates.
    pub fn contains(&self, point: DVec2) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];
            if ((vi.y > point.y) != (vj.y > point.y))
                && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Signed area (positive for counter-clockwise rings)
    pub fn signed_area(&self) -> f64 {
        if self.vertices.len() < 3 {
            return 0.0;
        }
        let sum: f64 = self.edges().map(|(a, b)| a.perp_dot(b)).sum();
        0.5 * sum
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Average of the vertices, `None` for an empty polygon
    pub fn centroid(&self) -> Option<DVec2> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum: DVec2 = self.vertices.iter().copied().sum();
        Some(sum / self.vertices.len() as f64)
    }

    /// Clip the polygon to the window rectangle (Sutherland–Hodgman)
    ///
    /// Resulting vertices are snapped onto the rectangle to absorb rounding
    /// in the intersection points.
    pub fn clip_to_window(&mut self, window: &Window) {
        let (x_min, x_max) = (window.x_min(), window.x_max());
        let (y_min, y_max) = (window.y_min(), window.y_max());

        self.clip_half_plane(|p| p.x - x_min);
        self.clip_half_plane(|p| x_max - p.x);
        self.clip_half_plane(|p| p.y - y_min);
        self.clip_half_plane(|p| y_max - p.y);

        for vertex in &mut self.vertices {
            *vertex = window.clamp(*vertex);
        }
    }

    /// Keep the part of the polygon where `side(p) >= 0`
    ///
    /// `side` must be an affine function of the point (a signed distance to
    /// the clipping line, up to scale) so that the crossing parameter is exact
    /// linear interpolation.
    pub fn clip_half_plane<F>(&mut self, side: F)
    where
        F: Fn(DVec2) -> f64,
    {
        let input = std::mem::take(&mut self.vertices);
        self.triangles.clear();
        let Some(&last) = input.last() else {
            return;
        };

        let mut output = Vec::with_capacity(input.len() + 2);
        let mut s = last;
        let mut s_side = side(s);

        for &e in &input {
            let e_side = side(e);
            if e_side >= 0.0 {
                if s_side < 0.0 {
                    output.push(crossing(s, e, s_side, e_side));
                }
                output.push(e);
            } else if s_side >= 0.0 {
                output.push(crossing(s, e, s_side, e_side));
            }
            s = e;
            s_side = e_side;
        }

        self.vertices = output;
    }

    /// Drop vertices closer than `tolerance_sq` (squared) to their predecessor
    pub fn dedup(&mut self, tolerance_sq: f64) {
        self.vertices
            .dedup_by(|b, a| a.distance_squared(*b) <= tolerance_sq);
        while self.vertices.len() > 1 {
            let first = self.vertices[0];
            let last = self.vertices[self.vertices.len() - 1];
            if first.distance_squared(last) > tolerance_sq {
                break;
            }
            self.vertices.pop();
        }
        self.triangles.clear();
    }

    /// Re-order the vertices counter-clockwise by angle around their centroid
    ///
    /// Only meaningful for convex rings, which every clipped cell is.
    pub fn sort_counter_clockwise(&mut self) {
        let Some(center) = self.centroid() else {
            return;
        };
        self.vertices.sort_by(|a, b| {
            let angle_a = (a.y - center.y).atan2(a.x - center.x);
            let angle_b = (b.y - center.y).atan2(b.x - center.x);
            angle_a
                .partial_cmp(&angle_b)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        self.triangles.clear();
    }

    /// Build the fan triangulation used by renderers
    ///
    /// Cells are convex, so a fan from the first vertex covers the polygon.
    pub fn triangulate(&mut self) {
        let n = self.vertices.len();
        self.triangles = if n < 3 {
            Vec::new()
        } else {
            (1..n - 1).map(|i| [0, i, i + 1]).collect()
        };
    }
}

fn crossing(a: DVec2, b: DVec2, a_side: f64, b_side: f64) -> DVec2 {
    let t = a_side / (a_side - b_side);
    a + (b - a) * t
}
