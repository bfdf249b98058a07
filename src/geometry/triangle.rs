//! Triangulation triangle with fan-adjacency queries

use glam::DVec2;

/// A triangle of the server triangulation
///
/// Vertices are identified by the id of the server they come from and are
/// stored counter-clockwise, so "next" and "previous" around a vertex follow
/// a consistent rotation for every triangle of a fan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    sites: [usize; 3],
    vertices: [DVec2; 3],
    center: DVec2,
}

impl Triangle {
    /// Create a triangle, re-ordering the vertices counter-clockwise if needed
    pub fn new(sites: [usize; 3], vertices: [DVec2; 3]) -> Self {
        let [a, b, c] = vertices;
        let (sites, vertices) = if (b - a).perp_dot(c - a) < 0.0 {
            ([sites[0], sites[2], sites[1]], [a, c, b])
        } else {
            (sites, vertices)
        };

        Self {
            sites,
            vertices,
            center: circumcenter(vertices),
        }
    }

    #[inline]
    pub fn sites(&self) -> [usize; 3] {
        self.sites
    }

    #[inline]
    pub fn vertices(&self) -> [DVec2; 3] {
        self.vertices
    }

    /// Circumcenter (a Voronoi vertex)
    #[inline]
    pub fn center(&self) -> DVec2 {
        self.center
    }

    #[inline]
    pub fn has_vertex(&self, site: usize) -> bool {
        self.sites.contains(&site)
    }

    fn slot(&self, site: usize) -> Option<usize> {
        self.sites.iter().position(|&s| s == site)
    }

    /// Site following `site` counter-clockwise in this triangle
    pub fn next_vertex(&self, site: usize) -> Option<usize> {
        self.slot(site).map(|i| self.sites[(i + 1) % 3])
    }

    /// Site preceding `site` counter-clockwise in this triangle
    pub fn previous_vertex(&self, site: usize) -> Option<usize> {
        self.slot(site).map(|i| self.sites[(i + 2) % 3])
    }

    /// Outward unit normal of the edge from `site` to its next vertex
    ///
    /// Zero if `site` is not a vertex of this triangle.
    pub fn next_edge_normal(&self, site: usize) -> DVec2 {
        match self.slot(site) {
            Some(i) => outward_normal(
                self.vertices[i],
                self.vertices[(i + 1) % 3],
                self.vertices[(i + 2) % 3],
            ),
            None => DVec2::ZERO,
        }
    }

    /// Outward unit normal of the edge from `site` to its previous vertex
    ///
    /// Zero if `site` is not a vertex of this triangle.
    pub fn previous_edge_normal(&self, site: usize) -> DVec2 {
        match self.slot(site) {
            Some(i) => outward_normal(
                self.vertices[i],
                self.vertices[(i + 2) % 3],
                self.vertices[(i + 1) % 3],
            ),
            None => DVec2::ZERO,
        }
    }
}

/// Unit normal of segment `p`-`q` pointing away from `opposite`
///
/// Swapping `p` and `q` yields bit-identical output, so the two cells sharing
/// a hull edge synthesize the same border point.
fn outward_normal(p: DVec2, q: DVec2, opposite: DVec2) -> DVec2 {
    let edge = q - p;
    let mut normal = DVec2::new(edge.y, -edge.x);
    if normal.dot(opposite - p) > 0.0 {
        normal = -normal;
    }
    normal.normalize_or_zero()
}

/// Circumcenter of a triangle; centroid for degenerate (flat) triangles
fn circumcenter([a, b, c]: [DVec2; 3]) -> DVec2 {
    let ab = b - a;
    let ac = c - a;
    let d = 2.0 * ab.perp_dot(ac);
    if d.abs() < f64::EPSILON {
        return (a + b + c) / 3.0;
    }
    let ab2 = ab.length_squared();
    let ac2 = ac.length_squared();
    a + DVec2::new(ac.y * ab2 - ab.y * ac2, ab.x * ac2 - ac.x * ab2) / d
}
