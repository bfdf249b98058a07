//! Delaunay triangulation of the server positions
//!
//! Thin wrapper around `spade`: the inner faces of the triangulation become
//! [`Triangle`]s tagged with the ids of the servers at their corners.

use glam::DVec2;
use spade::{DelaunayTriangulation, HasPosition, Point2, Triangulation};

use crate::error::{Result, SceneError};
use crate::geometry::{Triangle, Window};

/// Triangulation vertex: a server position carrying the server id
#[derive(Debug, Clone, Copy)]
struct Site {
    id: usize,
    position: Point2<f64>,
}

impl HasPosition for Site {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        self.position
    }
}

/// Triangles of the server triangulation, bounded by the scene window
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    window: Window,
}

impl TriangleMesh {
    /// Triangulate the given site positions (index = server id)
    ///
    /// Coincident sites collapse onto one triangulation vertex; the later
    /// ones simply appear in no triangle.
    ///
    /// # Errors
    ///
    /// Returns `TriangulationFailed` if a position cannot be inserted
    /// (non-finite or out of the representable range).
    pub fn build(sites: &[DVec2], window: Window) -> Result<Self> {
        if let Some(id) = sites.iter().position(|p| !p.is_finite()) {
            return Err(SceneError::TriangulationFailed(format!(
                "site {} has a non-finite position {:?}",
                id, sites[id]
            )));
        }

        let spade_sites: Vec<Site> = sites
            .iter()
            .enumerate()
            .map(|(id, p)| Site {
                id,
                position: Point2::new(p.x, p.y),
            })
            .collect();

        let triangulation: DelaunayTriangulation<Site> =
            DelaunayTriangulation::bulk_load(spade_sites).map_err(|e| {
                SceneError::TriangulationFailed(format!(
                    "{:?} ({} sites)",
                    e,
                    sites.len()
                ))
            })?;

        let triangles: Vec<Triangle> = triangulation
            .inner_faces()
            .map(|face| {
                let [a, b, c] = face.vertices();
                let (a, b, c) = (a.data(), b.data(), c.data());
                Triangle::new(
                    [a.id, b.id, c.id],
                    [to_dvec(a.position), to_dvec(b.position), to_dvec(c.position)],
                )
            })
            .collect();

        log::debug!(
            "triangulated {} sites into {} triangles",
            sites.len(),
            triangles.len()
        );

        Ok(Self { triangles, window })
    }

    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Triangles having `site` as a vertex (the fan around it)
    pub fn fan(&self, site: usize) -> Vec<&Triangle> {
        self.triangles
            .iter()
            .filter(|t| t.has_vertex(site))
            .collect()
    }

    #[inline]
    pub fn is_in_window(&self, point: DVec2) -> bool {
        self.window.contains(point)
    }
}

fn to_dvec(p: Point2<f64>) -> DVec2 {
    DVec2::new(p.x, p.y)
}
