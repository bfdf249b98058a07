//! Room tessellation
//!
//! Partitions the scene window into one Voronoi-like cell per server, using
//! a Delaunay triangulation of the server positions.

mod delaunay;
mod voronoi;

pub use delaunay::TriangleMesh;
pub use voronoi::generate_cells;

use glam::DVec2;

use crate::error::Result;
use crate::geometry::{Polygon, Window};

/// Build the clipped cell polygon of every server position
///
/// Returns one polygon per input position, in input order.
pub fn tessellate(sites: &[DVec2], window: Window) -> Result<Vec<Polygon>> {
    // Step 1: Delaunay triangulation of the servers
    let mesh = TriangleMesh::build(sites, window)?;

    // Step 2: walk each fan into a cell, clip, triangulate
    Ok(voronoi::generate_cells(sites, &mesh))
}
