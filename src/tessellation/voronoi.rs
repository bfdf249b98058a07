//! Voronoi cell construction from the server triangulation
//!
//! Each cell is assembled by walking the fan of triangles around its server
//! and collecting their circumcenters. Open fans (servers on the convex hull)
//! are closed with rays shot to the window border.

use glam::DVec2;

use crate::geometry::{Polygon, Triangle, Window};

use super::delaunay::TriangleMesh;

/// Squared distance under which consecutive cell vertices are merged
const VERTEX_MERGE_TOLERANCE_SQ: f64 = 1e-12;

/// Slack when deciding which server owns a window corner
const CORNER_TIE_TOLERANCE: f64 = 1e-9;

/// Cells at or below this area are rebuilt from bisectors
const MIN_CELL_AREA: f64 = 1e-9;

/// Distance under which a site counts as lying on its cell border
const BORDER_TOLERANCE: f64 = 1e-9;

/// Build the cell polygon of every site (index = server id)
///
/// Cells are clipped to the mesh window, counter-clockwise, and carry their
/// fan triangulation.
pub fn generate_cells(sites: &[DVec2], mesh: &TriangleMesh) -> Vec<Polygon> {
    let window = *mesh.window();

    if mesh.triangles().is_empty() && !sites.is_empty() {
        log::debug!(
            "no triangles for {} sites, falling back to bisector clipping",
            sites.len()
        );
    }

    (0..sites.len())
        .map(|site| {
            let fan = mesh.fan(site);
            let walked = if fan.is_empty() {
                None
            } else {
                walk_fan(site, &fan, mesh).map(|mut cell| {
                    cell.clip_to_window(&window);
                    add_owned_corners(site, sites, &window, &mut cell);
                    cell.sort_counter_clockwise();
                    cell
                })
            };

            let mut cell = match walked {
                Some(cell) if holds_site(&cell, sites[site]) => cell,
                _ => {
                    if !fan.is_empty() {
                        log::debug!(
                            "site {}: fan does not close inside the window, clipping bisectors",
                            site
                        );
                    }
                    bisector_cell(site, sites, &window)
                }
            };

            cell.sort_counter_clockwise();
            cell.dedup(VERTEX_MERGE_TOLERANCE_SQ);
            cell.triangulate();
            cell
        })
        .collect()
}

/// Assemble the raw (unclipped) cell of `site` from the triangles around it
///
/// The fan is ordered by matching the previous vertex of one triangle with
/// the next vertex of its counter-clockwise neighbour. A triangle whose next
/// vertex is nobody's previous vertex is the clockwise end of an open fan.
///
/// Returns `None` for an open fan whose end circumcenter lies outside the
/// window: the border ray cannot be anchored there.
fn walk_fan(site: usize, fan: &[&Triangle], mesh: &TriangleMesh) -> Option<Polygon> {
    let window = mesh.window();
    let mut cell = Polygon::default();

    let open_end = fan.iter().position(|t| {
        let next = t.next_vertex(site);
        !fan.iter().any(|other| other.previous_vertex(site) == next)
    });
    let first = open_end.unwrap_or(0);

    if open_end.is_some() {
        if !mesh.is_in_window(fan[first].center()) {
            return None;
        }
        let normal = fan[first].next_edge_normal(site);
        cell.add_vertex(window.ray_exit(fan[first].center(), normal));
    }

    let mut current = first;
    for _ in 0..fan.len() {
        cell.add_vertex(fan[current].center());

        let previous = fan[current].previous_vertex(site);
        match fan.iter().position(|t| t.next_vertex(site) == previous) {
            Some(next) if next != first => current = next,
            _ => break,
        }
    }

    if open_end.is_some() {
        if !mesh.is_in_window(fan[current].center()) {
            return None;
        }
        let normal = fan[current].previous_edge_normal(site);
        cell.add_vertex(window.ray_exit(fan[current].center(), normal));
    }

    if open_end.is_none() && fan.len() > 1 && cell.vertex_count() < fan.len() {
        log::debug!(
            "site {}: fan of {} triangles only chained {} circumcenters",
            site,
            fan.len(),
            cell.vertex_count()
        );
    }

    Some(cell)
}

/// Whether a sorted cell has area and holds its own site (inside or on its border)
fn holds_site(cell: &Polygon, site: DVec2) -> bool {
    cell.area() > MIN_CELL_AREA
        && (cell.contains(site)
            || cell
                .edges()
                .any(|(a, b)| segment_distance(a, b, site) <= BORDER_TOLERANCE))
}

fn segment_distance(a: DVec2, b: DVec2, p: DVec2) -> f64 {
    let ab = b - a;
    let length_sq = ab.length_squared();
    if length_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Add the window corners whose nearest site is `site`
fn add_owned_corners(site: usize, sites: &[DVec2], window: &Window, cell: &mut Polygon) {
    let position = sites[site];
    for corner in window.corners() {
        let own = corner.distance_squared(position);
        let owned = sites
            .iter()
            .all(|other| corner.distance_squared(*other) + CORNER_TIE_TOLERANCE >= own);
        if owned {
            cell.add_vertex(corner);
        }
    }
}

/// Cell of `site` computed by clipping the window with every bisector
///
/// Used when the triangulation gives the site no triangle (fewer than three
/// sites, collinear sites, or a site coinciding with another one).
fn bisector_cell(site: usize, sites: &[DVec2], window: &Window) -> Polygon {
    let position = sites[site];
    let mut cell = Polygon::new(window.corners().to_vec());

    for (other, &other_position) in sites.iter().enumerate() {
        if other == site || position.distance_squared(other_position) <= VERTEX_MERGE_TOLERANCE_SQ {
            continue;
        }
        let middle = (position + other_position) * 0.5;
        let toward = other_position - position;
        cell.clip_half_plane(|p| -(p - middle).dot(toward));
    }

    cell
}
