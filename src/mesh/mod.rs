//! Render output for a Scene
//!
//! Generates engine-agnostic 2D geometry from the scene cells and doors.

mod colors;

pub use colors::{palette_color, parse_hex_color, Rgba, FALLBACK_COLOR};

use glam::DVec2;

use crate::geometry::Polygon;
use crate::links::LinkId;
use crate::scene::Scene;

/// Engine-agnostic mesh data output
///
/// Contains raw vertex data suitable for any rendering backend:
/// - wgpu / glium: use directly as vertex buffers
/// - immediate-mode canvases: walk `indices` three by three
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex positions (scene coordinates)
    pub positions: Vec<[f32; 2]>,
    /// Vertex colors (RGBA)
    pub colors: Vec<Rgba>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Door overlay: polyline from one server through the door to the other
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkSegment {
    pub link: LinkId,
    pub points: [DVec2; 3],
}

/// Generate the filled room mesh of a scene
///
/// Each cell contributes its own vertices and triangles, all colored with
/// the server color.
pub fn generate_mesh(scene: &Scene) -> MeshData {
    let mut mesh = MeshData::default();

    for server in scene.servers() {
        // Skip degenerate cells
        if server.area.vertex_count() < 3 {
            continue;
        }
        append_cell(&server.area, server.color, &mut mesh);
    }

    mesh
}

/// Server → door → server polylines, one per link
pub fn link_segments(scene: &Scene) -> Vec<LinkSegment> {
    let servers = scene.servers();
    scene
        .links()
        .iter()
        .map(|link| LinkSegment {
            link: link.id,
            points: [
                servers[link.node1].position,
                link.edge_center,
                servers[link.node2].position,
            ],
        })
        .collect()
}

fn append_cell(cell: &Polygon, color: Rgba, mesh: &mut MeshData) {
    let base_idx = mesh.positions.len() as u32;

    for vertex in cell.vertices() {
        mesh.positions.push([vertex.x as f32, vertex.y as f32]);
        mesh.colors.push(color);
    }

    for triangle in cell.triangles() {
        for &i in triangle {
            mesh.indices.push(base_idx + i as u32);
        }
    }
}
