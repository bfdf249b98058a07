//! Server (room anchor) structure
//!
//! A server seeds one cell of the tessellation and is a node of the door graph.

use glam::DVec2;

use crate::geometry::Polygon;
use crate::links::LinkId;
use crate::mesh::Rgba;
use crate::routing::Route;

/// Dense server identifier, equal to the server's index in the scene
pub type ServerId = usize;

/// A room anchor of the scene
///
/// Servers are created once per scene build in input order. Their cell,
/// link list and routing row are rebuilt with the scene, never patched.
#[derive(Debug, Clone)]
pub struct Server {
    /// Index of this server in the scene (0 to server_count-1)
    pub id: ServerId,

    /// Unique name, used to resolve drone targets
    pub name: String,

    /// Anchor position; drones fly to it when they enter the room
    pub position: DVec2,

    /// Display color, opaque to the simulation
    pub color: Rgba,

    /// Cell polygon, clipped to the scene window
    pub area: Polygon,

    /// Links (doors) incident to this server
    pub links: Vec<LinkId>,

    /// Routing row: entry `j` is the first link toward server `j` and the
    /// total path distance
    pub best_distance: Vec<Route>,
}

impl Server {
    /// Create a server with an empty cell, no links and no routes
    pub fn new(id: ServerId, name: impl Into<String>, position: DVec2, color: Rgba) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            color,
            area: Polygon::default(),
            links: Vec::new(),
            best_distance: Vec::new(),
        }
    }

    #[inline]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Routing entry toward `target`, `None` if the id is out of range
    #[inline]
    pub fn route_to(&self, target: ServerId) -> Option<&Route> {
        self.best_distance.get(target)
    }

    /// Whether `point` lies in this server's cell
    #[inline]
    pub fn contains(&self, point: DVec2) -> bool {
        self.area.contains(point)
    }
}
