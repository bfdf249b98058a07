//! Door graph construction
//!
//! Two servers are linked when their cells share an edge. The link is also
//! the physical door drones fly through, located at the middle of that edge.

use glam::DVec2;

use crate::geometry::Polygon;
use crate::server::{Server, ServerId};

/// Index of a link in the scene link list
pub type LinkId = usize;

/// Squared distance under which two cell vertices are the same point
pub const EDGE_MATCH_TOLERANCE_SQ: f64 = 1e-6;

/// Undirected weighted edge between two servers whose cells touch
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: LinkId,
    pub node1: ServerId,
    pub node2: ServerId,

    /// Path weight: distance from each server to the door, summed
    pub distance: f64,

    /// Middle of the shared edge (the door)
    pub edge_center: DVec2,

    /// Shared edge, as found on `node1`'s cell
    pub edge: (DVec2, DVec2),
}

impl Link {
    /// Create the link between two servers sharing `edge`
    pub fn new(id: LinkId, a: &Server, b: &Server, edge: (DVec2, DVec2)) -> Self {
        let edge_center = (edge.0 + edge.1) * 0.5;
        Self {
            id,
            node1: a.id,
            node2: b.id,
            distance: a.position.distance(edge_center) + b.position.distance(edge_center),
            edge_center,
            edge,
        }
    }

    /// Endpoint opposite to `server`, `None` if the link does not touch it
    pub fn other(&self, server: ServerId) -> Option<ServerId> {
        if server == self.node1 {
            Some(self.node2)
        } else if server == self.node2 {
            Some(self.node1)
        } else {
            None
        }
    }

    /// Whether this link joins `a` and `b` (in either order)
    pub fn connects(&self, a: ServerId, b: ServerId) -> bool {
        (self.node1 == a && self.node2 == b) || (self.node1 == b && self.node2 == a)
    }
}

/// Detect shared cell edges and link the servers
///
/// Every server's link list is cleared first. Each unordered pair gets at
/// most one link: the first matching edge pair wins even if the cells touch
/// along several segments.
///
/// Cost is O(n² · v²) edge comparisons, fine for scenes of tens of servers.
pub fn build_links(servers: &mut [Server]) -> Vec<Link> {
    for server in servers.iter_mut() {
        server.links.clear();
    }

    let mut links = Vec::new();
    let n = servers.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let Some(edge) = shared_edge(&servers[i].area, &servers[j].area) else {
                continue;
            };

            let link = Link::new(links.len(), &servers[i], &servers[j], edge);
            servers[i].links.push(link.id);
            servers[j].links.push(link.id);
            links.push(link);
        }
    }

    log::debug!("linked {} servers with {} doors", n, links.len());
    links
}

/// First edge of `a` that also appears in `b` (same or reversed direction)
fn shared_edge(a: &Polygon, b: &Polygon) -> Option<(DVec2, DVec2)> {
    a.edges().find(|&(a0, a1)| {
        b.edges().any(|(b0, b1)| {
            let same_direction = same_point(a0, b0) && same_point(a1, b1);
            let opposite_direction = same_point(a0, b1) && same_point(a1, b0);
            same_direction || opposite_direction
        })
    })
}

#[inline]
fn same_point(a: DVec2, b: DVec2) -> bool {
    a.distance_squared(b) <= EDGE_MATCH_TOLERANCE_SQ
}
