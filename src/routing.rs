//! All-pairs shortest paths over the door graph
//!
//! Floyd–Warshall with a next-hop matrix. The result is written into every
//! server's routing row as "first link to take, total distance", and the raw
//! distances are returned as a [`DistanceMatrix`] for diagnostics.

use std::fmt;

use crate::links::{Link, LinkId};
use crate::server::{Server, ServerId};

/// Distance reported between servers with no path
pub const UNREACHABLE: f64 = f64::INFINITY;

/// Routing entry from one server toward another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route {
    /// First link to traverse; `None` for the server itself or when unreachable
    pub link: Option<LinkId>,
    /// Total shortest distance ([`UNREACHABLE`] when there is no path)
    pub distance: f64,
}

impl Route {
    pub const SELF: Route = Route {
        link: None,
        distance: 0.0,
    };

    pub const NONE: Route = Route {
        link: None,
        distance: UNREACHABLE,
    };

    #[inline]
    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite()
    }
}

/// Square matrix of shortest distances, indexed `[from][to]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceMatrix {
    rows: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Number of servers (rows)
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Shortest distance from `from` to `to`, `None` if an id is out of range
    pub fn get(&self, from: ServerId, to: ServerId) -> Option<f64> {
        self.rows.get(from).and_then(|row| row.get(to)).copied()
    }

    pub fn is_reachable(&self, from: ServerId, to: ServerId) -> bool {
        self.get(from, to).is_some_and(f64::is_finite)
    }

    #[inline]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            write!(f, "from {}:", i)?;
            for d in row {
                if d.is_finite() {
                    write!(f, " {:.1}", d)?;
                } else {
                    write!(f, " inf")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Compute shortest paths and fill every server's routing row
///
/// Link endpoints must be valid server ids (indices into `servers`), and each
/// server's link list must reference the links touching it.
pub fn compute_routes(servers: &mut [Server], links: &[Link]) -> DistanceMatrix {
    let n = servers.len();

    let mut dist = vec![vec![UNREACHABLE; n]; n];
    let mut next: Vec<Vec<Option<ServerId>>> = vec![vec![None; n]; n];

    for i in 0..n {
        dist[i][i] = 0.0;
        next[i][i] = Some(i);
    }

    // direct edges, keeping the lighter one if a pair is linked twice
    for link in links {
        let (a, b) = (link.node1, link.node2);
        if link.distance < dist[a][b] {
            dist[a][b] = link.distance;
            dist[b][a] = link.distance;
            next[a][b] = Some(b);
            next[b][a] = Some(a);
        }
    }

    for k in 0..n {
        for i in 0..n {
            if !dist[i][k].is_finite() {
                continue;
            }
            for j in 0..n {
                let through_k = dist[i][k] + dist[k][j];
                if through_k < dist[i][j] {
                    dist[i][j] = through_k;
                    next[i][j] = next[i][k];
                }
            }
        }
    }

    for i in 0..n {
        let row: Vec<Route> = (0..n)
            .map(|j| {
                if i == j {
                    return Route::SELF;
                }
                let distance = dist[i][j];
                let Some(first_hop) = next[i][j].filter(|_| distance.is_finite()) else {
                    return Route::NONE;
                };

                let link = servers[i]
                    .links
                    .iter()
                    .copied()
                    .find(|&l| links[l].connects(i, first_hop));
                if link.is_none() {
                    log::error!(
                        "routing table inconsistent: {} -> {} first hop {} has no link from {}",
                        i,
                        j,
                        first_hop,
                        i
                    );
                }
                Route { link, distance }
            })
            .collect();
        servers[i].best_distance = row;
    }

    let matrix = DistanceMatrix { rows: dist };
    log::debug!("all-pairs shortest distances:\n{}", matrix);
    matrix
}

/// Server sequence from `from` to `to` obtained by following first hops
///
/// Returns `None` when `to` is unreachable or an id is out of range. The walk
/// is bounded by the server count so a corrupt table cannot loop forever.
pub fn path(
    servers: &[Server],
    links: &[Link],
    from: ServerId,
    to: ServerId,
) -> Option<Vec<ServerId>> {
    if from >= servers.len() || to >= servers.len() {
        return None;
    }

    let mut hops = vec![from];
    let mut current = from;
    while current != to {
        if hops.len() > servers.len() {
            return None;
        }
        let link = servers[current].route_to(to)?.link?;
        current = links[link].other(current)?;
        hops.push(current);
    }
    Some(hops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::Link;
    use glam::DVec2;

    /// Servers on a line, linked by hand with explicit weights
    fn graph(n: usize, edges: &[(usize, usize, f64)]) -> (Vec<Server>, Vec<Link>) {
        let mut servers: Vec<Server> = (0..n)
            .map(|i| Server::new(i, format!("s{}", i), DVec2::new(i as f64, 0.0), [0.0; 4]))
            .collect();
        let links: Vec<Link> = edges
            .iter()
            .enumerate()
            .map(|(id, &(a, b, w))| Link {
                id,
                node1: a,
                node2: b,
                distance: w,
                edge_center: (servers[a].position + servers[b].position) * 0.5,
                edge: (DVec2::ZERO, DVec2::ZERO),
            })
            .collect();
        for link in &links {
            servers[link.node1].links.push(link.id);
            servers[link.node2].links.push(link.id);
        }
        (servers, links)
    }

    #[test]
    fn test_chain_routes() {
        let (mut servers, links) = graph(3, &[(0, 1, 1.0), (1, 2, 2.0)]);
        let matrix = compute_routes(&mut servers, &links);

        assert_eq!(matrix.get(0, 2), Some(3.0));
        assert_eq!(matrix.get(2, 0), Some(3.0));
        assert_eq!(servers[0].best_distance[2].link, Some(0));
        assert_eq!(servers[2].best_distance[0].link, Some(1));
        assert_eq!(servers[1].best_distance[1], Route::SELF);
    }

    #[test]
    fn test_shortcut_beats_direct_edge() {
        // direct 0-2 edge heavier than going through 1
        let (mut servers, links) = graph(3, &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 5.0)]);
        let matrix = compute_routes(&mut servers, &links);

        assert_eq!(matrix.get(0, 2), Some(2.0));
        assert_eq!(servers[0].best_distance[2].link, Some(0));
        assert_eq!(path(&servers, &links, 0, 2), Some(vec![0, 1, 2]));
    }

    #[test]
    fn test_duplicate_edge_keeps_lighter() {
        let (mut servers, links) = graph(2, &[(0, 1, 4.0), (0, 1, 3.0)]);
        let matrix = compute_routes(&mut servers, &links);
        assert_eq!(matrix.get(0, 1), Some(3.0));
    }

    #[test]
    fn test_unreachable() {
        let (mut servers, links) = graph(3, &[(0, 1, 1.0)]);
        let matrix = compute_routes(&mut servers, &links);

        assert!(!matrix.is_reachable(0, 2));
        assert_eq!(matrix.get(0, 2), Some(UNREACHABLE));
        assert_eq!(servers[0].best_distance[2], Route::NONE);
        assert!(!servers[2].best_distance[0].is_reachable());
        assert_eq!(path(&servers, &links, 0, 2), None);
    }

    #[test]
    fn test_missing_adjacency_keeps_distance() {
        let (mut servers, links) = graph(3, &[(0, 1, 1.0), (1, 2, 2.0)]);
        servers[0].links.clear();
        let matrix = compute_routes(&mut servers, &links);

        assert_eq!(servers[0].best_distance[1], Route { link: None, distance: 1.0 });
        assert_eq!(servers[0].best_distance[2], Route { link: None, distance: 3.0 });
        assert_eq!(servers[1].best_distance[0].link, Some(0));
        assert_eq!(matrix.get(0, 2), Some(3.0));
    }

    #[test]
    fn test_diagonal_is_zero() {
        let (mut servers, links) = graph(4, &[(0, 1, 1.0), (2, 3, 1.0)]);
        let matrix = compute_routes(&mut servers, &links);
        for i in 0..4 {
            assert_eq!(matrix.get(i, i), Some(0.0));
            assert!(servers[i].best_distance[i].link.is_none());
        }
        assert_eq!(path(&servers, &links, 2, 2), Some(vec![2]));
    }

    #[test]
    fn test_display() {
        let (mut servers, links) = graph(2, &[]);
        let matrix = compute_routes(&mut servers, &links);
        assert_eq!(matrix.to_string(), "from 0: 0.0 inf\nfrom 1: inf 0.0\n");
    }

    #[test]
    fn test_out_of_range() {
        let (mut servers, links) = graph(2, &[(0, 1, 1.0)]);
        let matrix = compute_routes(&mut servers, &links);
        assert_eq!(matrix.get(0, 5), None);
        assert_eq!(path(&servers, &links, 0, 5), None);
    }
}
