//! Scene main structure

use std::collections::HashSet;

use glam::DVec2;

use crate::config::NavigationConfig;
use crate::description::SceneDescription;
use crate::drone::Drone;
use crate::error::{Result, SceneError};
use crate::geometry::Window;
use crate::links::{build_links, Link};
use crate::routing::{compute_routes, path, DistanceMatrix, Route};
use crate::server::{Server, ServerId};
use crate::tessellation::tessellate;

/// Squared distance under which two servers are the same point
const COINCIDENT_TOLERANCE_SQ: f64 = 1e-12;

/// A complete room scene: cells, doors, routing tables and drones
///
/// The scene is rebuilt as a whole from a [`SceneDescription`]; only the
/// drones change between ticks.
///
/// # Examples
///
/// ```
/// use rust_voronoi_rooms::*;
///
/// let window = Window::new(DVec2::ZERO, DVec2::new(20.0, 20.0)).unwrap();
/// let description = SceneDescription::new(window)
///     .with_server("A", DVec2::new(0.0, 0.0), [1.0, 0.0, 0.0, 1.0])
///     .with_server("B", DVec2::new(10.0, 0.0), [0.0, 1.0, 0.0, 1.0])
///     .with_server("C", DVec2::new(5.0, 10.0), [0.0, 0.0, 1.0, 1.0])
///     .with_drone("D1", DVec2::new(1.0, 1.0), "C");
///
/// let mut scene = Scene::build(&description, NavigationConfig::default()).unwrap();
/// assert_eq!(scene.links().len(), 3);
///
/// scene.tick(1.0);
/// println!("drone at {:?}", scene.drones()[0].pose());
/// ```
#[derive(Debug, Clone)]
pub struct Scene {
    /// Navigation parameters shared by every drone
    config: NavigationConfig,

    window: Window,

    /// Servers indexed by id, each with its cell, links and routing row
    servers: Vec<Server>,

    /// Doors between adjacent cells (indexed by link id)
    links: Vec<Link>,

    drones: Vec<Drone>,

    /// Shortest distances between every pair of servers
    distances: DistanceMatrix,
}

impl Scene {
    /// Build a scene from its description
    ///
    /// Runs the whole pipeline: validation, tessellation, door detection,
    /// routing, then drone placement. Drones whose target names no server are
    /// kept with no target (and a warning).
    ///
    /// # Errors
    ///
    /// * `InvalidScene` - bad window, duplicate server names, coincident or
    ///   non-finite positions
    /// * `TriangulationFailed` - the triangulation backend rejected the positions
    pub fn build(description: &SceneDescription, config: NavigationConfig) -> Result<Self> {
        validate(description)?;
        let window = description.window;

        // Step 1: one cell per server
        let positions: Vec<DVec2> = description.servers.iter().map(|s| s.position).collect();
        let cells = tessellate(&positions, window)?;

        let mut servers: Vec<Server> = description
            .servers
            .iter()
            .zip(cells)
            .enumerate()
            .map(|(id, (spec, cell))| {
                let mut server = Server::new(id, spec.name.clone(), spec.position, spec.color);
                server.area = cell;
                server
            })
            .collect();

        // Step 2: doors between touching cells
        let links = build_links(&mut servers);

        // Step 3: routing tables
        let distances = compute_routes(&mut servers, &links);

        // Step 4: drones
        let drones: Vec<Drone> = description
            .drones
            .iter()
            .map(|spec| {
                let target = servers.iter().find(|s| s.name == spec.target).map(|s| s.id);
                if target.is_none() {
                    log::warn!(
                        "drone {}: unknown target server '{}', it will stay in its room",
                        spec.name,
                        spec.target
                    );
                }
                let mut drone = Drone::new(spec.name.clone(), spec.position, target);
                if drone.locate(&servers).is_none() {
                    log::warn!("drone {} starts outside every room", spec.name);
                }
                drone
            })
            .collect();

        log::info!(
            "scene built: {} servers, {} links, {} drones",
            servers.len(),
            links.len(),
            drones.len()
        );

        Ok(Self {
            config,
            window,
            servers,
            links,
            drones,
            distances,
        })
    }

    /// Replace this scene with one built from `description`
    ///
    /// Keeps the current navigation configuration. On error the scene is left
    /// untouched.
    pub fn reload(&mut self, description: &SceneDescription) -> Result<()> {
        *self = Self::build(description, self.config)?;
        Ok(())
    }

    /// Advance every drone by `dt` time units
    ///
    /// Each drone first finds the room it is in, then steers and moves.
    pub fn tick(&mut self, dt: f64) {
        for drone in &mut self.drones {
            drone.locate(&self.servers);
            drone.step(dt, &self.servers, &self.links, &self.config);
        }
    }

    #[inline]
    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }

    #[inline]
    pub fn server_count(&self) -> usize {
        self.servers.len()
    }

    #[inline]
    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    /// Get a server by ID, `None` if out of range
    #[inline]
    pub fn server(&self, id: ServerId) -> Option<&Server> {
        self.servers.get(id)
    }

    /// Get a server by name
    pub fn server_by_name(&self, name: &str) -> Option<&Server> {
        self.servers.iter().find(|s| s.name == name)
    }

    #[inline]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    #[inline]
    pub fn drones(&self) -> &[Drone] {
        &self.drones
    }

    #[inline]
    pub fn distance_matrix(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Routing entry from `from` toward `to`
    ///
    /// # Errors
    ///
    /// Returns `ServerNotFound` if either ID is out of range.
    pub fn route(&self, from: ServerId, to: ServerId) -> Result<Route> {
        if to >= self.servers.len() {
            return Err(SceneError::ServerNotFound(to));
        }
        let server = self.server(from).ok_or(SceneError::ServerNotFound(from))?;
        server
            .route_to(to)
            .copied()
            .ok_or(SceneError::ServerNotFound(to))
    }

    /// Rooms visited when going from `from` to `to`, both included
    ///
    /// `None` if there is no path or an ID is out of range.
    pub fn path(&self, from: ServerId, to: ServerId) -> Option<Vec<ServerId>> {
        path(&self.servers, &self.links, from, to)
    }

    /// Server whose cell contains `point` (linear scan)
    pub fn server_at(&self, point: DVec2) -> Option<&Server> {
        self.servers.iter().find(|s| s.contains(point))
    }
}

fn validate(description: &SceneDescription) -> Result<()> {
    description.window.validate()?;

    let mut names = HashSet::new();
    for server in &description.servers {
        if !server.position.is_finite() {
            return Err(SceneError::InvalidScene(format!(
                "server '{}' has a non-finite position {:?}",
                server.name,
                server.position
            )));
        }
        if !names.insert(server.name.as_str()) {
            return Err(SceneError::InvalidScene(format!(
                "duplicate server name '{}'",
                server.name
            )));
        }
    }

    for (i, a) in description.servers.iter().enumerate() {
        for b in &description.servers[i + 1..] {
            if a.position.distance_squared(b.position) <= COINCIDENT_TOLERANCE_SQ {
                return Err(SceneError::InvalidScene(format!(
                    "servers '{}' and '{}' share the position {:?}",
                    a.name,
                    b.name,
                    a.position
                )));
            }
        }
    }

    for drone in &description.drones {
        if !drone.position.is_finite() {
            return Err(SceneError::InvalidScene(format!(
                "drone '{}' has a non-finite position {:?}",
                drone.name,
                drone.position
            )));
        }
    }

    Ok(())
}
