//! Scene descriptions
//!
//! Plain data handed to [`Scene::build`](crate::scene::Scene::build): the
//! window, the servers and the drones with the name of the server they fly
//! to. How the description is obtained (file, network, generator) is up to
//! the caller.

use glam::DVec2;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::Window;
use crate::mesh::{palette_color, Rgba};

/// Minimum gap between generated servers, as a fraction of the mean spacing
const MIN_SPACING_FACTOR: f64 = 0.5;

/// Attempts per server before accepting a crowded position
const MAX_PLACEMENT_ATTEMPTS: usize = 64;

/// Server entry of a scene description
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSpec {
    pub name: String,
    pub position: DVec2,
    pub color: Rgba,
}

/// Drone entry of a scene description
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DroneSpec {
    pub name: String,
    pub position: DVec2,
    /// Name of the destination server
    pub target: String,
}

/// Everything needed to build a scene
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescription {
    pub window: Window,
    pub servers: Vec<ServerSpec>,
    pub drones: Vec<DroneSpec>,
}

impl SceneDescription {
    /// Empty description over `window`
    pub fn new(window: Window) -> Self {
        Self {
            window,
            servers: Vec::new(),
            drones: Vec::new(),
        }
    }

    /// Append a server
    pub fn with_server(mut self, name: impl Into<String>, position: DVec2, color: Rgba) -> Self {
        self.servers.push(ServerSpec {
            name: name.into(),
            position,
            color,
        });
        self
    }

    /// Append a drone flying to the server named `target`
    pub fn with_drone(
        mut self,
        name: impl Into<String>,
        position: DVec2,
        target: impl Into<String>,
    ) -> Self {
        self.drones.push(DroneSpec {
            name: name.into(),
            position,
            target: target.into(),
        });
        self
    }

    /// Generate a deterministic random scene
    ///
    /// Servers are scattered over the window with a soft minimum spacing so
    /// rooms do not degenerate into slivers. Drones start at random points and
    /// each targets a random server. The same seed always gives the same scene.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_voronoi_rooms::*;
    ///
    /// let window = Window::new(DVec2::ZERO, DVec2::new(800.0, 600.0)).unwrap();
    /// let description = SceneDescription::random(7, 12, 3, window);
    /// assert_eq!(description.servers.len(), 12);
    /// assert_eq!(description, SceneDescription::random(7, 12, 3, window));
    /// ```
    pub fn random(seed: u64, servers: usize, drones: usize, window: Window) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut description = Self::new(window);

        let spacing = if servers > 0 {
            (window.area() / servers as f64).sqrt() * MIN_SPACING_FACTOR
        } else {
            0.0
        };

        let mut positions: Vec<DVec2> = Vec::with_capacity(servers);
        for index in 0..servers {
            let mut position = random_point(&mut rng, &window);
            for _ in 0..MAX_PLACEMENT_ATTEMPTS {
                if positions.iter().all(|p| p.distance(position) >= spacing) {
                    break;
                }
                position = random_point(&mut rng, &window);
            }
            positions.push(position);
            description =
                description.with_server(format!("S{}", index + 1), position, palette_color(index));
        }

        if servers > 0 {
            for index in 0..drones {
                let position = random_point(&mut rng, &window);
                let target = rng.gen_range(0..servers);
                description = description.with_drone(
                    format!("D{}", index + 1),
                    position,
                    format!("S{}", target + 1),
                );
            }
        }

        log::debug!(
            "generated random scene (seed {}): {} servers, {} drones",
            seed,
            description.servers.len(),
            description.drones.len()
        );
        description
    }
}

/// Uniform point strictly inside the window
fn random_point(rng: &mut ChaCha8Rng, window: &Window) -> DVec2 {
    let margin = window.size() * 0.01;
    DVec2::new(
        rng.gen_range(window.x_min() + margin.x..window.x_max() - margin.x),
        rng.gen_range(window.y_min() + margin.y..window.y_max() - margin.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Window {
        Window::new(DVec2::new(-50.0, 10.0), DVec2::new(300.0, 200.0)).unwrap()
    }

    #[test]
    fn test_builder_methods() {
        let description = SceneDescription::new(window())
            .with_server("A", DVec2::new(0.0, 20.0), [1.0, 0.0, 0.0, 1.0])
            .with_drone("D", DVec2::new(5.0, 25.0), "A");

        assert_eq!(description.servers.len(), 1);
        assert_eq!(description.drones[0].target, "A");
    }

    #[test]
    fn test_random_is_deterministic() {
        let a = SceneDescription::random(42, 10, 4, window());
        let b = SceneDescription::random(42, 10, 4, window());
        let c = SceneDescription::random(43, 10, 4, window());

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_random_stays_in_window() {
        let description = SceneDescription::random(1, 25, 10, window());

        assert_eq!(description.servers.len(), 25);
        assert_eq!(description.drones.len(), 10);
        for server in &description.servers {
            assert!(window().contains(server.position));
        }
        for drone in &description.drones {
            assert!(window().contains(drone.position));
            assert!(description.servers.iter().any(|s| s.name == drone.target));
        }
    }

    #[test]
    fn test_random_without_servers_has_no_drones() {
        let description = SceneDescription::random(1, 0, 5, window());
        assert!(description.servers.is_empty());
        assert!(description.drones.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_description_serde() {
        let description = SceneDescription::new(window())
            .with_server("A", DVec2::new(0.0, 20.0), [1.0, 0.0, 0.0, 1.0])
            .with_server("B", DVec2::new(120.5, 80.25), [0.0, 0.5, 1.0, 1.0])
            .with_drone("D", DVec2::new(5.0, 25.0), "B");
        let json = serde_json::to_string(&description).unwrap();
        let restored: SceneDescription = serde_json::from_str(&json).unwrap();
        assert_eq!(description, restored);
    }
}
