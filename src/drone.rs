//! Drone navigation
//!
//! A drone flies room to room toward its target server: first to the anchor
//! of the room it is in, then through the door given by the routing table,
//! then to the anchor of the next room, and so on. Motion is a simple
//! accelerate / clamp / decelerate integrator.

use glam::DVec2;

use crate::config::NavigationConfig;
use crate::links::{Link, LinkId};
use crate::server::{Server, ServerId};

/// Below this length a vector is treated as zero
const ZERO_LENGTH: f64 = 1e-9;

/// Navigation phase of a drone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    /// No destination chosen yet; the first tick in a room aims at its anchor
    Uninitialized,
    /// Flying to the anchor of `server`
    SeekingRoom { server: ServerId },
    /// Flying to the door of `link`
    SeekingDoor { link: LinkId },
    /// Pinned in place: target reached, or no path to it
    Idle,
}

/// What a renderer needs to draw a drone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DronePose {
    pub position: DVec2,
    /// Heading in degrees
    pub azimut: f64,
}

/// An autonomous agent moving through the rooms
#[derive(Debug, Clone)]
pub struct Drone {
    pub name: String,
    pub position: DVec2,
    pub speed: DVec2,

    /// Heading in degrees, screen bearing convention
    pub azimut: f64,

    /// Point the drone is currently steering to
    pub destination: DVec2,

    /// Room the drone wants to end up in; `None` if the scene named an unknown server
    pub target: Option<ServerId>,

    /// Room whose cell contains the drone, refreshed every tick
    pub connected_to: Option<ServerId>,

    state: NavState,
}

impl Drone {
    pub fn new(name: impl Into<String>, position: DVec2, target: Option<ServerId>) -> Self {
        Self {
            name: name.into(),
            position,
            speed: DVec2::ZERO,
            azimut: 0.0,
            destination: DVec2::ZERO,
            target,
            connected_to: None,
            state: NavState::Uninitialized,
        }
    }

    #[inline]
    pub fn state(&self) -> NavState {
        self.state
    }

    #[inline]
    pub fn pose(&self) -> DronePose {
        DronePose {
            position: self.position,
            azimut: self.azimut,
        }
    }

    /// Whether the drone has stopped for good (target reached or no path)
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.state == NavState::Idle
    }

    /// Find the room containing the drone
    ///
    /// Linear scan over the servers; the first cell containing the position wins.
    pub fn locate(&mut self, servers: &[Server]) -> Option<ServerId> {
        self.connected_to = servers
            .iter()
            .find(|s| s.contains(self.position))
            .map(|s| s.id);
        self.connected_to
    }

    /// Advance the drone by `dt` time units
    ///
    /// Runs the waypoint transitions (room anchor reached → next door, door
    /// reached → next room), then integrates the motion. A non-positive or
    /// non-finite `dt` leaves the drone untouched.
    pub fn step(&mut self, dt: f64, servers: &[Server], links: &[Link], config: &NavigationConfig) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }

        let Some(room) = self.connected_to.filter(|&id| id < servers.len()) else {
            self.speed = DVec2::ZERO;
            return;
        };

        if self.state != NavState::Idle {
            self.navigate(&servers[room], servers, links, config);
        }
        self.integrate(dt, config);
    }

    fn navigate(
        &mut self,
        room: &Server,
        servers: &[Server],
        links: &[Link],
        config: &NavigationConfig,
    ) {
        let near = |p: DVec2, position: DVec2| p.distance(position) < config.min_distance;

        if self.state == NavState::Uninitialized {
            self.destination = room.position;
            self.state = NavState::SeekingRoom { server: room.id };
        }

        let heading_to_room = near(self.destination, room.position);

        if heading_to_room && near(room.position, self.position) {
            match self.target {
                Some(target) if target == room.id => {
                    log::trace!("drone {} reached target {}", self.name, room.name);
                    self.stop();
                }
                Some(target) => {
                    let next = room.route_to(target).and_then(|route| route.link);
                    match next.and_then(|id| links.get(id)) {
                        Some(link) => {
                            log::trace!(
                                "drone {} in {} heads for door {} toward {}",
                                self.name,
                                room.name,
                                link.id,
                                target
                            );
                            self.destination = link.edge_center;
                            self.state = NavState::SeekingDoor { link: link.id };
                        }
                        None => {
                            log::warn!(
                                "drone {} has no path from {} to server {}, stopping",
                                self.name,
                                room.name,
                                target
                            );
                            self.stop();
                        }
                    }
                }
                None => {}
            }
        }

        if !heading_to_room && near(self.destination, self.position) {
            let door = room
                .links
                .iter()
                .filter_map(|&id| links.get(id))
                .find(|link| near(link.edge_center, self.destination));

            if let Some(next_room) = door.and_then(|link| link.other(room.id)) {
                if let Some(next) = servers.get(next_room) {
                    log::trace!("drone {} crosses from {} to {}", self.name, room.name, next.name);
                    self.connected_to = Some(next.id);
                    self.destination = next.position;
                    self.state = NavState::SeekingRoom { server: next.id };
                }
            }
        }
    }

    fn stop(&mut self) {
        self.destination = self.position;
        self.speed = DVec2::ZERO;
        self.state = NavState::Idle;
    }

    fn integrate(&mut self, dt: f64, config: &NavigationConfig) {
        let to_destination = self.destination - self.position;
        let distance = to_destination.length();

        if distance < ZERO_LENGTH {
            self.speed = DVec2::ZERO;
            return;
        }

        let direction = to_destination / distance;
        if distance < config.slow_down_distance {
            self.speed = direction * (distance * config.cruise_speed / config.slow_down_distance);
        } else {
            self.speed += direction * (config.acceleration * dt);
            if self.speed.length() > config.max_speed {
                self.speed = self.speed.normalize() * config.max_speed;
            }
        }

        self.position += self.speed * dt;

        if let Some(azimut) = bearing(self.speed) {
            self.azimut = azimut;
        }
    }
}

/// Heading in degrees of a velocity, `None` when it is too small to tell
///
/// Screen coordinates (y grows downward): 0 points up the screen and 180
/// down; purely horizontal motion gives -90 to the right and 90 to the left.
fn bearing(speed: DVec2) -> Option<f64> {
    let magnitude = speed.length();
    if magnitude < ZERO_LENGTH {
        return None;
    }
    let v = speed / magnitude;
    let azimut = if v.y == 0.0 {
        if v.x > 0.0 {
            -90.0
        } else {
            90.0
        }
    } else if v.y > 0.0 {
        180.0 - (v.x / v.y).atan().to_degrees()
    } else {
        -(v.x / v.y).atan().to_degrees()
    };
    Some(azimut)
}
