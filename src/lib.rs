//! Voronoi rooms, door routing and drone navigation
//!
//! A standalone library that partitions a rectangular window into one room
//! per server, links rooms sharing a wall through a door at the middle of
//! that wall, computes all-pairs shortest routes over the doors, and flies
//! drones room to room toward their target server.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rust_voronoi_rooms::*;
//!
//! let window = Window::new(DVec2::ZERO, DVec2::new(800.0, 600.0)).unwrap();
//! let description = SceneDescription::random(42, 10, 4, window);
//!
//! let config = NavigationConfigBuilder::new()
//!     .max_speed(8.0).unwrap()
//!     .build().unwrap();
//!
//! let mut scene = Scene::build(&description, config).unwrap();
//! for _ in 0..100 {
//!     scene.tick(1.0);
//! }
//!
//! // Generate mesh for rendering
//! let mesh = generate_mesh(&scene);
//! println!("Generated {} triangles", mesh.triangle_count());
//! ```
//!
//! # Features
//!
//! - `serde`: Enables serialization support for configuration, windows and
//!   scene descriptions

// Modules
pub mod error;
pub mod config;
pub mod geometry;
pub mod tessellation;
pub mod server;
pub mod links;
pub mod routing;
pub mod drone;
pub mod description;
pub mod scene;
pub mod mesh;

// Re-export core types for convenience
pub use error::{SceneError, Result};
pub use config::{NavigationConfig, NavigationConfigBuilder};
pub use geometry::{Polygon, Triangle, Window};
pub use tessellation::{tessellate, TriangleMesh};
pub use server::{Server, ServerId};
pub use links::{build_links, Link, LinkId};
pub use routing::{compute_routes, DistanceMatrix, Route, UNREACHABLE};
pub use drone::{Drone, DronePose, NavState};
pub use description::{DroneSpec, SceneDescription, ServerSpec};
pub use scene::Scene;
pub use mesh::{generate_mesh, link_segments, parse_hex_color, LinkSegment, MeshData, Rgba};

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
