//! Planar geometry primitives
//!
//! Points and vectors are `glam::DVec2`. The window rectangle, cell polygons
//! and triangulation triangles live here and carry no scene knowledge.

mod polygon;
mod triangle;
mod window;

pub use polygon::Polygon;
pub use triangle::Triangle;
pub use window::Window;

pub use glam::DVec2;
