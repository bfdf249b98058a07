//! Drone navigation configuration and builder
//!
//! All distances are in scene units, speeds in scene units per time unit.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SceneError};

/// Steering and physics parameters shared by every drone of a scene
///
/// # Example
///
/// ```rust
/// use rust_voronoi_rooms::*;
///
/// let config = NavigationConfigBuilder::new()
///     .min_distance(2.0)
///     .unwrap()
///     .max_speed(8.0)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.min_distance, 2.0);
/// assert_eq!(config.max_speed, 8.0);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationConfig {
    /// Distance under which a waypoint (room center or door) counts as reached
    ///
    /// Also the tolerance used to recognize which door a destination refers to.
    pub min_distance: f64,

    /// Distance to the destination under which the drone decelerates linearly
    pub slow_down_distance: f64,

    /// Speed the drone has when it enters the slow-down zone
    pub cruise_speed: f64,

    /// Acceleration applied toward the destination outside the slow-down zone
    pub acceleration: f64,

    /// Upper bound of the speed magnitude
    pub max_speed: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            min_distance: 5.0,
            slow_down_distance: 30.0,
            cruise_speed: 2.0,
            acceleration: 0.5,
            max_speed: 5.0,
        }
    }
}

/// Builder for creating NavigationConfig with validation
///
/// Every setter rejects non-finite or non-positive values.
#[derive(Debug, Clone)]
pub struct NavigationConfigBuilder {
    config: NavigationConfig,
}

impl NavigationConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - min_distance: 5.0
    /// - slow_down_distance: 30.0
    /// - cruise_speed: 2.0
    /// - acceleration: 0.5
    /// - max_speed: 5.0
    pub fn new() -> Self {
        Self {
            config: NavigationConfig::default(),
        }
    }

    /// Set the waypoint arrival tolerance
    pub fn min_distance(mut self, distance: f64) -> Result<Self> {
        self.config.min_distance = positive("min_distance", distance)?;
        Ok(self)
    }

    /// Set the radius of the linear deceleration zone
    pub fn slow_down_distance(mut self, distance: f64) -> Result<Self> {
        self.config.slow_down_distance = positive("slow_down_distance", distance)?;
        Ok(self)
    }

    /// Set the speed reached at the edge of the deceleration zone
    pub fn cruise_speed(mut self, speed: f64) -> Result<Self> {
        self.config.cruise_speed = positive("cruise_speed", speed)?;
        Ok(self)
    }

    /// Set the acceleration used while far from the destination
    pub fn acceleration(mut self, acceleration: f64) -> Result<Self> {
        self.config.acceleration = positive("acceleration", acceleration)?;
        Ok(self)
    }

    /// Set the speed clamp
    pub fn max_speed(mut self, speed: f64) -> Result<Self> {
        self.config.max_speed = positive("max_speed", speed)?;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the cruise speed exceeds the speed clamp.
    pub fn build(self) -> Result<NavigationConfig> {
        if self.config.cruise_speed > self.config.max_speed {
            return Err(SceneError::InvalidConfig(format!(
                "cruise_speed ({}) must not exceed max_speed ({})",
                self.config.cruise_speed, self.config.max_speed
            )));
        }
        Ok(self.config)
    }
}

impl Default for NavigationConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn positive(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SceneError::InvalidConfig(format!(
            "{} must be a positive finite number (got {})",
            name, value
        )));
    }
    Ok(value)
}
