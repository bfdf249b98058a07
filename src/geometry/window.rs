//! Axis-aligned scene window

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SceneError};

/// Rectangle bounding the scene, given by its origin and size
///
/// Every cell polygon is clipped to this rectangle.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    origin: DVec2,
    size: DVec2,
}

impl Window {
    /// Create a window from its origin (minimum corner) and size
    ///
    /// # Errors
    ///
    /// Returns `InvalidScene` if the origin is not finite or the size is not
    /// strictly positive.
    pub fn new(origin: DVec2, size: DVec2) -> Result<Self> {
        let window = Self { origin, size };
        window.validate()?;
        Ok(window)
    }

    /// Check the window invariants (used again on deserialized windows)
    pub fn validate(&self) -> Result<()> {
        if !self.origin.is_finite() || !self.size.is_finite() {
            return Err(SceneError::InvalidScene(format!(
                "window must be finite (origin {:?}, size {:?})",
                self.origin,
                self.size
            )));
        }
        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            return Err(SceneError::InvalidScene(format!(
                "window size must be positive (got {:?})",
                self.size
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    #[inline]
    pub fn size(&self) -> DVec2 {
        self.size
    }

    #[inline]
    pub fn x_min(&self) -> f64 {
        self.origin.x
    }

    #[inline]
    pub fn x_max(&self) -> f64 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn y_min(&self) -> f64 {
        self.origin.y
    }

    #[inline]
    pub fn y_max(&self) -> f64 {
        self.origin.y + self.size.y
    }

    pub fn area(&self) -> f64 {
        self.size.x * self.size.y
    }

    /// Inclusive containment test
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.x_min()
            && point.x <= self.x_max()
            && point.y >= self.y_min()
            && point.y <= self.y_max()
    }

    /// Corners in counter-clockwise order starting at the origin
    pub fn corners(&self) -> [DVec2; 4] {
        [
            DVec2::new(self.x_min(), self.y_min()),
            DVec2::new(self.x_max(), self.y_min()),
            DVec2::new(self.x_max(), self.y_max()),
            DVec2::new(self.x_min(), self.y_max()),
        ]
    }

    /// Snap a point onto the rectangle
    pub fn clamp(&self, point: DVec2) -> DVec2 {
        DVec2::new(
            point.x.clamp(self.x_min(), self.x_max()),
            point.y.clamp(self.y_min(), self.y_max()),
        )
    }

    /// Point where the ray `origin + k * direction` (k > 0) first meets the border
    ///
    /// Each axis contributes the k that reaches the border on the side the
    /// direction component points to; the smallest one wins. Axes with a zero
    /// component never constrain k. The result is snapped onto the rectangle
    /// so that rounding cannot leave it a hair outside.
    pub fn ray_exit(&self, origin: DVec2, direction: DVec2) -> DVec2 {
        let mut k = f64::INFINITY;

        if direction.x > 0.0 {
            k = k.min((self.x_max() - origin.x) / direction.x);
        } else if direction.x < 0.0 {
            k = k.min((self.x_min() - origin.x) / direction.x);
        }

        if direction.y > 0.0 {
            k = k.min((self.y_max() - origin.y) / direction.y);
        } else if direction.y < 0.0 {
            k = k.min((self.y_min() - origin.y) / direction.y);
        }

        if !k.is_finite() {
            return self.clamp(origin);
        }
        self.clamp(origin + direction * k)
    }
}
