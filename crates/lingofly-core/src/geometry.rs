//! Map geometry shared by the script and the sequencer.
//!
//! Positions are normalized against the airport map image: `(0, 0)` is the
//! top-left corner and `(1, 1)` the bottom-right, so the view can scale them
//! to whatever size it renders the map at.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A point on the map with both axes in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    /// Horizontal fraction of the map width.
    pub x: f64,
    /// Vertical fraction of the map height.
    pub y: f64,
}

impl NormalizedPoint {
    /// Creates a point, rejecting coordinates outside `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidScript` if either axis is non-finite or
    /// outside the unit interval.
    pub fn new(x: f64, y: f64) -> Result<Self, DomainError> {
        let point = Self { x, y };
        point.validate()?;
        Ok(point)
    }

    /// Checks that both axes lie in the unit interval.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidScript` describing the offending axis.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (axis, value) in [("x", self.x), ("y", self.y)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(DomainError::InvalidScript(format!(
                    "{axis} coordinate {value} is outside [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Linear interpolation towards `other`; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// Heading of the plane icon in degrees.
///
/// Values are not wrapped: the view rotates numerically from one heading to
/// the next, so `11 -> 242` turns through 231 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Heading(pub f64);

impl Heading {
    /// Returns the heading in degrees.
    #[must_use]
    pub fn degrees(self) -> f64 {
        self.0
    }

    /// Checks that the heading is a finite number.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidScript` for NaN or infinite headings.
    pub fn validate(self) -> Result<(), DomainError> {
        if self.0.is_finite() {
            Ok(())
        } else {
            Err(DomainError::InvalidScript(format!(
                "heading {} is not finite",
                self.0
            )))
        }
    }

    /// Linear interpolation towards `other`; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self(self.0 + (other.0 - self.0) * t)
    }
}

/// Position and heading of the plane icon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Where the icon sits on the map.
    pub position: NormalizedPoint,
    /// Which way the icon points.
    pub heading: Heading,
}
