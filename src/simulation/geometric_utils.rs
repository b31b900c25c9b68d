//! Geometric utility functions for positions on the biome surface.
//!
//! Coordinates are percentages of the surface, so both axes span 0 to 100.

use geo::algorithm::Distance;
use geo::{Euclidean, Point};
use serde::{Deserialize, Serialize};

/// Lower bound of either surface axis.
pub const SURFACE_MIN: f32 = 0.0;
/// Upper bound of either surface axis.
pub const SURFACE_MAX: f32 = 100.0;

/// A point on the biome surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate, 0 to 100.
    pub x: f32,
    /// Vertical coordinate, 0 to 100.
    pub y: f32,
}

impl Position {
    /// Creates a position.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Position) -> f32 {
        Euclidean.distance(Point::from(*self), Point::from(*other))
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(&self, other: &Position) -> Position {
        Position::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Clamps both coordinates into `[min, max]`.
    pub fn clamped(&self, min: f32, max: f32) -> Position {
        Position::new(self.x.clamp(min, max), self.y.clamp(min, max))
    }

    /// Whether the position lies on the surface.
    pub fn is_on_surface(&self) -> bool {
        (SURFACE_MIN..=SURFACE_MAX).contains(&self.x) && (SURFACE_MIN..=SURFACE_MAX).contains(&self.y)
    }

    /// Moves up to `step` toward `target` without overshooting.
    ///
    /// # Returns
    ///
    /// The new position and whether the target was reached.
    pub fn step_toward(&self, target: &Position, step: f32) -> (Position, bool) {
        let distance = self.distance(target);
        if distance <= step || distance <= f32::EPSILON {
            return (*target, true);
        }
        let ratio = step / distance;
        let next = Position::new(
            self.x + (target.x - self.x) * ratio,
            self.y + (target.y - self.y) * ratio,
        );
        (next, false)
    }
}

impl From<Position> for Point<f32> {
    fn from(pos: Position) -> Self {
        Point::new(pos.x, pos.y)
    }
}
