//! Geometry helpers for the simulation.
//!
//! Plain 2D: axis-aligned world bounds and circle overlap tests.

use glam::Vec2;

/// Rectangular playable area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl WorldBounds {
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    /// Check if a point is within bounds.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if a circle lies entirely inside the bounds.
    pub fn contains_circle(&self, center: Vec2, radius: f32) -> bool {
        center.x >= self.min.x + radius
            && center.x <= self.max.x - radius
            && center.y >= self.min.y + radius
            && center.y <= self.max.y - radius
    }

    /// Clamp a point so a circle of `radius` around it stays inside.
    ///
    /// A radius wider than half the bounds has no legal position; the lower
    /// bound wins and the circle hangs over the far edge.
    pub fn clamp_with_radius(&self, point: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            point.x.min(self.max.x - radius).max(self.min.x + radius),
            point.y.min(self.max.y - radius).max(self.min.y + radius),
        )
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// True when `point` lies strictly inside the circle at `center`.
#[inline]
pub fn within(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) < radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_overlap() {
        assert!(within(Vec2::ZERO, Vec2::new(19.9, 0.0), 20.0));
        assert!(!within(Vec2::ZERO, Vec2::new(20.0, 0.0), 20.0));
    }

    #[test]
    fn clamping_with_radius() {
        let bounds = WorldBounds::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(bounds.clamp_with_radius(Vec2::new(50.0, 50.0), 10.0), Vec2::new(50.0, 50.0));
        assert_eq!(bounds.clamp_with_radius(Vec2::new(-5.0, 95.0), 10.0), Vec2::new(10.0, 90.0));
        assert!(bounds.contains_circle(bounds.clamp_with_radius(Vec2::new(500.0, -3.0), 25.0), 25.0));
    }

    #[test]
    fn oversized_radius_takes_lower_bound() {
        let bounds = WorldBounds::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(bounds.clamp_with_radius(Vec2::new(0.0, 0.0), 80.0), Vec2::new(80.0, 80.0));
        assert_eq!(bounds.clamp_with_radius(Vec2::new(100.0, 50.0), 80.0), Vec2::new(80.0, 80.0));
    }
}
