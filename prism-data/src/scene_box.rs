//! Axis-aligned scene bounds.

use glam::DVec3;

/// Axis-aligned box delimiting the region the scene is reconstructed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBox {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl SceneBox {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Cube centered on the origin spanning `[-scale, scale]` on every axis.
    pub fn cube(scale: f64) -> Self {
        Self {
            min: DVec3::splat(-scale),
            max: DVec3::splat(scale),
        }
    }

    /// Both corners as `[min, max]`.
    pub fn aabb(&self) -> [DVec3; 2] {
        [self.min, self.max]
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}
