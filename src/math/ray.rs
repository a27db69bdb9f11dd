use super::Vector3;

/// A directed segment from `origin` through `target`.
///
/// `direction` is always `target - origin` and is not normalized.
#[derive(Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vector3,
    pub target: Vector3,
    pub direction: Vector3,
}

impl Ray {
    /// Instantiate a new Ray passing through two points.
    pub fn new(origin: Vector3, target: Vector3) -> Self {
        Self {
            origin,
            target,
            direction: target - origin,
        }
    }

    /// Instantiate a Ray from a starting point and a direction.
    pub fn towards(origin: Vector3, direction: Vector3) -> Self {
        Self::new(origin, origin + direction)
    }

    pub fn along(&self, t: f64) -> Vector3 {
        self.origin + self.direction * t
    }

    /// Reflect this ray off of a position and a normal.
    pub fn reflect(&self, pos: Vector3, normal: Vector3) -> Ray {
        Ray::towards(pos, self.direction.reflect(normal))
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new(Vector3::zero(), Vector3::new(0., 0., 1.))
    }
}
