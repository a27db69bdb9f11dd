mod plane;
mod sphere;

use std::sync::Arc;

use crate::{
    material::{Color, Material},
    math::{Ray, Transform, Vector3},
};

pub use plane::*;
pub use sphere::*;

/// The result of a ray intersection, in world space.
#[derive(Clone, Debug, PartialEq)]
pub struct Hit {
    pub point: Vector3,
    /// Unit surface normal at `point`.
    pub normal: Vector3,
    /// The object's base color. Final shading is the material's job.
    pub color: Color,
}

impl Hit {
    pub fn new(point: Vector3, normal: Vector3, color: Color) -> Self {
        Self {
            point,
            normal,
            color,
        }
    }

    /// Distance from the origin of `ray` to the hit point.
    pub fn distance(&self, ray: &Ray) -> f64 {
        (self.point - ray.origin).magnitude()
    }
}

/// A trait that represents any type that can be intersected by a Ray.
pub trait Intersect {
    /// Find the nearest intersection in front of the ray, if any.
    fn intersect(&self, ray: &Ray) -> Option<Hit>;
}

/// A trait that represents any type that is a scene object, and can thus be viewed in the final render.
///
/// Scene objects are defined in a canonical local frame and placed in the
/// world by their [`Transform`].
pub trait SceneObject: Intersect + Send + Sync {
    fn base_color(&self) -> Color;

    fn transform(&self) -> &Transform;

    /// The shared material, or `None` to fall back to plain diffuse shading.
    fn material(&self) -> Option<&Arc<dyn Material>>;
}
