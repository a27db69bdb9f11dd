use std::sync::Arc;

use crate::{
    material::{Color, Material},
    math::{Direction, Ray, Transform, Vector3},
};

use super::{Hit, Intersect, SceneObject};

/// Below this, a ray's local z direction counts as parallel to the plane.
const PARALLEL_EPSILON: f64 = 1e-21;

/// A plane.
///
/// Locally this is the square `-1 < x, y < 1` at `z = 0`, facing `-z`. Its
/// transform scales and places it in the world.
#[derive(Clone, Debug)]
pub struct Plane {
    pub transform: Transform,
    pub color: Color,
    pub material: Option<Arc<dyn Material>>,
}

impl Plane {
    pub fn new(transform: Transform, color: Color) -> Self {
        Self {
            transform,
            color,
            material: None,
        }
    }

    pub fn with_material(mut self, material: Arc<dyn Material>) -> Self {
        self.material = Some(material);
        self
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::new(Transform::default(), Color::white())
    }
}

impl Intersect for Plane {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let local = self.transform.apply_ray(ray, Direction::Backward);
        let k = local.direction.normalize();

        if k.z.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = local.origin.z / -k.z;
        if t <= 0. {
            return None;
        }

        let u = local.origin.x + k.x * t;
        let v = local.origin.y + k.y * t;
        if u.abs() >= 1. || v.abs() >= 1. {
            return None;
        }

        let local_point = local.origin + k * t;
        Some(Hit::new(
            self.transform.apply_point(local_point, Direction::Forward),
            self.transform.apply_normal(Vector3::new(0., 0., -1.)),
            self.color,
        ))
    }
}

impl SceneObject for Plane {
    fn base_color(&self) -> Color {
        self.color
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn material(&self) -> Option<&Arc<dyn Material>> {
        self.material.as_ref()
    }
}
