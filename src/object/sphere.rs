use std::sync::Arc;

use crate::{
    material::{Color, Material},
    math::{Direction, Ray, Transform, Vector3},
};

use super::{Hit, Intersect, SceneObject};

/// A unit sphere centered on the local origin, placed by its transform.
#[derive(Clone, Debug)]
pub struct Sphere {
    pub transform: Transform,
    pub color: Color,
    pub material: Option<Arc<dyn Material>>,
}

impl Sphere {
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

impl Default for Sphere {
    fn default() -> Self {
        Self::new(Transform::default(), Color::white())
    }
}

impl Intersect for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let local = self.transform.apply_ray(ray, Direction::Backward);
        let dir = local.direction.normalize();

        // |o + t*d|^2 = 1 with |d| = 1, so a = 1
        let b = 2. * local.origin.dot(dir);
        let c = local.origin.dot(local.origin) - 1.;
        let disc = b * b - 4. * c;
        if disc <= 0. {
            return None;
        }

        let root = disc.sqrt();
        let t0 = (-b - root) / 2.;
        let t1 = (-b + root) / 2.;
        let t = if t0 > 0. {
            t0
        } else if t1 > 0. {
            t1
        } else {
            // entirely behind the ray
            return None;
        };

        let local_point = local.origin + dir * t;
        Some(Hit::new(
            self.transform.apply_point(local_point, Direction::Forward),
            self.transform.apply_normal(local_point.normalize()),
            self.color,
        ))
    }
}

impl SceneObject for Sphere {
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
