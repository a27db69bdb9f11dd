use crate::{
    math::{Lerp, Ray, Vector3},
    object::Hit,
    scene::Scene,
};

use super::{diffuse_color, reflection_color, Color, Material};

/// How far to step off the surface before testing for a blocked light.
const SHADOW_BIAS: f64 = 0.001;

/// A diffuse surface with optional mirror reflection and Phong-style highlights.
#[derive(Clone, Debug)]
pub struct Simple {
    pub color: Color,

    /// Mix between the diffuse color (0) and the reflected color (1).
    /// Also scales the specular highlight.
    pub reflectivity: f64,

    /// Phong exponent. Zero disables the highlight.
    pub shininess: f64,
}

impl Default for Simple {
    fn default() -> Self {
        Self {
            color: Color::white(),
            reflectivity: 0.,
            shininess: 0.,
        }
    }
}

impl Simple {
    pub fn new(color: Color, reflectivity: f64, shininess: f64) -> Self {
        Self {
            color,
            reflectivity,
            shininess,
        }
    }

    /// Highlights from every light visible from `point`, seen along `ray`.
    pub fn specular(&self, scene: &Scene, point: Vector3, normal: Vector3, ray: &Ray) -> Color {
        let view = ray.direction.normalize();
        let mut total = Color::black();

        for light in scene.lights.iter() {
            let to_light = light.position() - point;
            let light_dir = to_light.normalize();

            // any object counts, the bias keeps us off our own surface
            let start = point + light_dir * SHADOW_BIAS;
            let shadow = Ray::new(start, light.position());
            let blocked = scene
                .cast_ray(&shadow, None)
                .map_or(false, |closest| closest.distance < to_light.magnitude());
            if blocked {
                continue;
            }

            let r = light_dir.reflect(normal).normalize();
            let dot = r.dot(view);
            if dot > 0. {
                total += light.color() * (self.reflectivity * dot.powf(self.shininess));
            }
        }

        total
    }
}

impl Material for Simple {
    fn color(&self, scene: &Scene, object: usize, hit: &Hit, ray: &Ray, depth: u32) -> Color {
        let diffuse = diffuse_color(scene, object, hit.point, hit.normal, self.color);

        let reflection = if self.reflectivity > 0. {
            reflection_color(scene, object, hit.point, hit.normal, ray, depth)
        } else {
            Color::black()
        };

        let specular = if self.shininess > 0. {
            self.specular(scene, hit.point, hit.normal, ray)
        } else {
            Color::black()
        };

        diffuse.lerp(reflection, self.reflectivity) + specular
    }
}
