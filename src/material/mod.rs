mod color;
mod simple;

use std::fmt::Debug;

use crate::{
    math::{Ray, Vector3},
    object::Hit,
    scene::Scene,
};

pub use color::*;
pub use simple::*;

/// A surface description that turns a hit into a final color.
///
/// Materials are shared between objects behind an `Arc`, so they must be
/// thread-safe and carry no per-hit state.
pub trait Material: Send + Sync + Debug {
    /// Shade `hit` on the object at index `object` of `scene`, reached by
    /// `ray`. `depth` counts the reflections already followed to get here.
    fn color(&self, scene: &Scene, object: usize, hit: &Hit, ray: &Ray, depth: u32) -> Color;
}

/// A plain matte material with no reflection or highlight.
#[derive(Clone, Debug)]
pub struct Diffuse {
    pub color: Color,
}

impl Diffuse {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Material for Diffuse {
    fn color(&self, scene: &Scene, object: usize, hit: &Hit, _ray: &Ray, _depth: u32) -> Color {
        diffuse_color(scene, object, hit.point, hit.normal, self.color)
    }
}

/// Sum the contribution of every light reaching `point`, then tint by `base`.
///
/// This is also the shading used for objects without a material.
pub fn diffuse_color(
    scene: &Scene,
    object: usize,
    point: Vector3,
    normal: Vector3,
    base: Color,
) -> Color {
    let mut total = Color::black();
    for light in scene.lights.iter() {
        let illum = light.illumination(point, normal, scene, Some(object));
        if illum.is_lit() {
            total += illum.contribution();
        }
    }

    total * base
}

/// Follow the mirror reflection of `incident` off `point` and shade whatever
/// it strikes first.
///
/// Returns black once `depth` reaches the scene's maximum reflection depth or
/// when the reflected ray hits nothing.
pub fn reflection_color(
    scene: &Scene,
    object: usize,
    point: Vector3,
    normal: Vector3,
    incident: &Ray,
    depth: u32,
) -> Color {
    if depth >= scene.options.max_reflection_depth {
        return Color::black();
    }

    let reflected = incident.reflect(point, normal);
    match scene.cast_ray(&reflected, Some(object)) {
        Some(closest) => scene.shade(&closest, &reflected, depth + 1),
        None => Color::black(),
    }
}
