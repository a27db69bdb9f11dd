mod point;

use crate::{material::Color, math::Vector3, scene::Scene};

pub use point::*;

/// The result of a light's influence on a surface point.
#[derive(Clone, Debug, PartialEq)]
pub struct Illumination {
    /// The light's color. Reported even when the point is unlit.
    pub color: Color,

    /// How strongly the light reaches the point, zero when it doesn't.
    pub intensity: f64,
}

impl Illumination {
    pub fn new(color: Color, intensity: f64) -> Self {
        Self { color, intensity }
    }

    /// A light that does not reach the point.
    pub fn dark(color: Color) -> Self {
        Self::new(color, 0.)
    }

    pub fn is_lit(&self) -> bool {
        self.intensity > 0.
    }

    /// The light's color weighted by its intensity.
    pub fn contribution(&self) -> Color {
        self.color * self.intensity
    }
}

/// This trait represents any object that is a light.
/// It provides details about the light, as well as the result
/// of shading due to the light at a certain point.
pub trait Light: Send + Sync {
    fn color(&self) -> Color;
    fn intensity(&self) -> f64;
    fn position(&self) -> Vector3;

    /// Work out how this light reaches `point`, whose unit surface normal is
    /// `normal`. The object at index `current` in the scene is the surface
    /// itself and never shadows the point.
    fn illumination(
        &self,
        point: Vector3,
        normal: Vector3,
        scene: &Scene,
        current: Option<usize>,
    ) -> Illumination;
}
