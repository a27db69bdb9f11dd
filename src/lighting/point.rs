use std::f64::consts::FRAC_PI_2;

use crate::{
    material::Color,
    math::{Ray, Vector3},
    scene::Scene,
};

use super::{Illumination, Light};

/// A point light, which is a light that emits in all directions from a specified position.
#[derive(Clone, Debug)]
pub struct Point {
    /// The color of this light.
    pub color: Color,

    /// The intensity of this light at normal incidence.
    pub intensity: f64,

    /// The position in space of this light.
    pub position: Vector3,

    /// Whether other objects can block this light.
    pub cast_shadows: bool,
}

impl Default for Point {
    fn default() -> Self {
        Self {
            color: Color::white(),
            intensity: 1.,
            position: Vector3::zero(),
            cast_shadows: true,
        }
    }
}

impl Point {
    pub fn new(position: Vector3, color: Color, intensity: f64) -> Self {
        Self {
            color,
            intensity,
            position,
            ..Default::default()
        }
    }

    /// Is there anything other than `current` between `point` and this light?
    fn occluded(&self, point: Vector3, scene: &Scene, current: Option<usize>) -> bool {
        let to_light = self.position - point;
        let distance = to_light.magnitude();
        let ray = Ray::towards(point, to_light.normalize());

        scene
            .cast_ray(&ray, current)
            .map_or(false, |closest| closest.distance < distance)
    }
}

impl Light for Point {
    fn color(&self) -> Color {
        self.color
    }

    fn intensity(&self) -> f64 {
        self.intensity
    }

    fn position(&self) -> Vector3 {
        self.position
    }

    fn illumination(
        &self,
        point: Vector3,
        normal: Vector3,
        scene: &Scene,
        current: Option<usize>,
    ) -> Illumination {
        if self.cast_shadows && self.occluded(point, scene, current) {
            return Illumination::dark(self.color);
        }

        // both are unit vectors; clamp so rounding can't push acos out of range
        let light_dir = (self.position - point).normalize();
        let angle = normal.dot(light_dir).clamp(-1., 1.).acos();
        if angle > FRAC_PI_2 {
            // facing away from the light
            return Illumination::dark(self.color);
        }

        // linear falloff with incidence angle
        Illumination::new(self.color, self.intensity * (1. - angle / FRAC_PI_2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Sphere;
    use approx::assert_abs_diff_eq;

    fn lit(light: &Point, point: Vector3, normal: Vector3) -> Illumination {
        light.illumination(point, normal, &Scene::empty(), None)
    }

    #[test]
    fn head_on_light_is_full_strength() {
        let light = Point::new(Vector3::new(0., 0., 5.), Color::red(), 2.);
        let illum = lit(&light, Vector3::zero(), Vector3::new(0., 0., 1.));
        assert_abs_diff_eq!(illum.intensity, 2., epsilon = 1e-12);
        assert_eq!(illum.color, Color::red());
    }

    #[test]
    fn intensity_falls_off_linearly_with_angle() {
        let light = Point::new(Vector3::new(1., 0., 1.), Color::white(), 1.);
        // 45 degrees off the normal
        let illum = lit(&light, Vector3::zero(), Vector3::new(0., 0., 1.));
        assert_abs_diff_eq!(illum.intensity, 0.5, epsilon = 1e-12);

        // 60 degrees off the normal
        let light = Point::new(Vector3::new(3f64.sqrt(), 0., 1.), Color::white(), 1.);
        let illum = lit(&light, Vector3::zero(), Vector3::new(0., 0., 1.));
        assert_abs_diff_eq!(illum.intensity, 1. / 3., epsilon = 1e-9);
    }

    #[test]
    fn light_behind_the_surface_is_dark() {
        let light = Point::new(Vector3::new(0., 0., -5.), Color::blue(), 1.);
        let illum = lit(&light, Vector3::zero(), Vector3::new(0., 0., 1.));
        assert!(!illum.is_lit());
        assert_eq!(illum.color, Color::blue());
    }

    #[test]
    fn blockers_cast_shadows_only_when_enabled() {
        let mut scene = Scene::empty();
        scene.add_object(Sphere::new(
            crate::math::Transform::translation(Vector3::new(0., 0., 3.)).unwrap(),
            Color::white(),
        ));

        let mut light = Point::new(Vector3::new(0., 0., 10.), Color::white(), 1.);
        let normal = Vector3::new(0., 0., 1.);
        let shadowed = light.illumination(Vector3::zero(), normal, &scene, None);
        assert_eq!(shadowed.intensity, 0.);
        assert_eq!(shadowed.color, Color::white());

        light.cast_shadows = false;
        let unshadowed = light.illumination(Vector3::zero(), normal, &scene, None);
        assert_abs_diff_eq!(unshadowed.intensity, 1., epsilon = 1e-12);
    }

    #[test]
    fn objects_beyond_the_light_do_not_shadow() {
        let mut scene = Scene::empty();
        scene.add_object(Sphere::new(
            crate::math::Transform::translation(Vector3::new(0., 0., 20.)).unwrap(),
            Color::white(),
        ));

        let light = Point::new(Vector3::new(0., 0., 10.), Color::white(), 1.);
        let illum = light.illumination(Vector3::zero(), Vector3::new(0., 0., 1.), &scene, None);
        assert!(illum.is_lit());
    }
}
