use std::path::Path;

use tracing::{debug, info};

use crate::{
    camera::Camera,
    canvas::{Canvas, ImageSink},
    error::Result,
    lighting::Light,
    material::{diffuse_color, Color},
    math::{Direction, Ray, Vector3},
    object::{Hit, SceneObject},
};

/// Options used to configure how a scene renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneOptions {
    /// The maximum number of reflections followed from a camera ray.
    pub max_reflection_depth: u32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            max_reflection_depth: 3,
        }
    }
}

/// The nearest object struck by a ray.
pub struct ClosestHit<'a> {
    /// Position of the object in [`Scene::objects`].
    pub index: usize,
    pub object: &'a dyn SceneObject,
    pub hit: Hit,
    /// Distance from the ray origin to the hit point.
    pub distance: f64,
}

/// Counters gathered over one render.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderStats {
    pub hits: u64,
    pub misses: u64,
    /// Nearest camera-to-hit distance, if anything was hit.
    pub min_distance: Option<f64>,
    /// Farthest camera-to-hit distance, if anything was hit.
    pub max_distance: Option<f64>,
}

impl RenderStats {
    fn record_hit(&mut self, distance: f64) {
        self.hits += 1;
        self.min_distance = Some(self.min_distance.map_or(distance, |d| d.min(distance)));
        self.max_distance = Some(self.max_distance.map_or(distance, |d| d.max(distance)));
    }
}

/// A scene, which contains a list of objects, lights, and a camera to render from.
pub struct Scene {
    pub objects: Vec<Box<dyn SceneObject>>,
    pub lights: Vec<Box<dyn Light>>,
    pub camera: Camera,
    pub options: SceneOptions,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Camera::widescreen())
    }
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            camera,
            options: SceneOptions::default(),
        }
    }

    /// A scene with nothing in it, seen from the default camera.
    pub fn empty() -> Self {
        Self::new(Camera::default())
    }

    /// Add an object, returning its index.
    pub fn add_object(&mut self, object: impl SceneObject + 'static) -> usize {
        let center = object
            .transform()
            .apply_point(Vector3::zero(), Direction::Forward);
        let index = self.objects.len();
        debug!(index, ?center, color = ?object.base_color(), "added object");

        self.objects.push(Box::new(object));
        index
    }

    pub fn add_light(&mut self, light: impl Light + 'static) {
        debug!(position = ?light.position(), intensity = light.intensity(), "added light");
        self.lights.push(Box::new(light));
    }

    /// Find the nearest object struck by `ray`, skipping the object at
    /// index `exclude`.
    pub fn cast_ray(&self, ray: &Ray, exclude: Option<usize>) -> Option<ClosestHit<'_>> {
        let mut closest: Option<ClosestHit> = None;

        // a linear scan is plenty for a handful of objects
        for (index, object) in self.objects.iter().enumerate() {
            if exclude == Some(index) {
                continue;
            }

            let hit = match object.intersect(ray) {
                Some(hit) => hit,
                None => continue,
            };

            let distance = hit.distance(ray);
            if closest.as_ref().map_or(true, |c| distance < c.distance) {
                closest = Some(ClosestHit {
                    index,
                    object: object.as_ref(),
                    hit,
                    distance,
                });
            }
        }

        closest
    }

    /// Color a hit using its object's material, or plain diffuse shading if
    /// the object has none. `depth` is the number of reflections so far.
    pub fn shade(&self, closest: &ClosestHit, ray: &Ray, depth: u32) -> Color {
        match closest.object.material() {
            Some(material) => material.color(self, closest.index, &closest.hit, ray, depth),
            None => diffuse_color(
                self,
                closest.index,
                closest.hit.point,
                closest.hit.normal,
                closest.object.base_color(),
            ),
        }
    }

    /// The camera ray through pixel `(x, y)` of a `width` by `height` image.
    pub fn pixel_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let nx = x as f64 * (2. / width as f64) - 1.;
        let ny = y as f64 * (2. / height as f64) - 1.;
        self.camera.generate_ray(nx, ny)
    }

    /// Trace out a ray from the camera, returning the shaded color and the
    /// distance to what it hit.
    pub fn trace_ray(&self, ray: &Ray) -> Option<(Color, f64)> {
        let closest = self.cast_ray(ray, None)?;
        Some((self.shade(&closest, ray, 0), closest.distance))
    }

    /// Trace out a pixel, where top-left of the image is (0, 0).
    /// `None` means the pixel sees nothing.
    pub fn trace_pixel(&self, x: u32, y: u32, width: u32, height: u32) -> Option<Color> {
        self.trace_ray(&self.pixel_ray(x, y, width, height))
            .map(|(color, _)| color)
    }

    /// Render every pixel of `sink`. Pixels that see nothing are left untouched.
    pub fn render<S: ImageSink + ?Sized>(&self, sink: &mut S) -> RenderStats {
        let (width, height) = sink.size();
        info!(
            width,
            height,
            objects = self.objects.len(),
            lights = self.lights.len(),
            max_reflection_depth = self.options.max_reflection_depth,
            "rendering scene"
        );

        let mut stats = RenderStats::default();
        for y in 0..height {
            for x in 0..width {
                match self.trace_ray(&self.pixel_ray(x, y, width, height)) {
                    Some((color, distance)) => {
                        stats.record_hit(distance);
                        sink.set_pixel(x, y, color.r, color.g, color.b);
                    }
                    None => stats.misses += 1,
                }
            }
        }

        info!(
            hits = stats.hits,
            misses = stats.misses,
            min_distance = ?stats.min_distance,
            max_distance = ?stats.max_distance,
            "render finished"
        );
        stats
    }

    /// Render the image out to the desired save file, on a black background.
    pub fn render_to<P: AsRef<Path>>(&self, path: P, width: u32, height: u32) -> Result<RenderStats> {
        let mut canvas = Canvas::new(width, height);
        let stats = self.render(&mut canvas);
        canvas.save(path)?;
        Ok(stats)
    }
}
