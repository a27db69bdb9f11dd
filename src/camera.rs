use tracing::debug;

use crate::{
    error::{Error, Result},
    math::{Ray, Vector3},
};

/// A pinhole camera. Rays leave `position` and pass through a projection
/// screen `length` units away along the line towards `look_at`.
///
/// The screen geometry (`u`, `v`, `screen_center`) is derived from the public
/// parameters and must be refreshed with [`Camera::update_geometry`] after any
/// of them change.
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vector3,
    pub look_at: Vector3,
    pub up: Vector3,
    /// Distance from the pinhole to the projection screen.
    pub length: f64,
    /// Half-width of the projection screen.
    pub horizontal_size: f64,
    /// Width over height.
    pub aspect_ratio: f64,

    alignment: Vector3,
    u: Vector3,
    v: Vector3,
    screen_center: Vector3,
}

impl Default for Camera {
    fn default() -> Self {
        let mut camera = Self {
            position: Vector3::new(0., -10., 0.),
            look_at: Vector3::zero(),
            up: Vector3::new(0., 0., 1.),
            length: 1.,
            horizontal_size: 1.,
            aspect_ratio: 1.,
            alignment: Vector3::zero(),
            u: Vector3::zero(),
            v: Vector3::zero(),
            screen_center: Vector3::zero(),
        };
        camera.derive_geometry();
        camera
    }
}

impl Camera {
    /// Create a camera and compute its screen geometry.
    pub fn new(
        position: Vector3,
        look_at: Vector3,
        up: Vector3,
        length: f64,
        horizontal_size: f64,
        aspect_ratio: f64,
    ) -> Result<Self> {
        let mut camera = Self {
            position,
            look_at,
            up,
            length,
            horizontal_size,
            aspect_ratio,
            ..Default::default()
        };
        camera.update_geometry()?;
        Ok(camera)
    }

    /// The default camera with a narrow 16:9 screen.
    pub fn widescreen() -> Self {
        let mut camera = Self {
            horizontal_size: 0.25,
            aspect_ratio: 16. / 9.,
            ..Default::default()
        };
        camera.derive_geometry();
        camera
    }

    /// Recompute the projection screen from the camera parameters.
    ///
    /// Fails if the camera looks at its own position, if `up` is parallel to
    /// the viewing direction, or if the aspect ratio is not positive.
    pub fn update_geometry(&mut self) -> Result<()> {
        let alignment = (self.look_at - self.position)
            .try_normalize()
            .map_err(|_| Error::DegenerateCamera("look_at is the camera position"))?;
        alignment
            .cross(self.up)
            .try_normalize()
            .map_err(|_| Error::DegenerateCamera("up is parallel to the view direction"))?;
        if self.aspect_ratio <= 0. || self.aspect_ratio.is_nan() {
            return Err(Error::DegenerateCamera("aspect ratio must be positive"));
        }

        self.derive_geometry();
        debug!(
            position = ?self.position,
            u = ?self.u,
            v = ?self.v,
            center = ?self.screen_center,
            "updated camera geometry"
        );
        Ok(())
    }

    fn derive_geometry(&mut self) {
        self.alignment = (self.look_at - self.position).normalize();
        let u = self.alignment.cross(self.up).normalize();
        let v = u.cross(self.alignment).normalize();
        self.screen_center = self.position + self.alignment * self.length;
        self.u = u * self.horizontal_size;
        self.v = v * (self.horizontal_size / self.aspect_ratio);
    }

    /// Generate the ray through a point on the projection screen, where
    /// `(0, 0)` is the screen center and `(±1, ±1)` are its corners.
    pub fn generate_ray(&self, x: f64, y: f64) -> Ray {
        let screen_point = self.screen_center + self.u * x + self.v * y;
        Ray::new(self.position, screen_point)
    }

    /// Unit vector from the camera towards `look_at`.
    pub fn alignment(&self) -> Vector3 {
        self.alignment
    }

    /// Horizontal screen axis, scaled by the horizontal size.
    pub fn u(&self) -> Vector3 {
        self.u
    }

    /// Vertical screen axis, scaled by the vertical size.
    pub fn v(&self) -> Vector3 {
        self.v
    }

    pub fn screen_center(&self) -> Vector3 {
        self.screen_center
    }
}
