use tracing::debug;

use super::{Matrix, Ray, Vector3, EPSILON};
use crate::error::{Error, Result};

/// Which way to push a point through a [`Transform`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Local object space to world space.
    Forward,

    /// World space to local object space.
    Backward,
}

/// A geometric transform: a 4x4 homogeneous forward matrix and its inverse.
///
/// The backward matrix is always derived by inverting the forward matrix,
/// so a `Transform` can only be built when that inversion succeeds.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    forward: Matrix,
    backward: Matrix,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            forward: Matrix::identity(4),
            backward: Matrix::identity(4),
        }
    }
}

impl Transform {
    /// Build a transform from a translation, XYZ rotation (radians) and scale.
    pub fn new(translation: Vector3, rotation: Vector3, scale: Vector3) -> Result<Self> {
        let mut transform = Self::default();
        transform.set_transform(translation, rotation, scale)?;
        Ok(transform)
    }

    /// A transform that only translates.
    pub fn translation(translation: Vector3) -> Result<Self> {
        Self::new(translation, Vector3::zero(), Vector3::new(1., 1., 1.))
    }

    /// Build a transform from an already-known matrix pair.
    ///
    /// Both must be 4x4 and `backward` must invert `forward`.
    pub fn from_matrices(forward: Matrix, backward: Matrix) -> Result<Self> {
        for m in [&forward, &backward] {
            if m.rows() != 4 || m.cols() != 4 {
                return Err(Error::NotHomogeneous {
                    rows: m.rows(),
                    cols: m.cols(),
                });
            }
        }

        if !forward.mul(&backward)?.approx_eq(&Matrix::identity(4), EPSILON) {
            return Err(Error::NotInvertible);
        }

        Ok(Self { forward, backward })
    }

    /// Rebuild this transform as `T * S * Rx * Ry * Rz`.
    ///
    /// On failure the transform is left untouched.
    pub fn set_transform(
        &mut self,
        translation: Vector3,
        rotation: Vector3,
        scale: Vector3,
    ) -> Result<()> {
        let forward = Matrix::translation(translation)
            .mul(&Matrix::scale(scale))?
            .mul(&Matrix::rotation_x(rotation.x))?
            .mul(&Matrix::rotation_y(rotation.y))?
            .mul(&Matrix::rotation_z(rotation.z))?;
        let backward = forward.inverse()?;

        debug!(
            ?translation,
            ?rotation,
            ?scale,
            "built transform\n{}",
            forward
        );

        self.forward = forward;
        self.backward = backward;
        Ok(())
    }

    pub fn forward(&self) -> &Matrix {
        &self.forward
    }

    pub fn backward(&self) -> &Matrix {
        &self.backward
    }

    fn matrix(&self, direction: Direction) -> &Matrix {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
        }
    }

    /// Transform a point: promote it to `w = 1`, multiply, and drop `w`.
    pub fn apply_point(&self, point: Vector3, direction: Direction) -> Vector3 {
        let m = self.matrix(direction);
        let h = point.homogeneous();
        let row = |r: usize| (0..4).map(|c| m[(r, c)] * h[c]).sum::<f64>();
        Vector3::new(row(0), row(1), row(2))
    }

    /// Transform both ends of a ray and re-derive its direction.
    pub fn apply_ray(&self, ray: &Ray, direction: Direction) -> Ray {
        Ray::new(
            self.apply_point(ray.origin, direction),
            self.apply_point(ray.target, direction),
        )
    }

    /// Carry a local-space surface normal out to world space.
    ///
    /// The normal is pushed through the forward matrix as a point, the
    /// translation is taken back out, and the result is normalized.
    pub fn apply_normal(&self, normal: Vector3) -> Vector3 {
        let tip = self.apply_point(normal, Direction::Forward);
        let origin = self.apply_point(Vector3::zero(), Direction::Forward);
        (tip - origin).normalize()
    }

    /// Compose two transforms. The result applies `rhs` first, then `self`.
    ///
    /// The backward matrix is a fresh inverse of the composed forward matrix,
    /// not the product of the two backward matrices.
    pub fn compose(&self, rhs: &Transform) -> Result<Transform> {
        let forward = self.forward.mul(&rhs.forward)?;
        let backward = forward.inverse()?;
        Ok(Self { forward, backward })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    fn assert_vec_eq(a: Vector3, b: Vector3) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-9);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-9);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-9);
    }

    fn sample_transform() -> Transform {
        Transform::new(
            Vector3::new(1.5, -2., 0.25),
            Vector3::new(0.3, -0.7, 1.1),
            Vector3::new(2., 0.5, 1.25),
        )
        .unwrap()
    }

    #[test]
    fn forward_then_backward_is_identity() {
        let t = sample_transform();
        for p in [
            Vector3::zero(),
            Vector3::new(1., 2., 3.),
            Vector3::new(-40., 0.001, 7.5),
        ] {
            let there = t.apply_point(p, Direction::Forward);
            let back = t.apply_point(there, Direction::Backward);
            assert_vec_eq(back, p);
        }
    }

    #[test]
    fn backward_is_inverse_of_forward() {
        let t = sample_transform();
        let product = t.forward().mul(t.backward()).unwrap();
        assert!(product.approx_eq(&Matrix::identity(4), 1e-9));
    }

    #[test]
    fn composition_order_is_translate_scale_rotate() {
        // rotate x onto y, then scale, then translate
        let t = Transform::new(
            Vector3::new(10., 0., 0.),
            Vector3::new(0., 0., FRAC_PI_2),
            Vector3::new(1., 3., 1.),
        )
        .unwrap();
        let p = t.apply_point(Vector3::new(1., 0., 0.), Direction::Forward);
        assert_vec_eq(p, Vector3::new(10., 3., 0.));
    }

    #[test]
    fn rays_keep_a_consistent_direction() {
        let t = Transform::translation(Vector3::new(0., 0., 5.)).unwrap();
        let ray = Ray::new(Vector3::new(0., 0., 0.), Vector3::new(1., 0., 0.));
        let local = t.apply_ray(&ray, Direction::Backward);
        assert_vec_eq(local.origin, Vector3::new(0., 0., -5.));
        assert_vec_eq(local.direction, Vector3::new(1., 0., 0.));
    }

    #[test]
    fn zero_scale_cannot_be_built() {
        let result = Transform::new(
            Vector3::zero(),
            Vector3::zero(),
            Vector3::new(1., 0., 1.),
        );
        assert!(matches!(result, Err(Error::NotInvertible)));

        let mut t = Transform::default();
        assert!(t
            .set_transform(Vector3::zero(), Vector3::zero(), Vector3::zero())
            .is_err());
        assert_eq!(t, Transform::default());
    }

    #[test]
    fn from_matrices_requires_4x4() {
        assert!(matches!(
            Transform::from_matrices(Matrix::identity(3), Matrix::identity(4)),
            Err(Error::NotHomogeneous { rows: 3, cols: 3 })
        ));
        assert!(Transform::from_matrices(Matrix::identity(4), Matrix::identity(4)).is_ok());
    }

    #[test]
    fn from_matrices_requires_a_true_inverse() {
        let t = sample_transform();
        let rebuilt = Transform::from_matrices(t.forward().clone(), t.backward().clone()).unwrap();
        assert_eq!(rebuilt, t);

        // a translation is not undone by the identity
        let moved = Transform::translation(Vector3::new(0., 3., 0.)).unwrap();
        assert!(matches!(
            Transform::from_matrices(moved.forward().clone(), Matrix::identity(4)),
            Err(Error::NotInvertible)
        ));
        assert!(matches!(
            Transform::from_matrices(t.forward().clone(), moved.backward().clone()),
            Err(Error::NotInvertible)
        ));
    }

    #[test]
    fn compose_rederives_backward() {
        let a = Transform::translation(Vector3::new(1., 0., 0.)).unwrap();
        let b = Transform::new(
            Vector3::zero(),
            Vector3::zero(),
            Vector3::new(2., 2., 2.),
        )
        .unwrap();
        let ab = a.compose(&b).unwrap();

        let p = ab.apply_point(Vector3::new(1., 1., 1.), Direction::Forward);
        assert_vec_eq(p, Vector3::new(3., 2., 2.));
        assert!(ab
            .forward()
            .mul(ab.backward())
            .unwrap()
            .approx_eq(&Matrix::identity(4), 1e-9));
    }

    #[test]
    fn normals_follow_the_forward_transform() {
        let t = Transform::new(
            Vector3::new(5., -3., 2.),
            Vector3::zero(),
            Vector3::new(4., 1., 1.),
        )
        .unwrap();
        // translation never leaks into a normal
        assert_vec_eq(
            t.apply_normal(Vector3::new(0., 0., -1.)),
            Vector3::new(0., 0., -1.),
        );

        // stretched along x along with the surface point, then renormalized
        let n = t.apply_normal(Vector3::new(1., 1., 0.).normalize());
        let expected = Vector3::new(4., 1., 0.).normalize();
        assert_vec_eq(n, expected);
        assert_abs_diff_eq!(n.x, 0.970_142_5, epsilon = 1e-7);
        assert_abs_diff_eq!(n.y, 0.242_535_6, epsilon = 1e-7);
    }

    #[test]
    fn normals_rotate_with_the_object() {
        let t = Transform::new(
            Vector3::new(1., 1., 1.),
            Vector3::new(0., 0., FRAC_PI_2),
            Vector3::new(2., 2., 2.),
        )
        .unwrap();
        assert_vec_eq(
            t.apply_normal(Vector3::new(1., 0., 0.)),
            Vector3::new(0., 1., 0.),
        );
    }
}
