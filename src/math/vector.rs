use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use crate::error::{Error, Result};

/// A vector in 3D space.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// Instantiate a new Vector3.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self::new(0., 0., 0.)
    }

    /// Find the dot product between two Vector3s.
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross two Vector3s.
    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: -self.x * other.z + self.z * other.x,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Find the magnitude (Euclidean norm) of this Vector3.
    pub fn magnitude(self) -> f64 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }

    /// Normalize this Vector3 by dividing it by its own magnitude.
    ///
    /// A zero-length vector is returned unchanged. Use [`Vector3::try_normalize`]
    /// where a zero-length input means the caller made a mistake.
    pub fn normalize(self) -> Self {
        let mag = self.magnitude();
        if mag == 0. {
            self
        } else {
            self / mag
        }
    }

    /// Normalize this Vector3, failing if it has no length.
    pub fn try_normalize(self) -> Result<Self> {
        let mag = self.magnitude();
        if mag == 0. || !mag.is_finite() {
            return Err(Error::ZeroLength);
        }

        Ok(self / mag)
    }

    /// Mirror this vector about a unit normal: `d - 2(d.n)n`.
    pub fn reflect(self, normal: Self) -> Self {
        self - normal * (2. * self.dot(normal))
    }

    /// Promote to homogeneous coordinates with `w = 1`.
    pub fn homogeneous(self) -> [f64; 4] {
        [self.x, self.y, self.z, 1.]
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Self::Output {
        rhs * self
    }
}

impl Div<f64> for Vector3 {
    type Output = Vector3;

    fn div(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}

/// A vector of any number of dimensions.
///
/// Arithmetic between two `VectorN`s checks that their dimensions agree.
/// Geometry code works with [`Vector3`]; this type is what [`super::Matrix`]
/// multiplies against.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct VectorN {
    data: Vec<f64>,
}

impl VectorN {
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    /// A vector of `dims` zeros.
    pub fn zeros(dims: usize) -> Self {
        Self {
            data: vec![0.; dims],
        }
    }

    pub fn dims(&self) -> usize {
        self.data.len()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.data.get(index).copied()
    }

    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        let dims = self.dims();
        let slot = self.data.get_mut(index).ok_or(Error::DimensionMismatch {
            expected: index + 1,
            found: dims,
        })?;
        *slot = value;
        Ok(())
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    fn check_dims(&self, other: &Self) -> Result<()> {
        if self.dims() != other.dims() {
            return Err(Error::DimensionMismatch {
                expected: self.dims(),
                found: other.dims(),
            });
        }
        Ok(())
    }

    fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Result<Self> {
        self.check_dims(other)?;
        Ok(Self::new(
            self.data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        ))
    }

    pub fn add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a - b)
    }

    pub fn scale(&self, s: f64) -> Self {
        Self::new(self.data.iter().map(|v| v * s).collect())
    }

    pub fn dot(&self, other: &Self) -> Result<f64> {
        self.check_dims(other)?;
        Ok(self.data.iter().zip(other.data.iter()).map(|(a, b)| a * b).sum())
    }

    /// Cross product. Both operands must be 3-dimensional.
    pub fn cross(&self, other: &Self) -> Result<Self> {
        self.check_dims(other)?;
        if self.dims() != 3 {
            return Err(Error::CrossDimension(self.dims()));
        }

        let a = Vector3::try_from(self)?;
        let b = Vector3::try_from(other)?;
        Ok(a.cross(b).into())
    }

    pub fn norm(&self) -> f64 {
        self.data.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// A normalized copy of this vector.
    pub fn normalized(&self) -> Result<Self> {
        let norm = self.norm();
        if norm == 0. || !norm.is_finite() {
            return Err(Error::ZeroLength);
        }
        Ok(self.scale(1. / norm))
    }

    /// Normalize in place.
    pub fn normalize(&mut self) -> Result<()> {
        *self = self.normalized()?;
        Ok(())
    }
}

impl From<Vector3> for VectorN {
    fn from(v: Vector3) -> Self {
        Self::new(v.to_array().to_vec())
    }
}

impl TryFrom<&VectorN> for Vector3 {
    type Error = Error;

    fn try_from(v: &VectorN) -> Result<Self> {
        match v.as_slice() {
            &[x, y, z] => Ok(Vector3::new(x, y, z)),
            other => Err(Error::DimensionMismatch {
                expected: 3,
                found: other.len(),
            }),
        }
    }
}
