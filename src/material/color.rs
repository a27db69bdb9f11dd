use std::ops::{Add, AddAssign, Mul};

use crate::math::{lerp, Lerp};

/// A linear RGB color. Channels are nominally in `0..=1` but are never
/// clamped here; lighting sums can and do exceed one.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub const fn black() -> Self {
        Self::new(0., 0., 0.)
    }

    pub const fn white() -> Self {
        Self::new(1., 1., 1.)
    }

    pub const fn red() -> Self {
        Self::new(1., 0., 0.)
    }

    pub const fn green() -> Self {
        Self::new(0., 1., 0.)
    }

    pub const fn blue() -> Self {
        Self::new(0., 0., 1.)
    }

    /// Instantiate a Color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f64 / 255., g as f64 / 255., b as f64 / 255.)
    }

    /// Convert to 8-bit channels, clamping each to `0..=1` first.
    pub fn to_rgb8(self) -> [u8; 3] {
        let c = |v: f64| (v.clamp(0., 1.) * 255.).round() as u8;
        [c(self.r), c(self.g), c(self.b)]
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Channel-wise product.
impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

impl From<[u8; 3]> for Color {
    fn from(slice: [u8; 3]) -> Self {
        Self::from_rgb8(slice[0], slice[1], slice[2])
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(color: Color) -> Self {
        image::Rgb(color.to_rgb8())
    }
}

impl Lerp for Color {
    fn lerp(self, other: Self, t: f64) -> Self {
        Color {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
        }
    }
}
