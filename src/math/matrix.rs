use std::{
    fmt,
    ops::{Index, IndexMut},
};

use super::{close_enough, Vector3, VectorN};
use crate::error::{Error, Result};

/// The number of elimination passes Gauss-Jordan inversion gets before it gives up.
const MAX_INVERSE_PASSES: usize = 100;

/// A dense, row-major matrix of any size.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a `rows` x `cols` matrix full of zeros.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.; rows * cols],
        }
    }

    /// Create a matrix from row-major data.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::ElementCount {
                expected: rows * cols,
                found: data.len(),
            });
        }

        Ok(Self { rows, cols, data })
    }

    /// Create an `n` x `n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            m[(i, i)] = 1.;
        }
        m
    }

    /// A 4x4 translation matrix.
    pub fn translation(t: Vector3) -> Self {
        let mut m = Self::identity(4);
        m[(0, 3)] = t.x;
        m[(1, 3)] = t.y;
        m[(2, 3)] = t.z;
        m
    }

    /// A 4x4 scale matrix.
    pub fn scale(s: Vector3) -> Self {
        let mut m = Self::identity(4);
        m[(0, 0)] = s.x;
        m[(1, 1)] = s.y;
        m[(2, 2)] = s.z;
        m
    }

    /// A 4x4 right-handed rotation about the x axis, in radians.
    #[rustfmt::skip]
    pub fn rotation_x(a: f64) -> Self {
        let (s, c) = a.sin_cos();
        Self::homogeneous([
            1., 0., 0.,
            0., c, -s,
            0., s, c,
        ])
    }

    /// A 4x4 right-handed rotation about the y axis, in radians.
    #[rustfmt::skip]
    pub fn rotation_y(a: f64) -> Self {
        let (s, c) = a.sin_cos();
        Self::homogeneous([
            c, 0., s,
            0., 1., 0.,
            -s, 0., c,
        ])
    }

    /// A 4x4 right-handed rotation about the z axis, in radians.
    #[rustfmt::skip]
    pub fn rotation_z(a: f64) -> Self {
        let (s, c) = a.sin_cos();
        Self::homogeneous([
            c, -s, 0.,
            s, c, 0.,
            0., 0., 1.,
        ])
    }

    /// Embed a row-major 3x3 linear part in a 4x4 identity.
    fn homogeneous(linear: [f64; 9]) -> Self {
        let mut m = Self::identity(4);
        for row in 0..3 {
            for col in 0..3 {
                m[(row, col)] = linear[row * 3 + col];
            }
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.index_of(row, col).map(|i| self.data[i])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let i = self.index_of(row, col).ok_or(Error::IndexOutOfRange {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        })?;
        self.data[i] = value;
        Ok(())
    }

    /// Reset this matrix to the identity. Only square matrices have one.
    pub fn set_to_identity(&mut self) -> Result<()> {
        if !self.is_square() {
            return Err(Error::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        *self = Self::identity(self.rows);
        Ok(())
    }

    pub fn transpose(&self) -> Self {
        let mut t = Self::new(self.cols, self.rows);
        for row in 0..self.rows {
            for col in 0..self.cols {
                t[(col, row)] = self[(row, col)];
            }
        }
        t
    }

    /// Matrix product `self * rhs`.
    pub fn mul(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(Error::DimensionMismatch {
                expected: self.cols,
                found: rhs.rows,
            });
        }

        let mut o = Matrix::new(self.rows, rhs.cols);
        for i in 0..self.rows {
            for j in 0..rhs.cols {
                for k in 0..self.cols {
                    o[(i, j)] += self[(i, k)] * rhs[(k, j)];
                }
            }
        }
        Ok(o)
    }

    /// Matrix-vector product `self * v`.
    pub fn mul_vector(&self, v: &VectorN) -> Result<VectorN> {
        if self.cols != v.dims() {
            return Err(Error::DimensionMismatch {
                expected: self.cols,
                found: v.dims(),
            });
        }

        let x = v.as_slice();
        Ok(VectorN::new(
            (0..self.rows)
                .map(|row| (0..self.cols).map(|col| self[(row, col)] * x[col]).sum())
                .collect(),
        ))
    }

    /// Append the columns of `other` to the right of this matrix.
    pub fn join(&self, other: &Matrix) -> Result<Matrix> {
        if self.rows != other.rows {
            return Err(Error::RowMismatch {
                left: self.rows,
                right: other.rows,
            });
        }

        let cols = self.cols + other.cols;
        let mut data = Vec::with_capacity(self.rows * cols);
        for row in 0..self.rows {
            data.extend_from_slice(self.row(row));
            data.extend_from_slice(other.row(row));
        }
        Matrix::from_vec(self.rows, cols, data)
    }

    /// Split this matrix into the columns before `col` and the columns from `col` on.
    pub fn separate(&self, col: usize) -> Result<(Matrix, Matrix)> {
        if col > self.cols {
            return Err(Error::IndexOutOfRange {
                row: 0,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }

        let mut left = Vec::with_capacity(self.rows * col);
        let mut right = Vec::with_capacity(self.rows * (self.cols - col));
        for row in 0..self.rows {
            let (l, r) = self.row(row).split_at(col);
            left.extend_from_slice(l);
            right.extend_from_slice(r);
        }

        Ok((
            Matrix::from_vec(self.rows, col, left)?,
            Matrix::from_vec(self.rows, self.cols - col, right)?,
        ))
    }

    /// Element-wise comparison within `tolerance`. Matrices of different shapes
    /// are never equal.
    pub fn approx_eq(&self, other: &Matrix, tolerance: f64) -> bool {
        if self.rows != other.rows || self.cols != other.cols {
            return false;
        }

        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b).abs() < tolerance)
    }

    /// Invert this matrix with Gauss-Jordan elimination and partial pivoting.
    ///
    /// The matrix is joined with an identity and reduced until the left half
    /// is the identity, at which point the right half is the inverse. Fails
    /// with [`Error::NotInvertible`] if a pivot column is all zeros or the
    /// left half still isn't the identity after [`MAX_INVERSE_PASSES`] passes.
    pub fn inverse(&self) -> Result<Matrix> {
        if !self.is_square() {
            return Err(Error::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }

        let n = self.rows;
        let identity = Matrix::identity(n);
        let mut aug = self.join(&identity)?;

        for _ in 0..MAX_INVERSE_PASSES {
            for diag in 0..n {
                let pivot_row = aug.row_with_max_element(diag, diag);
                if pivot_row != diag {
                    aug.swap_rows(diag, pivot_row);
                }

                let pivot = aug[(diag, diag)];
                if close_enough(pivot, 0.) {
                    return Err(Error::NotInvertible);
                }
                if pivot != 1. {
                    aug.mult_row(diag, 1. / pivot);
                }

                for row in (0..n).filter(|&row| row != diag) {
                    let value = aug[(row, diag)];
                    if !close_enough(value, 0.) {
                        aug.mult_add(row, diag, -value);
                    }
                }
            }

            let (left, right) = aug.separate(n)?;
            if left.approx_eq(&identity, super::EPSILON) {
                return Ok(right);
            }
        }

        Err(Error::NotInvertible)
    }

    fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    fn swap_rows(&mut self, i: usize, j: usize) {
        for k in 0..self.cols {
            self.data.swap(i * self.cols + k, j * self.cols + k);
        }
    }

    /// Add `factor` times row `j` to row `i`.
    fn mult_add(&mut self, i: usize, j: usize, factor: f64) {
        for k in 0..self.cols {
            let v = self[(j, k)] * factor;
            self[(i, k)] += v;
        }
    }

    fn mult_row(&mut self, i: usize, factor: f64) {
        for k in 0..self.cols {
            self[(i, k)] *= factor;
        }
    }

    /// Find the row at or below `start_row` with the largest absolute value in `col`.
    fn row_with_max_element(&self, col: usize, start_row: usize) -> usize {
        (start_row..self.rows)
            .fold((start_row, f64::NEG_INFINITY), |(best, best_val), row| {
                let v = self[(row, col)].abs();
                if v > best_val {
                    (row, v)
                } else {
                    (best, best_val)
                }
            })
            .0
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(row < self.rows && col < self.cols, "matrix index out of range");
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(row < self.rows && col < self.cols, "matrix index out of range");
        &mut self.data[row * self.cols + col]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:.3}", self[(row, col)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
