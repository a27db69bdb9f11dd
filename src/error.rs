use thiserror::Error;

/// Everything that can go wrong while building or rendering a scene.
///
/// Misses are not errors: intersection tests return `None` for those.
#[derive(Debug, Error)]
pub enum Error {
    #[error("dimension mismatch, expected {expected} but got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("the cross product is only defined for 3 dimensions, got {0}")]
    CrossDimension(usize),

    #[error("matrix must be square, is {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("cannot join a matrix with {left} rows to one with {right} rows")]
    RowMismatch { left: usize, right: usize },

    #[error("expected {expected} matrix elements, got {found}")]
    ElementCount { expected: usize, found: usize },

    #[error("element ({row}, {col}) is outside of a {rows}x{cols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("transform matrices must be 4x4, got {rows}x{cols}")]
    NotHomogeneous { rows: usize, cols: usize },

    #[error("matrix is not invertible")]
    NotInvertible,

    #[error("cannot normalize a zero-length vector")]
    ZeroLength,

    #[error("degenerate camera: {0}")]
    DegenerateCamera(&'static str),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
