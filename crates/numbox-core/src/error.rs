use std::error::Error;
use std::fmt;

use crate::math::shape::Shape;

/// Failures reported by `NDArray` and `Shape` operations.
///
/// Every variant is raised before any state is touched, so the array that
/// produced it is left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayError {
    /// Number of indices differs from the array's dimensionality.
    RankMismatch { expected: usize, got: usize },
    /// An index is not smaller than the extent of its axis.
    IndexOutOfRange {
        axis: usize,
        index: usize,
        extent: usize,
    },
    /// The requested shape (after squeezing) does not cover the stored elements.
    ReshapeSizeMismatch { requested: Shape, len: usize },
    /// The product of the requested extents does not fit in `usize`.
    ElementCountOverflow { requested: Shape },
    /// Elementwise operation between arrays of different shapes.
    ShapeMismatch { lhs: Shape, rhs: Shape },
    /// A requested shape contains an axis of extent 0.
    ZeroExtent { axis: usize },
    /// Element access on an array holding no elements.
    EmptyArray,
    /// Checked division produced no value (zero divisor or overflow).
    DivisionUndefined { offset: usize },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArrayError::RankMismatch { expected, got } => write!(
                f,
                "Number of indices ({}) does not match dimension of NDArray ({})",
                got, expected
            ),
            ArrayError::IndexOutOfRange {
                axis,
                index,
                extent,
            } => write!(
                f,
                "Index {} out of range for axis {} with extent {}",
                index, axis, extent
            ),
            ArrayError::ReshapeSizeMismatch { requested, len } => {
                match requested.checked_numel() {
                    Some(count) => write!(
                        f,
                        "Cannot reshape NDArray of {} elements to shape ({}) with {} elements",
                        len, requested, count
                    ),
                    None => write!(
                        f,
                        "Cannot reshape NDArray of {} elements to shape ({}): element count overflows usize",
                        len, requested
                    ),
                }
            }
            ArrayError::ElementCountOverflow { requested } => write!(
                f,
                "Element count of shape ({}) overflows usize",
                requested
            ),
            ArrayError::ShapeMismatch { lhs, rhs } => write!(
                f,
                "NDArray shapes differ: ({}) vs ({})",
                lhs, rhs
            ),
            ArrayError::ZeroExtent { axis } => {
                write!(f, "Axis {} has extent 0; extents must be positive", axis)
            }
            ArrayError::EmptyArray => write!(f, "NDArray holds no elements"),
            ArrayError::DivisionUndefined { offset } => write!(
                f,
                "Division is undefined for the element at linear offset {}",
                offset
            ),
        }
    }
}

impl Error for ArrayError {}

/// Failures reported by `Vector` and `Matrix` operations.
#[derive(Debug, Clone, PartialEq)]
pub enum LinalgError {
    LengthMismatch {
        lhs: usize,
        rhs: usize,
    },
    DimensionMismatch {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },
    RankUnsupported {
        dim: usize,
    },
    Shape(ArrayError),
}

impl fmt::Display for LinalgError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LinalgError::LengthMismatch { lhs, rhs } => write!(
                f,
                "Vectors do not have the same dimension ({} vs {})",
                lhs, rhs
            ),
            LinalgError::DimensionMismatch { op, lhs, rhs } => write!(
                f,
                "Incompatible dimensions for {}: ({}, {}) vs ({}, {})",
                op, lhs.0, lhs.1, rhs.0, rhs.1
            ),
            LinalgError::RaggedRows { row, expected, got } => write!(
                f,
                "Row {} has {} columns, expected {}",
                row, got, expected
            ),
            LinalgError::RankUnsupported { dim } => write!(
                f,
                "Cannot build a Matrix from a {}-dimensional NDArray",
                dim
            ),
            LinalgError::Shape(err) => write!(f, "{}", err),
        }
    }
}

impl Error for LinalgError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LinalgError::Shape(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ArrayError> for LinalgError {
    fn from(value: ArrayError) -> Self {
        LinalgError::Shape(value)
    }
}
