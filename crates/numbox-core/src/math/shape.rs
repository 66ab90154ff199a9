use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ArrayError;

/// Ordered list of axis extents, row-major.
///
/// The empty shape describes an array that holds nothing; its element
/// count is 0 rather than the empty product.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    pub fn empty() -> Self {
        Self { dims: Vec::new() }
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    /// Element count, saturating at `usize::MAX` when the product of the
    /// extents does not fit. Use `checked_numel` to tell the two apart.
    pub fn numel(&self) -> usize {
        self.checked_numel().unwrap_or(usize::MAX)
    }

    /// Element count, or `None` if the product of the extents overflows.
    pub fn checked_numel(&self) -> Option<usize> {
        if self.dims.is_empty() {
            return Some(0);
        }
        self.dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }

    /// Drops every unit axis. A non-empty shape made only of unit axes
    /// keeps a single `1` so it still describes one element.
    pub fn squeezed(&self) -> Shape {
        let dims: Vec<usize> = self.dims.iter().copied().filter(|&d| d != 1).collect();
        if dims.is_empty() && !self.dims.is_empty() {
            return Shape::new(vec![1]);
        }
        Shape::new(dims)
    }

    /// First axis with extent 0, if any.
    pub fn zero_axis(&self) -> Option<usize> {
        self.dims.iter().position(|&d| d == 0)
    }

    /// Row-major weight of each axis: the product of all extents to its right.
    pub fn weights(&self) -> Vec<usize> {
        let mut weights = vec![1; self.dims.len()];
        for axis in (0..self.dims.len().saturating_sub(1)).rev() {
            weights[axis] = weights[axis + 1] * self.dims[axis + 1];
        }
        weights
    }

    /// Maps a multi-index to its offset in contiguous row-major storage.
    pub fn linearize(&self, indices: &[usize]) -> Result<usize, ArrayError> {
        if indices.len() != self.dims.len() {
            return Err(ArrayError::RankMismatch {
                expected: self.dims.len(),
                got: indices.len(),
            });
        }
        let mut offset = 0;
        for (axis, (&index, &extent)) in indices.iter().zip(self.dims.iter()).enumerate() {
            if index >= extent {
                return Err(ArrayError::IndexOutOfRange {
                    axis,
                    index,
                    extent,
                });
            }
            offset = offset * extent + index;
        }
        Ok(offset)
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self::new(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self::new(dims.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Self::new(dims.to_vec())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, extent) in self.dims.iter().enumerate() {
            if idx > 0 {
                write!(f, "x")?;
            }
            write!(f, "{}", extent)?;
        }
        Ok(())
    }
}

impl FromStr for Shape {
    type Err = String;

    /// Parses the `2x3x4` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Shape::empty());
        }
        trimmed
            .split(|c: char| c == 'x' || c == 'X' || c == ',')
            .map(|part| {
                part.trim()
                    .parse::<usize>()
                    .map_err(|e| format!("Invalid extent '{}' in shape '{}': {}", part, s, e))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Shape::new)
    }
}
