use std::fmt;
use std::io;
use std::iter::FromIterator;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};
use std::slice::{Iter, IterMut};

use num_traits::{CheckedDiv, NumAssignOps, Zero};

use crate::error::ArrayError;
use crate::math::shape::Shape;

/// Scalar types an `NDArray` can hold.
pub trait Element: Copy + PartialEq + NumAssignOps {}

impl<T> Element for T where T: Copy + PartialEq + NumAssignOps {}

/// Rank-agnostic array over contiguous row-major storage.
///
/// `data.len() == shape.numel()` holds after every public call. An array
/// with an empty shape holds no elements.
#[derive(Clone, Debug, PartialEq)]
pub struct NDArray<T> {
    data: Vec<T>,
    shape: Shape,
}

impl<T> NDArray<T> {
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            shape: Shape::empty(),
        }
    }

    /// One-dimensional array over `data`; an empty `data` gives the empty array.
    pub fn from_flat(data: Vec<T>) -> Self {
        let shape = if data.is_empty() {
            Shape::empty()
        } else {
            Shape::new(vec![data.len()])
        };
        Self { data, shape }
    }

    pub fn dim(&self) -> usize {
        self.shape.ndim()
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.data.iter_mut()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn clear(&mut self) {
        log::trace!("Clearing NDArray of shape ({})", self.shape);
        self.data.clear();
        self.shape = Shape::empty();
    }

    pub fn mapv<U, F>(&self, mut f: F) -> NDArray<U>
    where
        F: FnMut(&T) -> U,
    {
        NDArray {
            data: self.data.iter().map(|v| f(v)).collect(),
            shape: self.shape.clone(),
        }
    }

    fn offset(&self, indices: &[usize]) -> Result<usize, ArrayError> {
        if self.data.is_empty() {
            if !indices.is_empty() {
                return Err(ArrayError::RankMismatch {
                    expected: 0,
                    got: indices.len(),
                });
            }
            return Err(ArrayError::EmptyArray);
        }
        self.shape.linearize(indices)
    }

    pub fn get(&self, indices: &[usize]) -> Result<&T, ArrayError> {
        let offset = self.offset(indices)?;
        Ok(&self.data[offset])
    }

    pub fn get_mut(&mut self, indices: &[usize]) -> Result<&mut T, ArrayError> {
        let offset = self.offset(indices)?;
        Ok(&mut self.data[offset])
    }

    pub fn set(&mut self, indices: &[usize], value: T) -> Result<(), ArrayError> {
        *self.get_mut(indices)? = value;
        Ok(())
    }

    /// Reinterprets the storage under `shape` without moving any element.
    ///
    /// Unit axes are squeezed out first. On failure the array is unchanged.
    pub fn reshape<S: Into<Shape>>(&mut self, shape: S) -> Result<&mut Self, ArrayError> {
        let shape = shape.into();
        if let Some(axis) = shape.zero_axis() {
            log::debug!("Rejected reshape to ({}): zero extent", shape);
            return Err(ArrayError::ZeroExtent { axis });
        }
        let requested = shape.squeezed();
        if requested.checked_numel() != Some(self.data.len()) {
            log::debug!(
                "Rejected reshape of {} elements to ({})",
                self.data.len(),
                requested
            );
            return Err(ArrayError::ReshapeSizeMismatch {
                requested,
                len: self.data.len(),
            });
        }
        log::trace!("Reshaping NDArray ({}) -> ({})", self.shape, requested);
        self.shape = requested;
        Ok(self)
    }

    fn check_same_shape(&self, other: &NDArray<T>) -> Result<(), ArrayError> {
        if self.shape != other.shape {
            log::debug!(
                "Rejected elementwise op between ({}) and ({})",
                self.shape,
                other.shape
            );
            return Err(ArrayError::ShapeMismatch {
                lhs: self.shape.clone(),
                rhs: other.shape.clone(),
            });
        }
        Ok(())
    }
}

impl<T: Clone> NDArray<T> {
    /// `shape.numel()` copies of `value`, committed through `reshape`.
    pub fn filled<S: Into<Shape>>(shape: S, value: T) -> Result<Self, ArrayError> {
        let shape = shape.into();
        if let Some(axis) = shape.zero_axis() {
            return Err(ArrayError::ZeroExtent { axis });
        }
        let len = match shape.checked_numel() {
            Some(len) => len,
            None => {
                log::debug!("Rejected NDArray of shape ({}): element count overflow", shape);
                return Err(ArrayError::ElementCountOverflow { requested: shape });
            }
        };
        let mut array = NDArray {
            data: vec![value; len],
            shape: Shape::empty(),
        };
        array.reshape(shape)?;
        Ok(array)
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.data.clone()
    }
}

impl<T: Clone + Zero> NDArray<T> {
    pub fn zeros<S: Into<Shape>>(shape: S) -> Result<Self, ArrayError> {
        Self::filled(shape, T::zero())
    }
}

impl<T: Element> NDArray<T> {
    pub fn add_scalar_assign(&mut self, value: T) -> &mut Self {
        self.data.iter_mut().for_each(|t| *t += value);
        self
    }

    pub fn sub_scalar_assign(&mut self, value: T) -> &mut Self {
        self.data.iter_mut().for_each(|t| *t -= value);
        self
    }

    pub fn mul_scalar_assign(&mut self, value: T) -> &mut Self {
        self.data.iter_mut().for_each(|t| *t *= value);
        self
    }

    /// Follows `T`'s own division: integer division by zero panics,
    /// floating division yields infinities or NaN.
    pub fn div_scalar_assign(&mut self, value: T) -> &mut Self {
        self.data.iter_mut().for_each(|t| *t /= value);
        self
    }

    pub fn try_add_assign(&mut self, other: &NDArray<T>) -> Result<&mut Self, ArrayError> {
        self.check_same_shape(other)?;
        self.zip_apply(other, |a, b| *a += b);
        Ok(self)
    }

    pub fn try_sub_assign(&mut self, other: &NDArray<T>) -> Result<&mut Self, ArrayError> {
        self.check_same_shape(other)?;
        self.zip_apply(other, |a, b| *a -= b);
        Ok(self)
    }

    pub fn try_mul_assign(&mut self, other: &NDArray<T>) -> Result<&mut Self, ArrayError> {
        self.check_same_shape(other)?;
        self.zip_apply(other, |a, b| *a *= b);
        Ok(self)
    }

    pub fn try_div_assign(&mut self, other: &NDArray<T>) -> Result<&mut Self, ArrayError> {
        self.check_same_shape(other)?;
        self.zip_apply(other, |a, b| *a /= b);
        Ok(self)
    }

    pub fn try_add(&self, other: &NDArray<T>) -> Result<NDArray<T>, ArrayError> {
        let mut result = self.clone();
        result.try_add_assign(other)?;
        Ok(result)
    }

    pub fn try_sub(&self, other: &NDArray<T>) -> Result<NDArray<T>, ArrayError> {
        let mut result = self.clone();
        result.try_sub_assign(other)?;
        Ok(result)
    }

    pub fn try_mul(&self, other: &NDArray<T>) -> Result<NDArray<T>, ArrayError> {
        let mut result = self.clone();
        result.try_mul_assign(other)?;
        Ok(result)
    }

    pub fn try_div(&self, other: &NDArray<T>) -> Result<NDArray<T>, ArrayError> {
        let mut result = self.clone();
        result.try_div_assign(other)?;
        Ok(result)
    }

    fn zip_apply<F>(&mut self, other: &NDArray<T>, mut op: F)
    where
        F: FnMut(&mut T, T),
    {
        self.data
            .iter_mut()
            .zip(other.data.iter())
            .for_each(|(a, &b)| op(a, b));
    }
}

impl<T: Element + CheckedDiv> NDArray<T> {
    /// Divides every element by `value`, failing without mutation if any
    /// quotient is undefined for `T`.
    pub fn checked_div_scalar_assign(&mut self, value: T) -> Result<&mut Self, ArrayError> {
        let mut quotients = Vec::with_capacity(self.data.len());
        for (offset, t) in self.data.iter().enumerate() {
            match t.checked_div(&value) {
                Some(q) => quotients.push(q),
                None => {
                    log::debug!("Checked division failed at offset {}", offset);
                    return Err(ArrayError::DivisionUndefined { offset });
                }
            }
        }
        self.data = quotients;
        Ok(self)
    }
}

impl<T: fmt::Display> NDArray<T> {
    /// Writes the `Display` form followed by a newline to `sink`.
    pub fn render<W: io::Write>(&self, sink: &mut W) -> io::Result<()> {
        writeln!(sink, "{}", self)
    }
}

impl<T> Default for NDArray<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Vec<T>> for NDArray<T> {
    fn from(value: Vec<T>) -> Self {
        NDArray::from_flat(value)
    }
}

impl<T> From<NDArray<T>> for Vec<T> {
    fn from(value: NDArray<T>) -> Self {
        value.data
    }
}

impl<T> FromIterator<T> for NDArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        NDArray::from_flat(iter.into_iter().collect())
    }
}

impl<'a, T> Index<&'a [usize]> for NDArray<T> {
    type Output = T;

    fn index(&self, indices: &'a [usize]) -> &Self::Output {
        match self.get(indices) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<'a, T> IndexMut<&'a [usize]> for NDArray<T> {
    fn index_mut(&mut self, indices: &'a [usize]) -> &mut Self::Output {
        match self.get_mut(indices) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T, const N: usize> Index<[usize; N]> for NDArray<T> {
    type Output = T;

    fn index(&self, indices: [usize; N]) -> &Self::Output {
        &self[&indices[..]]
    }
}

impl<T, const N: usize> IndexMut<[usize; N]> for NDArray<T> {
    fn index_mut(&mut self, indices: [usize; N]) -> &mut Self::Output {
        &mut self[&indices[..]]
    }
}

macro_rules! impl_scalar_ops {
    ($op_assign:ident, $op_assign_fn:ident, $op:ident, $op_fn:ident, $method:ident) => {
        impl<T: Element> $op_assign<T> for NDArray<T> {
            fn $op_assign_fn(&mut self, value: T) {
                self.$method(value);
            }
        }

        impl<T: Element> $op<T> for NDArray<T> {
            type Output = NDArray<T>;

            fn $op_fn(mut self, value: T) -> Self::Output {
                self.$method(value);
                self
            }
        }

        impl<'a, T: Element> $op<T> for &'a NDArray<T> {
            type Output = NDArray<T>;

            fn $op_fn(self, value: T) -> Self::Output {
                let mut result = self.clone();
                result.$method(value);
                result
            }
        }
    };
}

impl_scalar_ops!(AddAssign, add_assign, Add, add, add_scalar_assign);
impl_scalar_ops!(SubAssign, sub_assign, Sub, sub, sub_scalar_assign);
impl_scalar_ops!(MulAssign, mul_assign, Mul, mul, mul_scalar_assign);
impl_scalar_ops!(DivAssign, div_assign, Div, div, div_scalar_assign);

impl<T: fmt::Display> fmt::Display for NDArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "NDArray({}D, {} elements, shape: {})",
            self.dim(),
            self.size(),
            self.shape
        )?;
        for (idx, value) in self.data.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}
