use std::fmt;
use std::iter::FromIterator;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};
use std::slice::{Iter, IterMut};

use crate::error::LinalgError;
use crate::math::matrix::Matrix;
use crate::math::ndarray::NDArray;

/// Dense `f64` vector.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    pub fn new(len: usize, value: f64) -> Self {
        Self {
            data: vec![value; len],
        }
    }

    pub fn zeros(len: usize) -> Self {
        Self::new(len, 0.0)
    }

    pub fn from_vec(data: Vec<f64>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, f64> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, f64> {
        self.data.iter_mut()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    fn check_len(&self, other: &Vector) -> Result<(), LinalgError> {
        if self.len() != other.len() {
            return Err(LinalgError::LengthMismatch {
                lhs: self.len(),
                rhs: other.len(),
            });
        }
        Ok(())
    }

    fn zip_apply<F>(&mut self, other: &Vector, op: F)
    where
        F: Fn(&mut f64, f64),
    {
        for (a, &b) in self.data.iter_mut().zip(other.data.iter()) {
            op(a, b);
        }
    }

    pub fn try_add_assign(&mut self, other: &Vector) -> Result<&mut Self, LinalgError> {
        self.check_len(other)?;
        self.zip_apply(other, |a, b| *a += b);
        Ok(self)
    }

    pub fn try_sub_assign(&mut self, other: &Vector) -> Result<&mut Self, LinalgError> {
        self.check_len(other)?;
        self.zip_apply(other, |a, b| *a -= b);
        Ok(self)
    }

    /// Elementwise product, not the dot product.
    pub fn try_mul_assign(&mut self, other: &Vector) -> Result<&mut Self, LinalgError> {
        self.check_len(other)?;
        self.zip_apply(other, |a, b| *a *= b);
        Ok(self)
    }

    pub fn try_div_assign(&mut self, other: &Vector) -> Result<&mut Self, LinalgError> {
        self.check_len(other)?;
        self.zip_apply(other, |a, b| *a /= b);
        Ok(self)
    }

    pub fn try_add(&self, other: &Vector) -> Result<Vector, LinalgError> {
        let mut result = self.clone();
        result.try_add_assign(other)?;
        Ok(result)
    }

    pub fn try_sub(&self, other: &Vector) -> Result<Vector, LinalgError> {
        let mut result = self.clone();
        result.try_sub_assign(other)?;
        Ok(result)
    }

    pub fn try_mul(&self, other: &Vector) -> Result<Vector, LinalgError> {
        let mut result = self.clone();
        result.try_mul_assign(other)?;
        Ok(result)
    }

    pub fn try_div(&self, other: &Vector) -> Result<Vector, LinalgError> {
        let mut result = self.clone();
        result.try_div_assign(other)?;
        Ok(result)
    }

    pub fn dot(&self, other: &Vector) -> Result<f64, LinalgError> {
        self.check_len(other)?;
        #[cfg(all(feature = "simd", target_arch = "x86_64"))]
        {
            Ok(unsafe { dot_simd_f64(self.as_slice(), other.as_slice()) })
        }
        #[cfg(not(all(feature = "simd", target_arch = "x86_64")))]
        {
            Ok(dot_scalar_f64(self.as_slice(), other.as_slice()))
        }
    }

    /// Row vector times matrix: `out[j] = sum_i self[i] * m[(i, j)]`.
    pub fn dot_matrix(&self, m: &Matrix) -> Result<Vector, LinalgError> {
        if self.len() != m.nrows() {
            return Err(LinalgError::DimensionMismatch {
                op: "vector-matrix dot",
                lhs: (1, self.len()),
                rhs: m.shape(),
            });
        }
        let mut out = Vector::zeros(m.ncols());
        for (row, &scale) in self.data.iter().enumerate() {
            for (acc, &value) in out.data.iter_mut().zip(m.row_slice(row).iter()) {
                *acc += scale * value;
            }
        }
        Ok(out)
    }
}

pub(crate) fn dot_scalar_f64(lhs: &[f64], rhs: &[f64]) -> f64 {
    lhs.iter().zip(rhs.iter()).map(|(a, b)| a * b).sum()
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
unsafe fn dot_simd_f64(lhs: &[f64], rhs: &[f64]) -> f64 {
    use std::arch::x86_64::*;

    let mut i = 0usize;
    let mut acc = _mm_setzero_pd();

    while i + 2 <= lhs.len() {
        let a = _mm_loadu_pd(lhs.as_ptr().add(i));
        let b = _mm_loadu_pd(rhs.as_ptr().add(i));
        acc = _mm_add_pd(acc, _mm_mul_pd(a, b));
        i += 2;
    }

    let mut buffer = [0f64; 2];
    _mm_storeu_pd(buffer.as_mut_ptr(), acc);
    let mut sum = buffer.iter().sum::<f64>();

    while i < lhs.len() {
        sum += lhs[i] * rhs[i];
        i += 1;
    }

    sum
}

impl From<Vec<f64>> for Vector {
    fn from(value: Vec<f64>) -> Self {
        Vector::from_vec(value)
    }
}

impl From<Vector> for Vec<f64> {
    fn from(value: Vector) -> Self {
        value.data
    }
}

impl From<Vector> for NDArray<f64> {
    fn from(value: Vector) -> Self {
        NDArray::from_flat(value.data)
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Vector::from_vec(iter.into_iter().collect())
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl AddAssign<f64> for Vector {
    fn add_assign(&mut self, value: f64) {
        self.data.iter_mut().for_each(|d| *d += value);
    }
}

impl SubAssign<f64> for Vector {
    fn sub_assign(&mut self, value: f64) {
        self.data.iter_mut().for_each(|d| *d -= value);
    }
}

impl MulAssign<f64> for Vector {
    fn mul_assign(&mut self, value: f64) {
        self.data.iter_mut().for_each(|d| *d *= value);
    }
}

impl DivAssign<f64> for Vector {
    fn div_assign(&mut self, value: f64) {
        self.data.iter_mut().for_each(|d| *d /= value);
    }
}

impl Add<f64> for Vector {
    type Output = Vector;

    fn add(mut self, value: f64) -> Vector {
        self += value;
        self
    }
}

impl Sub<f64> for Vector {
    type Output = Vector;

    fn sub(mut self, value: f64) -> Vector {
        self -= value;
        self
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(mut self, value: f64) -> Vector {
        self *= value;
        self
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    fn div(mut self, value: f64) -> Vector {
        self /= value;
        self
    }
}

impl Add<Vector> for f64 {
    type Output = Vector;

    fn add(self, v: Vector) -> Vector {
        v + self
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, v: Vector) -> Vector {
        v * self
    }
}

impl Sub<Vector> for f64 {
    type Output = Vector;

    fn sub(self, mut v: Vector) -> Vector {
        v.data.iter_mut().for_each(|d| *d = self - *d);
        v
    }
}

impl Div<Vector> for f64 {
    type Output = Vector;

    fn div(self, mut v: Vector) -> Vector {
        v.data.iter_mut().for_each(|d| *d = self / *d);
        v
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(mut self) -> Vector {
        self.data.iter_mut().for_each(|d| *d = -*d);
        self
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, value) in self.data.iter().enumerate() {
            write!(f, "{}", value)?;
            if idx + 1 != self.data.len() {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}
