use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};

use crate::error::LinalgError;
use crate::math::ndarray::NDArray;
use crate::math::vector::{dot_scalar_f64, Vector};

/// Dense `f64` matrix stored row-major in one buffer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    pub fn new(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    pub fn square(n: usize, value: f64) -> Self {
        Self::new(n, n, value)
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols, 0.0)
    }

    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self, LinalgError> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(LinalgError::DimensionMismatch {
                op: "from_shape_vec",
                lhs: (rows, cols),
                rhs: (1, data.len()),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Builds a matrix from nested rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, LinalgError> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(LinalgError::RaggedRows {
                    row: idx,
                    expected: cols,
                    got: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn row_slice(&self, row: usize) -> &[f64] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    pub fn row(&self, row: usize) -> Vector {
        Vector::from_vec(self.row_slice(row).to_vec())
    }

    pub fn column(&self, col: usize) -> Vector {
        assert!(col < self.cols, "column index out of bounds");
        (0..self.rows).map(|row| self[(row, col)]).collect()
    }

    fn check_same_shape(&self, other: &Matrix, op: &'static str) -> Result<(), LinalgError> {
        if self.shape() != other.shape() {
            return Err(LinalgError::DimensionMismatch {
                op,
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }
        Ok(())
    }

    fn check_row_len(&self, v: &Vector, op: &'static str) -> Result<(), LinalgError> {
        if v.len() != self.cols {
            return Err(LinalgError::DimensionMismatch {
                op,
                lhs: self.shape(),
                rhs: (1, v.len()),
            });
        }
        Ok(())
    }

    fn zip_apply<F>(&mut self, other: &[f64], op: F)
    where
        F: Fn(&mut f64, f64),
    {
        for (a, &b) in self.data.iter_mut().zip(other.iter()) {
            op(a, b);
        }
    }

    fn rows_apply<F>(&mut self, v: &Vector, op: F)
    where
        F: Fn(&mut f64, f64),
    {
        if self.cols == 0 {
            return;
        }
        for row in self.data.chunks_mut(self.cols) {
            for (a, &b) in row.iter_mut().zip(v.iter()) {
                op(a, b);
            }
        }
    }

    pub fn try_add_assign(&mut self, other: &Matrix) -> Result<&mut Self, LinalgError> {
        self.check_same_shape(other, "add")?;
        self.zip_apply(&other.data, |a, b| *a += b);
        Ok(self)
    }

    pub fn try_sub_assign(&mut self, other: &Matrix) -> Result<&mut Self, LinalgError> {
        self.check_same_shape(other, "sub")?;
        self.zip_apply(&other.data, |a, b| *a -= b);
        Ok(self)
    }

    /// Elementwise product; see `dot` for the matrix product.
    pub fn try_mul_assign(&mut self, other: &Matrix) -> Result<&mut Self, LinalgError> {
        self.check_same_shape(other, "mul")?;
        self.zip_apply(&other.data, |a, b| *a *= b);
        Ok(self)
    }

    pub fn try_div_assign(&mut self, other: &Matrix) -> Result<&mut Self, LinalgError> {
        self.check_same_shape(other, "div")?;
        self.zip_apply(&other.data, |a, b| *a /= b);
        Ok(self)
    }

    pub fn try_add(&self, other: &Matrix) -> Result<Matrix, LinalgError> {
        let mut result = self.clone();
        result.try_add_assign(other)?;
        Ok(result)
    }

    pub fn try_sub(&self, other: &Matrix) -> Result<Matrix, LinalgError> {
        let mut result = self.clone();
        result.try_sub_assign(other)?;
        Ok(result)
    }

    pub fn try_mul(&self, other: &Matrix) -> Result<Matrix, LinalgError> {
        let mut result = self.clone();
        result.try_mul_assign(other)?;
        Ok(result)
    }

    pub fn try_div(&self, other: &Matrix) -> Result<Matrix, LinalgError> {
        let mut result = self.clone();
        result.try_div_assign(other)?;
        Ok(result)
    }

    /// Adds `v` to every row.
    pub fn add_row_assign(&mut self, v: &Vector) -> Result<&mut Self, LinalgError> {
        self.check_row_len(v, "row add")?;
        self.rows_apply(v, |a, b| *a += b);
        Ok(self)
    }

    pub fn sub_row_assign(&mut self, v: &Vector) -> Result<&mut Self, LinalgError> {
        self.check_row_len(v, "row sub")?;
        self.rows_apply(v, |a, b| *a -= b);
        Ok(self)
    }

    pub fn mul_row_assign(&mut self, v: &Vector) -> Result<&mut Self, LinalgError> {
        self.check_row_len(v, "row mul")?;
        self.rows_apply(v, |a, b| *a *= b);
        Ok(self)
    }

    pub fn div_row_assign(&mut self, v: &Vector) -> Result<&mut Self, LinalgError> {
        self.check_row_len(v, "row div")?;
        self.rows_apply(v, |a, b| *a /= b);
        Ok(self)
    }

    pub fn add_row(&self, v: &Vector) -> Result<Matrix, LinalgError> {
        let mut result = self.clone();
        result.add_row_assign(v)?;
        Ok(result)
    }

    pub fn sub_row(&self, v: &Vector) -> Result<Matrix, LinalgError> {
        let mut result = self.clone();
        result.sub_row_assign(v)?;
        Ok(result)
    }

    pub fn mul_row(&self, v: &Vector) -> Result<Matrix, LinalgError> {
        let mut result = self.clone();
        result.mul_row_assign(v)?;
        Ok(result)
    }

    pub fn div_row(&self, v: &Vector) -> Result<Matrix, LinalgError> {
        let mut result = self.clone();
        result.div_row_assign(v)?;
        Ok(result)
    }

    /// Matrix product `self · other`.
    pub fn dot(&self, other: &Matrix) -> Result<Matrix, LinalgError> {
        if self.cols != other.rows {
            return Err(LinalgError::DimensionMismatch {
                op: "matrix dot",
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }
        let mut result = Matrix::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            let lhs_row = self.row_slice(i);
            for (p, &scale) in lhs_row.iter().enumerate() {
                let rhs_row = other.row_slice(p);
                let start = result.offset(i, 0);
                for (acc, &value) in result.data[start..start + other.cols]
                    .iter_mut()
                    .zip(rhs_row.iter())
                {
                    *acc += scale * value;
                }
            }
        }
        Ok(result)
    }

    /// Matrix times column vector.
    pub fn dot_vector(&self, v: &Vector) -> Result<Vector, LinalgError> {
        if self.cols != v.len() {
            return Err(LinalgError::DimensionMismatch {
                op: "matrix-vector dot",
                lhs: self.shape(),
                rhs: (v.len(), 1),
            });
        }
        Ok((0..self.rows)
            .map(|row| dot_scalar_f64(self.row_slice(row), v.as_slice()))
            .collect())
    }

    pub fn transpose(&self) -> Matrix {
        let mut result = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                result[(j, i)] = self[(i, j)];
            }
        }
        result
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "matrix index out of bounds"
        );
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "matrix index out of bounds"
        );
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl AddAssign<f64> for Matrix {
    fn add_assign(&mut self, value: f64) {
        self.data.iter_mut().for_each(|d| *d += value);
    }
}

impl SubAssign<f64> for Matrix {
    fn sub_assign(&mut self, value: f64) {
        self.data.iter_mut().for_each(|d| *d -= value);
    }
}

impl MulAssign<f64> for Matrix {
    fn mul_assign(&mut self, value: f64) {
        self.data.iter_mut().for_each(|d| *d *= value);
    }
}

impl DivAssign<f64> for Matrix {
    fn div_assign(&mut self, value: f64) {
        self.data.iter_mut().for_each(|d| *d /= value);
    }
}

impl Add<f64> for Matrix {
    type Output = Matrix;

    fn add(mut self, value: f64) -> Matrix {
        self += value;
        self
    }
}

impl Sub<f64> for Matrix {
    type Output = Matrix;

    fn sub(mut self, value: f64) -> Matrix {
        self -= value;
        self
    }
}

impl Mul<f64> for Matrix {
    type Output = Matrix;

    fn mul(mut self, value: f64) -> Matrix {
        self *= value;
        self
    }
}

impl Div<f64> for Matrix {
    type Output = Matrix;

    fn div(mut self, value: f64) -> Matrix {
        self /= value;
        self
    }
}

impl Add<Matrix> for f64 {
    type Output = Matrix;

    fn add(self, m: Matrix) -> Matrix {
        m + self
    }
}

impl Mul<Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, m: Matrix) -> Matrix {
        m * self
    }
}

impl Sub<Matrix> for f64 {
    type Output = Matrix;

    fn sub(self, mut m: Matrix) -> Matrix {
        m.data.iter_mut().for_each(|d| *d = self - *d);
        m
    }
}

impl Div<Matrix> for f64 {
    type Output = Matrix;

    fn div(self, mut m: Matrix) -> Matrix {
        m.data.iter_mut().for_each(|d| *d = self / *d);
        m
    }
}

impl From<Matrix> for NDArray<f64> {
    /// Unit axes squeeze away, so a `1 x n` matrix becomes a 1-D array.
    fn from(value: Matrix) -> Self {
        let shape = vec![value.rows, value.cols];
        let mut array = NDArray::from_flat(value.data);
        if array.is_empty() {
            return array;
        }
        if let Err(err) = array.reshape(shape) {
            unreachable!("matrix buffer always matches its shape: {}", err);
        }
        array
    }
}

impl TryFrom<NDArray<f64>> for Matrix {
    type Error = LinalgError;

    /// 2-D arrays keep their shape; 1-D arrays become a single row.
    fn try_from(value: NDArray<f64>) -> Result<Self, Self::Error> {
        let (rows, cols) = match value.dims() {
            [] => (0, 0),
            [n] => (1, *n),
            [rows, cols] => (*rows, *cols),
            dims => return Err(LinalgError::RankUnsupported { dim: dims.len() }),
        };
        Matrix::from_shape_vec((rows, cols), value.into_vec())
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", self.row(row))?;
        }
        Ok(())
    }
}
