//! Integration tests for the Vector and Matrix helpers.

use numbox_core::{ArrayError, LinalgError, Matrix, NDArray, Vector};

// ---------------------------------------------------------------------------
// Vector basics
// ---------------------------------------------------------------------------

#[test]
fn vector_new_and_len() {
    let v = Vector::new(4, 1.5);
    assert_eq!(v.len(), 4);
    assert!(v.iter().all(|&x| x == 1.5));
    assert!(Vector::default().is_empty());
}

#[test]
fn vector_indexing() {
    let mut v = Vector::from_vec(vec![10.0, 20.0, 30.0]);
    v[1] = 25.0;
    assert_eq!(v[0], 10.0);
    assert_eq!(v[1], 25.0);
    assert_eq!(v[2], 30.0);
}

#[test]
fn vector_scalar_ops() {
    let v = Vector::from_vec(vec![1.0, 2.0, 3.0]);
    assert_eq!((v.clone() + 1.0).to_vec(), vec![2.0, 3.0, 4.0]);
    assert_eq!((v.clone() * 2.0).to_vec(), vec![2.0, 4.0, 6.0]);
    assert_eq!((v.clone() / 2.0).to_vec(), vec![0.5, 1.0, 1.5]);
    assert_eq!((v.clone() - 1.0).to_vec(), vec![0.0, 1.0, 2.0]);
    assert_eq!((-v).to_vec(), vec![-1.0, -2.0, -3.0]);
}

#[test]
fn vector_scalar_on_the_left() {
    let v = Vector::from_vec(vec![1.0, 2.0, 4.0]);
    assert_eq!((10.0 - v.clone()).to_vec(), vec![9.0, 8.0, 6.0]);
    assert_eq!((8.0 / v.clone()).to_vec(), vec![8.0, 4.0, 2.0]);
    assert_eq!((1.0 + v.clone()).to_vec(), vec![2.0, 3.0, 5.0]);
    assert_eq!((3.0 * v).to_vec(), vec![3.0, 6.0, 12.0]);
}

#[test]
fn vector_elementwise_ops() {
    let mut a = Vector::from_vec(vec![1.0, 2.0, 3.0]);
    let b = Vector::from_vec(vec![4.0, 5.0, 6.0]);
    a.try_add_assign(&b).unwrap();
    assert_eq!(a.to_vec(), vec![5.0, 7.0, 9.0]);
    assert_eq!(a.try_mul(&b).unwrap().to_vec(), vec![20.0, 35.0, 54.0]);
    assert_eq!(a.try_sub(&b).unwrap().to_vec(), vec![1.0, 2.0, 3.0]);
}

#[test]
fn vector_length_mismatch_errors() {
    let mut a = Vector::zeros(3);
    let b = Vector::zeros(2);
    assert_eq!(
        a.try_add_assign(&b).unwrap_err(),
        LinalgError::LengthMismatch { lhs: 3, rhs: 2 }
    );
    assert!(a.try_div(&b).is_err());
    assert!(a.dot(&b).is_err());
}

#[test]
fn vector_dot() {
    let a = Vector::from_vec(vec![1.0, 2.0, 3.0]);
    let b = Vector::from_vec(vec![4.0, 5.0, 6.0]);
    assert_eq!(a.dot(&b).unwrap(), 32.0);
}

#[test]
fn vector_dot_matrix() {
    let v = Vector::from_vec(vec![1.0, 2.0]);
    let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
    assert_eq!(v.dot_matrix(&m).unwrap().to_vec(), vec![9.0, 12.0, 15.0]);

    let too_long = Vector::zeros(3);
    assert!(matches!(
        too_long.dot_matrix(&m),
        Err(LinalgError::DimensionMismatch { .. })
    ));
}

#[test]
fn vector_display() {
    let v = Vector::from_vec(vec![1.0, 2.5]);
    assert_eq!(v.to_string(), "[1, 2.5]");
}

// ---------------------------------------------------------------------------
// Matrix basics
// ---------------------------------------------------------------------------

#[test]
fn matrix_constructors() {
    let m = Matrix::new(2, 3, 1.0);
    assert_eq!(m.shape(), (2, 3));
    assert!(m.as_slice().iter().all(|&x| x == 1.0));

    let sq = Matrix::square(3, 0.0);
    assert_eq!(sq.nrows(), 3);
    assert_eq!(sq.ncols(), 3);
}

#[test]
fn matrix_from_shape_vec_mismatch() {
    assert!(Matrix::from_shape_vec((2, 3), vec![1.0, 2.0]).is_err());
    let m = Matrix::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    assert_eq!(m[(1, 0)], 3.0);
}

#[test]
fn matrix_from_ragged_rows_errors() {
    let result = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
    assert_eq!(
        result.unwrap_err(),
        LinalgError::RaggedRows {
            row: 1,
            expected: 2,
            got: 1
        }
    );
}

#[test]
fn matrix_rows_and_columns() {
    let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
    assert_eq!(m.row_slice(1), &[3.0, 4.0]);
    assert_eq!(m.row(2).to_vec(), vec![5.0, 6.0]);
    assert_eq!(m.column(1).to_vec(), vec![2.0, 4.0, 6.0]);
}

#[test]
fn matrix_elementwise_ops() {
    let mut a = Matrix::new(2, 2, 3.0);
    let b = Matrix::new(2, 2, 2.0);
    a.try_mul_assign(&b).unwrap().try_sub_assign(&b).unwrap();
    assert!(a.as_slice().iter().all(|&x| x == 4.0));

    let c = Matrix::new(3, 2, 1.0);
    assert!(matches!(
        a.try_add_assign(&c),
        Err(LinalgError::DimensionMismatch { op: "add", .. })
    ));
    assert!(a.as_slice().iter().all(|&x| x == 4.0));
}

#[test]
fn matrix_scalar_ops() {
    let m = Matrix::new(2, 2, 2.0);
    assert!((m.clone() * 3.0).as_slice().iter().all(|&x| x == 6.0));
    assert!((1.0 - m.clone()).as_slice().iter().all(|&x| x == -1.0));
    let mut n = m;
    n += 1.0;
    n /= 3.0;
    assert!(n.as_slice().iter().all(|&x| x == 1.0));
}

#[test]
fn matrix_row_vector_ops() {
    let mut m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    let v = Vector::from_vec(vec![10.0, 100.0]);
    m.add_row_assign(&v).unwrap();
    assert_eq!(m.as_slice(), &[11.0, 102.0, 13.0, 104.0]);
    m.mul_row_assign(&Vector::from_vec(vec![2.0, 0.5])).unwrap();
    assert_eq!(m.as_slice(), &[22.0, 51.0, 26.0, 52.0]);

    assert!(m.sub_row_assign(&Vector::zeros(3)).is_err());
}

#[test]
fn matrix_row_vector_ops_leave_operand_untouched() {
    let m = Matrix::from_rows(vec![vec![2.0, 4.0], vec![6.0, 8.0]]).unwrap();
    let v = Vector::from_vec(vec![2.0, 4.0]);

    assert_eq!(m.add_row(&v).unwrap().as_slice(), &[4.0, 8.0, 8.0, 12.0]);
    assert_eq!(m.sub_row(&v).unwrap().as_slice(), &[0.0, 0.0, 4.0, 4.0]);
    assert_eq!(m.mul_row(&v).unwrap().as_slice(), &[4.0, 16.0, 12.0, 32.0]);
    assert_eq!(m.div_row(&v).unwrap().as_slice(), &[1.0, 1.0, 3.0, 2.0]);
    assert_eq!(m.as_slice(), &[2.0, 4.0, 6.0, 8.0]);

    assert!(matches!(
        m.div_row(&Vector::zeros(3)),
        Err(LinalgError::DimensionMismatch { .. })
    ));
}

#[test]
fn matrix_dot_product() {
    let a = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
    let b = Matrix::from_rows(vec![vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]]).unwrap();
    let c = a.dot(&b).unwrap();
    assert_eq!(c.shape(), (2, 2));
    assert_eq!(c.as_slice(), &[58.0, 64.0, 139.0, 154.0]);

    assert!(a.dot(&a).is_err());
}

#[test]
fn matrix_dot_vector() {
    let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    let v = Vector::from_vec(vec![1.0, 1.0]);
    assert_eq!(a.dot_vector(&v).unwrap().to_vec(), vec![3.0, 7.0]);
    assert!(a.dot_vector(&Vector::zeros(3)).is_err());
}

#[test]
fn matrix_transpose() {
    let a = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
    let t = a.transpose();
    assert_eq!(t.shape(), (3, 2));
    for i in 0..2 {
        for j in 0..3 {
            assert_eq!(a[(i, j)], t[(j, i)]);
        }
    }
    assert_eq!(t.transpose(), a);
}

#[test]
fn matrix_display() {
    let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    assert_eq!(m.to_string(), "[1, 2]\n[3, 4]");
}

// ---------------------------------------------------------------------------
// Conversions to and from NDArray
// ---------------------------------------------------------------------------

#[test]
fn matrix_into_ndarray() {
    let m = Matrix::new(2, 3, 1.0);
    let a: NDArray<f64> = m.into();
    assert_eq!(a.dims(), &[2, 3]);

    let row = Matrix::new(1, 4, 0.0);
    let a: NDArray<f64> = row.into();
    assert_eq!(a.dims(), &[4]);
}

#[test]
fn ndarray_into_matrix() {
    let mut a: NDArray<f64> = (0..6).map(|v| v as f64).collect();
    a.reshape([3, 2]).unwrap();
    let m = Matrix::try_from(a).unwrap();
    assert_eq!(m.shape(), (3, 2));
    assert_eq!(m[(2, 1)], 5.0);

    let flat = NDArray::from_flat(vec![1.0, 2.0]);
    assert_eq!(Matrix::try_from(flat).unwrap().shape(), (1, 2));

    let cube = NDArray::filled([2, 2, 2], 0.0).unwrap();
    assert_eq!(
        Matrix::try_from(cube).unwrap_err(),
        LinalgError::RankUnsupported { dim: 3 }
    );
}

#[test]
fn vector_into_ndarray() {
    let a: NDArray<f64> = Vector::new(3, 2.0).into();
    assert_eq!(a.dims(), &[3]);
}

#[test]
fn array_error_converts_into_linalg_error() {
    let err: LinalgError = ArrayError::EmptyArray.into();
    assert_eq!(err.to_string(), "NDArray holds no elements");
    assert!(std::error::Error::source(&err).is_some());
}
