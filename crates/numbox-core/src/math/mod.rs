//! Container types.
//!
//! `NDArray` (any rank), `Shape` (its dimension descriptor), and the
//! `f64` helpers `Vector` (1D) and `Matrix` (2D).
pub mod matrix;
pub mod ndarray;
pub mod shape;
pub mod vector;

pub use matrix::Matrix;
pub use ndarray::{Element, NDArray};
pub use shape::Shape;
pub use vector::Vector;
