//! numbox-core: row-major numeric containers.
//!
//! The central type is `NDArray<T>`, a rank-agnostic array over one
//! contiguous buffer with strict shape checking. `Vector` and `Matrix`
//! are `f64` helpers for the one- and two-dimensional cases and convert
//! to and from `NDArray<f64>`.
//!
//! Every fallible operation validates its inputs before touching any
//! state, so a failed call leaves its receiver unchanged.
pub mod error;
pub mod math;

pub use error::{ArrayError, LinalgError};
pub use math::{Element, Matrix, NDArray, Shape, Vector};
