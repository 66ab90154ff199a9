//! The demonstration runs behind the `numbox` subcommands.
use std::io::Write;

use anyhow::{Context, Result};

use numbox_core::{Matrix, NDArray};

use crate::config::{MatrixDemoConfig, NdarrayDemoConfig};

/// Fill, reshape, add a scalar, then subtract an array of the fill value,
/// rendering the array after each step.
pub fn run_ndarray_demo<W: Write>(config: &NdarrayDemoConfig, out: &mut W) -> Result<()> {
    let mut array = NDArray::filled(config.shape.clone(), config.fill)
        .with_context(|| format!("Cannot build an NDArray of shape ({})", config.shape))?;
    array.render(out)?;

    array
        .reshape(config.reshape.clone())
        .with_context(|| format!("Cannot reshape to ({})", config.reshape))?;
    log::info!("[numbox::ndarray] Reshaped to ({})", array.shape());
    array.render(out)?;

    array += config.scalar;
    log::info!("[numbox::ndarray] Added scalar {}", config.scalar);
    array.render(out)?;

    let fill = NDArray::filled(config.reshape.clone(), config.fill)?;
    array.try_sub_assign(&fill)?;
    log::info!("[numbox::ndarray] Subtracted array filled with {}", config.fill);
    array.render(out)?;

    Ok(())
}

/// Render a filled matrix, its transpose and their product.
pub fn run_matrix_demo<W: Write>(config: &MatrixDemoConfig, out: &mut W) -> Result<()> {
    let matrix = Matrix::new(config.rows, config.cols, config.fill);
    writeln!(out, "Matrix ({}x{}):\n{}", config.rows, config.cols, matrix)?;

    let transposed = matrix.transpose();
    writeln!(
        out,
        "Transpose ({}x{}):\n{}",
        transposed.nrows(),
        transposed.ncols(),
        transposed
    )?;

    let product = matrix.dot(&transposed)?;
    log::info!(
        "[numbox::matrix] Computed product of shape {:?}",
        product.shape()
    );
    writeln!(
        out,
        "Product ({}x{}):\n{}",
        product.nrows(),
        product.ncols(),
        product
    )?;

    Ok(())
}
