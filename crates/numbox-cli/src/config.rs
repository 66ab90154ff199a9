//! JSON configuration for the demonstration subcommands.
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use numbox_core::Shape;

/// Parameters for the `ndarray` demonstration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NdarrayDemoConfig {
    pub shape: Shape,
    pub fill: i64,
    pub reshape: Shape,
    pub scalar: i64,
}

impl Default for NdarrayDemoConfig {
    fn default() -> Self {
        Self {
            shape: Shape::from([2, 3, 4]),
            fill: 1,
            reshape: Shape::from([2, 12]),
            scalar: 1,
        }
    }
}

/// Parameters for the `matrix` demonstration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatrixDemoConfig {
    pub rows: usize,
    pub cols: usize,
    pub fill: f64,
}

impl Default for MatrixDemoConfig {
    fn default() -> Self {
        Self {
            rows: 2,
            cols: 3,
            fill: 1.0,
        }
    }
}

fn load_json<T, P>(path: P) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: T = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Load an `ndarray` demonstration config from a JSON file.
pub fn load_ndarray_config<P: AsRef<Path>>(path: P) -> Result<NdarrayDemoConfig> {
    load_json(path)
}

/// Load a `matrix` demonstration config from a JSON file.
pub fn load_matrix_config<P: AsRef<Path>>(path: P) -> Result<MatrixDemoConfig> {
    load_json(path)
}
