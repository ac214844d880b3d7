//! Python bindings for window generation

use pyo3::prelude::*;
use numpy::PyArray1;
use crate::filters::{WindowType, generate_window};
use super::to_py_err;

/// Window type enum exposed to Python
#[pyclass(name = "WindowType")]
#[derive(Clone)]
pub enum PyWindowType {
    Hamming,
    Hann,
    Rectangular,
}

impl From<PyWindowType> for WindowType {
    fn from(py_win: PyWindowType) -> Self {
        match py_win {
            PyWindowType::Hamming => WindowType::Hamming,
            PyWindowType::Hann => WindowType::Hann,
            PyWindowType::Rectangular => WindowType::Rectangular,
        }
    }
}

/// Generate window weights
///
/// Args:
///     window_type: Window type
///     length: Number of samples (at least 2)
///
/// Returns:
///     Window weights as numpy array
#[pyfunction]
pub fn window<'py>(py: Python<'py>, window_type: PyWindowType, length: usize) -> PyResult<&'py PyArray1<f64>> {
    let weights = generate_window(window_type.into(), length).map_err(to_py_err)?;
    Ok(PyArray1::from_vec(py, weights))
}
