//! PyO3 bindings for Python integration

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

mod window_bindings;
mod etfe_bindings;
mod signal_bindings;

pub(crate) fn to_py_err(err: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Python module definition
#[pymodule]
fn etfe_workbench(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<etfe_bindings::PyEtfe>()?;
    m.add_class::<signal_bindings::PyReferenceFilter>()?;
    m.add_class::<signal_bindings::PySignalGenerator>()?;

    // Add WindowType enum
    m.add_class::<window_bindings::PyWindowType>()?;
    m.add_function(wrap_pyfunction!(window_bindings::window, m)?)?;

    Ok(())
}
