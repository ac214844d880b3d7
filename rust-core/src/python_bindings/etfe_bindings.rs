//! Python bindings for the transfer-function estimator

use pyo3::prelude::*;
use pyo3::types::PyDict;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::filters::Window;
use crate::spectrum::{Etfe, EtfeConfig};
use super::window_bindings::PyWindowType;
use super::to_py_err;

/// Transfer-function estimator exposed to Python
#[pyclass(name = "Etfe")]
pub struct PyEtfe {
    etfe: Etfe,
}

fn build_config(
    buffer_len: usize,
    sample_rate: f64,
    window_type: PyWindowType,
    window_len: usize,
    noverlap: usize,
    nfft: usize,
) -> PyResult<EtfeConfig> {
    let window = Window::new(window_type.into(), window_len).map_err(to_py_err)?;
    Ok(EtfeConfig::new(buffer_len, sample_rate, window, noverlap, nfft))
}

#[pymethods]
impl PyEtfe {
    /// Create a new estimator
    ///
    /// Args:
    ///     buffer_len: Samples per input buffer (N)
    ///     sample_rate: Sample rate in Hz
    ///     window_type: Segment window
    ///     window_len: Segment length M
    ///     noverlap: Overlapping samples between segments
    ///     nfft: FFT size (>= window_len)
    #[new]
    #[pyo3(signature = (buffer_len=10000, sample_rate=1000.0, window_type=PyWindowType::Hamming, window_len=2000, noverlap=1000, nfft=2000))]
    fn new(
        buffer_len: usize,
        sample_rate: f64,
        window_type: PyWindowType,
        window_len: usize,
        noverlap: usize,
        nfft: usize,
    ) -> PyResult<Self> {
        let config = build_config(buffer_len, sample_rate, window_type, window_len, noverlap, nfft)?;
        Ok(Self {
            etfe: Etfe::new(config).map_err(to_py_err)?,
        })
    }

    /// Reconfigure with a generated window
    ///
    /// Raises ValueError and keeps the previous configuration if invalid.
    fn setup(
        &mut self,
        buffer_len: usize,
        sample_rate: f64,
        window_type: PyWindowType,
        window_len: usize,
        noverlap: usize,
        nfft: usize,
    ) -> PyResult<()> {
        let config = build_config(buffer_len, sample_rate, window_type, window_len, noverlap, nfft)?;
        self.etfe.setup(config).map_err(to_py_err)
    }

    /// Reconfigure with caller-supplied window weights
    fn setup_weights(
        &mut self,
        buffer_len: usize,
        sample_rate: f64,
        weights: PyReadonlyArray1<f64>,
        noverlap: usize,
        nfft: usize,
    ) -> PyResult<()> {
        let weights = weights.as_slice().map_err(to_py_err)?.to_vec();
        let window = Window::from_weights(weights).map_err(to_py_err)?;
        let config = EtfeConfig::new(buffer_len, sample_rate, window, noverlap, nfft);
        self.etfe.setup(config).map_err(to_py_err)
    }

    /// Estimate the transfer function from x to y
    ///
    /// Args:
    ///     x: Input signal (buffer_len samples)
    ///     y: Output signal (buffer_len samples)
    ///
    /// Returns:
    ///     Dict of numpy arrays: f, mag, phase, ampx, ampy, pxx, pyy
    fn estimate<'py>(
        &mut self,
        py: Python<'py>,
        x: PyReadonlyArray1<f64>,
        y: PyReadonlyArray1<f64>,
    ) -> PyResult<&'py PyDict> {
        let x = x.as_slice().map_err(to_py_err)?;
        let y = y.as_slice().map_err(to_py_err)?;
        let result = self.etfe.estimate(x, y).map_err(to_py_err)?;

        let dict = PyDict::new(py);
        dict.set_item("f", PyArray1::from_slice(py, &result.f))?;
        dict.set_item("mag", PyArray1::from_slice(py, &result.mag))?;
        dict.set_item("phase", PyArray1::from_slice(py, &result.phase))?;
        dict.set_item("ampx", PyArray1::from_slice(py, &result.ampx))?;
        dict.set_item("ampy", PyArray1::from_slice(py, &result.ampy))?;
        dict.set_item("pxx", PyArray1::from_slice(py, &result.pxx))?;
        dict.set_item("pyy", PyArray1::from_slice(py, &result.pyy))?;
        Ok(dict)
    }

    /// Get frequency bins in Hz
    fn frequencies<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.etfe.frequencies())
    }

    /// Get number of frequency bins
    fn num_bins(&self) -> usize {
        self.etfe.num_bins()
    }

    /// Get number of averaged segments
    fn segment_count(&self) -> usize {
        self.etfe.segment_count()
    }
}
