//! Python bindings for the reference filters and test-signal generator

use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::filters::ReferenceFilter;
use crate::signals::{SignalGenerator, Tone};
use super::to_py_err;

/// Reference filter exposed to Python
#[pyclass(name = "ReferenceFilter")]
pub struct PyReferenceFilter {
    filter: ReferenceFilter,
}

#[pymethods]
impl PyReferenceFilter {
    /// Second-order Butterworth lowpass
    #[staticmethod]
    fn lowpass(sample_rate: f64, cutoff_hz: f64) -> PyResult<Self> {
        Ok(Self {
            filter: ReferenceFilter::lowpass(sample_rate, cutoff_hz).map_err(to_py_err)?,
        })
    }

    /// Second-order Butterworth highpass
    #[staticmethod]
    fn highpass(sample_rate: f64, cutoff_hz: f64) -> PyResult<Self> {
        Ok(Self {
            filter: ReferenceFilter::highpass(sample_rate, cutoff_hz).map_err(to_py_err)?,
        })
    }

    /// Second-order bandpass around center_hz with width_hz bandwidth
    #[staticmethod]
    fn bandpass(sample_rate: f64, center_hz: f64, width_hz: f64) -> PyResult<Self> {
        Ok(Self {
            filter: ReferenceFilter::bandpass(sample_rate, center_hz, width_hz).map_err(to_py_err)?,
        })
    }

    /// Filter a block of samples (state carries over between calls)
    fn process_block<'py>(
        &mut self,
        py: Python<'py>,
        input_signal: PyReadonlyArray1<f64>,
    ) -> PyResult<&'py PyArray1<f64>> {
        let input = input_signal.as_slice().map_err(to_py_err)?;
        Ok(PyArray1::from_vec(py, self.filter.process_block(input)))
    }

    /// Reset filter state
    fn reset(&mut self) {
        self.filter.reset();
    }

    /// Analytic magnitude response in dB at freq_hz
    fn magnitude_response_db(&self, freq_hz: f64) -> f64 {
        self.filter.magnitude_response_db(freq_hz)
    }

    fn __repr__(&self) -> String {
        format!(
            "ReferenceFilter({:?}, sample_rate={})",
            self.filter.filter_type(),
            self.filter.sample_rate()
        )
    }
}

/// Two-tone plus noise signal generator exposed to Python
#[pyclass(name = "SignalGenerator")]
pub struct PySignalGenerator {
    generator: SignalGenerator,
}

#[pymethods]
impl PySignalGenerator {
    #[new]
    #[pyo3(signature = (buffer_len=10000, sample_rate=1000.0, seed=0))]
    fn new(buffer_len: usize, sample_rate: f64, seed: u64) -> PyResult<Self> {
        Ok(Self {
            generator: SignalGenerator::new(buffer_len, sample_rate, seed).map_err(to_py_err)?,
        })
    }

    /// Set both tones as (frequency_hz, amplitude)
    fn set_tones(&mut self, f1: f64, a1: f64, f2: f64, a2: f64) {
        self.generator.tone1 = Tone::new(f1, a1);
        self.generator.tone2 = Tone::new(f2, a2);
    }

    fn set_noise_gain(&mut self, gain: f64) {
        self.generator.noise_gain = gain;
    }

    fn regenerate_noise(&mut self, seed: u64) {
        self.generator.regenerate_noise(seed);
    }

    fn generate<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_vec(py, self.generator.generate())
    }

    fn time_axis<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_vec(py, self.generator.time_axis())
    }

    #[getter]
    fn buffer_len(&self) -> usize {
        self.generator.buffer_len()
    }

    #[getter]
    fn sample_rate(&self) -> f64 {
        self.generator.sample_rate()
    }
}
