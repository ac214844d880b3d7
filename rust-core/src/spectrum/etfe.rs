//! Empirical transfer-function estimator
//!
//! Welch-averaged auto- and cross-spectra of an input/output pair, reduced
//! to magnitude, phase, amplitude spectra and power spectral densities.

use super::fft::FftEngine;
use super::segment::Segmenter;
use super::windowing::{apply_window_into, WindowGains};
use crate::error::{ConfigError, EtfeError, Result};
use crate::filters::windows::Window;
use log::{debug, trace, warn};
use num_complex::Complex64;

/// Magnitude reported where the transfer function is exactly zero
pub const MAGNITUDE_FLOOR_DB: f64 = -10000.0;

/// Estimator configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EtfeConfig {
    /// Samples per input buffer (N)
    pub buffer_len: usize,

    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Segment window; its length is the segment length M
    pub window: Window,

    /// Samples shared by consecutive segments (O < M)
    pub noverlap: usize,

    /// FFT size; segments are zero-padded up to it (nfft >= M)
    pub nfft: usize,
}

impl EtfeConfig {
    pub fn new(buffer_len: usize, sample_rate: f64, window: Window, noverlap: usize, nfft: usize) -> Self {
        Self {
            buffer_len,
            sample_rate,
            window,
            noverlap,
            nfft,
        }
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Number of one-sided frequency bins, nfft/2 + 1
    pub fn num_bins(&self) -> usize {
        self.nfft / 2 + 1
    }

    /// Check every cross-parameter constraint and lay out the segments
    pub fn validate(&self) -> std::result::Result<Segmenter, ConfigError> {
        if !(self.sample_rate > 0.0 && self.sample_rate.is_finite()) {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }

        let m = self.window.len();
        if m == 0 {
            return Err(ConfigError::WindowTooShort { length: 0 });
        }
        if self.nfft < m {
            return Err(ConfigError::FftSmallerThanWindow {
                nfft: self.nfft,
                window: m,
            });
        }

        Segmenter::new(self.buffer_len, m, self.noverlap)
    }
}

/// Snapshot of the last estimate
///
/// Every curve has `nfft/2 + 1` entries and bin `k` of each one belongs
/// to frequency `f[k]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EstimateResult {
    /// Frequency axis in Hz, 0..=Fs/2
    pub f: Vec<f64>,

    /// |H| in dB
    pub mag: Vec<f64>,

    /// arg H in degrees, (-180, 180]
    pub phase: Vec<f64>,

    /// Single-sided amplitude spectrum of x
    pub ampx: Vec<f64>,

    /// Single-sided amplitude spectrum of y
    pub ampy: Vec<f64>,

    /// Single-sided power spectral density of x (signal²/Hz)
    pub pxx: Vec<f64>,

    /// Single-sided power spectral density of y (signal²/Hz)
    pub pyy: Vec<f64>,

    /// Segments averaged into this estimate
    pub segments: usize,
}

impl EstimateResult {
    fn zeroed(f: Vec<f64>) -> Self {
        let bins = f.len();
        Self {
            f,
            mag: vec![0.0; bins],
            phase: vec![0.0; bins],
            ampx: vec![0.0; bins],
            ampy: vec![0.0; bins],
            pxx: vec![0.0; bins],
            pyy: vec![0.0; bins],
            segments: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.f.len()
    }

    pub fn is_empty(&self) -> bool {
        self.f.is_empty()
    }

    /// Input PSD in dB/Hz
    pub fn pxx_db(&self) -> Vec<f64> {
        to_db10(&self.pxx)
    }

    /// Output PSD in dB/Hz
    pub fn pyy_db(&self) -> Vec<f64> {
        to_db10(&self.pyy)
    }
}

fn to_db10(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .map(|&p| if p > 0.0 { 10.0 * p.log10() } else { MAGNITUDE_FLOOR_DB })
        .collect()
}

/// Empirical transfer-function estimator
///
/// Holds its configuration, FFT plan and accumulators. Reconfiguration only
/// happens through [`Etfe::setup`]; [`Etfe::estimate`] never changes it.
pub struct Etfe {
    config: EtfeConfig,
    segmenter: Segmenter,
    gains: WindowGains,
    fft: FftEngine,

    /// X[k] of the current segment, kept while Y[k] is computed
    spectrum_x: Vec<Complex64>,

    /// Running Σ|X|², Σ|Y|², ΣX*Y over segments
    sxx: Vec<f64>,
    syy: Vec<f64>,
    sxy: Vec<Complex64>,

    result: EstimateResult,
}

impl Etfe {
    /// Create an estimator from a validated configuration
    pub fn new(config: EtfeConfig) -> Result<Self> {
        let segmenter = config.validate()?;
        let fft = FftEngine::new(config.nfft);
        let bins = config.num_bins();

        let etfe = Self {
            gains: WindowGains::from_weights(config.window.weights()),
            result: EstimateResult::zeroed(fft.frequency_axis_hz(config.sample_rate)),
            config,
            segmenter,
            fft,
            spectrum_x: vec![Complex64::new(0.0, 0.0); bins],
            sxx: vec![0.0; bins],
            syy: vec![0.0; bins],
            sxy: vec![Complex64::new(0.0, 0.0); bins],
        };
        etfe.log_config("created");
        Ok(etfe)
    }

    /// Replace the configuration
    ///
    /// A rejected configuration leaves the estimator exactly as it was.
    /// Calling it again with an identical configuration is harmless.
    pub fn setup(&mut self, config: EtfeConfig) -> Result<()> {
        let segmenter = match config.validate() {
            Ok(segmenter) => segmenter,
            Err(e) => {
                warn!("rejected ETFE configuration: {}", e);
                return Err(EtfeError::InvalidConfiguration(e));
            }
        };

        if config.nfft != self.fft.fft_size() {
            self.fft = FftEngine::new(config.nfft);
        }

        let bins = config.num_bins();
        self.spectrum_x.resize(bins, Complex64::new(0.0, 0.0));
        self.sxx.resize(bins, 0.0);
        self.syy.resize(bins, 0.0);
        self.sxy.resize(bins, Complex64::new(0.0, 0.0));

        self.gains = WindowGains::from_weights(config.window.weights());
        self.result = EstimateResult::zeroed(self.fft.frequency_axis_hz(config.sample_rate));
        self.segmenter = segmenter;
        self.config = config;

        self.log_config("reconfigured");
        Ok(())
    }

    /// Estimate the transfer function from input `x` to output `y`
    ///
    /// # Arguments
    /// * `x` - Input signal, exactly `buffer_len` samples
    /// * `y` - Output signal, exactly `buffer_len` samples
    ///
    /// # Returns
    /// The refreshed result, valid until the next `estimate` or `setup`
    pub fn estimate(&mut self, x: &[f64], y: &[f64]) -> Result<&EstimateResult> {
        let n = self.config.buffer_len;
        if x.len() != n || y.len() != n {
            return Err(EtfeError::InvalidInput {
                expected: n,
                x: x.len(),
                y: y.len(),
            });
        }

        self.sxx.fill(0.0);
        self.syy.fill(0.0);
        self.sxy.fill(Complex64::new(0.0, 0.0));

        let m = self.segmenter.window_len();
        let weights = self.config.window.weights();

        for (xs, ys) in self.segmenter.segments(x).zip(self.segmenter.segments(y)) {
            apply_window_into(xs, weights, self.fft.input_mut());
            let spectrum = self.fft.transform_buffer()?;
            self.spectrum_x.copy_from_slice(spectrum);

            apply_window_into(ys, weights, self.fft.input_mut());
            let spectrum_y = self.fft.transform_buffer()?;

            for (k, (xk, yk)) in self.spectrum_x.iter().zip(spectrum_y).enumerate() {
                self.sxx[k] += xk.norm_sqr();
                self.syy[k] += yk.norm_sqr();
                self.sxy[k] += xk.conj() * yk;
            }
        }

        let count = self.segmenter.count();
        trace!("averaged {} segments of {} samples", count, m);
        self.finish(count);

        Ok(&self.result)
    }

    /// Average the accumulators and derive the reported curves
    fn finish(&mut self, count: usize) {
        let c = count as f64;
        let nfft = self.config.nfft;
        let nyquist = if nfft % 2 == 0 { Some(nfft / 2) } else { None };
        let amp_norm = 1.0 / self.gains.sum;
        let psd_norm = 1.0 / (self.config.sample_rate * self.gains.sum_sq);

        for k in 0..self.sxx.len() {
            let sxx = self.sxx[k] / c;
            let syy = self.syy[k] / c;
            let sxy = self.sxy[k] / c;

            let h = if sxx == 0.0 { Complex64::new(0.0, 0.0) } else { sxy / sxx };

            // Energy at every other bin is split between ±f
            let one_sided = if k == 0 || Some(k) == nyquist { 1.0 } else { 2.0 };

            self.result.mag[k] = magnitude_db(h);
            self.result.phase[k] = phase_deg(h);
            self.result.ampx[k] = one_sided * sxx.sqrt() * amp_norm;
            self.result.ampy[k] = one_sided * syy.sqrt() * amp_norm;
            self.result.pxx[k] = one_sided * sxx * psd_norm;
            self.result.pyy[k] = one_sided * syy * psd_norm;
        }

        self.result.segments = count;
    }

    fn log_config(&self, action: &str) {
        debug!(
            "ETFE {}: N={} Fs={} window={} M={} overlap={} hop={} nfft={} segments={} enbw={:.3} bins",
            action,
            self.config.buffer_len,
            self.config.sample_rate,
            self.config
                .window
                .method()
                .map(|m| m.name())
                .unwrap_or("custom"),
            self.config.window_len(),
            self.config.noverlap,
            self.segmenter.step(),
            self.config.nfft,
            self.segmenter.count(),
            self.gains.enbw_bins()
        );
    }

    /// Get current configuration
    pub fn config(&self) -> &EtfeConfig {
        &self.config
    }

    /// Last estimate (all zeros until the first `estimate` after `setup`)
    pub fn result(&self) -> &EstimateResult {
        &self.result
    }

    /// Frequency axis in Hz
    pub fn frequencies(&self) -> &[f64] {
        &self.result.f
    }

    pub fn num_bins(&self) -> usize {
        self.config.num_bins()
    }

    pub fn segment_count(&self) -> usize {
        self.segmenter.count()
    }

    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }
}

fn magnitude_db(h: Complex64) -> f64 {
    let norm = h.norm();
    if norm > 0.0 {
        (20.0 * norm.log10()).max(MAGNITUDE_FLOOR_DB)
    } else {
        MAGNITUDE_FLOOR_DB
    }
}

fn phase_deg(h: Complex64) -> f64 {
    let deg = h.im.atan2(h.re).to_degrees();
    if deg <= -180.0 {
        deg + 360.0
    } else {
        deg
    }
}
