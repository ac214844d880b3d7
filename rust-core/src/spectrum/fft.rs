//! FFT engine using realfft for real-valued signals
//!
//! One-sided spectrum of a zero-padded real buffer of any length
//! (realfft plans mixed-radix transforms for non-power-of-two sizes).

use crate::error::{EtfeError, Result};
use num_complex::Complex64;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// FFT engine for real-valued signals
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer
    input_buffer: Vec<f64>,

    /// Reusable output buffer (complex spectrum)
    output_buffer: Vec<Complex64>,

    scratch: Vec<Complex64>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (number of samples, at least 1)
    pub fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        let input_buffer = r2c.make_input_vec();
        let output_buffer = r2c.make_output_vec();
        let scratch = r2c.make_scratch_vec();

        Self {
            fft_size,
            r2c,
            input_buffer,
            output_buffer,
            scratch,
        }
    }

    /// Compute the one-sided spectrum
    ///
    /// # Arguments
    /// * `signal` - Input samples, zero-padded to `fft_size` (extra samples are ignored)
    ///
    /// # Returns
    /// Bins X[k] for k = 0..=fft_size/2
    pub fn transform(&mut self, signal: &[f64]) -> Result<&[Complex64]> {
        let copy_len = signal.len().min(self.fft_size);
        self.input_buffer[..copy_len].copy_from_slice(&signal[..copy_len]);
        self.input_buffer[copy_len..].fill(0.0);

        self.transform_buffer()
    }

    /// Transform the contents of the internal input buffer in place
    ///
    /// Lets callers fill `input_mut()` directly and skip the copy in `transform`.
    pub fn transform_buffer(&mut self) -> Result<&[Complex64]> {
        // realfft uses the input buffer as scratch, so it is garbage afterwards
        self.r2c
            .process_with_scratch(&mut self.input_buffer, &mut self.output_buffer, &mut self.scratch)
            .map_err(|e| EtfeError::Fft(e.to_string()))?;

        Ok(&self.output_buffer)
    }

    /// Mutable access to the time-domain buffer consumed by `transform_buffer`
    pub fn input_mut(&mut self) -> &mut [f64] {
        &mut self.input_buffer
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Get number of frequency bins (fft_size/2 + 1 for real FFT)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Frequency axis in Hz, f[k] = k·Fs/fft_size
    pub fn frequency_axis_hz(&self, sample_rate: f64) -> Vec<f64> {
        let n = self.fft_size as f64;
        (0..self.num_bins())
            .map(|k| k as f64 * sample_rate / n)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustfft::FftPlanner;
    use std::f64::consts::PI;

    #[test]
    fn test_fft_dc_signal() {
        let mut fft = FftEngine::new(1024);

        // 100 ones, zero-padded
        let signal = vec![1.0; 100];
        let spectrum = fft.transform(&signal).unwrap();

        assert_eq!(spectrum.len(), 513);
        assert!((spectrum[0].re - 100.0).abs() < 1e-9);
        assert!(spectrum[0].im.abs() < 1e-9);
    }

    #[test]
    fn test_fft_sine_wave() {
        let mut fft = FftEngine::new(1000);

        // Exactly 50 cycles over the buffer
        let signal: Vec<f64> = (0..1000)
            .map(|n| (2.0 * PI * 50.0 * n as f64 / 1000.0).sin())
            .collect();

        let spectrum = fft.transform(&signal).unwrap();
        let (peak_bin, peak) = spectrum
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.norm().partial_cmp(&b.norm()).unwrap())
            .unwrap();

        assert_eq!(peak_bin, 50);
        // |X| = N/2 for a unit sine on a bin centre
        assert!((peak.norm() - 500.0).abs() < 1e-6);
    }

    #[test]
    fn test_matches_complex_fft() {
        let size = 500; // mixed radix
        let signal: Vec<f64> = (0..size)
            .map(|n| (0.37 * n as f64).sin() + 0.25 * (1.9 * n as f64).cos())
            .collect();

        let mut engine = FftEngine::new(size);
        let one_sided = engine.transform(&signal).unwrap().to_vec();

        let mut full: Vec<rustfft::num_complex::Complex<f64>> = signal
            .iter()
            .map(|&s| rustfft::num_complex::Complex::new(s, 0.0))
            .collect();
        FftPlanner::<f64>::new().plan_fft_forward(size).process(&mut full);

        assert_eq!(one_sided.len(), size / 2 + 1);
        for (k, bin) in one_sided.iter().enumerate() {
            assert!((bin.re - full[k].re).abs() < 1e-9, "re mismatch at bin {}", k);
            assert!((bin.im - full[k].im).abs() < 1e-9, "im mismatch at bin {}", k);
        }
    }

    #[test]
    fn test_repeated_transform_is_stable() {
        let mut fft = FftEngine::new(64);
        let signal: Vec<f64> = (0..40).map(|n| n as f64 * 0.1).collect();

        let first = fft.transform(&signal).unwrap().to_vec();
        let second = fft.transform(&signal).unwrap().to_vec();

        assert_eq!(first, second);
    }

    #[test]
    fn test_frequency_axis() {
        let fft = FftEngine::new(1000);
        let freqs = fft.frequency_axis_hz(1000.0);

        assert_eq!(freqs.len(), 501);
        assert_eq!(freqs[0], 0.0);
        assert_eq!(freqs[1], 1.0);
        assert_eq!(freqs[500], 500.0);
    }
}
