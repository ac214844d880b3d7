//! Second-order reference filters
//!
//! Produce the "known system" output signal the estimator is checked against.
//! Each filter is a single biquad in Direct Form II Transposed.

use crate::error::ConfigError;
use num_complex::Complex64;
use std::f64::consts::{PI, SQRT_2};

/// Filter type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    Lowpass,
    Highpass,
    Bandpass,
}

/// Biquad section
///
/// H(z) = (b0 + b1*z^-1 + b2*z^-2) / (1 + a1*z^-1 + a2*z^-2)
#[derive(Debug, Clone)]
pub struct Biquad {
    /// Numerator coefficients [b0, b1, b2]
    b: [f64; 3],
    /// Denominator coefficients [a1, a2] (a0 normalized to 1)
    a: [f64; 2],
    state: [f64; 2],
}

impl Biquad {
    pub fn new(b: [f64; 3], a: [f64; 2]) -> Self {
        Self { b, a, state: [0.0; 2] }
    }

    #[inline]
    pub fn process_sample(&mut self, input: f64) -> f64 {
        let output = self.b[0] * input + self.state[0];
        self.state[0] = self.b[1] * input - self.a[0] * output + self.state[1];
        self.state[1] = self.b[2] * input - self.a[1] * output;
        output
    }

    pub fn reset(&mut self) {
        self.state = [0.0; 2];
    }

    /// Evaluate H(e^jω) at normalized angular frequency ω (rad/sample)
    pub fn response_at(&self, omega: f64) -> Complex64 {
        let z1 = Complex64::from_polar(1.0, -omega);
        let z2 = z1 * z1;
        let num = self.b[0] + self.b[1] * z1 + self.b[2] * z2;
        let den = 1.0 + self.a[0] * z1 + self.a[1] * z2;
        num / den
    }
}

/// Reference filter producing y[n] from x[n]
#[derive(Debug, Clone)]
pub struct ReferenceFilter {
    filter_type: FilterType,
    sample_rate: f64,
    section: Biquad,
}

impl ReferenceFilter {
    /// Second-order Butterworth lowpass with -3 dB point at `cutoff_hz`
    pub fn lowpass(sample_rate: f64, cutoff_hz: f64) -> Result<Self, ConfigError> {
        let k = prewarp(sample_rate, cutoff_hz)?;
        let k2 = k * k;
        let norm = 1.0 / (1.0 + SQRT_2 * k + k2);
        let b0 = k2 * norm;

        Ok(Self {
            filter_type: FilterType::Lowpass,
            sample_rate,
            section: Biquad::new(
                [b0, 2.0 * b0, b0],
                [2.0 * (k2 - 1.0) * norm, (1.0 - SQRT_2 * k + k2) * norm],
            ),
        })
    }

    /// Second-order Butterworth highpass with -3 dB point at `cutoff_hz`
    pub fn highpass(sample_rate: f64, cutoff_hz: f64) -> Result<Self, ConfigError> {
        let k = prewarp(sample_rate, cutoff_hz)?;
        let k2 = k * k;
        let norm = 1.0 / (1.0 + SQRT_2 * k + k2);

        Ok(Self {
            filter_type: FilterType::Highpass,
            sample_rate,
            section: Biquad::new(
                [norm, -2.0 * norm, norm],
                [2.0 * (k2 - 1.0) * norm, (1.0 - SQRT_2 * k + k2) * norm],
            ),
        })
    }

    /// Second-order bandpass centred on `center_hz` with -3 dB width `width_hz`
    ///
    /// Unity gain at the centre frequency.
    pub fn bandpass(sample_rate: f64, center_hz: f64, width_hz: f64) -> Result<Self, ConfigError> {
        prewarp(sample_rate, center_hz)?;
        if !(width_hz > 0.0 && width_hz.is_finite()) {
            return Err(ConfigError::InvalidFilter(format!(
                "bandwidth must be positive (got {width_hz} Hz)"
            )));
        }

        let w0 = 2.0 * PI * center_hz / sample_rate;
        let q = center_hz / width_hz;
        let alpha = w0.sin() / (2.0 * q);
        let a0 = 1.0 + alpha;

        Ok(Self {
            filter_type: FilterType::Bandpass,
            sample_rate,
            section: Biquad::new(
                [alpha / a0, 0.0, -alpha / a0],
                [-2.0 * w0.cos() / a0, (1.0 - alpha) / a0],
            ),
        })
    }

    #[inline]
    pub fn process_sample(&mut self, input: f64) -> f64 {
        self.section.process_sample(input)
    }

    pub fn process_block(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&x| self.process_sample(x)).collect()
    }

    /// Clear the delay line so the next block starts from rest
    pub fn reset(&mut self) {
        self.section.reset();
    }

    /// Analytic frequency response at `freq_hz`
    pub fn frequency_response(&self, freq_hz: f64) -> Complex64 {
        self.section.response_at(2.0 * PI * freq_hz / self.sample_rate)
    }

    /// Analytic magnitude response in dB
    pub fn magnitude_response_db(&self, freq_hz: f64) -> f64 {
        20.0 * self.frequency_response(freq_hz).norm().max(1e-300).log10()
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}

/// Bilinear-transform prewarp, K = tan(π·fc/fs)
fn prewarp(sample_rate: f64, freq_hz: f64) -> Result<f64, ConfigError> {
    if !(sample_rate > 0.0 && sample_rate.is_finite()) {
        return Err(ConfigError::InvalidSampleRate(sample_rate));
    }
    if !(freq_hz > 0.0 && freq_hz < sample_rate / 2.0) {
        return Err(ConfigError::InvalidFilter(format!(
            "frequency {freq_hz} Hz must lie in (0, {}) Hz",
            sample_rate / 2.0
        )));
    }
    Ok((PI * freq_hz / sample_rate).tan())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowpass_passes_dc() {
        let mut filter = ReferenceFilter::lowpass(1000.0, 100.0).unwrap();

        let mut output = 0.0;
        for _ in 0..500 {
            output = filter.process_sample(1.0);
        }

        assert!((output - 1.0).abs() < 1e-6, "DC gain: {}", output);
        assert!((filter.frequency_response(0.0).norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cutoff_is_minus_3db() {
        let lp = ReferenceFilter::lowpass(1000.0, 250.0).unwrap();
        let hp = ReferenceFilter::highpass(1000.0, 250.0).unwrap();

        let half_power = -10.0 * 2.0_f64.log10();
        assert!((lp.magnitude_response_db(250.0) - half_power).abs() < 1e-9);
        assert!((hp.magnitude_response_db(250.0) - half_power).abs() < 1e-9);
    }

    #[test]
    fn test_highpass_blocks_dc() {
        let mut filter = ReferenceFilter::highpass(1000.0, 100.0).unwrap();

        let mut output = 1.0;
        for _ in 0..500 {
            output = filter.process_sample(1.0);
        }

        assert!(output.abs() < 1e-6, "DC leak: {}", output);
    }

    #[test]
    fn test_bandpass_unity_at_center() {
        let bp = ReferenceFilter::bandpass(1000.0, 250.0, 100.0).unwrap();
        let h = bp.frequency_response(250.0);

        assert!((h.norm() - 1.0).abs() < 1e-9);
        assert!(h.arg().abs() < 1e-9);
        assert!(bp.frequency_response(0.0).norm() < 1e-12);
        assert_eq!(bp.filter_type(), FilterType::Bandpass);
        assert_eq!(bp.sample_rate(), 1000.0);
    }

    #[test]
    fn test_reset_restarts_from_rest() {
        let mut filter = ReferenceFilter::lowpass(1000.0, 50.0).unwrap();
        let first = filter.process_block(&[1.0, 0.5, -0.25]);

        filter.reset();
        let second = filter.process_block(&[1.0, 0.5, -0.25]);

        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            ReferenceFilter::lowpass(1000.0, 500.0),
            Err(ConfigError::InvalidFilter(_))
        ));
        assert!(matches!(
            ReferenceFilter::highpass(0.0, 10.0),
            Err(ConfigError::InvalidSampleRate(_))
        ));
        assert!(matches!(
            ReferenceFilter::bandpass(1000.0, 100.0, 0.0),
            Err(ConfigError::InvalidFilter(_))
        ));
    }
}
