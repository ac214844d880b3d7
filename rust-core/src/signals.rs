//! Test-signal synthesis
//!
//! Two sinusoids plus Gaussian noise, sampled over a fixed buffer. The noise
//! realisation is generated once and kept, so repeated `generate` calls give
//! the same buffer until the noise is explicitly regenerated.

use crate::error::ConfigError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::f64::consts::PI;

/// One sinusoidal component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency in Hz
    pub frequency: f64,
    pub amplitude: f64,
}

impl Tone {
    pub fn new(frequency: f64, amplitude: f64) -> Self {
        Self { frequency, amplitude }
    }
}

/// Generator of x[i] = a1·sin(2πf1·t) + a2·sin(2πf2·t) + gain·noise[i]
#[derive(Debug, Clone)]
pub struct SignalGenerator {
    buffer_len: usize,
    sample_rate: f64,
    pub tone1: Tone,
    pub tone2: Tone,
    pub noise_gain: f64,
    noise: Vec<f64>,
}

impl SignalGenerator {
    /// Create a generator with unit-variance noise drawn from `seed`
    pub fn new(buffer_len: usize, sample_rate: f64, seed: u64) -> Result<Self, ConfigError> {
        if !(sample_rate > 0.0 && sample_rate.is_finite()) {
            return Err(ConfigError::InvalidSampleRate(sample_rate));
        }

        Ok(Self {
            buffer_len,
            sample_rate,
            tone1: Tone::new(25.0, 0.5),
            tone2: Tone::new(50.0, 0.5),
            noise_gain: 1.0,
            noise: gaussian_noise(buffer_len, seed),
        })
    }

    /// Draw a fresh noise realisation
    pub fn regenerate_noise(&mut self, seed: u64) {
        self.noise = gaussian_noise(self.buffer_len, seed);
    }

    /// Sample the signal over the whole buffer
    pub fn generate(&self) -> Vec<f64> {
        let dt = self.dt();
        let w1 = 2.0 * PI * self.tone1.frequency;
        let w2 = 2.0 * PI * self.tone2.frequency;

        self.noise
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                let t = i as f64 * dt;
                self.tone1.amplitude * (w1 * t).sin()
                    + self.tone2.amplitude * (w2 * t).sin()
                    + self.noise_gain * n
            })
            .collect()
    }

    /// Sample times t[i] = i·dt
    pub fn time_axis(&self) -> Vec<f64> {
        let dt = self.dt();
        (0..self.buffer_len).map(|i| i as f64 * dt).collect()
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer_len
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn dt(&self) -> f64 {
        1.0 / self.sample_rate
    }
}

/// Zero-mean, unit-variance normal samples from a seeded generator
fn gaussian_noise(len: usize, seed: u64) -> Vec<f64> {
    StdRng::seed_from_u64(seed)
        .sample_iter(StandardNormal)
        .take(len)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_statistics() {
        let noise = gaussian_noise(20000, 7);
        let mean = noise.iter().sum::<f64>() / noise.len() as f64;
        let var = noise.iter().map(|n| (n - mean).powi(2)).sum::<f64>() / noise.len() as f64;

        assert!(mean.abs() < 0.05, "mean = {}", mean);
        assert!((var - 1.0).abs() < 0.05, "variance = {}", var);

        // Same seed, same realisation
        assert_eq!(noise, gaussian_noise(20000, 7));
        assert!(noise.iter().all(|n| n.is_finite()));
    }

    #[test]
    fn test_noise_is_kept_between_calls() {
        let gen = SignalGenerator::new(1000, 1000.0, 42).unwrap();
        assert_eq!(gen.generate(), gen.generate());

        let mut other = gen.clone();
        other.regenerate_noise(43);
        assert_ne!(gen.generate(), other.generate());
    }

    #[test]
    fn test_noiseless_tones() {
        let mut gen = SignalGenerator::new(1000, 1000.0, 1).unwrap();
        gen.noise_gain = 0.0;
        gen.tone1 = Tone::new(250.0, 2.0);
        gen.tone2 = Tone::new(0.0, 0.0);

        let x = gen.generate();
        // sin(π/2) at t = 1 ms
        assert!((x[1] - 2.0).abs() < 1e-12);
        assert!(x[2].abs() < 1e-12);

        let t = gen.time_axis();
        assert_eq!(t.len(), gen.buffer_len());
        assert_eq!(gen.dt(), 1.0 / gen.sample_rate());
        assert!((t[999] - 0.999).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_sample_rate() {
        assert!(SignalGenerator::new(10, -1.0, 0).is_err());
    }
}
