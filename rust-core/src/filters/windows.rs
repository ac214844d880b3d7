//! Window functions for spectral estimation
//!
//! The three tapers offered by the workbench, plus the owned `Window`
//! value the estimator is configured with.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(M-1))
    /// Sidelobe attenuation: ~43 dB
    Hamming,

    /// Hann window: w[n] = 0.5*(1 - cos(2πn/(M-1)))
    /// Sidelobe attenuation: ~31 dB, zero at both ends
    Hann,

    /// Rectangular window (no tapering)
    Rectangular,
}

impl WindowType {
    /// Methods in the order the configuration surface lists them
    pub const ALL: [WindowType; 3] = [WindowType::Hamming, WindowType::Hann, WindowType::Rectangular];

    pub fn name(&self) -> &'static str {
        match self {
            WindowType::Hamming => "hamming",
            WindowType::Hann => "hann",
            WindowType::Rectangular => "rectangular",
        }
    }
}

impl Default for WindowType {
    fn default() -> Self {
        WindowType::Hamming
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WindowType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hamming" => Ok(WindowType::Hamming),
            "hann" | "hanning" => Ok(WindowType::Hann),
            "rectangular" | "rect" | "winrect" | "boxcar" => Ok(WindowType::Rectangular),
            other => Err(ConfigError::UnknownWindow(other.to_string())),
        }
    }
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (M), at least 2
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..M-1, each in [0, 1]
pub fn generate_window(window_type: WindowType, length: usize) -> Result<Vec<f64>, ConfigError> {
    // The cosine argument divides by M-1
    if length < 2 {
        return Err(ConfigError::WindowTooShort { length });
    }

    let denom = (length - 1) as f64;
    let window = match window_type {
        WindowType::Hamming => (0..length)
            .map(|n| 0.54 - 0.46 * (2.0 * PI * n as f64 / denom).cos())
            .collect(),

        WindowType::Hann => (0..length)
            .map(|n| 0.5 * (1.0 - (2.0 * PI * n as f64 / denom).cos()))
            .collect(),

        WindowType::Rectangular => vec![1.0; length],
    };

    Ok(window)
}

/// Immutable window weights handed to the estimator
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    /// Generation method, `None` for caller-supplied weights
    method: Option<WindowType>,
    weights: Vec<f64>,
}

impl Window {
    /// Generate a window of the given method and length
    pub fn new(method: WindowType, length: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            method: Some(method),
            weights: generate_window(method, length)?,
        })
    }

    /// Wrap arbitrary caller-supplied weights
    ///
    /// Weights must be finite and non-negative with a positive sum, otherwise
    /// the amplitude and PSD normalizations are undefined.
    pub fn from_weights(weights: Vec<f64>) -> Result<Self, ConfigError> {
        if weights.is_empty() {
            return Err(ConfigError::WindowTooShort { length: 0 });
        }
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) || weights.iter().all(|&w| w == 0.0) {
            return Err(ConfigError::DegenerateWindow);
        }

        Ok(Self { method: None, weights })
    }

    pub fn hamming(length: usize) -> Result<Self, ConfigError> {
        Self::new(WindowType::Hamming, length)
    }

    pub fn hann(length: usize) -> Result<Self, ConfigError> {
        Self::new(WindowType::Hann, length)
    }

    pub fn rectangular(length: usize) -> Result<Self, ConfigError> {
        Self::new(WindowType::Rectangular, length)
    }

    pub fn method(&self) -> Option<WindowType> {
        self.method
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_generation() {
        let length = 161;

        let hann = generate_window(WindowType::Hann, length).unwrap();
        let hamming = generate_window(WindowType::Hamming, length).unwrap();

        assert_eq!(hann.len(), length);
        assert_eq!(hamming.len(), length);

        // Symmetric about the centre
        assert!((hann[0] - hann[length - 1]).abs() < 1e-10);
        assert!((hamming[0] - hamming[length - 1]).abs() < 1e-10);

        // Odd length peaks at exactly 1.0
        let center = length / 2;
        assert!((hann[center] - 1.0).abs() < 1e-10);
        assert!((hamming[center] - 1.0).abs() < 1e-10);

        // Hann reaches zero, Hamming stops at 0.08
        assert!(hann[0].abs() < 1e-12);
        assert!(hamming[0] > 0.07 && hamming[0] < 0.09);

        assert!(hann.iter().chain(hamming.iter()).all(|&w| (0.0..=1.0).contains(&w)));
    }

    #[test]
    fn test_rectangular_window() {
        let window = generate_window(WindowType::Rectangular, 100).unwrap();
        assert_eq!(window.len(), 100);
        assert!(window.iter().all(|&w| w == 1.0));
    }

    #[test]
    fn test_degenerate_lengths_rejected() {
        for method in WindowType::ALL {
            assert_eq!(
                generate_window(method, 1),
                Err(ConfigError::WindowTooShort { length: 1 })
            );
            assert_eq!(
                generate_window(method, 0),
                Err(ConfigError::WindowTooShort { length: 0 })
            );
        }

        // Two samples is the smallest valid window
        let hann = generate_window(WindowType::Hann, 2).unwrap();
        assert!(hann.iter().all(|w| w.is_finite()));
    }

    #[test]
    fn test_custom_weights_validation() {
        assert!(Window::from_weights(vec![0.5, 1.0, 0.5]).is_ok());
        assert_eq!(
            Window::from_weights(vec![0.0, 0.0]),
            Err(ConfigError::DegenerateWindow)
        );
        assert_eq!(
            Window::from_weights(vec![1.0, -0.1]),
            Err(ConfigError::DegenerateWindow)
        );
        assert_eq!(
            Window::from_weights(vec![1.0, f64::NAN]),
            Err(ConfigError::DegenerateWindow)
        );
    }

    #[test]
    fn test_window_type_names() {
        assert_eq!("winrect".parse::<WindowType>().unwrap(), WindowType::Rectangular);
        assert_eq!("Hann".parse::<WindowType>().unwrap(), WindowType::Hann);
        assert_eq!(WindowType::Hamming.to_string(), "hamming");
        assert!(matches!(
            "kaiser".parse::<WindowType>(),
            Err(ConfigError::UnknownWindow(_))
        ));
    }
}
