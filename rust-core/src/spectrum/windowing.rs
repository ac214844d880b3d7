//! Windowing of signal segments before the FFT
//!
//! Applies window weights to a segment and zero-pads it, and derives the
//! window gains used to undo the taper in amplitude and density estimates.

/// Multiply `segment` by `weights` into `out`, zero-filling the remainder
///
/// # Arguments
/// * `segment` - Signal samples, same length as `weights`
/// * `weights` - Window coefficients w[n]
/// * `out` - Destination buffer of length nfft >= weights.len()
pub fn apply_window_into(segment: &[f64], weights: &[f64], out: &mut [f64]) {
    debug_assert_eq!(segment.len(), weights.len());
    debug_assert!(out.len() >= weights.len());

    let m = weights.len();
    for ((o, &s), &w) in out[..m].iter_mut().zip(segment).zip(weights) {
        *o = s * w;
    }
    out[m..].fill(0.0);
}

/// Gains of a window, computed once per configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowGains {
    /// Coherent gain Σw[n]; a tone of amplitude A peaks at A·Σw/2
    pub sum: f64,

    /// Energy Σw[n]²; scales the density of broadband power
    pub sum_sq: f64,

    /// Window length M
    pub length: usize,
}

impl WindowGains {
    pub fn from_weights(weights: &[f64]) -> Self {
        Self {
            sum: weights.iter().sum(),
            sum_sq: weights.iter().map(|&w| w * w).sum(),
            length: weights.len(),
        }
    }

    /// Equivalent noise bandwidth in bins, M·Σw²/(Σw)²
    pub fn enbw_bins(&self) -> f64 {
        self.length as f64 * self.sum_sq / (self.sum * self.sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::windows::{generate_window, WindowType};

    #[test]
    fn test_apply_window_zero_pads() {
        let segment = vec![2.0; 4];
        let weights = vec![0.0, 0.5, 1.0, 0.5];
        let mut out = vec![9.0; 8];

        apply_window_into(&segment, &weights, &mut out);

        assert_eq!(out, vec![0.0, 1.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_window_gains() {
        let rect = WindowGains::from_weights(&generate_window(WindowType::Rectangular, 100).unwrap());
        let hamming = WindowGains::from_weights(&generate_window(WindowType::Hamming, 100).unwrap());

        assert_eq!(rect.sum, 100.0);
        assert_eq!(rect.sum_sq, 100.0);
        assert!((rect.enbw_bins() - 1.0).abs() < 1e-12);

        // Hamming tapers, so its coherent gain is roughly halved
        assert!(hamming.sum > 40.0 && hamming.sum < 60.0);
        // Hamming ENBW is ~1.37 bins at this length
        assert!((hamming.enbw_bins() - 1.37).abs() < 0.01);
    }
}
