//! Error types for the estimator and its collaborators

use thiserror::Error;

/// Rejected configuration (window, segmentation, FFT size, filters)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("window length {length} is too short (need at least 2 samples)")]
    WindowTooShort { length: usize },

    #[error("window weights must be finite, non-negative and not all zero")]
    DegenerateWindow,

    #[error("window length {window} exceeds buffer length {buffer}")]
    WindowLongerThanBuffer { window: usize, buffer: usize },

    #[error("FFT size {nfft} is smaller than window length {window}")]
    FftSmallerThanWindow { nfft: usize, window: usize },

    #[error("overlap {overlap} must be smaller than window length {window}")]
    OverlapTooLarge { overlap: usize, window: usize },

    #[error("sample rate must be positive and finite (got {0})")]
    InvalidSampleRate(f64),

    #[error("invalid filter parameters: {0}")]
    InvalidFilter(String),

    #[error("unknown window method: {0}")]
    UnknownWindow(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EtfeError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("input buffers must both hold {expected} samples (x: {x}, y: {y})")]
    InvalidInput { expected: usize, x: usize, y: usize },

    #[error("FFT processing failed: {0}")]
    Fft(String),
}

pub type Result<T> = std::result::Result<T, EtfeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: EtfeError = ConfigError::WindowTooShort { length: 1 }.into();
        assert!(matches!(
            err,
            EtfeError::InvalidConfiguration(ConfigError::WindowTooShort { length: 1 })
        ));
        assert!(err.to_string().contains("at least 2"));
    }
}
