//! Spectral estimation: FFT, segmentation and the transfer-function estimator

pub mod fft;
pub mod windowing;
pub mod segment;
pub mod etfe;
pub mod settings;

pub use fft::FftEngine;
pub use segment::{segment_offsets, Segmenter};
pub use etfe::{EstimateResult, Etfe, EtfeConfig, MAGNITUDE_FLOOR_DB};
pub use settings::{EtfeSettings, SettingsTracker, FFT_SIZE_OPTIONS, WINDOW_SIZE_OPTIONS};
