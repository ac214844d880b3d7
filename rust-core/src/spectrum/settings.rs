//! User-facing estimator settings
//!
//! What a configuration panel edits: window method and length, overlap as a
//! fraction of the window, and FFT size. Settings are turned into an
//! [`EtfeConfig`] for a given buffer, and a [`SettingsTracker`] makes sure
//! [`Etfe::setup`] only runs when they actually change.

use super::etfe::{Etfe, EtfeConfig};
use crate::error::Result;
use crate::filters::windows::{Window, WindowType};
use log::debug;
use serde::{Deserialize, Serialize};

/// Window lengths offered by the configuration panel
pub const WINDOW_SIZE_OPTIONS: [usize; 7] = [100, 200, 500, 1000, 2000, 5000, 10000];

/// FFT sizes offered by the configuration panel
pub const FFT_SIZE_OPTIONS: [usize; 9] = [100, 200, 500, 1000, 2000, 5000, 10000, 20000, 50000];

/// Estimator settings as edited by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtfeSettings {
    pub window: WindowType,

    /// Segment length M
    pub window_len: usize,

    /// Overlap as a fraction of the window, 0.0..=1.0
    pub overlap: f64,

    /// FFT size; raised to `window_len` if smaller
    pub nfft: usize,
}

impl Default for EtfeSettings {
    fn default() -> Self {
        Self {
            window: WindowType::Hamming,
            window_len: 2000,
            overlap: 0.5,
            nfft: 2000,
        }
    }
}

impl EtfeSettings {
    /// Overlap in samples
    ///
    /// `floor(window_len · overlap)`, capped at `window_len - 1` so a full
    /// overlap still advances one sample per segment.
    pub fn noverlap(&self) -> usize {
        let fraction = if self.overlap.is_finite() {
            self.overlap.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let samples = (self.window_len as f64 * fraction) as usize;
        samples.min(self.window_len.saturating_sub(1))
    }

    /// Select an FFT size, shrinking the window to it if the window is longer
    ///
    /// Editing `window_len` directly instead raises the FFT size through
    /// [`EtfeSettings::effective_nfft`].
    pub fn with_nfft(mut self, nfft: usize) -> Self {
        self.nfft = nfft;
        self.window_len = self.window_len.min(nfft);
        self
    }

    /// FFT size actually used, never smaller than the window
    pub fn effective_nfft(&self) -> usize {
        self.nfft.max(self.window_len)
    }

    /// Build the estimator configuration for a buffer of `buffer_len` samples
    pub fn to_config(&self, buffer_len: usize, sample_rate: f64) -> Result<EtfeConfig> {
        let window = Window::new(self.window, self.window_len)?;
        let config = EtfeConfig::new(
            buffer_len,
            sample_rate,
            window,
            self.noverlap(),
            self.effective_nfft(),
        );
        config.validate()?;
        Ok(config)
    }
}

/// Applies settings to an estimator only when they differ from the last ones
#[derive(Debug, Clone, Default)]
pub struct SettingsTracker {
    applied: Option<(EtfeSettings, usize, u64)>,
}

impl SettingsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconfigure `etfe` if `settings`, buffer length or sample rate changed
    ///
    /// # Returns
    /// `true` if `setup` ran. A rejected configuration is not remembered, so
    /// the estimator keeps its previous one and the next call retries.
    pub fn apply(&mut self, settings: &EtfeSettings, buffer_len: usize, sample_rate: f64, etfe: &mut Etfe) -> Result<bool> {
        let key = (settings.clone(), buffer_len, sample_rate.to_bits());
        if self.applied.as_ref() == Some(&key) {
            return Ok(false);
        }

        let config = settings.to_config(buffer_len, sample_rate)?;
        etfe.setup(config)?;
        debug!("applied settings {:?}", settings);
        self.applied = Some(key);
        Ok(true)
    }

    /// Forget the last applied settings so the next `apply` always reconfigures
    pub fn invalidate(&mut self) {
        self.applied = None;
    }
}
