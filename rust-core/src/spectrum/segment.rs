//! Overlapping segmentation of a fixed-length buffer
//!
//! Segments start at 0, M-O, 2(M-O), ... and only segments lying entirely
//! inside the buffer are kept; the tail that does not fill a whole segment
//! is ignored.

use crate::error::ConfigError;

/// Segment layout for a buffer of `buffer_len` samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmenter {
    window_len: usize,
    overlap: usize,
    offsets: Vec<usize>,
}

impl Segmenter {
    /// Build the segment layout
    ///
    /// # Arguments
    /// * `buffer_len` - Signal length N
    /// * `window_len` - Segment length M (1 <= M <= N)
    /// * `overlap` - Samples shared by consecutive segments (O < M)
    pub fn new(buffer_len: usize, window_len: usize, overlap: usize) -> Result<Self, ConfigError> {
        let offsets = segment_offsets(buffer_len, window_len, overlap)?;
        Ok(Self {
            window_len,
            overlap,
            offsets,
        })
    }

    /// Start offsets of every segment, ascending
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn count(&self) -> usize {
        self.offsets.len()
    }

    /// Hop between consecutive segment starts, M - O
    pub fn step(&self) -> usize {
        self.window_len - self.overlap
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Iterate over the segments of `signal` as borrowed slices
    pub fn segments<'a>(&'a self, signal: &'a [f64]) -> impl Iterator<Item = &'a [f64]> + 'a {
        self.offsets
            .iter()
            .map(move |&start| &signal[start..start + self.window_len])
    }
}

/// Start offsets of all whole segments
///
/// # Returns
/// `[0, M-O, 2(M-O), ...]` up to the last `s` with `s + M <= N`
pub fn segment_offsets(buffer_len: usize, window_len: usize, overlap: usize) -> Result<Vec<usize>, ConfigError> {
    if window_len == 0 {
        return Err(ConfigError::WindowTooShort { length: 0 });
    }
    if window_len > buffer_len {
        return Err(ConfigError::WindowLongerThanBuffer {
            window: window_len,
            buffer: buffer_len,
        });
    }
    if overlap >= window_len {
        return Err(ConfigError::OverlapTooLarge {
            overlap,
            window: window_len,
        });
    }

    let step = window_len - overlap;
    let last = buffer_len - window_len;
    Ok((0..=last).step_by(step).collect())
}
