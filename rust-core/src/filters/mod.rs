//! Window generation and reference filters

pub mod windows;
pub mod biquad;

pub use windows::{WindowType, Window, generate_window};
pub use biquad::{FilterType, ReferenceFilter};
