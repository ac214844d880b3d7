//! ETFE Workbench - Empirical Transfer-Function Estimation
//! 
//! Welch-averaged frequency-response estimation of an unknown linear system
//! from sampled input/output pairs, with optional Python bindings.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod filters;
pub mod signals;
pub mod spectrum;
#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{ConfigError, EtfeError, Result};
pub use filters::{WindowType, Window, ReferenceFilter};
pub use signals::SignalGenerator;
pub use spectrum::{Etfe, EtfeConfig, EstimateResult, EtfeSettings};
