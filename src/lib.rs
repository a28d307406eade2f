//! lumasharp — fixed-point edge enhancement for 8-bit luma planes.
//!
//! Estimates local edge strength against a Gaussian low-pass estimate and
//! boosts it through a three-band piecewise-linear gain curve, entirely in
//! integer arithmetic after construction. The caller supplies the luma
//! plane; color handling and file I/O live outside this crate.

pub mod enhance;
pub mod error;
pub mod gain;
pub mod kernel;
pub mod lowpass;

pub use enhance::{EdgeEnhancer, EehConfig};
pub use error::{ConfigError, InputError};
pub use gain::GainCurve;
pub use lowpass::BorderMode;
