/// Edge enhancement for a single luma plane.
///
/// Pipeline per call: widen to i32 -> low-pass estimate -> signed delta
/// against the estimate -> piecewise-linear boost of the delta magnitude
/// -> clamp and recombine. Pure and deterministic; all derived state is
/// computed once at construction.
use image::GrayImage;
use log::debug;
use ndarray::Array2;
use rayon::prelude::*;

use crate::error::{ConfigError, InputError};
use crate::gain::GainCurve;
use crate::kernel::{gaussian_kernel, kernel_sum};
use crate::lowpass::{low_pass, BorderMode};

/// Processing parameters for edge enhancement.
///
/// Thresholds and gains are on the 8-bit sample scale; `edge_gain` uses
/// the x256 fixed-point convention (384 == 1.5x).
#[derive(Debug, Clone)]
pub struct EehConfig {
    /// Delta magnitudes at or below this are treated as noise (no boost).
    pub flat_threshold: i32,
    /// Delta magnitudes above this are full edges.
    pub edge_threshold: i32,
    /// Edge-band gain, x256.
    pub edge_gain: i32,
    /// Upper clamp on the boost magnitude per pixel.
    pub delta_threshold: i32,
    /// Side length of the smoothing kernel (odd, >= 1).
    pub kernel_size: usize,
    /// Gaussian spread of the smoothing kernel.
    pub sigma: f64,
    /// Resolution of neighborhood reads outside the plane.
    pub border: BorderMode,
}

impl Default for EehConfig {
    fn default() -> Self {
        Self {
            flat_threshold: 4,
            edge_threshold: 8,
            edge_gain: 384,
            delta_threshold: 64,
            kernel_size: 5,
            sigma: 1.2,
            border: BorderMode::Reflect,
        }
    }
}

impl EehConfig {
    /// Return a copy with a different border mode applied.
    pub fn with_border(mut self, border: BorderMode) -> Self {
        self.border = border;
        self
    }

    /// Reject malformed configurations.
    ///
    /// `edge_threshold <= flat_threshold` is deliberately not rejected:
    /// the gain derivation clamps the denominator to an epsilon and
    /// produces a degenerate but defined curve.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.kernel_size == 0 || self.kernel_size % 2 == 0 {
            return Err(ConfigError::KernelSize(self.kernel_size));
        }
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(ConfigError::Sigma(self.sigma));
        }
        for (name, value) in [
            ("flat_threshold", self.flat_threshold),
            ("edge_threshold", self.edge_threshold),
            ("edge_gain", self.edge_gain),
            ("delta_threshold", self.delta_threshold),
        ] {
            if value < 0 {
                return Err(ConfigError::NegativeParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Luma edge enhancer with precomputed kernel and gain coefficients.
pub struct EdgeEnhancer {
    config: EehConfig,
    kernel: Array2<i32>,
    gain: GainCurve,
}

impl EdgeEnhancer {
    /// Validate the configuration and derive kernel and gain curve.
    pub fn new(config: EehConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let kernel = gaussian_kernel(config.kernel_size, config.sigma);
        let gain = GainCurve::new(
            config.flat_threshold,
            config.edge_threshold,
            config.edge_gain,
            config.delta_threshold,
        );
        debug!(
            "EdgeEnhancer::new kernel={}x{} sum={} border={:?}",
            config.kernel_size,
            config.kernel_size,
            kernel_sum(&kernel),
            config.border
        );
        Ok(Self {
            config,
            kernel,
            gain,
        })
    }

    pub fn config(&self) -> &EehConfig {
        &self.config
    }

    /// Enhance a row-major luma plane, returning a plane of the same
    /// dimensions.
    pub fn enhance(&self, gray: &[u8], width: u32, height: u32) -> Result<Vec<u8>, InputError> {
        if width == 0 || height == 0 {
            return Err(InputError::EmptyPlane { width, height });
        }
        let len = width as usize * height as usize;
        if gray.len() != len {
            return Err(InputError::SizeMismatch {
                expected: len,
                actual: gray.len(),
            });
        }

        let estimate = low_pass(gray, width, height, &self.kernel, self.config.border);

        let w = width as usize;
        let mut output = vec![0u8; len];
        output
            .par_chunks_mut(w)
            .enumerate()
            .for_each(|(row, out_row)| {
                let base = row * w;
                for x in 0..w {
                    let y = i32::from(gray[base + x]);
                    let delta = y - estimate[base + x];
                    let enhanced = delta.signum() * self.gain.boost(delta.abs());
                    out_row[x] = (y + enhanced).clamp(0, 255) as u8;
                }
            });

        Ok(output)
    }

    /// Convenience wrapper for callers holding an `image::GrayImage`.
    ///
    /// The caller remains responsible for splitting and recombining color
    /// planes; this crate only ever sees luma.
    pub fn enhance_image(&self, img: &GrayImage) -> Result<GrayImage, InputError> {
        let (width, height) = img.dimensions();
        let out = self.enhance(img.as_raw(), width, height)?;
        let actual = out.len();
        GrayImage::from_raw(width, height, out).ok_or(InputError::SizeMismatch {
            expected: width as usize * height as usize,
            actual,
        })
    }
}
