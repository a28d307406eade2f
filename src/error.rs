use std::error::Error;
use std::fmt;

/// Rejected configuration, reported at construction time.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `kernel_size` must be an odd integer >= 1.
    KernelSize(usize),
    /// `sigma` must be positive and finite.
    Sigma(f64),
    /// Thresholds and gains must be non-negative.
    NegativeParameter { name: &'static str, value: i32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::KernelSize(size) => {
                write!(f, "kernel_size must be an odd integer >= 1, got {}", size)
            }
            ConfigError::Sigma(sigma) => {
                write!(f, "sigma must be positive and finite, got {}", sigma)
            }
            ConfigError::NegativeParameter { name, value } => {
                write!(f, "{} must be non-negative, got {}", name, value)
            }
        }
    }
}

impl Error for ConfigError {}

/// Rejected input plane, reported per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Width or height is zero.
    EmptyPlane { width: u32, height: u32 },
    /// Buffer length does not match width * height.
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::EmptyPlane { width, height } => {
                write!(f, "input plane is empty ({}x{})", width, height)
            }
            InputError::SizeMismatch { expected, actual } => {
                write!(
                    f,
                    "input buffer length {} does not match plane size {}",
                    actual, expected
                )
            }
        }
    }
}

impl Error for InputError {}
