/// Fixed-point Gaussian smoothing kernel.
///
/// Weights are the 2D Gaussian density evaluated at integer offsets from
/// the center, rescaled so the peak (center) entry is exactly 1024 and
/// truncated to integers. Peak normalization, not sum normalization: the
/// convolution result must be divided by the kernel sum afterwards.
use ndarray::Array2;

/// Fixed-point scale of the kernel weights (x1024).
pub const KERNEL_SCALE: i32 = 1024;

/// Build a `kernel_size` x `kernel_size` fixed-point Gaussian kernel.
///
/// Preconditions (`kernel_size` odd >= 1, `sigma` > 0) are checked by
/// `EehConfig::validate` before this is called.
pub fn gaussian_kernel(kernel_size: usize, sigma: f64) -> Array2<i32> {
    debug_assert!(kernel_size % 2 == 1 && kernel_size >= 1);
    debug_assert!(sigma > 0.0);

    let half = (kernel_size / 2) as isize;
    let denom = 2.0 * sigma * sigma;
    let mut kernel = Array2::<i32>::zeros((kernel_size, kernel_size));

    for ky in 0..kernel_size {
        for kx in 0..kernel_size {
            let dy = (ky as isize - half) as f64;
            let dx = (kx as isize - half) as f64;
            // The density peaks at exp(0) = 1, so scaling by 1024 puts the
            // center weight at exactly 1024 with no separate max() pass.
            let weight = f64::from(KERNEL_SCALE) * (-(dx * dx + dy * dy) / denom).exp();
            kernel[[ky, kx]] = weight as i32;
        }
    }

    kernel
}

/// Sum of all kernel weights, used to renormalize the convolution result.
pub fn kernel_sum(kernel: &Array2<i32>) -> i64 {
    kernel.iter().map(|&w| i64::from(w)).sum()
}
