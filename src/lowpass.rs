/// Low-pass neighborhood estimate: cross-correlate the plane with the
/// fixed-point Gaussian kernel and renormalize by the kernel sum.
///
/// Border handling is observable in the output near the image edge, so it
/// is an explicit mode rather than a hidden default.
use ndarray::Array2;
use rayon::prelude::*;

use crate::kernel::kernel_sum;

/// How neighborhood reads outside the plane are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Mirror without repeating the edge sample (BORDER_REFLECT_101:
    /// dcb|abcdefg|fed). The default.
    #[default]
    Reflect,
    /// Clamp to the nearest edge sample.
    Replicate,
    /// Treat out-of-bounds samples as 0; the renormalization denominator
    /// stays the full kernel sum, matching zero padding.
    Zero,
}

/// Resolve index `idx` against an axis of length `size`.
///
/// Returns `None` when the mode discards the sample (`Zero` only).
#[inline]
fn resolve(idx: i32, size: i32, mode: BorderMode) -> Option<i32> {
    if (0..size).contains(&idx) {
        return Some(idx);
    }
    match mode {
        BorderMode::Replicate => Some(idx.clamp(0, size - 1)),
        BorderMode::Reflect => {
            if size == 1 {
                return Some(0);
            }
            // Repeated reflection handles kernels wider than the plane.
            let mut i = idx;
            while !(0..size).contains(&i) {
                i = if i < 0 { -i } else { 2 * (size - 1) - i };
            }
            Some(i)
        }
        BorderMode::Zero => None,
    }
}

/// Compute the low-pass estimate of a plane.
///
/// Per pixel: weighted sum of the kernel neighborhood, divided by the
/// kernel weight sum to return to sample scale (both operands are
/// non-negative, so the integer division floors). Rows are independent
/// and computed in parallel.
pub fn low_pass(
    gray: &[u8],
    width: u32,
    height: u32,
    kernel: &Array2<i32>,
    border: BorderMode,
) -> Vec<i32> {
    let w = width as i32;
    let h = height as i32;
    let len = width as usize * height as usize;
    debug_assert_eq!(gray.len(), len);
    debug_assert_eq!(kernel.nrows(), kernel.ncols());

    let ksize = kernel.nrows() as i32;
    let radius = ksize / 2;
    let weight_sum = kernel_sum(kernel);

    let mut output = vec![0i32; len];
    output
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(row, out_row)| {
            let y = row as i32;
            for x in 0..w {
                let mut acc: i64 = 0;
                for ky in 0..ksize {
                    let sy = match resolve(y + ky - radius, h, border) {
                        Some(sy) => sy,
                        None => continue,
                    };
                    for kx in 0..ksize {
                        let sx = match resolve(x + kx - radius, w, border) {
                            Some(sx) => sx,
                            None => continue,
                        };
                        let weight = i64::from(kernel[[ky as usize, kx as usize]]);
                        acc += weight * i64::from(gray[(sy * w + sx) as usize]);
                    }
                }
                out_row[x as usize] = (acc / weight_sum) as i32;
            }
        });

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::gaussian_kernel;

    #[test]
    fn test_resolve_reflect() {
        assert_eq!(resolve(-1, 5, BorderMode::Reflect), Some(1));
        assert_eq!(resolve(0, 5, BorderMode::Reflect), Some(0));
        assert_eq!(resolve(4, 5, BorderMode::Reflect), Some(4));
        assert_eq!(resolve(5, 5, BorderMode::Reflect), Some(3));
        assert_eq!(resolve(6, 5, BorderMode::Reflect), Some(2));
        // Axis shorter than the kernel reach
        assert_eq!(resolve(-2, 2, BorderMode::Reflect), Some(0));
        assert_eq!(resolve(3, 2, BorderMode::Reflect), Some(1));
        assert_eq!(resolve(-1, 1, BorderMode::Reflect), Some(0));
    }

    #[test]
    fn test_resolve_replicate_and_zero() {
        assert_eq!(resolve(-3, 5, BorderMode::Replicate), Some(0));
        assert_eq!(resolve(7, 5, BorderMode::Replicate), Some(4));
        assert_eq!(resolve(2, 5, BorderMode::Zero), Some(2));
        assert_eq!(resolve(-1, 5, BorderMode::Zero), None);
        assert_eq!(resolve(5, 5, BorderMode::Zero), None);
    }

    #[test]
    fn test_constant_plane_is_fixed_point() {
        // Reflected/replicated borders see the same constant, so the
        // renormalized estimate is exact everywhere.
        let gray = vec![100u8; 49];
        let k = gaussian_kernel(5, 1.2);
        for mode in [BorderMode::Reflect, BorderMode::Replicate] {
            let est = low_pass(&gray, 7, 7, &k, mode);
            assert!(est.iter().all(|&v| v == 100), "mode {:?}", mode);
        }
    }

    #[test]
    fn test_zero_border_darkens_edges_only() {
        let gray = vec![200u8; 49];
        let k = gaussian_kernel(5, 1.2);
        let est = low_pass(&gray, 7, 7, &k, BorderMode::Zero);
        // Corner neighborhood loses most of its taps
        assert!(est[0] < 200);
        // Interior pixels are untouched by the border policy
        for y in 2..5 {
            for x in 2..5 {
                assert_eq!(est[y * 7 + x], 200);
            }
        }
    }

    #[test]
    fn test_size_one_kernel_is_identity() {
        let gray: Vec<u8> = (0u8..=24).collect();
        let k = gaussian_kernel(1, 1.2);
        let est = low_pass(&gray, 5, 5, &k, BorderMode::Reflect);
        for (e, g) in est.iter().zip(gray.iter()) {
            assert_eq!(*e, i32::from(*g));
        }
    }

    #[test]
    fn test_smoothing_pulls_spike_toward_neighbors() {
        // 5x5 of 100 with a 160 spike in the middle: the estimate at the
        // spike sits strictly between background and spike.
        let mut gray = vec![100u8; 25];
        gray[12] = 160;
        let k = gaussian_kernel(3, 1.0);
        let est = low_pass(&gray, 5, 5, &k, BorderMode::Reflect);
        assert!(est[12] > 100 && est[12] < 160);
        // Far corner is outside the 3x3 reach of the spike
        assert_eq!(est[0], 100);
    }
}
