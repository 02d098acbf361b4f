//! 2-D Gaussian weighting kernels.

use flowfield_core::ScalarField;

/// Largest kernel side accepted by the blur and averaging stages.
///
/// Bounds smoothing at `sigma ≈ 128` and averaging at `sigma ≈ 170`.
pub const MAX_KERNEL_SIDE: usize = 1025;

/// Build a `size` x `size` Gaussian kernel with standard deviation `sigma`.
///
/// The grid is centered at `(size - 1) / 2` on both axes, so an even `size`
/// has no center tap and every coordinate is a half-integer. Entries smaller
/// than `f64::EPSILON` times the peak are zeroed before the kernel is scaled
/// to unit sum. An all-zero kernel is returned unscaled.
///
/// The function is total: `size == 0` yields an empty kernel and a
/// non-positive or non-finite `sigma` yields the all-zero kernel.
///
/// ```
/// use flowfield_orientation::build_gaussian_kernel;
///
/// let k = build_gaussian_kernel(5, 1.0);
/// assert!((k.sum() - 1.0).abs() < 1e-12);
/// assert!((k.at(2, 2) - 0.162103).abs() < 1e-6);
/// ```
pub fn build_gaussian_kernel(size: usize, sigma: f64) -> ScalarField {
    if !(sigma > 0.0 && sigma.is_finite()) {
        return ScalarField::new(size, size);
    }

    let center = (size as f64 - 1.0) / 2.0;
    let two_sigma_sq = 2.0 * sigma * sigma;
    let mut kernel = ScalarField::from_fn(size, size, |x, y| {
        let dx = x as f64 - center;
        let dy = y as f64 - center;
        (-(dx * dx + dy * dy) / two_sigma_sq).exp()
    });

    let Some(peak) = kernel.max() else {
        return kernel;
    };
    let floor = f64::EPSILON * peak;
    for v in kernel.data_mut() {
        if *v < floor {
            *v = 0.0;
        }
    }

    let sum = kernel.sum();
    if sum != 0.0 {
        for v in kernel.data_mut() {
            *v /= sum;
        }
    }
    kernel
}

/// Side length of the averaging window for `sigma`: `floor(6·sigma)`.
///
/// The result may be even. Negative and NaN inputs map to 0.
pub fn averaging_kernel_size(sigma: f64) -> usize {
    (6.0 * sigma).floor() as usize
}
