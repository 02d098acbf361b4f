//! Orientation-field estimation.
//!
//! Stages run in strict order, each producing a field of the input's shape:
//!
//! 1. Gaussian pre-smoothing with `smooth_sigma` (reflect-101 borders)
//! 2. Central-difference gradients `(Gx, Gy)`
//! 3. Double-angle fields `J1 = 2·Gx·Gy`, `J2 = Gx² − Gy²`
//! 4. Averaging of both fields with a `floor(6·sum_sigma)` Gaussian window
//!    (zero-padded "same" convolution)
//! 5. `θ = atan2(J1★, J2★) / 2`

use crate::blur::{blur_kernel_size, gaussian_blur};
use crate::gradient::gradient;
use crate::kernel::{averaging_kernel_size, build_gaussian_kernel, MAX_KERNEL_SIDE};
use crate::structure::StructureFields;
use flowfield_core::{FlowFieldError, Result, ScalarField};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

/// Parameters for orientation estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationParams {
    /// Standard deviation of the initial Gaussian blur.
    pub smooth_sigma: f64,
    /// Standard deviation of the window used to average the structure fields.
    pub sum_sigma: f64,
}

impl Default for OrientationParams {
    fn default() -> Self {
        Self {
            smooth_sigma: 3.0,
            sum_sigma: 3.0,
        }
    }
}

impl OrientationParams {
    /// Check both sigmas, returning a configuration error for values that
    /// would blur with nothing, average with an all-zero kernel or need a
    /// kernel wider than [`MAX_KERNEL_SIDE`].
    pub fn validate(&self) -> Result<()> {
        if !(self.smooth_sigma > 0.0 && self.smooth_sigma.is_finite()) {
            return Err(FlowFieldError::configuration(format!(
                "smooth_sigma must be positive and finite, got {}",
                self.smooth_sigma
            )));
        }
        if !(self.sum_sigma > 0.0 && self.sum_sigma.is_finite()) {
            return Err(FlowFieldError::configuration(format!(
                "sum_sigma must be positive and finite, got {}",
                self.sum_sigma
            )));
        }
        let blur_size = blur_kernel_size(self.smooth_sigma);
        if blur_size > MAX_KERNEL_SIDE {
            return Err(FlowFieldError::configuration(format!(
                "smooth_sigma {} needs a {blur_size}-tap blur, limit is {MAX_KERNEL_SIDE}",
                self.smooth_sigma
            )));
        }
        check_averaging_size(self.sum_sigma)?;
        Ok(())
    }

    /// Build the averaging window for `sum_sigma`.
    ///
    /// The window side is `floor(6·sum_sigma)` and is not forced odd.
    pub fn averaging_kernel(&self) -> Result<ScalarField> {
        let size = check_averaging_size(self.sum_sigma)?;
        let kernel = build_gaussian_kernel(size, self.sum_sigma);
        if kernel.sum() == 0.0 {
            return Err(FlowFieldError::configuration(format!(
                "sum_sigma {} gives a degenerate {size}x{size} averaging kernel",
                self.sum_sigma
            )));
        }
        Ok(kernel)
    }
}

/// Orientation field together with the averaged structure fields it came from.
#[derive(Debug, Clone)]
pub struct OrientationOutput {
    /// Per-pixel orientation in radians, (−π/2, π/2].
    pub orientation: ScalarField,
    /// `(J1★, J2★)` after Gaussian averaging.
    pub averaged: StructureFields,
}

/// Validated estimator holding its averaging kernel.
#[derive(Debug, Clone)]
pub struct OrientationEstimator {
    params: OrientationParams,
    kernel: ScalarField,
}

impl OrientationEstimator {
    /// Validate `params` and prepare the averaging kernel.
    pub fn new(params: OrientationParams) -> Result<Self> {
        params.validate()?;
        let kernel = params.averaging_kernel()?;
        debug!(
            smooth_sigma = params.smooth_sigma,
            sum_sigma = params.sum_sigma,
            kernel_size = kernel.width(),
            "Orientation estimator ready"
        );
        Ok(Self { params, kernel })
    }

    /// The (unrotated) averaging kernel.
    pub fn kernel(&self) -> &ScalarField {
        &self.kernel
    }

    /// Estimate the orientation field of `image`.
    pub fn estimate(&self, image: &ScalarField) -> Result<ScalarField> {
        Ok(self.estimate_fields(image)?.orientation)
    }

    /// Estimate the orientation field and keep the averaged structure fields.
    pub fn estimate_fields(&self, image: &ScalarField) -> Result<OrientationOutput> {
        validate_image(image)?;
        let _span = tracing::debug_span!(
            "estimate_orientation",
            width = image.width(),
            height = image.height()
        )
        .entered();
        let start = Instant::now();

        let smoothed = gaussian_blur(image, self.params.smooth_sigma)?;
        debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Pre-smoothing done");

        let grad = gradient(&smoothed)?;
        let fields = StructureFields::from_gradient(&grad)?;

        let averaged = fields.averaged(&self.kernel);
        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Structure fields averaged"
        );

        let orientation = averaged.orientation()?;
        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Orientation recovered"
        );

        Ok(OrientationOutput {
            orientation,
            averaged,
        })
    }
}

/// Estimate the per-pixel orientation of `image` in radians.
///
/// The result has the shape of `image`, with every value in (−π/2, π/2].
pub fn estimate_orientation(
    image: &ScalarField,
    params: &OrientationParams,
) -> Result<ScalarField> {
    OrientationEstimator::new(*params)?.estimate(image)
}

fn check_averaging_size(sum_sigma: f64) -> Result<usize> {
    let size = averaging_kernel_size(sum_sigma);
    if size > MAX_KERNEL_SIDE {
        return Err(FlowFieldError::configuration(format!(
            "sum_sigma {sum_sigma} gives a {size}x{size} window, limit is {MAX_KERNEL_SIDE}"
        )));
    }
    Ok(size)
}

fn validate_image(image: &ScalarField) -> Result<()> {
    if image.is_empty() {
        return Err(FlowFieldError::invalid_input(format!(
            "image is empty ({})",
            image.shape()
        )));
    }
    if image.width() < 2 || image.height() < 2 {
        return Err(FlowFieldError::invalid_input(format!(
            "image must be at least 2x2, got {}",
            image.shape()
        )));
    }
    if !image.is_finite() {
        return Err(FlowFieldError::invalid_input("image contains non-finite samples"));
    }
    Ok(())
}
