//! Double-angle structure fields and orientation recovery.
//!
//! A gradient `g` and its opposite `-g` describe the same local structure.
//! Squaring the gradient maps both to the same point: with `φ` the gradient
//! angle, `J1 = 2·Gx·Gy = |g|²·sin 2φ` and `J2 = Gx² − Gy² = |g|²·cos 2φ`.
//! After averaging, halving `atan2(J1★, J2★)` gives back an angle modulo π.

use crate::border::BorderMode;
use crate::convolve::convolve_same;
use crate::gradient::Gradient;
use flowfield_core::{Result, ScalarField};
use std::f64::consts::{FRAC_PI_2, PI};

/// The `(J1, J2)` field pair, raw or averaged.
#[derive(Debug, Clone)]
pub struct StructureFields {
    /// `2·Gx·Gy`
    pub j1: ScalarField,
    /// `Gx² − Gy²`
    pub j2: ScalarField,
}

impl StructureFields {
    /// Form the double-angle fields from a gradient pair.
    pub fn from_gradient(gradient: &Gradient) -> Result<Self> {
        let j1 = gradient.gx.zip_map(&gradient.gy, |gx, gy| 2.0 * gx * gy)?;
        let j2 = gradient.gx.zip_map(&gradient.gy, |gx, gy| gx * gx - gy * gy)?;
        Ok(Self { j1, j2 })
    }

    /// Weight both fields by `kernel` with zero padding at the borders.
    ///
    /// The kernel is rotated by 180 degrees before the convolution, which
    /// makes this a correlation with `kernel` as given.
    pub fn averaged(&self, kernel: &ScalarField) -> Self {
        let flipped = kernel.rotated_180();
        let border = BorderMode::Constant(0.0);
        Self {
            j1: convolve_same(&self.j1, &flipped, border),
            j2: convolve_same(&self.j2, &flipped, border),
        }
    }

    /// Per-pixel orientation `atan2(J1, J2) / 2` in (−π/2, π/2].
    pub fn orientation(&self) -> Result<ScalarField> {
        self.j1.zip_map(&self.j2, orientation_from)
    }
}

/// Recover the half angle from a double-angle pair.
///
/// `(0, 0)` carries no direction and maps to 0. Signed zeros can make
/// `atan2` return exactly −π; that case is folded onto +π/2 so the result
/// always lies in (−π/2, π/2].
#[inline]
pub fn orientation_from(j1: f64, j2: f64) -> f64 {
    if j1 == 0.0 && j2 == 0.0 {
        return 0.0;
    }
    let theta = j1.atan2(j2) / 2.0;
    if theta <= -FRAC_PI_2 {
        theta + PI
    } else {
        theta
    }
}
