//! Fixed-stride subsampling of an orientation field.

use flowfield_core::{FlowFieldError, Result, ScalarField};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Strides below this draw so many vectors that rendering gets slow and the
/// overlay unreadable.
pub const DENSE_STRIDE: usize = 10;

/// One sampled direction vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowSample {
    /// Column of the sampled pixel.
    pub x: usize,
    /// Row of the sampled pixel.
    pub y: usize,
    /// Orientation in radians.
    pub theta: f64,
    /// `cos θ`
    pub u: f64,
    /// `sin θ`
    pub v: f64,
}

/// Sample `orientation` at every `stride`-th row and column, starting at 0.
///
/// Samples are returned in row-major order.
pub fn sample_flow_field(orientation: &ScalarField, stride: usize) -> Result<Vec<FlowSample>> {
    if stride == 0 {
        return Err(FlowFieldError::configuration("sampling stride must be at least 1"));
    }
    if stride < DENSE_STRIDE {
        warn!(stride, "Very dense flow field requested; rendering may be slow");
    }

    let mut samples = Vec::new();
    for y in (0..orientation.height()).step_by(stride) {
        for x in (0..orientation.width()).step_by(stride) {
            let theta = orientation.at(x, y);
            samples.push(FlowSample {
                x,
                y,
                theta,
                u: theta.cos(),
                v: theta.sin(),
            });
        }
    }
    Ok(samples)
}
