//! FlowField Orientation - per-pixel dominant orientation estimation.
//!
//! The pipeline follows the structure-tensor approach of Kass & Witkin:
//! pre-smooth, take gradients, form the double-angle fields
//! `J1 = 2·Gx·Gy` and `J2 = Gx² − Gy²`, average them with a Gaussian
//! window and recover `θ = atan2(J1★, J2★) / 2`.

pub mod blur;
pub mod border;
pub mod convolve;
pub mod estimator;
pub mod gradient;
pub mod kernel;
pub mod structure;

pub use blur::{blur_kernel_size, gaussian_blur, gaussian_kernel_1d};
pub use border::{map_index, BorderMode};
pub use convolve::convolve_same;
pub use estimator::{
    estimate_orientation, OrientationEstimator, OrientationOutput, OrientationParams,
};
pub use gradient::{gradient, Gradient};
pub use kernel::{averaging_kernel_size, build_gaussian_kernel, MAX_KERNEL_SIDE};
pub use structure::{orientation_from, StructureFields};
