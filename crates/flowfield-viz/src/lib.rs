//! FlowField Viz - adapters around the orientation core.
//!
//! Loads images into `ScalarField`s, subsamples an orientation field on a
//! fixed stride and draws the samples as short vectors over the source image.

pub mod io;
pub mod overlay;
pub mod sampling;

pub use io::{
    gray_from_luma, load_grayscale, load_rgb, orientation_to_luma, save_luma, save_rgb,
    write_json_file,
};
pub use overlay::{draw_flow_field, render_overlay, OverlayStyle};
pub use sampling::{sample_flow_field, FlowSample, DENSE_STRIDE};
