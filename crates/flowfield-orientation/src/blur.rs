//! Separable Gaussian pre-smoothing.
//!
//! The tap count is derived from sigma (`round(8σ + 1)`, forced odd), the
//! same rule common imaging libraries apply to floating-point images, and the
//! borders are extended with [`BorderMode::Reflect101`].

use crate::border::{map_index, BorderMode};
use crate::kernel::MAX_KERNEL_SIDE;
use flowfield_core::{FlowFieldError, Result, ScalarField};
use rayon::prelude::*;

/// Number of taps used to blur with standard deviation `sigma`.
///
/// Saturates at `usize::MAX` for huge sigmas.
pub fn blur_kernel_size(sigma: f64) -> usize {
    ((sigma * 8.0 + 1.0).round() as usize) | 1
}

/// Normalized 1-D Gaussian taps centered at `(size - 1) / 2`.
pub fn gaussian_kernel_1d(size: usize, sigma: f64) -> Vec<f64> {
    let center = (size as f64 - 1.0) * 0.5;
    let scale = -0.5 / (sigma * sigma);
    let mut taps: Vec<f64> = (0..size)
        .map(|i| {
            let x = i as f64 - center;
            (scale * x * x).exp()
        })
        .collect();
    let sum: f64 = taps.iter().sum();
    if sum > 0.0 {
        for t in &mut taps {
            *t /= sum;
        }
    }
    taps
}

/// Blur `field` with an isotropic Gaussian of standard deviation `sigma`.
///
/// The output has the input's shape. Fails with a configuration error when
/// `sigma` is not a positive finite number or needs more than
/// [`MAX_KERNEL_SIDE`] taps.
pub fn gaussian_blur(field: &ScalarField, sigma: f64) -> Result<ScalarField> {
    if !(sigma > 0.0 && sigma.is_finite()) {
        return Err(FlowFieldError::configuration(format!(
            "blur sigma must be positive and finite, got {sigma}"
        )));
    }
    let size = blur_kernel_size(sigma);
    if size > MAX_KERNEL_SIDE {
        return Err(FlowFieldError::configuration(format!(
            "blur sigma {sigma} needs {size} taps, limit is {MAX_KERNEL_SIDE}"
        )));
    }
    if field.is_empty() {
        return Ok(field.clone());
    }

    let taps = gaussian_kernel_1d(size, sigma);
    let horizontal = convolve_rows(field, &taps, BorderMode::Reflect101);
    Ok(convolve_columns(&horizontal, &taps, BorderMode::Reflect101))
}

/// Correlate every row with `taps`.
fn convolve_rows(src: &ScalarField, taps: &[f64], border: BorderMode) -> ScalarField {
    let w = src.width();
    let radius = (taps.len() / 2) as isize;
    let fill = border_value(border);
    let mut out = ScalarField::new(w, src.height());

    out.data_mut()
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, out_row)| {
            let row = src.row(y);
            for (x, o) in out_row.iter_mut().enumerate() {
                let mut acc = 0.0;
                for (k, &t) in taps.iter().enumerate() {
                    let i = x as isize + k as isize - radius;
                    acc += t * map_index(i, w, border).map_or(fill, |xi| row[xi]);
                }
                *o = acc;
            }
        });
    out
}

/// Correlate every column with `taps`, accumulating whole rows at a time.
fn convolve_columns(src: &ScalarField, taps: &[f64], border: BorderMode) -> ScalarField {
    let (w, h) = (src.width(), src.height());
    let radius = (taps.len() / 2) as isize;
    let fill = border_value(border);
    let mut out = ScalarField::new(w, h);

    out.data_mut()
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, out_row)| {
            for (k, &t) in taps.iter().enumerate() {
                let i = y as isize + k as isize - radius;
                match map_index(i, h, border) {
                    Some(yi) => {
                        for (o, &s) in out_row.iter_mut().zip(src.row(yi)) {
                            *o += t * s;
                        }
                    }
                    None => {
                        for o in out_row.iter_mut() {
                            *o += t * fill;
                        }
                    }
                }
            }
        });
    out
}

fn border_value(border: BorderMode) -> f64 {
    match border {
        BorderMode::Constant(c) => c,
        BorderMode::Reflect101 => 0.0,
    }
}
