//! Direct 2-D convolution with "same"-shaped output.
//!
//! Output pixel `(x, y)` equals sample `(x + (kw-1)/2, y + (kh-1)/2)` of the
//! full convolution, so an even kernel is centered half a pixel up and left
//! of an odd one. Samples outside the field come from the [`BorderMode`].

use crate::border::{map_index, BorderMode};
use flowfield_core::ScalarField;
use rayon::prelude::*;

/// A nonzero kernel weight and the source offset it reads from.
#[derive(Debug, Clone, Copy)]
struct Tap {
    dx: isize,
    dy: isize,
    weight: f64,
}

/// Convolve `field` with `kernel`, returning a field of the input's shape.
///
/// This is true convolution (the kernel is flipped); pass a kernel rotated by
/// 180 degrees to correlate instead. Zero kernel entries are skipped.
pub fn convolve_same(
    field: &ScalarField,
    kernel: &ScalarField,
    border: BorderMode,
) -> ScalarField {
    let (w, h) = (field.width(), field.height());
    let mut out = ScalarField::new(w, h);
    if field.is_empty() {
        return out;
    }

    let taps = collect_taps(kernel);
    let fill = match border {
        BorderMode::Constant(c) => c,
        BorderMode::Reflect101 => 0.0,
    };

    out.data_mut()
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, out_row)| {
            for tap in &taps {
                let Some(sy) = map_index(y as isize + tap.dy, h, border) else {
                    if fill != 0.0 {
                        for o in out_row.iter_mut() {
                            *o += tap.weight * fill;
                        }
                    }
                    continue;
                };
                let src = field.row(sy);
                // Columns whose source sample lies inside the row.
                let lo = (-tap.dx).clamp(0, w as isize) as usize;
                let hi = (w as isize - tap.dx).clamp(0, w as isize) as usize;
                if lo < hi {
                    let start = (lo as isize + tap.dx) as usize;
                    for (o, &s) in out_row[lo..hi].iter_mut().zip(&src[start..]) {
                        *o += tap.weight * s;
                    }
                }
                for x in (0..lo).chain(hi..w) {
                    let sample =
                        map_index(x as isize + tap.dx, w, border).map_or(fill, |sx| src[sx]);
                    out_row[x] += tap.weight * sample;
                }
            }
        });
    out
}

fn collect_taps(kernel: &ScalarField) -> Vec<Tap> {
    let oy = (kernel.height() as isize - 1).div_euclid(2);
    let ox = (kernel.width() as isize - 1).div_euclid(2);
    let mut taps = Vec::new();
    for ky in 0..kernel.height() {
        for kx in 0..kernel.width() {
            let weight = kernel.at(kx, ky);
            if weight != 0.0 {
                taps.push(Tap {
                    dx: ox - kx as isize,
                    dy: oy - ky as isize,
                    weight,
                });
            }
        }
    }
    taps
}
