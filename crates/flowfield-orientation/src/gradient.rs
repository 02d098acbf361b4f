//! Finite-difference image gradients.

use flowfield_core::{FlowFieldError, Result, ScalarField};

/// Partial derivatives of a field, each with the field's shape.
#[derive(Debug, Clone)]
pub struct Gradient {
    /// Derivative along the column axis (left to right).
    pub gx: ScalarField,
    /// Derivative along the row axis (top to bottom).
    pub gy: ScalarField,
}

/// Compute spatial gradients using central differences.
///
/// Interior samples use `(f[i+1] - f[i-1]) / 2`; the first and last sample
/// on each axis use the one-sided difference with their single neighbor.
/// Both axes need at least two samples.
pub fn gradient(field: &ScalarField) -> Result<Gradient> {
    let (w, h) = (field.width(), field.height());
    if w < 2 || h < 2 {
        return Err(FlowFieldError::invalid_input(format!(
            "gradient needs at least 2x2 samples, got {}",
            field.shape()
        )));
    }

    let mut gx = ScalarField::new(w, h);
    for y in 0..h {
        let row = field.row(y);
        let out = gx.row_mut(y);
        out[0] = row[1] - row[0];
        for (o, win) in out[1..w - 1].iter_mut().zip(row.windows(3)) {
            *o = (win[2] - win[0]) / 2.0;
        }
        out[w - 1] = row[w - 1] - row[w - 2];
    }

    let mut gy = ScalarField::new(w, h);
    for y in 0..h {
        let out = gy.row_mut(y);
        let (prev, next, scale) = if y == 0 {
            (field.row(0), field.row(1), 1.0)
        } else if y == h - 1 {
            (field.row(h - 2), field.row(h - 1), 1.0)
        } else {
            (field.row(y - 1), field.row(y + 1), 0.5)
        };
        for ((o, &a), &b) in out.iter_mut().zip(prev).zip(next) {
            *o = (b - a) * scale;
        }
    }

    Ok(Gradient { gx, gy })
}
