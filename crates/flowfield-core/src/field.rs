//! Shape-checked 2-D scalar fields.
//!
//! Every array in the orientation pipeline (intensities, gradients, structure
//! fields, kernels and the orientation output) is a `ScalarField`: row-major
//! `f64` samples with an explicit width and height. Pointwise operations
//! between fields go through [`ScalarField::zip_map`], which refuses to combine
//! fields of different shapes instead of broadcasting.

use crate::error::{FlowFieldError, Result};
use serde::{Deserialize, Serialize};

/// Dimensions of a field in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FieldShape {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
}

impl FieldShape {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for FieldShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A row-major 2-D array of `f64` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl ScalarField {
    /// Create a zero-filled field.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0.0)
    }

    /// Create a field with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Wrap an existing row-major buffer, checking its length.
    pub fn from_vec(width: usize, height: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != width * height {
            return Err(FlowFieldError::invalid_input(format!(
                "buffer of {} samples does not match a {}x{} field",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a field by evaluating `f(x, y)` at every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn shape(&self) -> FieldShape {
        FieldShape::new(self.width, self.height)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the field holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Sample at column `x`, row `y`. Panics when out of bounds.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f64 {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.width + x]
    }

    /// Write a sample; out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, val: f64) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = val;
        }
    }

    /// Borrow row `y`.
    #[inline]
    pub fn row(&self, y: usize) -> &[f64] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Mutably borrow row `y`.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [f64] {
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }

    /// Combine two fields of identical shape sample by sample.
    pub fn zip_map(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Result<Self> {
        self.ensure_same_shape(other)?;
        Ok(Self {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// Fail with `InvalidInput` unless `other` has this field's shape.
    pub fn ensure_same_shape(&self, other: &Self) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(FlowFieldError::invalid_input(format!(
                "shape mismatch: {} vs {}",
                self.shape(),
                other.shape()
            )));
        }
        Ok(())
    }

    /// Sum of all samples.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Largest sample, or `None` for an empty field.
    pub fn max(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::max)
    }

    /// True when every sample is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Rotate by 180 degrees (`out[y][x] = in[h-1-y][w-1-x]`).
    pub fn rotated_180(&self) -> Self {
        let mut data = self.data.clone();
        data.reverse();
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Rotate by 90 degrees counter-clockwise. The result is `height` wide
    /// and `width` tall, with `out[y][x] = in[x][w-1-y]`.
    pub fn rotated_90(&self) -> Self {
        let (w, h) = (self.width, self.height);
        Self::from_fn(h, w, |x, y| self.at(w - 1 - y, x))
    }
}
