//! FlowField Core - Foundation types for orientation-field estimation
//!
//! This crate provides the types shared by every FlowField crate:
//! - `ScalarField`, a shape-checked row-major 2-D array of `f64`
//! - `FlowFieldError` and the crate-wide `Result` alias

pub mod error;
pub mod field;

pub use error::{FlowFieldError, Result};
pub use field::{FieldShape, ScalarField};
