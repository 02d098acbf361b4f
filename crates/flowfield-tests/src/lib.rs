//! Integration test crate for FlowField.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on every flowfield crate to verify they work together.

#[cfg(test)]
mod orientation;

#[cfg(test)]
mod pipeline;
