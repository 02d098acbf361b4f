//! Integration tests for orientation estimation.
//!
//! Runs flowfield-core fields through the flowfield-orientation pipeline on
//! synthetic images with known geometry.

use flowfield_core::{FieldShape, FlowFieldError, ScalarField};
use flowfield_orientation::{
    estimate_orientation, OrientationEstimator, OrientationOutput, OrientationParams,
};
use std::f64::consts::{FRAC_PI_2, PI};

// ── Helpers ────────────────────────────────────────────────────

/// Odd averaging window (floor(6 * 2.5) = 15) so the "same" convolution is centered.
fn odd_params() -> OrientationParams {
    OrientationParams {
        smooth_sigma: 1.5,
        sum_sigma: 2.5,
    }
}

fn rings(width: usize, height: usize) -> ScalarField {
    ScalarField::from_fn(width, height, |x, y| {
        let dx = x as f64 - 20.3;
        let dy = y as f64 - 13.7;
        128.0 + 100.0 * (0.4 * (dx * dx + dy * dy).sqrt()).sin()
    })
}

/// Distance between two orientations, treating angles that differ by π as equal.
fn angle_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(PI);
    d.min(PI - d)
}

/// Pixels whose averaged structure fields are far from the (0, 0) singularity.
fn well_conditioned(output: &OrientationOutput) -> Vec<bool> {
    let magnitude: Vec<f64> = output
        .averaged
        .j1
        .data()
        .iter()
        .zip(output.averaged.j2.data())
        .map(|(a, b)| a.hypot(*b))
        .collect();
    let max = magnitude.iter().copied().fold(0.0, f64::max);
    magnitude.iter().map(|&m| m > 1e-3 * max).collect()
}

// ── Analytic patterns ──────────────────────────────────────────

#[test]
fn diagonal_stripes_follow_discrete_gradient_direction() {
    let (a, b) = (0.15, 0.3);
    let image = ScalarField::from_fn(96, 96, |x, y| {
        128.0 + 100.0 * (a * x as f64 + b * y as f64).sin()
    });
    let params = OrientationParams {
        smooth_sigma: 3.0,
        sum_sigma: 2.5,
    };
    let theta = estimate_orientation(&image, &params).unwrap();

    // Central differences of a plane wave scale each axis by sin(step).
    let expected = b.sin().atan2(a.sin());
    for y in 24..72 {
        for x in 24..72 {
            let got = theta.at(x, y);
            assert!(
                angle_distance(got, expected) < 1e-6,
                "({x}, {y}): {got} vs {expected}"
            );
        }
    }
}

#[test]
fn vertical_step_edge_is_zero_near_edge() {
    let image = ScalarField::from_fn(64, 40, |x, _| if x < 32 { 0.0 } else { 255.0 });
    let theta = estimate_orientation(&image, &OrientationParams::default()).unwrap();
    for y in 0..40 {
        for x in 28..36 {
            assert!(theta.at(x, y).abs() < 1e-9);
        }
    }
}

#[test]
fn uniform_image_has_no_nan() {
    let image = ScalarField::filled(33, 21, 77.0);
    let theta = estimate_orientation(&image, &OrientationParams::default()).unwrap();
    assert!(theta.is_finite());
    assert!(theta.data().iter().all(|&v| v == 0.0));
}

// ── Geometric invariants ───────────────────────────────────────

#[test]
fn half_turn_leaves_orientation_unchanged() {
    let image = rings(57, 41);
    let estimator = OrientationEstimator::new(odd_params()).unwrap();

    let base = estimator.estimate_fields(&image).unwrap();
    let turned = estimator.estimate_fields(&image.rotated_180()).unwrap();
    let mask = well_conditioned(&base);

    let (w, h) = (image.width(), image.height());
    let mut checked = 0;
    for y in 0..h {
        for x in 0..w {
            if !mask[y * w + x] {
                continue;
            }
            let a = base.orientation.at(x, y);
            let b = turned.orientation.at(w - 1 - x, h - 1 - y);
            assert!(angle_distance(a, b) < 1e-6, "({x}, {y}): {a} vs {b}");
            checked += 1;
        }
    }
    assert!(checked > w * h / 4);
}

#[test]
fn quarter_turn_shifts_orientation_by_right_angle() {
    let image = rings(57, 41);
    let estimator = OrientationEstimator::new(odd_params()).unwrap();

    let base = estimator.estimate_fields(&image).unwrap();
    let turned = estimator.estimate(&image.rotated_90()).unwrap();
    assert_eq!(turned.shape(), FieldShape::new(41, 57));
    let mask = well_conditioned(&base);

    let w = image.width();
    for yr in 0..turned.height() {
        for (xr, &rotated) in turned.row(yr).iter().enumerate() {
            // turned(xr, yr) came from image(w - 1 - yr, xr).
            let (x, y) = (w - 1 - yr, xr);
            if !mask[y * w + x] {
                continue;
            }
            let original = base.orientation.at(x, y);
            assert!(
                angle_distance(rotated, original + FRAC_PI_2) < 1e-6,
                "({x}, {y}): {rotated} vs {original}"
            );
        }
    }
}

#[test]
fn output_shape_matches_input_for_many_shapes() {
    let params = OrientationParams::default();
    for (w, h) in [(2, 2), (3, 50), (50, 3), (17, 17), (64, 9)] {
        let image = ScalarField::from_fn(w, h, |x, y| ((x * 13 + y * 7) % 31) as f64);
        let theta = estimate_orientation(&image, &params).unwrap();
        assert_eq!(theta.shape(), FieldShape::new(w, h));
        assert!(theta
            .data()
            .iter()
            .all(|&v| v > -FRAC_PI_2 && v <= FRAC_PI_2));
    }
}

// ── Error handling ─────────────────────────────────────────────

#[test]
fn degenerate_configuration_is_reported() {
    let image = rings(16, 16);
    for sum_sigma in [0.0, -1.0, 0.1] {
        let params = OrientationParams {
            sum_sigma,
            ..Default::default()
        };
        assert!(matches!(
            estimate_orientation(&image, &params),
            Err(FlowFieldError::Configuration(_))
        ));
    }
}

#[test]
fn empty_image_is_invalid_input() {
    let image = ScalarField::from_vec(0, 0, Vec::new()).unwrap();
    assert!(matches!(
        estimate_orientation(&image, &OrientationParams::default()),
        Err(FlowFieldError::InvalidInput(_))
    ));
}
