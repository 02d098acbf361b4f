//! End-to-end tests: image on disk → orientation field → overlay on disk.

use flowfield_core::ScalarField;
use flowfield_orientation::{estimate_orientation, OrientationParams};
use flowfield_viz::{
    draw_flow_field, load_grayscale, load_rgb, orientation_to_luma, sample_flow_field, save_luma,
    save_rgb, OverlayStyle,
};
use image::{GrayImage, Luma};
use std::f64::consts::FRAC_PI_2;
use std::path::Path;

fn write_step(path: &Path, width: u32, height: u32, vertical: bool) {
    let img = GrayImage::from_fn(width, height, |x, y| {
        let bright = if vertical { x >= width / 2 } else { y >= height / 2 };
        Luma([if bright { 255 } else { 0 }])
    });
    img.save(path).unwrap();
}

fn estimate_from_disk(path: &Path) -> ScalarField {
    let gray = load_grayscale(path).unwrap();
    estimate_orientation(&gray, &OrientationParams::default()).unwrap()
}

#[test]
fn vertical_edge_from_png_is_horizontal_flow() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("vertical.png");
    write_step(&input, 64, 40, true);

    let theta = estimate_from_disk(&input);
    assert_eq!((theta.width(), theta.height()), (64, 40));
    assert!(theta.data().iter().all(|&v| v == 0.0));

    for s in sample_flow_field(&theta, 16).unwrap() {
        assert_eq!(s.u, 1.0);
        assert_eq!(s.v, 0.0);
    }
}

#[test]
fn horizontal_edge_maps_to_right_angle() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("horizontal.png");
    write_step(&input, 40, 40, false);

    let theta = estimate_from_disk(&input);
    for y in 17..23 {
        for x in 0..40 {
            assert!((theta.at(x, y) - FRAC_PI_2).abs() < 1e-12, "({x}, {y})");
        }
    }

    let map_path = dir.path().join("maps").join("orientation.png");
    save_luma(&orientation_to_luma(&theta), &map_path).unwrap();
    let map = image::open(&map_path).unwrap().into_luma8();
    assert_eq!(map.get_pixel(5, 20)[0], 255);
}

#[test]
fn overlay_is_written_over_source_image() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("edge.png");
    write_step(&input, 64, 40, true);

    let theta = estimate_from_disk(&input);
    let base = load_rgb(&input).unwrap();
    let style = OverlayStyle {
        stride: 16,
        color: [0, 200, 0],
        ..Default::default()
    };
    let rendered = draw_flow_field(&base, &theta, &style).unwrap();

    let out = dir.path().join("out").join("flow.png");
    save_rgb(&rendered, &out).unwrap();
    let back = image::open(&out).unwrap().into_rgb8();
    assert_eq!(back.dimensions(), (64, 40));

    // Sample (16, 16) points right with length round(16 * 0.8) = 13.
    for x in 16..=29 {
        assert_eq!(back.get_pixel(x, 16).0, [0, 200, 0], "x = {x}");
    }
    // Untouched pixels keep the source intensity.
    assert_eq!(back.get_pixel(8, 8).0, [0, 0, 0]);
    assert_eq!(back.get_pixel(56, 8).0, [255, 255, 255]);
}
