//! I/O helpers for images and JSON.
//!
//! - `load_grayscale`: read a PNG/JPEG/etc. into a `ScalarField` of 0..=255 intensities.
//! - `load_rgb`: read the color image the overlay is drawn on.
//! - `orientation_to_luma`: encode an orientation field as an 8-bit map.
//! - `save_rgb` / `save_luma` / `write_json_file`: write outputs, creating parent directories.

use flowfield_core::{FlowFieldError, Result, ScalarField};
use image::{GrayImage, Luma, RgbImage};
use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, PI};
use std::fs;
use std::path::Path;

/// Load an image from disk and convert it to grayscale intensities.
pub fn load_grayscale(path: &Path) -> Result<ScalarField> {
    let img = image::open(path)
        .map_err(|e| FlowFieldError::Image(format!("Failed to open {}: {e}", path.display())))?
        .into_luma8();
    Ok(gray_from_luma(&img))
}

/// Load an image from disk as 8-bit RGB.
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    Ok(image::open(path)
        .map_err(|e| FlowFieldError::Image(format!("Failed to open {}: {e}", path.display())))?
        .into_rgb8())
}

/// Widen an 8-bit luma buffer to a floating-point field.
pub fn gray_from_luma(img: &GrayImage) -> ScalarField {
    ScalarField::from_fn(img.width() as usize, img.height() as usize, |x, y| {
        img.get_pixel(x as u32, y as u32)[0] as f64
    })
}

/// Map orientations in (−π/2, π/2] linearly onto 0..=255.
pub fn orientation_to_luma(orientation: &ScalarField) -> GrayImage {
    let mut out = GrayImage::new(orientation.width() as u32, orientation.height() as u32);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let theta = orientation.at(x as usize, y as usize);
        let v = ((theta + FRAC_PI_2) / PI * 255.0).round().clamp(0.0, 255.0);
        *px = Luma([v as u8]);
    }
    out
}

/// Save an RGB image; the format follows the file extension.
pub fn save_rgb(img: &RgbImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    img.save(path)
        .map_err(|e| FlowFieldError::Image(format!("Failed to save {}: {e}", path.display())))
}

/// Save an 8-bit grayscale image.
pub fn save_luma(img: &GrayImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    img.save(path)
        .map_err(|e| FlowFieldError::Image(format!("Failed to save {}: {e}", path.display())))
}

/// Serialize a value as pretty JSON to `path`.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        FlowFieldError::Serialization(format!("Failed to serialize {}: {e}", path.display()))
    })?;
    fs::write(path, json)?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_from_luma() {
        let mut img = GrayImage::new(3, 2);
        img.put_pixel(2, 1, Luma([200]));
        let field = gray_from_luma(&img);
        assert_eq!(field.width(), 3);
        assert_eq!(field.height(), 2);
        assert_eq!(field.at(2, 1), 200.0);
        assert_eq!(field.at(0, 0), 0.0);
    }

    #[test]
    fn test_orientation_to_luma_endpoints() {
        let field = ScalarField::from_vec(3, 1, vec![-FRAC_PI_2 + 1e-12, 0.0, FRAC_PI_2]).unwrap();
        let luma = orientation_to_luma(&field);
        assert_eq!(luma.get_pixel(0, 0)[0], 0);
        assert_eq!(luma.get_pixel(1, 0)[0], 128);
        assert_eq!(luma.get_pixel(2, 0)[0], 255);
    }

    #[test]
    fn test_png_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("gray.png");
        let mut img = GrayImage::new(4, 4);
        img.put_pixel(1, 2, Luma([77]));
        save_luma(&img, &path).unwrap();

        let field = load_grayscale(&path).unwrap();
        assert_eq!(field.at(1, 2), 77.0);
        let rgb = load_rgb(&path).unwrap();
        assert_eq!(rgb.get_pixel(1, 2).0, [77, 77, 77]);
    }

    #[test]
    fn test_missing_file_is_image_error() {
        let err = load_grayscale(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, FlowFieldError::Image(_)));
    }

    #[test]
    fn test_write_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json_file(&path, &vec![1, 2, 3]).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let back: Vec<i32> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
    }
}
