//! PNG input/output for sprites.

use std::path::Path;

use image::RgbaImage;

use crate::error::{Result, TiledError};

use super::Skip;

/// Load an image as RGBA, synthesizing an opaque alpha channel when the
/// file has none.
pub fn load_rgba(path: &Path) -> std::result::Result<RgbaImage, Skip> {
    if !path.is_file() {
        return Err(Skip::Image {
            path: path.to_path_buf(),
            message: "file not found".to_string(),
        });
    }

    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|e| Skip::Image {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Write an RGBA image to a PNG file.
pub fn write_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save(path).map_err(|e| TiledError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })
}

/// Keep the left-most of `variants` equally wide slices, full height.
pub fn crop_first_variant(img: &RgbaImage, variants: u32) -> RgbaImage {
    let width = img.width() / variants.max(1);
    image::imageops::crop_imm(img, 0, 0, width, img.height()).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba};
    use tempfile::tempdir;

    #[test]
    fn test_write_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.png");

        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 128]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, 0]));
        write_png(&img, &path).unwrap();

        let loaded = load_rgba(&path).unwrap();
        assert_eq!(loaded.dimensions(), (2, 1));
        assert_eq!(loaded.get_pixel(0, 0).0, [255, 0, 0, 128]);
        assert_eq!(loaded.get_pixel(1, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_load_rgb_gets_opaque_alpha() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rgb.png");

        let mut img = RgbImage::new(1, 1);
        img.put_pixel(0, 0, Rgb([10, 20, 30]));
        img.save(&path).unwrap();

        let loaded = load_rgba(&path).unwrap();
        assert_eq!(loaded.get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_load_missing_is_skip() {
        let dir = tempdir().unwrap();
        let result = load_rgba(&dir.path().join("nope.png"));
        assert!(matches!(result, Err(Skip::Image { .. })));
    }

    #[test]
    fn test_crop_first_variant() {
        let mut img = RgbaImage::new(96, 32);
        img.put_pixel(0, 0, Rgba([1, 2, 3, 255]));
        img.put_pixel(40, 0, Rgba([9, 9, 9, 255]));

        let cropped = crop_first_variant(&img, 3);

        assert_eq!(cropped.dimensions(), (32, 32));
        assert_eq!(cropped.get_pixel(0, 0).0, [1, 2, 3, 255]);
    }

    #[test]
    fn test_crop_single_variant_is_identity() {
        let img = RgbaImage::new(32, 16);
        assert_eq!(crop_first_variant(&img, 1).dimensions(), (32, 16));
    }
}
