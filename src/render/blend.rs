//! Pixel operations: alpha compositing and colour scaling.

use image::RgbaImage;

use crate::types::Colour;

/// Composite `src` over `dst` in place with the "over" operator.
///
/// Both images must have the same dimensions.
pub fn blend_over(dst: &mut RgbaImage, src: &RgbaImage) {
    debug_assert_eq!(dst.dimensions(), src.dimensions());

    for (d, s) in dst.pixels_mut().zip(src.pixels()) {
        let fa = s.0[3] as f32 / 255.0;
        let ba = d.0[3] as f32 / 255.0;
        let out_a = fa + ba * (1.0 - fa);

        if out_a <= 0.0 {
            d.0 = [0, 0, 0, 0];
            continue;
        }

        for c in 0..3 {
            let fc = s.0[c] as f32 / 255.0;
            let bc = d.0[c] as f32 / 255.0;
            let out_c = (fc * fa + bc * ba * (1.0 - fa)) / out_a;
            d.0[c] = to_byte(out_c);
        }
        d.0[3] = to_byte(out_a);
    }
}

/// Scale each channel of every pixel by the matching channel of `colour`
/// (as a fraction of 255).
pub fn recolor(img: &RgbaImage, colour: Colour) -> RgbaImage {
    let factors = colour.to_rgba().map(|c| c as f32 / 255.0);
    let mut out = img.clone();

    for pixel in out.pixels_mut() {
        for (channel, factor) in pixel.0.iter_mut().zip(factors) {
            *channel = (*channel as f32 * factor).round() as u8;
        }
    }

    out
}

fn to_byte(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(rgba))
    }

    #[test]
    fn test_opaque_over_anything() {
        let mut dst = solid(2, 2, [0, 0, 255, 255]);
        let src = solid(2, 2, [255, 0, 0, 255]);
        blend_over(&mut dst, &src);
        assert_eq!(dst.get_pixel(1, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_transparent_over_keeps_background() {
        let mut dst = solid(1, 1, [10, 20, 30, 200]);
        let src = solid(1, 1, [255, 255, 255, 0]);
        blend_over(&mut dst, &src);
        assert_eq!(dst.get_pixel(0, 0).0, [10, 20, 30, 200]);
    }

    #[test]
    fn test_half_alpha_over_opaque() {
        let mut dst = solid(1, 1, [0, 0, 0, 255]);
        let src = solid(1, 1, [255, 255, 255, 128]);
        blend_over(&mut dst, &src);

        let [r, g, b, a] = dst.get_pixel(0, 0).0;
        assert_eq!(a, 255);
        assert_eq!(r, 128);
        assert_eq!((r, g), (g, b));
    }

    #[test]
    fn test_both_transparent() {
        let mut dst = solid(1, 1, [5, 5, 5, 0]);
        let src = solid(1, 1, [9, 9, 9, 0]);
        blend_over(&mut dst, &src);
        assert_eq!(dst.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_recolor_white_is_identity() {
        let img = solid(2, 1, [12, 34, 56, 78]);
        assert_eq!(recolor(&img, Colour::WHITE), img);
    }

    #[test]
    fn test_recolor_scales_channels() {
        let img = solid(3, 2, [200, 100, 50, 255]);
        let out = recolor(&img, Colour::new(255, 0, 128, 128));

        assert_eq!(out.dimensions(), (3, 2));
        assert_eq!(out.get_pixel(2, 1).0, [200, 0, 25, 128]);
    }
}
