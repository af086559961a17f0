//! Aspect-aware resize onto a fixed canvas.

use image::imageops::{self, FilterType};
use image::RgbImage;

/// Scale `image` to fit a `target_width` x `target_height` canvas,
/// rotating 90 degrees first if the source and target orientations
/// (portrait/landscape) differ, and centering the result on a black canvas
/// of exactly the requested dimensions.
///
/// Ratio rules: a square target scales by `target_width / max(side)`, a
/// non-square target by `min(target side) / min(source side)`.
pub fn fit_to_canvas(image: &RgbImage, target_height: u32, target_width: u32) -> RgbImage {
    let (mut old_width, mut old_height) = image.dimensions();

    let target_portrait = target_height > target_width;
    let source_portrait = old_height > old_width;

    let rotated;
    let source = if target_portrait != source_portrait {
        rotated = imageops::rotate90(image);
        (old_width, old_height) = rotated.dimensions();
        &rotated
    } else {
        image
    };

    let ratio = if target_height == target_width {
        target_width as f64 / old_width.max(old_height) as f64
    } else {
        target_width.min(target_height) as f64 / old_width.min(old_height) as f64
    };

    let new_width = ((old_width as f64 * ratio) as u32).max(1);
    let new_height = ((old_height as f64 * ratio) as u32).max(1);
    let scaled = imageops::resize(source, new_width, new_height, FilterType::Lanczos3);

    let mut canvas = RgbImage::new(target_width, target_height);
    let offset_x = (target_width as i64 - new_width as i64) / 2;
    let offset_y = (target_height as i64 - new_height as i64) / 2;
    imageops::overlay(&mut canvas, &scaled, offset_x, offset_y);
    canvas
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(width: u32, height: u32, value: u8) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([value, value, value]))
    }

    #[test]
    fn test_canvas_has_exact_dimensions() {
        let image = solid(100, 50, 200);
        let out = fit_to_canvas(&image, 64, 128);
        assert_eq!(out.dimensions(), (128, 64));
    }

    #[test]
    fn test_square_target_fits_long_side() {
        // 200x100 into 100x100: ratio 0.5, scaled to 100x50, centered
        // vertically with 25px black bands.
        let image = solid(200, 100, 200);
        let out = fit_to_canvas(&image, 100, 100);

        assert_eq!(out.dimensions(), (100, 100));
        assert_eq!(out.get_pixel(50, 50)[0], 200);
        assert_eq!(out.get_pixel(50, 10)[0], 0);
        assert_eq!(out.get_pixel(50, 90)[0], 0);
    }

    #[test]
    fn test_orientation_mismatch_rotates() {
        // Landscape source, portrait target: the source rotates, so the
        // content fills the canvas tall rather than wide.
        let image = solid(200, 100, 200);
        let out = fit_to_canvas(&image, 200, 100);

        assert_eq!(out.dimensions(), (100, 200));
        // After rotation the source is 100x200, matching the target
        // exactly: no black padding anywhere.
        assert_eq!(out.get_pixel(0, 0)[0], 200);
        assert_eq!(out.get_pixel(99, 199)[0], 200);
    }

    #[test]
    fn test_matching_orientation_not_rotated() {
        let image = solid(200, 100, 200);
        let out = fit_to_canvas(&image, 100, 200);
        assert_eq!(out.dimensions(), (200, 100));
        assert_eq!(out.get_pixel(100, 50)[0], 200);
    }

    #[test]
    fn test_content_centered() {
        // 100x100 into non-square 200x400 (landscape target, square
        // source counts as landscape too; min(target)/min(source) =
        // 200/100 = 2): scaled to 200x200, centered at x offset 100.
        let image = solid(100, 100, 200);
        let out = fit_to_canvas(&image, 200, 400);

        assert_eq!(out.dimensions(), (400, 200));
        assert_eq!(out.get_pixel(50, 100)[0], 0);
        assert_eq!(out.get_pixel(200, 100)[0], 200);
        assert_eq!(out.get_pixel(350, 100)[0], 0);
    }
}
