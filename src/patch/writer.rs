//! Kept-patch persistence.
//!
//! Owns the per-slide output directory and the patch file naming:
//! `{slide_id}_{series}_{x}_{y}.png` with `x`/`y` the top-left pixel
//! coordinates of the patch within the slide plane.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use ndarray::Array3;

use crate::error::PatchError;

/// Writes kept patches for one slide.
pub struct PatchWriter {
    dir: PathBuf,
    slide_id: String,
    series: u32,
}

impl PatchWriter {
    /// Create the writer and its per-slide output directory
    /// `patch_dir/{slide_id}/`.
    pub fn create(patch_dir: &Path, slide_id: &str, series: u32) -> Result<Self, PatchError> {
        let dir = patch_dir.join(slide_id);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            slide_id: slide_id.to_string(),
            series,
        })
    }

    /// Path of the patch with top-left corner at `(x, y)`.
    pub fn patch_path(&self, x: u32, y: u32) -> PathBuf {
        self.dir
            .join(format!("{}_{}_{}_{}.png", self.slide_id, self.series, x, y))
    }

    /// Persist one patch and return its path.
    ///
    /// The patch is expected on the [0,255] scale; values are clamped and
    /// rounded to bytes.
    pub fn write(&self, x: u32, y: u32, patch: &Array3<f32>) -> Result<PathBuf, PatchError> {
        let path = self.patch_path(x, y);
        let image = array_to_rgb(patch);
        image.save(&path).map_err(|e| PatchError::Write {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(path)
    }
}

/// Convert an `(h, w, 3)` float array on the [0,255] scale to an RGB image.
fn array_to_rgb(patch: &Array3<f32>) -> RgbImage {
    let (height, width, _) = patch.dim();
    RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let row = y as usize;
        let col = x as usize;
        Rgb([
            patch[[row, col, 0]].clamp(0.0, 255.0).round() as u8,
            patch[[row, col, 1]].clamp(0.0, 255.0).round() as u8,
            patch[[row, col, 2]].clamp(0.0, 255.0).round() as u8,
        ])
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_naming() {
        let dir = tempfile::tempdir().unwrap();
        let writer = PatchWriter::create(dir.path(), "slide42", 3).unwrap();
        let path = writer.patch_path(512, 768);
        assert!(path.ends_with("slide42/slide42_3_512_768.png"));
    }

    #[test]
    fn test_create_makes_slide_directory() {
        let dir = tempfile::tempdir().unwrap();
        let _writer = PatchWriter::create(dir.path(), "s1", 0).unwrap();
        assert!(dir.path().join("s1").is_dir());
    }

    #[test]
    fn test_write_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let writer = PatchWriter::create(dir.path(), "s1", 0).unwrap();

        let mut patch = Array3::zeros((4, 4, 3));
        patch[[0, 0, 0]] = 255.0;
        patch[[2, 3, 1]] = 128.0;

        let path = writer.write(16, 32, &patch).unwrap();
        assert!(path.exists());

        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (4, 4));
        assert_eq!(loaded.get_pixel(0, 0)[0], 255);
        // array (row 2, col 3) is image pixel (3, 2)
        assert_eq!(loaded.get_pixel(3, 2)[1], 128);
        assert_eq!(loaded.get_pixel(1, 1)[2], 0);
    }

    #[test]
    fn test_write_clamps_out_of_range_values() {
        let dir = tempfile::tempdir().unwrap();
        let writer = PatchWriter::create(dir.path(), "s1", 0).unwrap();

        let mut patch = Array3::zeros((2, 2, 3));
        patch[[0, 0, 0]] = 300.0;
        patch[[1, 1, 2]] = -5.0;

        let path = writer.write(0, 0, &patch).unwrap();
        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.get_pixel(0, 0)[0], 255);
        assert_eq!(loaded.get_pixel(1, 1)[2], 0);
    }
}
