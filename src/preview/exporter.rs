//! Whole-slide JPEG export.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use tracing::{debug, info};

use crate::engine::DecodeEngine;
use crate::error::PreviewError;
use crate::patch::normalize;
use crate::preview::resize::fit_to_canvas;
use crate::slide::RegionReader;

/// Exports downsampled whole-slide previews.
pub struct PreviewExporter {
    jpg_dir: PathBuf,
}

impl PreviewExporter {
    pub fn new(jpg_dir: &Path) -> Self {
        Self {
            jpg_dir: jpg_dir.to_path_buf(),
        }
    }

    /// Path of the slide's preview JPEG.
    pub fn preview_path(&self, slide_id: &str, series: u32) -> PathBuf {
        self.jpg_dir.join(format!("{}_S{}.jpg", slide_id, series))
    }

    /// Path of the slide's resized preview JPEG.
    pub fn resized_path(&self, slide_id: &str, series: u32) -> PathBuf {
        self.jpg_dir
            .join(format!("{}_{}_RESIZED.jpg", slide_id, series))
    }

    /// Render the slide at `series`, normalize it, and save it as a JPEG.
    /// With `target` dimensions `(height, width)`, additionally save a
    /// rotated/scaled/padded rendition on an exact-size canvas.
    ///
    /// Returns the paths written.
    ///
    /// # Errors
    ///
    /// Fails if the slide cannot be rendered within the engine's memory
    /// budget or the JPEGs cannot be written. Callers treat this as a
    /// per-slide condition: log and continue with the next slide.
    pub fn export(
        &self,
        engine: &DecodeEngine,
        slide_path: &Path,
        slide_id: &str,
        series: u32,
        target: Option<(u32, u32)>,
    ) -> Result<Vec<PathBuf>, PreviewError> {
        fs::create_dir_all(&self.jpg_dir)?;

        let slide = engine.open_slide(slide_path, series)?;
        let (width, height) = slide.dimensions();
        debug!(slide_id, width, height, "rendering whole-slide preview");

        let frame = slide.read_region(0, 0, width, height)?;
        let scaled = normalize(&frame).mapv(|v| v * 255.0);

        let image = RgbImage::from_fn(width, height, |x, y| {
            let row = y as usize;
            let col = x as usize;
            Rgb([
                scaled[[row, col, 0]].clamp(0.0, 255.0).round() as u8,
                scaled[[row, col, 1]].clamp(0.0, 255.0).round() as u8,
                scaled[[row, col, 2]].clamp(0.0, 255.0).round() as u8,
            ])
        });

        let mut written = Vec::new();

        let path = self.preview_path(slide_id, series);
        image.save(&path).map_err(|e| PreviewError::Write {
            path: path.clone(),
            message: e.to_string(),
        })?;
        written.push(path);

        if let Some((target_height, target_width)) = target {
            let resized = fit_to_canvas(&image, target_height, target_width);
            let path = self.resized_path(slide_id, series);
            resized.save(&path).map_err(|e| PreviewError::Write {
                path: path.clone(),
                message: e.to_string(),
            })?;
            written.push(path);
        }

        info!(slide_id, series, previews = written.len(), "previews saved");
        Ok(written)
    }
}

// =============================================================================
// Tests
// =============================================================================
