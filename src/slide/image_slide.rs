//! Image-crate-backed slide implementation.
//!
//! Decodes the whole slide file once at open time, downsampled to the
//! requested resolution series, and serves region reads from the decoded
//! plane. Format handling (PNG, JPEG, TIFF, BMP) is entirely the `image`
//! crate's concern.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageReader, Limits, RgbImage};
use ndarray::Array3;
use tracing::debug;

use crate::error::SlideError;
use crate::slide::RegionReader;

/// A slide decoded at a fixed resolution series.
///
/// Series `N` halves the full-resolution dimensions `N` times, mirroring
/// pyramid levels: series 0 is the native resolution, each higher series is
/// half the previous one in each dimension.
///
/// The slide is a scoped resource: the decoded plane is freed when the
/// value is dropped, even if processing the slide fails partway.
pub struct ImageSlide {
    pixels: RgbImage,
    series: u32,
}

impl ImageSlide {
    /// Open and decode a slide file at the given series.
    ///
    /// `limits` is the decoder resource budget supplied by the engine; a
    /// decode that would exceed it fails with [`SlideError::Decode`].
    pub fn open(path: &Path, series: u32, limits: Limits) -> Result<Self, SlideError> {
        let mut reader = ImageReader::open(path).map_err(|source| SlideError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        reader.limits(limits);

        let decoded = reader.decode().map_err(|e| SlideError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let full = decoded.to_rgb8();

        let slide = Self::from_image(full, series);
        let (width, height) = slide.dimensions();
        debug!(path = %path.display(), series, width, height, "opened slide");
        Ok(slide)
    }

    /// Build a slide directly from decoded pixels, downsampling for the
    /// requested series.
    pub fn from_image(full: RgbImage, series: u32) -> Self {
        let pixels = if series == 0 {
            full
        } else {
            let (w, h) = full.dimensions();
            let sw = (w >> series).max(1);
            let sh = (h >> series).max(1);
            imageops::resize(&full, sw, sh, FilterType::Triangle)
        };

        Self { pixels, series }
    }

    /// The resolution series this slide was opened at.
    pub fn series(&self) -> u32 {
        self.series
    }
}

impl RegionReader for ImageSlide {
    fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn read_region(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Array3<f32>, SlideError> {
        let (width, height) = self.dimensions();
        let in_bounds = x.checked_add(w).is_some_and(|r| r <= width)
            && y.checked_add(h).is_some_and(|b| b <= height);
        if !in_bounds {
            return Err(SlideError::RegionOutOfBounds {
                x,
                y,
                w,
                h,
                width,
                height,
            });
        }

        let mut region = Array3::zeros((h as usize, w as usize, 3));
        for row in 0..h {
            for col in 0..w {
                let pixel = self.pixels.get_pixel(x + col, y + row);
                for channel in 0..3 {
                    region[[row as usize, col as usize, channel]] = pixel[channel] as f32;
                }
            }
        }

        Ok(region)
    }
}

// =============================================================================
// Tests
// =============================================================================
