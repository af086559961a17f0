//! Per-slide coverage map.
//!
//! One cell per patch grid position, independent of overlap: cell `(r, c)`
//! is kept iff a patch whose coverage cell resolves to `(r, c)` passed
//! validation. Built incrementally during the walk and written once at the
//! end in two forms: a grayscale PNG for visual inspection (whose existence
//! doubles as the resume marker) and a lossless `.npy` array for
//! programmatic reuse.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::{GrayImage, Luma};
use ndarray::Array2;
use ndarray_npy::WriteNpyExt;

use crate::error::PatchError;

/// Binary occupancy grid of kept patch cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageMap {
    grid: Array2<u8>,
}

impl CoverageMap {
    /// Create an all-unkept map for a `width` x `height` slide tiled at
    /// `dimension`.
    ///
    /// The grid shape is `(height / dimension, width / dimension)` with
    /// integer division; the truncated edge strips of the slide have no
    /// cells, matching the walker's truncated traversal.
    pub fn new(width: u32, height: u32, dimension: u32) -> Self {
        let rows = (height / dimension) as usize;
        let cols = (width / dimension) as usize;
        Self {
            grid: Array2::zeros((rows, cols)),
        }
    }

    /// Mark cell `(row, col)` as kept.
    ///
    /// With nonzero overlap several patch positions resolve to the same
    /// cell; re-marking is last-write-wins over an identical value.
    pub fn mark(&mut self, row: usize, col: usize) {
        self.grid[[row, col]] = 1;
    }

    /// Number of grid rows.
    pub fn rows(&self) -> usize {
        self.grid.nrows()
    }

    /// Number of grid columns.
    pub fn cols(&self) -> usize {
        self.grid.ncols()
    }

    /// Whether cell `(row, col)` is marked kept.
    pub fn is_marked(&self, row: usize, col: usize) -> bool {
        self.grid[[row, col]] == 1
    }

    /// Total number of kept cells.
    pub fn marked_count(&self) -> usize {
        self.grid.iter().filter(|&&v| v == 1).count()
    }

    /// The underlying 0/1 grid.
    pub fn as_array(&self) -> &Array2<u8> {
        &self.grid
    }

    /// Render the map as a grayscale image: 0 = unkept, 255 = kept.
    pub fn to_image(&self) -> GrayImage {
        let (rows, cols) = self.grid.dim();
        let mut img = GrayImage::new(cols as u32, rows as u32);
        for row in 0..rows {
            for col in 0..cols {
                img.put_pixel(col as u32, row as u32, Luma([self.grid[[row, col]] * 255]));
            }
        }
        img
    }

    /// Write the rendered grayscale map to `path`.
    pub fn write_png(&self, path: &Path) -> Result<(), PatchError> {
        self.to_image().save(path).map_err(|e| PatchError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Write the raw 0/1 grid to `path` in NumPy `.npy` format.
    pub fn write_npy(&self, path: &Path) -> Result<(), PatchError> {
        let file = File::create(path)?;
        self.grid
            .write_npy(BufWriter::new(file))
            .map_err(|e| PatchError::Write {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }
}

// =============================================================================
// Tests
// =============================================================================
