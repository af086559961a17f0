//! Sliding-window traversal of the slide plane.
//!
//! The walker enumerates patch positions in a raster scan (x outer, y
//! inner, ascending), reads each region, normalizes and scales it, runs
//! validation, persists accepted patches, and marks the coverage map.
//!
//! # Traversal geometry
//!
//! Positions on each axis are `0, step, 2*step, ...` while strictly
//! `pos < extent - dimension`. The rightmost and bottommost strips of the
//! slide are therefore never sampled, and a slide no larger than one patch
//! yields no positions at all. This truncation is part of the tiling
//! contract that downstream consumers depend on; do not widen the bound.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::PatchError;
use crate::patch::coverage::CoverageMap;
use crate::patch::normalize::normalize;
use crate::patch::purple::PurpleParams;
use crate::patch::validator::is_valid_patch;
use crate::patch::writer::PatchWriter;
use crate::slide::RegionReader;

/// Positions of the sliding window along one axis.
///
/// Yields `0, step, 2*step, ...` while strictly `pos < extent - dimension`.
/// Empty when `extent <= dimension`.
pub fn axis_positions(extent: u32, dimension: u32, step: u32) -> impl Iterator<Item = u32> {
    (0..extent.saturating_sub(dimension)).step_by(step as usize)
}

/// Options controlling one slide's walk.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Patch dimension in pixels (square).
    pub dimension: u32,

    /// Overlap between adjacent patches in pixels. Must be smaller than
    /// `dimension` (validated by the configuration layer).
    pub overlap: u32,

    /// Keep every patch regardless of validation.
    pub save_blank: bool,

    /// Tunables for the purple-tissue heuristic.
    pub purple: PurpleParams,
}

impl WalkOptions {
    /// Sliding-window step size.
    pub fn step(&self) -> u32 {
        self.dimension - self.overlap
    }
}

/// Result of walking one slide.
pub struct WalkReport {
    /// Paths of all kept patches, in traversal order.
    pub patches: Vec<PathBuf>,

    /// Occupancy grid of kept patch cells.
    pub coverage: CoverageMap,
}

/// Drives extraction, validation, and persistence over one slide.
pub struct GridWalker<'a, R: RegionReader> {
    reader: &'a R,
    writer: &'a PatchWriter,
    options: WalkOptions,
}

impl<'a, R: RegionReader> GridWalker<'a, R> {
    pub fn new(reader: &'a R, writer: &'a PatchWriter, options: WalkOptions) -> Self {
        Self {
            reader,
            writer,
            options,
        }
    }

    /// Walk the slide plane.
    ///
    /// For each window position: read the region, normalize it to [0,1],
    /// scale to [0,255], validate (or accept unconditionally with
    /// `save_blank`), persist accepted patches, and mark coverage cell
    /// `[y / dimension][x / dimension]`. The division uses the full patch
    /// dimension, not the step, so overlapping positions can resolve to
    /// the same cell.
    ///
    /// A failed region read is logged and skipped; the walk continues.
    ///
    /// # Errors
    ///
    /// Returns an error only when persisting an accepted patch fails,
    /// which abandons the slide (its coverage map is not written, so the
    /// slide is retried on the next run).
    pub fn walk(&self) -> Result<WalkReport, PatchError> {
        let (width, height) = self.reader.dimensions();
        let dimension = self.options.dimension;
        let step = self.options.step();

        let mut coverage = CoverageMap::new(width, height, dimension);
        let mut patches = Vec::new();

        for x in axis_positions(width, dimension, step) {
            for y in axis_positions(height, dimension, step) {
                let region = match self.reader.read_region(x, y, dimension, dimension) {
                    Ok(region) => region,
                    Err(e) => {
                        warn!(x, y, error = %e, "skipping unreadable patch region");
                        continue;
                    }
                };

                let patch = normalize(&region).mapv(|v| v * 255.0);

                if self.options.save_blank || is_valid_patch(&patch, &self.options.purple) {
                    let path = self.writer.write(x, y, &patch)?;
                    patches.push(path);
                    coverage.mark((y / dimension) as usize, (x / dimension) as usize);
                }
            }
        }

        debug!(
            kept = patches.len(),
            cells = coverage.marked_count(),
            "walk finished"
        );

        Ok(WalkReport { patches, coverage })
    }
}

// =============================================================================
// Tests
// =============================================================================
