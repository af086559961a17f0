//! Purple-tissue heuristic.
//!
//! Classifies whether a patch is predominantly purple-stained tissue rather
//! than background. Full-resolution pixel-wise checks are expensive and
//! noisy at patch scale, so the patch is first pooled down to a coarse grid
//! by block averaging and the color test runs on the pooled cells.
//!
//! The thresholds are empirically tuned constants; treat them as
//! configuration.

use ndarray::{s, Array3};

/// Number of qualifying pooled cells required to call a patch purple.
pub const DEFAULT_PURPLE_THRESHOLD: usize = 100;

/// Downsample grid resolution for the purple check.
pub const DEFAULT_PURPLE_SCALE: usize = 16;

/// Tunable parameters for the purple check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurpleParams {
    /// Minimum count of qualifying pooled cells (strict `>`).
    pub threshold: usize,

    /// Target grid resolution for block-average pooling.
    pub scale: usize,
}

impl Default for PurpleParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_PURPLE_THRESHOLD,
            scale: DEFAULT_PURPLE_SCALE,
        }
    }
}

/// Determine whether a patch is predominantly purple.
///
/// The patch must carry RGB channels in that order; values are expected on
/// the [0,255] scale the walker produces after normalization.
///
/// A pooled cell qualifies as purple iff all three hold:
/// `R > G - 10`, `B > G - 10`, `(R + B) / 2 > G + 20`.
pub fn is_purple(patch: &Array3<f32>, params: &PurpleParams) -> bool {
    let (height, width, _) = patch.dim();

    // Block size degenerates to 1 when the patch is smaller than the scale.
    let block_h = (height / params.scale).max(1);
    let block_w = (width / params.scale).max(1);

    let pooled = block_average(patch, block_h, block_w);
    let (rows, cols, _) = pooled.dim();

    let mut purple_cells = 0;
    for row in 0..rows {
        for col in 0..cols {
            let r = pooled[[row, col, 0]];
            let g = pooled[[row, col, 1]];
            let b = pooled[[row, col, 2]];

            if r > g - 10.0 && b > g - 10.0 && (r + b) / 2.0 > g + 20.0 {
                purple_cells += 1;
            }
        }
    }

    purple_cells > params.threshold
}

/// Downsample by averaging non-overlapping `block_h` x `block_w` blocks,
/// channels preserved.
///
/// Edge blocks that overhang the patch average as if the patch were
/// zero-padded to a whole number of blocks.
fn block_average(patch: &Array3<f32>, block_h: usize, block_w: usize) -> Array3<f32> {
    let (height, width, channels) = patch.dim();
    let rows = height.div_ceil(block_h);
    let cols = width.div_ceil(block_w);
    let block_len = (block_h * block_w) as f32;

    let mut pooled = Array3::zeros((rows, cols, channels));
    for row in 0..rows {
        for col in 0..cols {
            let y0 = row * block_h;
            let x0 = col * block_w;
            let y1 = (y0 + block_h).min(height);
            let x1 = (x0 + block_w).min(width);

            for channel in 0..channels {
                let sum = patch.slice(s![y0..y1, x0..x1, channel]).sum();
                pooled[[row, col, channel]] = sum / block_len;
            }
        }
    }

    pooled
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_patch(height: usize, width: usize, r: f32, g: f32, b: f32) -> Array3<f32> {
        let mut patch = Array3::zeros((height, width, 3));
        for row in 0..height {
            for col in 0..width {
                patch[[row, col, 0]] = r;
                patch[[row, col, 1]] = g;
                patch[[row, col, 2]] = b;
            }
        }
        patch
    }

    #[test]
    fn test_deep_purple_patch_is_purple() {
        // 256x256 pools to a 16x16 grid: 256 qualifying cells > 100.
        let patch = uniform_patch(256, 256, 150.0, 80.0, 150.0);
        assert!(is_purple(&patch, &PurpleParams::default()));
    }

    #[test]
    fn test_white_patch_is_not_purple() {
        // (R + B) / 2 = 255 is not > G + 20 = 275.
        let patch = uniform_patch(256, 256, 255.0, 255.0, 255.0);
        assert!(!is_purple(&patch, &PurpleParams::default()));
    }

    #[test]
    fn test_black_patch_is_not_purple() {
        let patch = uniform_patch(256, 256, 0.0, 0.0, 0.0);
        assert!(!is_purple(&patch, &PurpleParams::default()));
    }

    #[test]
    fn test_green_patch_is_not_purple() {
        let patch = uniform_patch(256, 256, 40.0, 200.0, 40.0);
        assert!(!is_purple(&patch, &PurpleParams::default()));
    }

    #[test]
    fn test_threshold_is_strict() {
        // A 256x256 purple patch pools to exactly 256 qualifying cells; the
        // count must strictly exceed the threshold.
        let patch = uniform_patch(256, 256, 150.0, 80.0, 150.0);
        let params = PurpleParams {
            threshold: 256,
            scale: 16,
        };
        assert!(!is_purple(&patch, &params));

        let params = PurpleParams {
            threshold: 255,
            scale: 16,
        };
        assert!(is_purple(&patch, &params));
    }

    #[test]
    fn test_small_patch_degenerates_to_unit_blocks() {
        // 4x4 patch with scale 16: block size clamps to 1, pooling is a
        // no-op and all 16 cells are checked individually.
        let patch = uniform_patch(4, 4, 150.0, 80.0, 150.0);
        let params = PurpleParams {
            threshold: 15,
            scale: 16,
        };
        assert!(is_purple(&patch, &params));
    }

    #[test]
    fn test_block_average_exact_blocks() {
        let mut patch = Array3::zeros((4, 4, 3));
        // One 2x2 block of 100s in the top-left corner of channel 0.
        for row in 0..2 {
            for col in 0..2 {
                patch[[row, col, 0]] = 100.0;
            }
        }

        let pooled = block_average(&patch, 2, 2);
        assert_eq!(pooled.dim(), (2, 2, 3));
        assert_eq!(pooled[[0, 0, 0]], 100.0);
        assert_eq!(pooled[[0, 1, 0]], 0.0);
        assert_eq!(pooled[[1, 1, 0]], 0.0);
    }

    #[test]
    fn test_block_average_edge_blocks_zero_padded() {
        // 3 columns with block width 2: the second column block only covers
        // one real column and averages as if padded with zeros.
        let patch = Array3::from_elem((2, 3, 3), 60.0);
        let pooled = block_average(&patch, 2, 2);

        assert_eq!(pooled.dim(), (1, 2, 3));
        assert_eq!(pooled[[0, 0, 0]], 60.0);
        assert_eq!(pooled[[0, 1, 0]], 30.0);
    }

    #[test]
    fn test_mixed_patch_counts_only_purple_cells() {
        // Left half purple, right half white, pooled on a 16x16 grid:
        // 128 purple cells > 100, so still purple overall.
        let mut patch = uniform_patch(256, 256, 255.0, 255.0, 255.0);
        for row in 0..256 {
            for col in 0..128 {
                patch[[row, col, 0]] = 150.0;
                patch[[row, col, 1]] = 80.0;
                patch[[row, col, 2]] = 150.0;
            }
        }
        assert!(is_purple(&patch, &PurpleParams::default()));

        // A quarter purple (64 cells) is below the default threshold.
        let mut patch = uniform_patch(256, 256, 255.0, 255.0, 255.0);
        for row in 0..256 {
            for col in 0..64 {
                patch[[row, col, 0]] = 150.0;
                patch[[row, col, 1]] = 80.0;
                patch[[row, col, 2]] = 150.0;
            }
        }
        assert!(!is_purple(&patch, &PurpleParams::default()));
    }
}
