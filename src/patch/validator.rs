use ndarray::Array3;

use crate::patch::purple::{is_purple, PurpleParams};

/// Decide whether a patch is worth keeping.
///
/// A patch is valid iff the purple heuristic accepts it AND it is not
/// perfectly flat (`max - min > 0`, global over all elements). Flat patches
/// come from readers that return empty or solid-color data (out-of-bounds
/// or error reads) and must not be kept. Callers keeping everything
/// regardless use the `save_blank` flag upstream instead of weakening this
/// check.
pub fn is_valid_patch(patch: &Array3<f32>, params: &PurpleParams) -> bool {
    let min = patch.fold(f32::INFINITY, |acc, &v| acc.min(v));
    let max = patch.fold(f32::NEG_INFINITY, |acc, &v| acc.max(v));

    is_purple(patch, params) && max - min > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> PurpleParams {
        // Small threshold so compact test patches can qualify.
        PurpleParams {
            threshold: 2,
            scale: 16,
        }
    }

    fn uniform(size: usize, r: f32, g: f32, b: f32) -> Array3<f32> {
        let mut patch = Array3::zeros((size, size, 3));
        for row in 0..size {
            for col in 0..size {
                patch[[row, col, 0]] = r;
                patch[[row, col, 1]] = g;
                patch[[row, col, 2]] = b;
            }
        }
        patch
    }

    #[test]
    fn test_varied_purple_patch_accepted() {
        let mut patch = uniform(16, 150.0, 80.0, 150.0);
        patch[[0, 0, 0]] = 160.0;
        assert!(is_valid_patch(&patch, &params()));
    }

    #[test]
    fn test_constant_patch_rejected() {
        // A truly constant patch fails the flat check; no constant value
        // can satisfy the purple conditions either, so both clauses reject.
        let patch = Array3::from_elem((16, 16, 3), 128.0);
        assert!(!is_valid_patch(&patch, &params()));

        let black = Array3::<f32>::zeros((16, 16, 3));
        assert!(!is_valid_patch(&black, &params()));
    }

    #[test]
    fn test_channel_constant_purple_accepted() {
        // Constant per channel but purple: the global flat check spans
        // channels, so cross-channel variation counts as contrast.
        let patch = uniform(16, 150.0, 80.0, 150.0);
        assert!(is_valid_patch(&patch, &params()));
    }

    #[test]
    fn test_varied_non_purple_patch_rejected() {
        let mut patch = Array3::zeros((16, 16, 3));
        for row in 0..16 {
            for col in 0..16 {
                let v = 200.0 + (row % 2) as f32 * 10.0;
                patch[[row, col, 0]] = v;
                patch[[row, col, 1]] = v;
                patch[[row, col, 2]] = v;
            }
        }
        assert!(!is_valid_patch(&patch, &params()));
    }
}
