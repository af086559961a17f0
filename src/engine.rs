//! Process-wide decode engine.
//!
//! The [`DecodeEngine`] is the single image-decoding context for a run. It is
//! constructed once in `main` before any slide is opened and dropped once
//! after the last slide has been processed; it is never re-initialized
//! mid-run. All slide-opening calls go through an explicit `&DecodeEngine`
//! rather than a hidden global.
//!
//! The engine owns the decoder memory budget. Slides whose decode would
//! exceed the budget fail to open with a [`SlideError`], which callers treat
//! as a recoverable per-slide condition.

use std::path::Path;

use image::Limits;
use tracing::debug;

use crate::error::{EngineError, SlideError};
use crate::slide::ImageSlide;

/// Smallest decoder memory budget the engine accepts, in bytes.
///
/// Anything below this cannot decode even a single patch-sized region.
pub const MIN_DECODE_BYTES: u64 = 1024 * 1024;

/// The process-wide image-decoding engine.
///
/// Holds the decoder resource limits applied to every slide opened during
/// the run. Construct with [`DecodeEngine::init`] before the first slide;
/// the engine is released when dropped at the end of the run.
#[derive(Debug)]
pub struct DecodeEngine {
    limits: Limits,
}

impl DecodeEngine {
    /// Initialize the engine with a decoder memory budget in bytes.
    ///
    /// A budget of `0` disables the limit entirely.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::BudgetTooSmall`] for a nonzero budget below
    /// [`MIN_DECODE_BYTES`]. Engine initialization failures are fatal.
    pub fn init(max_decode_bytes: u64) -> Result<Self, EngineError> {
        if max_decode_bytes != 0 && max_decode_bytes < MIN_DECODE_BYTES {
            return Err(EngineError::BudgetTooSmall {
                bytes: max_decode_bytes,
                minimum: MIN_DECODE_BYTES,
            });
        }

        let mut limits = Limits::no_limits();
        if max_decode_bytes != 0 {
            limits.max_alloc = Some(max_decode_bytes);
        }

        debug!(max_decode_bytes, "decode engine initialized");
        Ok(Self { limits })
    }

    /// Open a slide at the given resolution series.
    ///
    /// The returned [`ImageSlide`] is a scoped resource: it is released when
    /// it goes out of scope, even if the slide's processing fails.
    ///
    /// # Errors
    ///
    /// Returns a [`SlideError`] if the file cannot be opened or decoded
    /// (including decodes that exceed the engine's memory budget).
    pub fn open_slide(&self, path: &Path, series: u32) -> Result<ImageSlide, SlideError> {
        ImageSlide::open(path, series, self.limits.clone())
    }
}

impl Drop for DecodeEngine {
    fn drop(&mut self) {
        debug!("decode engine released");
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_default_budget() {
        let engine = DecodeEngine::init(2 * 1024 * 1024 * 1024);
        assert!(engine.is_ok());
    }

    #[test]
    fn test_init_unlimited() {
        let engine = DecodeEngine::init(0);
        assert!(engine.is_ok());
    }

    #[test]
    fn test_init_budget_too_small() {
        let result = DecodeEngine::init(1024);
        assert!(result.is_err());
        match result.unwrap_err() {
            EngineError::BudgetTooSmall { bytes, minimum } => {
                assert_eq!(bytes, 1024);
                assert_eq!(minimum, MIN_DECODE_BYTES);
            }
        }
    }

    #[test]
    fn test_open_missing_slide() {
        let engine = DecodeEngine::init(0).unwrap();
        let result = engine.open_slide(Path::new("does/not/exist.png"), 0);
        assert!(matches!(result, Err(SlideError::Open { .. })));
    }
}
