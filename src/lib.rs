//! # WSI Patcher
//!
//! Batch patch extraction for Whole Slide Images (WSI).
//!
//! This library tiles very large microscopy slides into fixed-size patches
//! for downstream analysis, keeping only the patches that look like
//! purple-stained tissue, and records which grid cells were kept in a
//! per-slide binary coverage map.
//!
//! ## Features
//!
//! - **Sliding-window extraction**: configurable patch dimension and
//!   overlap, raster-scan traversal with exact, compatibility-preserving
//!   edge truncation
//! - **Tissue filtering**: block-pooled purple heuristic plus a
//!   non-degenerate-contrast check; `save_blank` keeps everything
//! - **Coverage maps**: per-slide occupancy grid written as a grayscale
//!   PNG (also the resume marker) and a NumPy `.npy` array
//! - **Idempotent resume**: slides with an existing coverage mask are
//!   skipped on subsequent runs
//! - **Previews**: optional whole-slide JPEG export with aspect-aware
//!   resize and padding
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`engine`] - Process-wide decode engine and resource budget
//! - [`slide`] - Region-reader capability and the image-backed slide
//! - [`patch`] - Grid walker, tissue heuristic, coverage map, persistence
//! - [`preview`] - Whole-slide preview export
//! - [`pipeline`] - Per-slide and per-run orchestration
//! - [`manifest`] - Resume ledger and run accounting
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use clap::Parser;
//! use wsi_patcher::{Config, DecodeEngine, PatchPipeline};
//!
//! let config = Config::parse_from(["wsi-patcher", "--slide-dir", "imgs/czis"]);
//! config.validate().expect("invalid configuration");
//!
//! let engine = DecodeEngine::init(config.max_decode_bytes).expect("engine init");
//! let pipeline = PatchPipeline::new(engine, config);
//!
//! let slides = pipeline.discover_slides().expect("listing slides");
//! let manifest = pipeline.run(&slides);
//! println!("Successfully generated {} patches!", manifest.total());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod manifest;
pub mod patch;
pub mod pipeline;
pub mod preview;
pub mod slide;

// Re-export commonly used types
pub use config::Config;
pub use engine::{DecodeEngine, MIN_DECODE_BYTES};
pub use error::{EngineError, PatchError, PreviewError, SlideError};
pub use manifest::{CompletionLedger, RunManifest};
pub use patch::{
    axis_positions, is_purple, is_valid_patch, normalize, CoverageMap, GridWalker, PatchWriter,
    PurpleParams, WalkOptions, WalkReport, DEFAULT_PURPLE_SCALE, DEFAULT_PURPLE_THRESHOLD,
};
pub use pipeline::{PatchPipeline, SlideOutcome, SLIDE_EXTENSIONS};
pub use preview::{fit_to_canvas, PreviewExporter};
pub use slide::{ImageSlide, RegionReader};
