//! Patch extraction and validity filtering.
//!
//! This is the core of the crate: the sliding-window traversal of the slide
//! plane, the per-patch tissue heuristic, and the coverage-map bookkeeping.
//!
//! # Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        GridWalker                           │
//! │  for each (x, y):                                           │
//! │    read region ──▶ normalize ──▶ scale to [0,255]           │
//! │        │                              │                     │
//! │        ▼                              ▼                     │
//! │   skip on error              is_valid_patch / save_blank    │
//! │                                       │                     │
//! │                         ┌─────────────┴────────────┐        │
//! │                         ▼                          ▼        │
//! │                   PatchWriter               CoverageMap     │
//! │                   (PNG per patch)           (mark cell)     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`normalize`]: global min/max rescale of a pixel array to [0,1]
//! - [`is_purple`] / [`PurpleParams`]: block-pooled purple-tissue heuristic
//! - [`is_valid_patch`]: purple check plus non-degenerate-contrast check
//! - [`GridWalker`] / [`axis_positions`]: sliding-window enumeration and
//!   the extract-validate-persist loop
//! - [`CoverageMap`]: per-slide occupancy grid with PNG and `.npy` output
//! - [`PatchWriter`]: kept-patch persistence and naming

mod coverage;
mod normalize;
mod purple;
mod validator;
mod walker;
mod writer;

pub use coverage::CoverageMap;
pub use normalize::normalize;
pub use purple::{is_purple, PurpleParams, DEFAULT_PURPLE_SCALE, DEFAULT_PURPLE_THRESHOLD};
pub use validator::is_valid_patch;
pub use walker::{axis_positions, GridWalker, WalkOptions, WalkReport};
pub use writer::PatchWriter;
