//! Configuration management for WSI Patcher.
//!
//! This module provides the CLI configuration:
//! - Command-line arguments via clap
//! - Environment variables with `WSI_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Example
//!
//! ```ignore
//! use wsi_patcher::config::Config;
//!
//! // Parse from command line and environment
//! let config = Config::parse();
//!
//! println!("Patching {}x{} with overlap {}", config.patch_dim, config.patch_dim, config.overlap);
//! ```
//!
//! # Environment Variables
//!
//! All configuration options can be set via environment variables with the `WSI_` prefix:
//!
//! - `WSI_PATCH_DIM` - Patch dimension in pixels (default: 256)
//! - `WSI_OVERLAP` - Patch overlap in pixels (default: 0)
//! - `WSI_SERIES` - Resolution series index (default: 0)
//! - `WSI_SLIDE_DIR` - Directory of slide images (default: imgs/czis)
//! - `WSI_PATCH_DIR` - Output directory for patches (default: imgs/patches)
//! - `WSI_JPG_DIR` - Output directory for whole-slide previews (default: imgs/jpgs)
//! - `WSI_LOG_FILE` - Append-only log file path (default: log.txt)
//! - `WSI_MAX_DECODE_BYTES` - Decoder memory budget in bytes (default: 2 GiB)

use std::path::PathBuf;

use clap::Parser;

use crate::patch::{DEFAULT_PURPLE_SCALE, DEFAULT_PURPLE_THRESHOLD};

// =============================================================================
// Default Values
// =============================================================================

/// Default patch dimension in pixels.
pub const DEFAULT_PATCH_DIM: u32 = 256;

/// Default patch overlap in pixels.
pub const DEFAULT_OVERLAP: u32 = 0;

/// Default resolution series index (0 = highest resolution).
pub const DEFAULT_SERIES: u32 = 0;

/// Default slide input directory.
pub const DEFAULT_SLIDE_DIR: &str = "imgs/czis";

/// Default patch output directory.
pub const DEFAULT_PATCH_DIR: &str = "imgs/patches";

/// Default whole-slide preview output directory.
pub const DEFAULT_JPG_DIR: &str = "imgs/jpgs";

/// Default log file path.
pub const DEFAULT_LOG_FILE: &str = "log.txt";

/// Default decoder memory budget (2 GiB).
pub const DEFAULT_MAX_DECODE_BYTES: u64 = 2 * 1024 * 1024 * 1024;

/// Resize value meaning "no resize".
pub const NO_RESIZE: &str = "0,0";

// =============================================================================
// CLI Arguments
// =============================================================================

/// WSI Patcher - batch patch extraction for Whole Slide Images.
///
/// Tiles each slide in the input directory into fixed-size patches, keeps
/// the patches that look like purple-stained tissue, and records a binary
/// coverage map per slide. Optionally exports a downsampled whole-slide
/// preview JPEG.
#[derive(Parser, Debug, Clone)]
#[command(name = "wsi-patcher")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Patch Geometry
    // =========================================================================
    /// Patch dimension in pixels (256/512 etc.).
    #[arg(long, default_value_t = DEFAULT_PATCH_DIM, env = "WSI_PATCH_DIM")]
    pub patch_dim: u32,

    /// By how many pixels adjacent patches should overlap. Must be smaller
    /// than the patch dimension.
    #[arg(long, default_value_t = DEFAULT_OVERLAP, env = "WSI_OVERLAP")]
    pub overlap: u32,

    /// Resolution series index. Lower number = higher resolution.
    #[arg(long, default_value_t = DEFAULT_SERIES, env = "WSI_SERIES")]
    pub series: u32,

    // =========================================================================
    // Directories
    // =========================================================================
    /// Directory containing the slide images.
    #[arg(long, default_value = DEFAULT_SLIDE_DIR, env = "WSI_SLIDE_DIR")]
    pub slide_dir: PathBuf,

    /// Where to save generated patches.
    #[arg(long, default_value = DEFAULT_PATCH_DIR, env = "WSI_PATCH_DIR")]
    pub patch_dir: PathBuf,

    /// Where to save whole-slide preview JPEGs.
    #[arg(long, default_value = DEFAULT_JPG_DIR, env = "WSI_JPG_DIR")]
    pub jpg_dir: PathBuf,

    /// Append-only log file path.
    #[arg(long, default_value = DEFAULT_LOG_FILE, env = "WSI_LOG_FILE")]
    pub log_file: PathBuf,

    // =========================================================================
    // Behavior Flags
    // =========================================================================
    /// Save a whole-slide preview JPEG per slide. Large series may exhaust
    /// the decoder memory budget; such slides are logged and skipped.
    #[arg(long, default_value_t = false)]
    pub jpg_wsi: bool,

    /// Keep blank patches (no pixel variation, such as at slide edges)
    /// instead of discarding them.
    #[arg(long, default_value_t = false)]
    pub save_blank: bool,

    /// Skip patch generation entirely and only export previews. Use a high
    /// series value to keep the render small.
    #[arg(long, default_value_t = false)]
    pub no_patch: bool,

    /// Optional preview canvas dimensions as "height,width". The preview is
    /// rotated and padded as needed to fill the canvas exactly. "0,0" means
    /// no resize.
    #[arg(long, default_value = NO_RESIZE, env = "WSI_RESIZE")]
    pub resize: String,

    // =========================================================================
    // Tissue Heuristic
    // =========================================================================
    /// Number of pooled purple cells required for a patch to count as tissue.
    #[arg(long, default_value_t = DEFAULT_PURPLE_THRESHOLD, env = "WSI_PURPLE_THRESHOLD")]
    pub purple_threshold: usize,

    /// Downsample grid resolution for the purple check.
    #[arg(long, default_value_t = DEFAULT_PURPLE_SCALE, env = "WSI_PURPLE_SCALE")]
    pub purple_scale: usize,

    // =========================================================================
    // Engine Configuration
    // =========================================================================
    /// Decoder memory budget in bytes. 0 disables the limit.
    #[arg(long, default_value_t = DEFAULT_MAX_DECODE_BYTES, env = "WSI_MAX_DECODE_BYTES")]
    pub max_decode_bytes: u64,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    ///
    /// Configuration errors are fatal and reported before any slide is
    /// processed.
    pub fn validate(&self) -> Result<(), String> {
        if self.patch_dim == 0 {
            return Err("patch_dim must be greater than 0".to_string());
        }

        // Step size is patch_dim - overlap and must stay positive.
        if self.overlap >= self.patch_dim {
            return Err(format!(
                "overlap ({}) must be smaller than patch_dim ({})",
                self.overlap, self.patch_dim
            ));
        }

        if self.purple_scale == 0 {
            return Err("purple_scale must be greater than 0".to_string());
        }

        self.parse_resize().map(|_| ())
    }

    /// Parse the `--resize` value into target `(height, width)` dimensions.
    ///
    /// Returns `Ok(None)` for the default "0,0" (no resize). Both values
    /// must be zero or both nonzero.
    pub fn parse_resize(&self) -> Result<Option<(u32, u32)>, String> {
        let mut parts = self.resize.split(',');
        let (h, w) = match (parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(w), None) => (h.trim(), w.trim()),
            _ => {
                return Err(format!(
                    "resize must be two comma-separated integers (\"height,width\"), got \"{}\"",
                    self.resize
                ))
            }
        };

        let height: u32 = h
            .parse()
            .map_err(|_| format!("invalid resize height \"{}\"", h))?;
        let width: u32 = w
            .parse()
            .map_err(|_| format!("invalid resize width \"{}\"", w))?;

        match (height, width) {
            (0, 0) => Ok(None),
            (0, _) | (_, 0) => Err(format!(
                "resize dimensions must both be nonzero (or \"0,0\" for none), got \"{}\"",
                self.resize
            )),
            _ => Ok(Some((height, width))),
        }
    }

    /// Sliding-window step size in pixels.
    pub fn step(&self) -> u32 {
        self.patch_dim - self.overlap
    }
}

// =============================================================================
// Tests
// =============================================================================
