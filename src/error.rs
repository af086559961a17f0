use std::path::PathBuf;

use thiserror::Error;

/// Errors from the process-wide decode engine lifecycle.
///
/// Engine errors are fatal: the process aborts before any slide is opened.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The configured decoder memory budget is unusable.
    #[error("Decoder memory budget too small: {bytes} bytes (minimum {minimum})")]
    BudgetTooSmall { bytes: u64, minimum: u64 },
}

/// Errors when opening a slide or reading pixel regions from it.
#[derive(Debug, Error)]
pub enum SlideError {
    /// The slide file could not be opened.
    #[error("Failed to open slide {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The slide file could not be decoded.
    #[error("Failed to decode slide {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Requested region extends outside the slide plane.
    #[error("Region out of bounds: requested {w}x{h} at ({x}, {y}), slide is {width}x{height}")]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        width: u32,
        height: u32,
    },
}

/// Errors when persisting a patch or the coverage map.
#[derive(Debug, Error)]
pub enum PatchError {
    /// Reading the patch region from the slide failed.
    #[error("Region read error: {0}")]
    Region(#[from] SlideError),

    /// Encoding or writing the patch image failed.
    #[error("Failed to write patch {path}: {message}")]
    Write { path: PathBuf, message: String },

    /// Filesystem error while preparing output directories.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from whole-slide preview export.
///
/// Preview errors are recoverable: the slide's preview is skipped and the
/// run continues with the next slide.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// Rendering the full slide failed (often the decoder memory budget
    /// on huge series).
    #[error("Failed to render slide: {0}")]
    Render(#[from] SlideError),

    /// Encoding or writing the preview JPEG failed.
    #[error("Failed to write preview {path}: {message}")]
    Write { path: PathBuf, message: String },

    /// Filesystem error while preparing the preview directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
