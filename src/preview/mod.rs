//! Whole-slide preview export.
//!
//! Renders a slide at the chosen series to a JPEG for quick inspection,
//! optionally followed by an orientation-aware resize onto an exact-size
//! canvas. Preview failures (typically the decoder memory budget on huge
//! series) are recoverable per slide.

mod exporter;
mod resize;

pub use exporter::PreviewExporter;
pub use resize::fit_to_canvas;
