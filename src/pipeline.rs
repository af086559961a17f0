//! Per-run orchestration.
//!
//! The [`PatchPipeline`] is the main entry point: it drives each slide
//! through resume check, grid walk, coverage persistence, and optional
//! preview export, then accumulates the run manifest.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        PatchPipeline                         │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │                  process_slide()                       │  │
//! │  │  1. Ledger check      4. Write coverage PNG + npy      │  │
//! │  │  2. Open slide        5. Optional preview export       │  │
//! │  │  3. Grid walk                                          │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │        │                 │                    │              │
//! │        ▼                 ▼                    ▼              │
//! │ ┌──────────────┐  ┌─────────────┐   ┌─────────────────┐     │
//! │ │ DecodeEngine │  │ GridWalker  │   │ PreviewExporter │     │
//! │ └──────────────┘  └─────────────┘   └─────────────────┘     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Failure semantics
//!
//! One slide is processed fully before the next begins. Per-slide failures
//! (open, walk persistence, preview) are logged and recovered; the run
//! continues with the next slide. A slide whose walk fails does not get a
//! coverage mask, so it is retried on the next invocation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{error, info};

use crate::config::Config;
use crate::engine::DecodeEngine;
use crate::error::PatchError;
use crate::manifest::{CompletionLedger, RunManifest};
use crate::patch::{GridWalker, PatchWriter, PurpleParams, WalkOptions};
use crate::preview::PreviewExporter;
use crate::slide::RegionReader;

/// Slide file extensions the pipeline picks up from the input directory.
pub const SLIDE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "bmp"];

/// Outcome of processing one slide.
#[derive(Debug)]
pub struct SlideOutcome {
    /// Slide identifier (file stem).
    pub slide_id: String,

    /// Kept patch paths, empty when skipped or failed.
    pub patches: Vec<PathBuf>,

    /// Whether the slide was skipped because it was already complete.
    pub skipped: bool,
}

/// Orchestrates the whole patching run.
pub struct PatchPipeline {
    engine: DecodeEngine,
    config: Config,
    ledger: CompletionLedger,
    exporter: PreviewExporter,
}

impl PatchPipeline {
    pub fn new(engine: DecodeEngine, config: Config) -> Self {
        let ledger = CompletionLedger::new(&config.patch_dir);
        let exporter = PreviewExporter::new(&config.jpg_dir);
        Self {
            engine,
            config,
            ledger,
            exporter,
        }
    }

    /// The completion ledger backing the resume semantics.
    pub fn ledger(&self) -> &CompletionLedger {
        &self.ledger
    }

    /// List slide files in the configured input directory, sorted by path.
    pub fn discover_slides(&self) -> io::Result<Vec<PathBuf>> {
        let mut slides = Vec::new();
        for entry in fs::read_dir(&self.config.slide_dir)? {
            let path = entry?.path();
            let is_slide = path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| {
                        let ext = ext.to_lowercase();
                        SLIDE_EXTENSIONS.contains(&ext.as_str())
                    });
            if is_slide {
                slides.push(path);
            }
        }
        slides.sort();
        Ok(slides)
    }

    /// Process every slide in order and accumulate the run manifest.
    pub fn run(&self, slides: &[PathBuf]) -> RunManifest {
        let mut manifest = RunManifest::new();
        for path in slides {
            let outcome = self.process_slide(path);
            manifest.record(outcome.patches);
        }
        manifest
    }

    /// Process a single slide: resume check, grid walk, coverage output,
    /// optional preview. All per-slide failures are logged and recovered.
    pub fn process_slide(&self, path: &Path) -> SlideOutcome {
        let slide_id = slide_id_from(path);
        info!(slide = %path.display(), "beginning processing");

        if self.ledger.is_complete(&slide_id) {
            info!(
                %slide_id,
                "slide already has a mask (and therefore already patched), skipping"
            );
            return SlideOutcome {
                slide_id,
                patches: Vec::new(),
                skipped: true,
            };
        }

        let mut patches = Vec::new();

        if !self.config.no_patch {
            match self.patch_slide(path, &slide_id) {
                Ok(kept) => patches = kept,
                Err(e) => {
                    error!(%slide_id, error = %e, "patching failed, slide will be retried next run");
                }
            }
        }

        if self.config.jpg_wsi {
            // Resize dimensions were validated with the rest of the config.
            let target = self.config.parse_resize().ok().flatten();
            if let Err(e) =
                self.exporter
                    .export(&self.engine, path, &slide_id, self.config.series, target)
            {
                error!(
                    %slide_id, error = %e,
                    "could not save whole-slide preview, try a higher series value"
                );
            }
        }

        info!(%slide_id, "completed processing");
        SlideOutcome {
            slide_id,
            patches,
            skipped: false,
        }
    }

    /// Run the grid walk for one slide and persist its coverage map.
    fn patch_slide(&self, path: &Path, slide_id: &str) -> Result<Vec<PathBuf>, PatchError> {
        let started = Instant::now();

        let slide = self.engine.open_slide(path, self.config.series)?;
        let (width, height) = slide.dimensions();
        info!(slide_id, width, height, "generating patches");

        let writer = PatchWriter::create(&self.config.patch_dir, slide_id, self.config.series)?;
        self.ledger.prepare()?;

        let options = WalkOptions {
            dimension: self.config.patch_dim,
            overlap: self.config.overlap,
            save_blank: self.config.save_blank,
            purple: PurpleParams {
                threshold: self.config.purple_threshold,
                scale: self.config.purple_scale,
            },
        };
        let report = GridWalker::new(&slide, &writer, options).walk()?;

        // The mask PNG is the completion marker: written last, only after
        // the walk finished.
        report.coverage.write_png(&self.ledger.mask_path(slide_id))?;
        report.coverage.write_npy(&self.ledger.npy_path(slide_id))?;

        info!(
            slide_id,
            series = self.config.series,
            kept = report.patches.len(),
            elapsed_s = started.elapsed().as_secs_f64(),
            "patching completed"
        );
        Ok(report.patches)
    }
}

/// Slide identifier: the file stem of the slide path.
fn slide_id_from(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_slide_id_strips_extension() {
        assert_eq!(slide_id_from(Path::new("imgs/czis/slide_a.tiff")), "slide_a");
        assert_eq!(slide_id_from(Path::new("slide.b.png")), "slide.b");
    }

    #[test]
    fn test_discover_slides_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.png"), b"x").unwrap();
        fs::write(dir.path().join("a.tiff"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("sub.png")).unwrap();

        let mut config = crate::config::Config::try_parse_from(["wsi-patcher"]).unwrap();
        config.slide_dir = dir.path().to_path_buf();

        let engine = DecodeEngine::init(0).unwrap();
        let pipeline = PatchPipeline::new(engine, config);
        let slides = pipeline.discover_slides().unwrap();

        assert_eq!(slides.len(), 2);
        assert!(slides[0].ends_with("a.tiff"));
        assert!(slides[1].ends_with("b.png"));
    }

    #[test]
    fn test_discover_slides_missing_dir_errors() {
        let mut config = crate::config::Config::try_parse_from(["wsi-patcher"]).unwrap();
        config.slide_dir = PathBuf::from("does/not/exist");

        let engine = DecodeEngine::init(0).unwrap();
        let pipeline = PatchPipeline::new(engine, config);
        assert!(pipeline.discover_slides().is_err());
    }
}
