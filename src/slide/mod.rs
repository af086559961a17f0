//! Slide abstraction layer.
//!
//! This module isolates the image-decoding dependency from the patching
//! core. The [`RegionReader`] trait is the capability the grid walker
//! consumes: given a rectangle, return pixel data. [`ImageSlide`] is the
//! concrete implementation backed by the `image` crate, opened through the
//! process-wide [`crate::engine::DecodeEngine`].
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              Grid Walker                │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │           RegionReader Trait            │
//! │   (rectangle in, pixel buffer out)      │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │              ImageSlide                 │
//! │ (image-crate decode, series downsample) │
//! └─────────────────────────────────────────┘
//! ```

mod image_slide;
mod reader;

pub use image_slide::ImageSlide;
pub use reader::RegionReader;
