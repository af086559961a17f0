//! RegionReader trait for random-access slide reads.
//!
//! The trait is the seam between the patching core and the decoding
//! backend: the grid walker only ever asks for rectangles. Tests substitute
//! synthetic readers; production code uses [`crate::slide::ImageSlide`].

use ndarray::Array3;

use crate::error::SlideError;

/// Random-access region reads over a slide plane.
///
/// Pixel data is returned as an `(height, width, 3)` array of `f32` RGB
/// samples. Implementations release their underlying resources on drop.
pub trait RegionReader {
    /// Dimensions of the slide plane as `(width, height)` in pixels.
    ///
    /// Dimensions are fixed for the lifetime of the reader and read once
    /// per walk.
    fn dimensions(&self) -> (u32, u32);

    /// Read the `w`x`h` region with top-left corner at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the rectangle extends outside the slide plane or
    /// if the underlying read fails. A failed region read is recoverable:
    /// the walker skips the patch and continues.
    fn read_region(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Array3<f32>, SlideError>;
}
