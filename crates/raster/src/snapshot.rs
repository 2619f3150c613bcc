//! PNG export of a rendered canvas.
//!
//! Feature-gated behind `png` (default on) so embedders that only need the
//! in-memory pixel buffer can drop the `image` dependency.

use crate::RasterCanvas;
use meadow_core::MeadowError;
use std::path::Path;

/// Writes the canvas contents as a PNG image.
///
/// Returns `MeadowError::InvalidDimensions` if the canvas dimensions do not
/// fit in `u32`, or `MeadowError::Io` on encode/write failure.
pub fn write_png(canvas: &RasterCanvas, path: &Path) -> Result<(), MeadowError> {
    let w = u32::try_from(canvas.width()).map_err(|_| MeadowError::InvalidDimensions)?;
    let h = u32::try_from(canvas.height()).map_err(|_| MeadowError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, canvas.pixels().to_vec())
        .ok_or_else(|| MeadowError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| MeadowError::Io(e.to_string()))
}
