//! CPU-side rendering of a landscape [`HeightMap`] to pixels.
//!
//! Raw loss samples are normalized between the map's own min and max, then
//! mapped through a [`Palette`] from valley to peak. The PNG writer is
//! feature-gated behind `png` (default on) so embedded hosts can depend on
//! this crate without pulling in the `image` crate.

use descent_engine_core::heightmap::HeightMap;
use descent_engine_core::palette::Palette;

#[cfg(feature = "png")]
use descent_engine_core::error::SimError;
#[cfg(feature = "png")]
use std::path::Path;

/// Maps normalized height through a palette to an RGBA8 pixel buffer.
///
/// Each sample is normalized by the map's min/max (a flat map normalizes to
/// 0) and written as four bytes (R, G, B, 255). The buffer length is
/// `width * height * 4`.
pub fn heightmap_to_rgba(map: &HeightMap, palette: &Palette) -> Vec<u8> {
    let (lo, hi) = map.min_max();
    let range = if hi > lo { hi - lo } else { 1.0 };
    map.data()
        .iter()
        .flat_map(|&v| {
            let srgb = palette.sample((v - lo) / range);
            let r = (srgb.r * 255.0).round() as u8;
            let g = (srgb.g * 255.0).round() as u8;
            let b = (srgb.b * 255.0).round() as u8;
            [r, g, b, 255u8]
        })
        .collect()
}

/// Writes a height map as a PNG image, mapping samples through the palette.
///
/// Returns `SimError::InvalidDimensions` if the map dimensions overflow
/// `u32`, or `SimError::Io` on write failure.
#[cfg(feature = "png")]
pub fn write_png(map: &HeightMap, palette: &Palette, path: &Path) -> Result<(), SimError> {
    let rgba = heightmap_to_rgba(map, palette);
    let w = u32::try_from(map.width()).map_err(|_| SimError::InvalidDimensions)?;
    let h = u32::try_from(map.height()).map_err(|_| SimError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| SimError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| SimError::Io(e.to_string()))
}
