//! Pixel transfer between [`Image`] buffers and 8-bit [`RasterSurface`]s.
//!
//! Both directions are a single routine parameterized at runtime by bit depth, component
//! counts and flags.

use crate::foundation::core::{RectI, Rgb};
use crate::foundation::error::{RotoError, RotoResult};
use crate::foundation::math::unit_to_u8;
use crate::imaging::image::Image;
use crate::render::surface::{RasterSurface, SurfaceFormat};

/// How a rendered surface is written back into an image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConvertParams {
    pub shape_color: Rgb,
    pub opacity: f64,
    /// Fold `opacity` into the written color and alpha.
    pub use_opacity: bool,
    /// Write `1 - coverage` instead of coverage. The complement is taken on the normalized
    /// coverage before scaling, `(1 - s/255) * max`, so 16-bit and float images invert to the
    /// same fraction as 8-bit ones (not `1 - (s/255) * max`).
    pub inverted: bool,
}

impl ConvertParams {
    pub fn new(shape_color: Rgb, opacity: f64) -> Self {
        Self {
            shape_color,
            opacity,
            use_opacity: true,
            inverted: false,
        }
    }
}

/// Seed `surface` with the pixels of `image` inside `roi`, so new dabs composite over them.
///
/// A8 takes channel 0. ARGB32 from a 4-channel image undoes the shape color
/// (`src / shape`, zero where the shape channel is zero) with an opaque alpha; from other
/// images channel 0 is broadcast to all four bytes.
pub fn image_to_surface(
    image: &Image,
    roi: RectI,
    surface: &mut RasterSurface,
    shape_color: Rgb,
) -> RotoResult<()> {
    let Some(region) = roi
        .intersect(surface.roi())
        .and_then(|r| r.intersect(image.bounds()))
    else {
        return Ok(());
    };
    let max = f64::from(image.depth().max_value());
    let comps = image.components();
    let unpremul = |v: f64, shape: f64| if shape == 0.0 { 0.0 } else { v / max / shape };

    for y in region.y1..region.y2 {
        for x in region.x1..region.x2 {
            let sample = |c: usize| f64::from(image.get(x, y, c).unwrap_or(0.0));
            debug_assert!((0..comps).all(|c| !sample(c).is_nan()), "NaN in source image");
            let rgba = match (surface.format(), comps) {
                (SurfaceFormat::A8, _) => {
                    let a = unit_to_u8(sample(0) / max);
                    [a, a, a, a]
                }
                (SurfaceFormat::Argb32, 4) => [
                    unit_to_u8(unpremul(sample(0), shape_color.r)),
                    unit_to_u8(unpremul(sample(1), shape_color.g)),
                    unit_to_u8(unpremul(sample(2), shape_color.b)),
                    255,
                ],
                (SurfaceFormat::Argb32, _) => {
                    let v = unit_to_u8(sample(0) / max);
                    [v, v, v, v]
                }
            };
            surface.write_rgba(x, y, rgba);
        }
    }
    Ok(())
}

/// Write the coverage of `surface` inside `roi` into `image`.
///
/// Coverage is the first stored byte of each pixel, scaled by the image's maximum value and
/// multiplied by the shape color. The image component count picks the written channels:
/// 4 = rgba, 3 = rgb, 2 = rg, 1 = alpha.
pub fn surface_to_image(
    surface: &RasterSurface,
    image: &mut Image,
    roi: RectI,
    params: &ConvertParams,
) -> RotoResult<()> {
    let Some(region) = roi.intersect(surface.roi()) else {
        return Ok(());
    };
    if !image.bounds().contains(region) {
        return Err(RotoError::evaluation(format!(
            "conversion region {region:?} exceeds image bounds {:?}",
            image.bounds()
        )));
    }
    let max = f64::from(image.depth().max_value());
    let comps = image.components();
    let opacity = if params.use_opacity { params.opacity } else { 1.0 };
    let [r, g, b] = params.shape_color.to_array().map(|c| c * opacity);

    for y in region.y1..region.y2 {
        for x in region.x1..region.x2 {
            let s = f64::from(surface.intensity(x, y).unwrap_or(0)) / 255.0;
            let c = (if params.inverted { 1.0 - s } else { s }) * max;
            let rgba = [c * r, c * g, c * b, c * opacity];
            let values = match comps {
                4 => &rgba[..],
                3 => &rgba[..3],
                2 => &rgba[..2],
                _ => &rgba[3..],
            };
            for (ch, v) in values.iter().enumerate() {
                debug_assert!(!v.is_nan(), "NaN while converting pixel ({x}, {y})");
                image.set(x, y, ch, *v as f32);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/convert.rs"]
mod tests;
