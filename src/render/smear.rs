//! Smear strokes: every dab drags the destination pixels found under the previous dab onto the
//! new dab position, weighted by a single-dab alpha mask.

use crate::foundation::core::{Point, Rect, RectI};
use crate::foundation::error::RotoResult;
use crate::imaging::image::Image;
use crate::model::stroke::StrokeItem;
use crate::render::backend::Painter;
use crate::render::dab::{PressureAffects, compute_dab_parameters, render_dab};
use crate::render::mask::RenderOpts;
use crate::render::stroke::{StrokeCarry, brush_size_pixel, walk_stroke};
use crate::render::surface::{RasterSurface, SurfaceFormat};

/// Pull `prev` toward `next` so the two are at most `spacing` apart.
pub fn dampen_smear_effect(prev: Point, next: Point, spacing: f64) -> Point {
    let d = next - prev;
    let len = d.hypot();
    if len <= spacing || len == 0.0 {
        return prev;
    }
    next - d * (spacing.max(0.0) / len)
}

/// A8 coverage of a single dab centered in a `size + 1` square.
struct SmearMask {
    surface: RasterSurface,
}

impl SmearMask {
    fn render(size: u32, hardness: f64, opacity: f64) -> RotoResult<Self> {
        let side = i32::try_from(size.saturating_add(1)).unwrap_or(i32::MAX);
        let mut surface = RasterSurface::new(SurfaceFormat::A8, RectI::new(0, 0, side, side)?)?;
        let half = f64::from(size) / 2.0;
        let spec = compute_dab_parameters(
            Point::new(half, half),
            opacity,
            f64::from(size),
            hardness,
            0.0,
            1.0,
            PressureAffects::default(),
        );
        render_dab(&mut surface, &mut Painter::new(), None, &spec, 1.0, true)?;
        Ok(Self { surface })
    }

    fn side(&self) -> i32 {
        i32::from(self.surface.width())
    }

    fn weight(&self, x: i32, y: i32) -> Option<f32> {
        self.surface.intensity(x, y).map(|v| f32::from(v) / 255.0)
    }
}

/// Blend the pixels around `prev` onto the square around `next`: `dst = src*m + dst*(1-m)`.
fn smear_dot(mask: &SmearMask, prev: Point, next: Point, brush_size: f64, clip: RectI, dest: &mut Image) {
    let half = brush_size / 2.0;
    let prev_bounds = RectI::enclosing(Rect::new(
        prev.x - half,
        prev.y - half,
        prev.x + half,
        prev.y + half,
    ));
    let Ok(mut snapshot) = Image::new(prev_bounds, dest.components(), dest.depth()) else {
        return;
    };
    snapshot.copy_region_from(dest, prev_bounds);
    let readable = dest.bounds();

    let half_mask = f64::from(mask.side() / 2);
    let next_bounds = RectI {
        x1: (next.x - half_mask) as i32,
        y1: (next.y - half_mask) as i32,
        x2: (next.x + half_mask) as i32,
        y2: (next.y + half_mask) as i32,
    };

    for (row, y) in (next_bounds.y1..next_bounds.y2).enumerate() {
        let y_prev = prev_bounds.y1 + row as i32;
        for (col, x) in (next_bounds.x1..next_bounds.x2).enumerate() {
            let x_prev = prev_bounds.x1 + col as i32;
            if !clip.contains_point(x, y) || !readable.contains_point(x_prev, y_prev) {
                continue;
            }
            let Some(m) = mask.weight(col as i32, row as i32) else {
                continue;
            };
            for c in 0..dest.components() {
                let (Some(src), Some(dst)) = (snapshot.get(x_prev, y_prev, c), dest.get(x, y, c))
                else {
                    continue;
                };
                dest.set(x, y, c, src * m + dst * (1.0 - m));
            }
        }
    }
}

/// Smear `dest` along the stroke of `item`, writing only inside `roi`.
///
/// Returns whether any dab moved pixels, plus the carry for the next incremental call.
#[tracing::instrument(skip(item, dest, opts))]
pub fn render_smear(
    time: f64,
    mip_level: u32,
    item: &StrokeItem,
    roi: RectI,
    dest: &mut Image,
    carry: StrokeCarry,
    opts: &RenderOpts,
) -> RotoResult<(bool, StrokeCarry)> {
    opts.validate()?;
    let brush = item.brush.at(time)?;
    let opacity = item.opacity.sample(time)?;
    let segments = item.segments_at(time)?;
    let clip = roi.intersect(dest.bounds()).unwrap_or_default();

    let size_pixel = brush_size_pixel(brush.size, mip_level);
    let mask = SmearMask::render(size_pixel.max(0.0) as u32, brush.hardness, opacity)?;
    let affects = PressureAffects {
        opacity: brush.pressure_affects_opacity,
        size: brush.pressure_affects_size,
        hardness: brush.pressure_affects_hardness,
    };

    let mut smeared = 0usize;
    let (_, carry) = walk_stroke(
        &segments,
        carry,
        (brush.write_on_start, brush.write_on_end),
        mip_level,
        brush.spacing,
        |site| {
            let spec = compute_dab_parameters(
                site.center,
                opacity,
                size_pixel,
                brush.hardness,
                site.spacing,
                site.pressure,
                affects,
            );
            match site.prev {
                Some(prev) if prev != site.center => {
                    let from = dampen_smear_effect(prev, site.center, spec.spacing);
                    smear_dot(&mask, from, site.center, size_pixel, clip, dest);
                    smeared += 1;
                }
                _ => {}
            }
            Ok(spec.spacing)
        },
    )?;
    tracing::debug!(smeared, "rendered smear");
    Ok((smeared > 0, carry))
}

#[cfg(test)]
#[path = "../../tests/unit/render/smear.rs"]
mod tests;
