use crate::foundation::core::Point;
use crate::foundation::error::RotoResult;
use crate::foundation::math::{mip_scale, scale_point_to_mip};
use crate::model::stroke::{BrushFrame, StrokePoint};
use crate::render::backend::Painter;
use crate::render::dab::{PressureAffects, compute_dab_parameters, render_dab};
use crate::render::pattern_cache::DotPatternCache;
use crate::render::surface::RasterSurface;

/// Smallest spacing fraction used when placing dabs.
const MIN_SPACING: f64 = 0.05;

/// Traversal state carried between incremental renders of the same stroke.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StrokeCarry {
    /// Distance along the path left before the next dab.
    pub dist_to_next: f64,
    /// Center of the last rendered dab; `None` until one has been rendered.
    pub last_center: Option<Point>,
}

/// Where the traversal wants a dab.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotSite {
    /// Center of the previous dab, if any.
    pub prev: Option<Point>,
    pub center: Point,
    pub pressure: f64,
    /// Spacing fraction after clamping.
    pub spacing: f64,
}

/// Spacing fraction the traversal uses, `None` when the brush does not paint at all.
pub fn effective_spacing(fraction: f64) -> Option<f64> {
    if !fraction.is_finite() || fraction <= 0.0 {
        return None;
    }
    Some(fraction.max(MIN_SPACING))
}

/// Brush diameter at a mip level, never below one pixel.
pub fn brush_size_pixel(size: f64, mip_level: u32) -> f64 {
    if mip_level == 0 {
        return size;
    }
    (size * mip_scale(mip_level)).max(1.0)
}

/// Walk every segment and call `dot` wherever a dab lands.
///
/// `dot` returns the distance in pixels to the following dab. `write_on` trims each segment
/// to `floor(n * start)..ceil(n * end)` of its `n` points. Returns whether anything was drawn
/// together with the carry for the next incremental call.
pub fn walk_stroke(
    segments: &[Vec<StrokePoint>],
    carry: StrokeCarry,
    write_on: (f64, f64),
    mip_level: u32,
    spacing_fraction: f64,
    mut dot: impl FnMut(&DotSite) -> RotoResult<f64>,
) -> RotoResult<(bool, StrokeCarry)> {
    let Some(spacing) = effective_spacing(spacing_fraction) else {
        return Ok((false, carry));
    };

    let mut dist_to_next = carry.dist_to_next;
    let mut prev = carry.last_center;
    let mut drew = false;

    for segment in segments {
        let points: Vec<(Point, f64)> = segment
            .iter()
            .map(|p| (scale_point_to_mip(p.pos, mip_level), p.pressure))
            .collect();
        let n = points.len();
        let first = ((n as f64 * write_on.0).floor() as usize).min(n);
        let end = ((n as f64 * write_on.1).ceil() as usize).clamp(first, n);
        let visible = &points[first..end];

        match visible {
            [] => continue,
            [(center, pressure)] => {
                dot(&DotSite {
                    prev,
                    center: *center,
                    pressure: *pressure,
                    spacing,
                })?;
                prev = Some(*center);
                drew = true;
                continue;
            }
            _ => {}
        }

        for pair in visible.windows(2) {
            let (a, pa) = pair[0];
            let (b, pb) = pair[1];
            let dist = (b - a).hypot();
            while dist_to_next <= dist {
                let t = if dist == 0.0 { 0.0 } else { dist_to_next / dist };
                let center = a.lerp(b, t);
                let step = dot(&DotSite {
                    prev,
                    center,
                    pressure: pa + (pb - pa) * t,
                    spacing,
                })?;
                prev = Some(center);
                drew = true;
                if !(step.is_finite() && step > 0.0) {
                    // A non-advancing dab would stall the walk on this sub-segment.
                    dist_to_next = dist;
                    break;
                }
                dist_to_next += step;
            }
            dist_to_next -= dist;
        }
    }

    Ok((
        drew,
        StrokeCarry {
            dist_to_next,
            last_center: prev,
        },
    ))
}

/// Render the dabs of `segments` onto `surface` and return the carry for the next call.
#[allow(clippy::too_many_arguments)]
#[tracing::instrument(skip(surface, painter, cache, segments, brush))]
pub fn render_stroke(
    surface: &mut RasterSurface,
    painter: &mut Painter,
    mut cache: Option<&mut DotPatternCache>,
    segments: &[Vec<StrokePoint>],
    carry: StrokeCarry,
    brush: &BrushFrame,
    build_up: bool,
    opacity: f64,
    mip_level: u32,
) -> RotoResult<StrokeCarry> {
    let size = brush_size_pixel(brush.size, mip_level);
    let affects = PressureAffects {
        opacity: brush.pressure_affects_opacity,
        size: brush.pressure_affects_size,
        hardness: brush.pressure_affects_hardness,
    };
    let mut dabs = 0usize;
    let (drew, carry) = walk_stroke(
        segments,
        carry,
        (brush.write_on_start, brush.write_on_end),
        mip_level,
        brush.spacing,
        |site| {
            let spec = compute_dab_parameters(
                site.center,
                opacity,
                size,
                brush.hardness,
                site.spacing,
                site.pressure,
                affects,
            );
            render_dab(
                surface,
                painter,
                cache.as_deref_mut(),
                &spec,
                site.pressure,
                build_up,
            )?;
            dabs += 1;
            Ok(spec.spacing)
        },
    )?;
    tracing::debug!(dabs, drew, "rendered stroke");
    Ok(carry)
}

#[cfg(test)]
#[path = "../../tests/unit/render/stroke.rs"]
mod tests;
