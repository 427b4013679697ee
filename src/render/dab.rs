use kurbo::Shape;
use vello_cpu::peniko;

use crate::foundation::core::{Affine, Point};
use crate::foundation::error::RotoResult;
use crate::geometry::polygon::FillRule;
use crate::render::backend::{FillPaint, Painter};
use crate::render::pattern_cache::{DotPattern, DotPatternCache, PatternKey};
use crate::render::surface::{CompositeOp, RasterSurface};

/// Number of intervals the `[0, 1]` radius range is split into for opacity stops.
const OPACITY_STOP_INTERVALS: u32 = 8;

/// Which brush parameters are modulated by stylus pressure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PressureAffects {
    pub opacity: bool,
    pub size: bool,
    pub hardness: bool,
}

/// Render parameters of one brush dab.
#[derive(Clone, Debug, PartialEq)]
pub struct DabSpec {
    pub center: Point,
    /// Radius of the fully opaque core.
    pub internal_radius: f64,
    /// Radius where the falloff reaches its edge value.
    pub external_radius: f64,
    /// Distance to the next dab along the stroke.
    pub spacing: f64,
    /// `(normalized distance, opacity)` samples; empty for a hard brush.
    pub opacity_stops: Vec<(f64, f64)>,
    /// Opacity after pressure modulation.
    pub opacity: f64,
}

/// Two hyperbolas and a parabola approximating a gaussian on `[-1, 1]`.
pub fn hardness_gauss_lookup(f: f64) -> f64 {
    if f < -0.5 {
        let f = -1.0 - f;
        return 2.0 * f * f;
    }
    if f < 0.5 {
        return 1.0 - 2.0 * f * f;
    }
    let f = 1.0 - f;
    2.0 * f * f
}

#[allow(clippy::too_many_arguments)]
pub fn compute_dab_parameters(
    center: Point,
    alpha: f64,
    brush_size: f64,
    hardness: f64,
    spacing: f64,
    pressure: f64,
    affects: PressureAffects,
) -> DabSpec {
    let mut size = brush_size;
    let mut hardness = hardness;
    let mut alpha = alpha;
    if affects.size {
        size *= pressure;
    }
    if affects.hardness {
        hardness *= pressure;
    }
    if affects.opacity {
        alpha *= pressure;
    }

    let internal_radius = (size * hardness).max(1.0) / 2.0;
    let external_radius = size.max(1.0) / 2.0;
    let mut opacity_stops = Vec::new();
    if hardness != 1.0 {
        let exp = 0.4 / (1.0 - hardness);
        for i in 0..=OPACITY_STOP_INTERVALS {
            let d = f64::from(i) / f64::from(OPACITY_STOP_INTERVALS);
            let o = hardness_gauss_lookup(d.powf(exp));
            opacity_stops.push((d, o * alpha));
        }
    }
    DabSpec {
        center,
        internal_radius,
        external_radius,
        spacing: external_radius * 2.0 * spacing,
        opacity_stops,
        opacity: alpha,
    }
}

/// Quantize a pressure value to a cache slot, `round(clamp(p) * (levels - 1))`.
pub fn pressure_level(pressure: f64, levels: usize) -> usize {
    let p = if pressure.is_finite() { pressure.clamp(0.0, 1.0) } else { 0.0 };
    let top = levels.saturating_sub(1);
    ((p * top as f64 + 0.5) as usize).min(top)
}

/// Radial pattern built from the dab's opacity stops, centered at the origin.
///
/// Build-up dabs are white with varying alpha, the others opaque gray with varying intensity.
pub fn build_dot_pattern(spec: &DabSpec, build_up: bool) -> DotPattern {
    let color = |o: f64| {
        let o = o.clamp(0.0, 1.0) as f32;
        if build_up {
            peniko::Color::new([1.0, 1.0, 1.0, o])
        } else {
            peniko::Color::new([o, o, o, 1.0])
        }
    };
    let degenerate = (spec.external_radius - spec.internal_radius).abs() < 1e-6;
    match spec.opacity_stops.first() {
        Some(&(_, first)) if degenerate => DotPattern::Solid(color(first)),
        Some(_) => {
            let stops: Vec<peniko::ColorStop> = spec
                .opacity_stops
                .iter()
                .map(|&(d, o)| (d as f32, color(o)).into())
                .collect();
            DotPattern::Radial(
                peniko::Gradient::new_two_point_radial(
                    (0.0, 0.0),
                    spec.internal_radius as f32,
                    (0.0, 0.0),
                    spec.external_radius as f32,
                )
                .with_stops(stops.as_slice()),
            )
        }
        None => DotPattern::Solid(color(spec.opacity)),
    }
}

/// Fill the dab disk onto `surface`: OVER in build-up mode, LIGHTEN otherwise.
///
/// With a cache, the pattern for the quantized pressure is reused or stored; hard brushes use
/// a solid paint and never touch the cache.
pub fn render_dab(
    surface: &mut RasterSurface,
    painter: &mut Painter,
    cache: Option<&mut DotPatternCache>,
    spec: &DabSpec,
    pressure: f64,
    build_up: bool,
) -> RotoResult<()> {
    let pattern = if spec.opacity_stops.is_empty() {
        build_dot_pattern(spec, build_up)
    } else {
        match cache {
            Some(cache) => {
                let level = pressure_level(pressure, cache.levels());
                let key = PatternKey::new(spec, build_up);
                cache.get_or_insert_with(level, key, || build_dot_pattern(spec, build_up))
            }
            None => build_dot_pattern(spec, build_up),
        }
    };

    let paint = match pattern {
        DotPattern::Solid(c) => FillPaint::Solid(c.components),
        DotPattern::Radial(gradient) => FillPaint::Gradient {
            gradient,
            transform: Affine::translate(spec.center.to_vec2()),
        },
    };
    let op = if build_up {
        CompositeOp::Over
    } else {
        CompositeOp::Lighten
    };
    let disk = kurbo::Circle::new(spec.center, spec.external_radius).to_path(0.1);
    painter.fill_path(surface, &disk, &paint, FillRule::Winding, op)
}

#[cfg(test)]
#[path = "../../tests/unit/render/dab.rs"]
mod tests;
