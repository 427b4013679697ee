use crate::foundation::core::RectI;
use crate::foundation::error::{RotoError, RotoResult};
use crate::geometry::bezier::flatten;
use crate::imaging::image::{BitDepth, Image};
use crate::model::bezier::BezierShape;
use crate::model::item::RotoItem;
use crate::model::stroke::StrokePoint;
use crate::render::backend::Painter;
use crate::render::convert::{ConvertParams, image_to_surface, surface_to_image};
use crate::render::pattern_cache::DotPatternCache;
use crate::render::shape::render_bezier_shape;
use crate::render::smear::render_smear;
use crate::render::stroke::{StrokeCarry, render_stroke};
use crate::render::surface::{RasterSurface, SurfaceFormat};

/// Pressure quantization levels (and dot-pattern cache slots) used by default.
pub const DEFAULT_PRESSURE_LEVELS: usize = 512;

/// How the interior of a closed shape is rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteriorMode {
    /// Non-antialiased path fill honoring the shape's fill rule.
    #[default]
    PathFill,
    /// Bezulation into fans, strips and triangles added to the mesh.
    Triangulated,
}

/// Feather band builder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatherMode {
    #[default]
    Triangulated,
    Discretized,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOpts {
    pub pressure_levels: usize,
    /// Subdivision rounds before bezulation falls back to a fan.
    pub bezulate_max_rounds: usize,
    /// Samples per cubic segment when flattening.
    pub flatten_steps: usize,
    /// Upper bound on the tessellation grid of one Coons patch.
    pub patch_subdivisions: usize,
    pub interior: InteriorMode,
    pub feather: FeatherMode,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            pressure_levels: DEFAULT_PRESSURE_LEVELS,
            bezulate_max_rounds: 16,
            flatten_steps: 20,
            patch_subdivisions: 16,
            interior: InteriorMode::default(),
            feather: FeatherMode::default(),
        }
    }
}

impl RenderOpts {
    pub fn validate(&self) -> RotoResult<()> {
        if self.pressure_levels < 2 {
            return Err(RotoError::validation("pressure_levels must be at least 2"));
        }
        if self.flatten_steps == 0 {
            return Err(RotoError::validation("flatten_steps must be non-zero"));
        }
        if self.patch_subdivisions == 0 {
            return Err(RotoError::validation("patch_subdivisions must be non-zero"));
        }
        Ok(())
    }
}

/// Upper bound on the sub-frames of one motion-blurred render.
pub const MAX_MOTION_BLUR_SAMPLES: usize = 1024;

/// Sub-frame times of a motion-blurred render: `start, start + step, ...` up to `end`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MotionBlurRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl MotionBlurRange {
    /// No motion blur: one sample at `time`.
    pub fn single(time: f64) -> Self {
        Self {
            start: time,
            end: time,
            step: 1.0,
        }
    }

    pub fn validate(&self) -> RotoResult<()> {
        if !(self.start.is_finite() && self.end.is_finite() && self.step.is_finite()) {
            return Err(RotoError::validation("motion-blur range must be finite"));
        }
        if self.end < self.start {
            return Err(RotoError::validation(format!(
                "motion-blur range ends before it starts: {}..{}",
                self.start, self.end
            )));
        }
        if self.step > 0.0 && self.end > self.start {
            let count = (self.end - self.start) / self.step + 1.0;
            if !count.is_finite() || count > MAX_MOTION_BLUR_SAMPLES as f64 {
                return Err(RotoError::validation(format!(
                    "motion-blur range {}..{} with step {} exceeds {MAX_MOTION_BLUR_SAMPLES} sub-frames",
                    self.start, self.end, self.step
                )));
            }
        }
        Ok(())
    }

    /// Sample times, at most [`MAX_MOTION_BLUR_SAMPLES`]; a single sample when the range is empty
    /// or the step is not positive.
    pub fn samples(&self) -> Vec<f64> {
        if self.step <= 0.0 || self.end <= self.start {
            return vec![self.start];
        }
        let n = ((self.end - self.start) / self.step + 1e-9).floor() as usize;
        let n = n.min(MAX_MOTION_BLUR_SAMPLES - 1);
        (0..=n).map(|k| self.start + k as f64 * self.step).collect()
    }
}

fn check_request(
    item: &RotoItem,
    roi: RectI,
    components: usize,
    range: &MotionBlurRange,
    depth: BitDepth,
    dest: &Image,
    opts: &RenderOpts,
) -> RotoResult<()> {
    opts.validate()?;
    item.validate()?;
    range.validate()?;
    if !(1..=4).contains(&components) || components != dest.components() {
        return Err(RotoError::validation(format!(
            "component count {components} does not match destination ({})",
            dest.components()
        )));
    }
    if depth != dest.depth() {
        return Err(RotoError::validation(format!(
            "bit depth {depth:?} does not match destination ({:?})",
            dest.depth()
        )));
    }
    if roi.is_empty() {
        return Err(RotoError::evaluation("render region is empty"));
    }
    if !dest.bounds().contains(roi) {
        return Err(RotoError::evaluation(format!(
            "render region {roi:?} exceeds destination bounds {:?}",
            dest.bounds()
        )));
    }
    Ok(())
}

/// Surface format for an item: paint strokes without build-up need color channels for the
/// lighten operator; everything else is a single alpha channel.
fn surface_format(item: &RotoItem, components: usize, time: f64) -> RotoResult<SurfaceFormat> {
    Ok(match item {
        RotoItem::Paint(stroke) => {
            let build_up = stroke.brush.at(time)?.build_up;
            if !build_up || components > 1 {
                SurfaceFormat::Argb32
            } else {
                SurfaceFormat::A8
            }
        }
        RotoItem::Bezier(_) | RotoItem::Smear(_) => SurfaceFormat::A8,
    })
}

/// The flattened curve of an open bezier as a single stroke segment at full pressure.
fn open_bezier_segments(
    shape: &BezierShape,
    time: f64,
    steps: usize,
) -> RotoResult<Vec<Vec<StrokePoint>>> {
    let frame = shape.at(time)?;
    Ok(vec![
        flatten(&frame.cps, false, steps)
            .into_iter()
            .map(|pos| StrokePoint { pos, pressure: 1.0 })
            .collect(),
    ])
}

/// Render one roto item into `dest` over `roi` and return the stroke carry for the next
/// incremental call.
///
/// Nothing is written to `dest` when the request is invalid or the raster surface cannot be
/// allocated. With `incremental`, the current `dest` pixels seed the surface so new dabs land on
/// top of them, and a paint stroke keeps its patterns in `cache`.
#[allow(clippy::too_many_arguments)]
#[tracing::instrument(skip(item, cache, dest, opts), fields(kind = item.kind_name()))]
pub fn render_mask(
    item: &RotoItem,
    roi: RectI,
    components: usize,
    range: MotionBlurRange,
    time: f64,
    depth: BitDepth,
    mip_level: u32,
    incremental: bool,
    carry: StrokeCarry,
    cache: Option<&mut DotPatternCache>,
    dest: &mut Image,
    opts: &RenderOpts,
) -> RotoResult<StrokeCarry> {
    check_request(item, roi, components, &range, depth, dest, opts)?;

    if let RotoItem::Smear(stroke) = item {
        let (_, carry) = render_smear(time, mip_level, stroke, roi, dest, carry, opts)?;
        return Ok(carry);
    }

    let format = surface_format(item, components, time)?;
    let color = item.color_at(time)?;
    let opacity = item.opacity_at(time)?;
    let mut surface = RasterSurface::new(format, roi)?;
    if incremental {
        image_to_surface(dest, roi, &mut surface, color)?;
    }

    let mut local_cache = None;
    let carry = match item {
        RotoItem::Paint(stroke) => {
            let cache = match cache {
                Some(cache) if incremental => cache,
                _ => local_cache.insert(DotPatternCache::new(opts.pressure_levels)),
            };
            let brush = stroke.brush.at(time)?;
            let segments = stroke.segments_at(time)?;
            render_stroke(
                &mut surface,
                &mut Painter::new(),
                Some(cache),
                &segments,
                carry,
                &brush,
                brush.build_up,
                opacity,
                mip_level,
            )?
        }
        RotoItem::Bezier(shape) if !shape.closed => {
            let brush = shape.brush.at(time)?;
            let segments = open_bezier_segments(shape, time, opts.flatten_steps)?;
            render_stroke(
                &mut surface,
                &mut Painter::new(),
                Some(local_cache.insert(DotPatternCache::new(opts.pressure_levels))),
                &segments,
                carry,
                &brush,
                true,
                opacity,
                mip_level,
            )?
        }
        RotoItem::Bezier(shape) => {
            if shape.is_fillable() {
                render_bezier_shape(
                    &mut surface,
                    &mut Painter::new(),
                    shape,
                    opacity,
                    time,
                    range,
                    mip_level,
                    opts,
                )?;
            }
            carry
        }
        RotoItem::Smear(_) => carry,
    };

    let params = ConvertParams {
        shape_color: color,
        opacity,
        use_opacity: matches!(item, RotoItem::Bezier(_)),
        inverted: false,
    };
    surface_to_image(&surface, dest, roi, &params)?;
    tracing::debug!(?format, incremental, "rendered mask");
    Ok(carry)
}

/// Release every cached dot pattern of a stroke.
pub fn purge_dot_pattern_cache(cache: &mut DotPatternCache) {
    cache.purge();
}

#[cfg(test)]
#[path = "../../tests/unit/render/mask.rs"]
mod tests;
