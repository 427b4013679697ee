use crate::foundation::core::Affine;
use crate::foundation::error::RotoResult;
use crate::foundation::math::mip_scale;
use crate::geometry::bezier::{CpSample, to_bez_path, to_pixel_space};
use crate::model::bezier::BezierShape;
use crate::render::backend::{FillPaint, Painter};
use crate::render::feather::{
    FeatherPolygons, discretized_feather, interior_patches, interior_primitives,
    triangulated_feather,
};
use crate::render::mask::{FeatherMode, InteriorMode, MotionBlurRange, RenderOpts};
use crate::render::mesh::{MeshPattern, apply_mesh_mask};
use crate::render::surface::{CompositeOp, RasterSurface};

fn all_finite(cps: &[CpSample]) -> bool {
    cps.iter()
        .all(|cp| cp.pos.is_finite() && cp.left.is_finite() && cp.right.is_finite())
}

/// Render a closed shape (interior plus feather band) onto an A8 `surface`, once per
/// motion-blur sub-frame.
///
/// Every sub-frame is composited OVER the previous ones. Color and opacity are applied later,
/// when the surface is converted back into an image.
#[allow(clippy::too_many_arguments)]
#[tracing::instrument(skip(surface, painter, shape, opts))]
pub fn render_bezier_shape(
    surface: &mut RasterSurface,
    painter: &mut Painter,
    shape: &BezierShape,
    opacity: f64,
    time: f64,
    range: MotionBlurRange,
    mip_level: u32,
    opts: &RenderOpts,
) -> RotoResult<()> {
    debug_assert!(shape.is_fillable(), "render_bezier_shape needs a closed, active shape");
    if !shape.is_fillable() || opacity <= 0.0 {
        return Ok(());
    }

    let samples = range.samples();
    let mut patches = 0usize;
    for &t in &samples {
        let frame = shape.at(t)?;
        if !all_finite(&frame.cps) || !all_finite(&frame.feather_cps) {
            tracing::warn!(time = t, "skipping motion-blur sub-frame with non-finite geometry");
            continue;
        }
        let cps = to_pixel_space(&frame.cps, Affine::IDENTITY, mip_level);
        let feather_cps = to_pixel_space(&frame.feather_cps, Affine::IDENTITY, mip_level);
        let feather_distance = frame.feather_distance * mip_scale(mip_level);

        let polys = FeatherPolygons::compute(&cps, &feather_cps, feather_distance, opts.flatten_steps);
        let mut mesh = MeshPattern::new();
        mesh.extend(match opts.feather {
            FeatherMode::Triangulated => {
                triangulated_feather(&polys, frame.color, frame.feather_falloff)
            }
            FeatherMode::Discretized => discretized_feather(&polys, frame.color, frame.feather_falloff),
        });

        match opts.interior {
            InteriorMode::PathFill => {
                painter.fill_path(
                    surface,
                    &to_bez_path(&cps, true),
                    &FillPaint::white(),
                    frame.fill_rule,
                    CompositeOp::Over,
                )?;
            }
            InteriorMode::Triangulated => {
                let prims = interior_primitives(&cps, opts.bezulate_max_rounds, opts.flatten_steps);
                mesh.extend(interior_patches(&prims, frame.color));
            }
        }

        patches += mesh.len();
        apply_mesh_mask(surface, &mesh, opts.patch_subdivisions);
    }

    tracing::debug!(sub_frames = samples.len(), patches, "rendered bezier shape");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/shape.rs"]
mod tests;
