use kurbo::Shape;
use vello_cpu::peniko;

use crate::foundation::core::{Affine, BezPath, RectI};
use crate::foundation::error::{RotoError, RotoResult};
use crate::geometry::polygon::FillRule;
use crate::render::surface::{CompositeOp, RasterSurface};

/// Coverage threshold handed to vello_cpu to disable antialiasing.
const NON_AA_THRESHOLD: u8 = 128;

/// Paint source for a path fill.
#[derive(Clone, Debug)]
pub enum FillPaint {
    /// Straight RGBA in `[0, 1]`.
    Solid([f32; 4]),
    /// Gradient in its own coordinate space, placed on the canvas by `transform`.
    Gradient {
        gradient: peniko::Gradient,
        transform: Affine,
    },
}

impl FillPaint {
    pub fn white() -> Self {
        Self::Solid([1.0, 1.0, 1.0, 1.0])
    }
}

/// Bridge to `vello_cpu`: fills paths into a scratch pixmap and composites the result onto a
/// [`RasterSurface`] with the requested operator.
#[derive(Default)]
pub struct Painter {
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for Painter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Painter")
            .field("has_ctx", &self.ctx.is_some())
            .finish()
    }
}

impl Painter {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> R,
    ) -> R {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx);
        self.ctx = Some(ctx);
        out
    }

    /// Fill `path` (canvas coordinates) without antialiasing and composite it onto `surface`.
    pub fn fill_path(
        &mut self,
        surface: &mut RasterSurface,
        path: &BezPath,
        paint: &FillPaint,
        fill_rule: FillRule,
        op: CompositeOp,
    ) -> RotoResult<()> {
        let Some(bounds) = RectI::enclosing(path.bounding_box()).intersect(surface.roi()) else {
            return Ok(());
        };
        let width: u16 = bounds
            .width()
            .try_into()
            .map_err(|_| RotoError::surface("fill width exceeds u16"))?;
        let height: u16 = bounds
            .height()
            .try_into()
            .map_err(|_| RotoError::surface("fill height exceeds u16"))?;

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        self.with_ctx_mut(width, height, |ctx| {
            ctx.set_transform(Affine::translate((
                -f64::from(bounds.x1),
                -f64::from(bounds.y1),
            )));
            ctx.set_fill_rule(fill_to_cpu(fill_rule));
            ctx.set_aliasing_threshold(Some(NON_AA_THRESHOLD));
            match paint {
                FillPaint::Solid(rgba) => {
                    ctx.reset_paint_transform();
                    ctx.set_paint(peniko::Color::new(*rgba));
                }
                FillPaint::Gradient {
                    gradient,
                    transform,
                } => {
                    ctx.set_paint_transform(*transform);
                    ctx.set_paint(gradient.clone());
                }
            }
            ctx.fill_path(path);
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
        });

        surface.composite_rgba8(pixmap.data_as_u8_slice(), bounds, op)
    }
}

fn fill_to_cpu(rule: FillRule) -> peniko::Fill {
    match rule {
        FillRule::Winding => peniko::Fill::NonZero,
        FillRule::EvenOdd => peniko::Fill::EvenOdd,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
