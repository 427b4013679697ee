use crate::foundation::core::RectI;
use crate::foundation::error::{RotoError, RotoResult};
use crate::foundation::math::{add_sat_u8, mul_div255_u8};

pub type PremulRgba8 = [u8; 4];

/// Native pixel layout of a [`RasterSurface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceFormat {
    /// One 8-bit alpha byte per pixel.
    A8,
    /// Premultiplied 32-bit ARGB, stored little-endian (`[b, g, r, a]` bytes).
    Argb32,
}

impl SurfaceFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::A8 => 1,
            Self::Argb32 => 4,
        }
    }
}

/// Compositing operator used when drawing onto a surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CompositeOp {
    #[default]
    Over,
    Lighten,
}

pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = add_sat_u8(src[i], mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Separable lighten on premultiplied values:
/// `co = sc*(1-da) + dc*(1-sa) + max(sc*da, dc*sa)`, `ao = sa + da - sa*da`.
pub fn lighten(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = u16::from(src[3]);
    let da = u16::from(dst[3]);
    let mut out = [0u8; 4];
    for i in 0..3 {
        let sc = u16::from(src[i]);
        let dc = u16::from(dst[i]);
        let keep_s = u16::from(mul_div255_u8(sc, 255 - da));
        let keep_d = u16::from(mul_div255_u8(dc, 255 - sa));
        let m = mul_div255_u8(sc, da).max(mul_div255_u8(dc, sa));
        out[i] = (keep_s + keep_d + u16::from(m)).min(255) as u8;
    }
    out[3] = add_sat_u8(src[3], mul_div255_u8(da, 255 - sa));
    out
}

pub fn composite(op: CompositeOp, dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match op {
        CompositeOp::Over => over(dst, src),
        CompositeOp::Lighten => lighten(dst, src),
    }
}

/// Owned 8-bit raster buffer covering a region of interest of the canvas.
///
/// Pixel accessors take canvas coordinates; the surface origin is `roi.x1, roi.y1`.
/// The buffer is released when the surface goes out of scope.
#[derive(Debug)]
pub struct RasterSurface {
    format: SurfaceFormat,
    roi: RectI,
    width: u16,
    height: u16,
    stride: usize,
    data: Vec<u8>,
}

impl RasterSurface {
    pub fn new(format: SurfaceFormat, roi: RectI) -> RotoResult<Self> {
        if roi.is_empty() {
            return Err(RotoError::surface(format!(
                "cannot allocate a surface for empty region ({},{})-({},{})",
                roi.x1, roi.y1, roi.x2, roi.y2
            )));
        }
        let width: u16 = roi
            .width()
            .try_into()
            .map_err(|_| RotoError::surface("surface width exceeds u16"))?;
        let height: u16 = roi
            .height()
            .try_into()
            .map_err(|_| RotoError::surface("surface height exceeds u16"))?;
        let stride = usize::from(width) * format.bytes_per_pixel();
        Ok(Self {
            format,
            roi,
            width,
            height,
            stride,
            data: vec![0; stride * usize::from(height)],
        })
    }

    pub fn format(&self) -> SurfaceFormat {
        self.format
    }

    pub fn roi(&self) -> RectI {
        self.roi
    }

    pub fn origin(&self) -> (i32, i32) {
        (self.roi.x1, self.roi.y1)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if !self.roi.contains_point(x, y) {
            return None;
        }
        let col = (x - self.roi.x1) as usize;
        let row = (y - self.roi.y1) as usize;
        Some(row * self.stride + col * self.format.bytes_per_pixel())
    }

    /// Raw bytes of one pixel in storage order.
    pub fn pixel(&self, x: i32, y: i32) -> Option<&[u8]> {
        let o = self.offset(x, y)?;
        Some(&self.data[o..o + self.format.bytes_per_pixel()])
    }

    pub fn pixel_mut(&mut self, x: i32, y: i32) -> Option<&mut [u8]> {
        let o = self.offset(x, y)?;
        let bpp = self.format.bytes_per_pixel();
        Some(&mut self.data[o..o + bpp])
    }

    /// First stored byte of a pixel: alpha for A8, blue for ARGB32.
    pub fn intensity(&self, x: i32, y: i32) -> Option<u8> {
        self.offset(x, y).map(|o| self.data[o])
    }

    /// Premultiplied RGBA view of a pixel. A8 pixels read as white scaled by alpha.
    pub fn read_rgba(&self, x: i32, y: i32) -> Option<PremulRgba8> {
        let px = self.pixel(x, y)?;
        Some(match self.format {
            SurfaceFormat::A8 => [px[0], px[0], px[0], px[0]],
            SurfaceFormat::Argb32 => [px[2], px[1], px[0], px[3]],
        })
    }

    pub fn write_rgba(&mut self, x: i32, y: i32, rgba: PremulRgba8) -> bool {
        let format = self.format;
        let Some(px) = self.pixel_mut(x, y) else {
            return false;
        };
        match format {
            SurfaceFormat::A8 => px[0] = rgba[3],
            SurfaceFormat::Argb32 => px.copy_from_slice(&[rgba[2], rgba[1], rgba[0], rgba[3]]),
        }
        true
    }

    /// Composite one premultiplied source pixel. A8 surfaces only keep the alpha result.
    pub fn composite_pixel(&mut self, x: i32, y: i32, src: PremulRgba8, op: CompositeOp) {
        let Some(dst) = self.read_rgba(x, y) else {
            return;
        };
        self.write_rgba(x, y, composite(op, dst, src));
    }

    /// Composite a premultiplied RGBA8 buffer (row-major, tightly packed) whose pixel `(0,0)`
    /// lands on canvas pixel `(rect.x1, rect.y1)`.
    pub fn composite_rgba8(&mut self, src: &[u8], rect: RectI, op: CompositeOp) -> RotoResult<()> {
        let expected = (rect.width() as usize)
            .checked_mul(rect.height() as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or_else(|| RotoError::evaluation("composite buffer size overflow"))?;
        if src.len() != expected {
            return Err(RotoError::evaluation(format!(
                "composite_rgba8 expects {expected} bytes, got {}",
                src.len()
            )));
        }
        let Some(clip) = rect.intersect(self.roi) else {
            return Ok(());
        };
        let src_w = rect.width() as usize;
        for y in clip.y1..clip.y2 {
            let row = (y - rect.y1) as usize * src_w;
            for x in clip.x1..clip.x2 {
                let i = (row + (x - rect.x1) as usize) * 4;
                let s = [src[i], src[i + 1], src[i + 2], src[i + 3]];
                if s[3] == 0 && op == CompositeOp::Over {
                    continue;
                }
                self.composite_pixel(x, y, s, op);
            }
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }
}

impl Drop for RasterSurface {
    fn drop(&mut self) {
        tracing::trace!(
            format = ?self.format,
            width = self.width,
            height = self.height,
            "releasing raster surface"
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
