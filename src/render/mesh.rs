//! Coons-patch mesh gradients.
//!
//! A [`MeshPattern`] is an ordered list of [`CoonsPatch`]es. Rasterization tessellates every
//! patch on a small grid and fills each cell as two Gouraud-shaded triangles sampled at pixel
//! centers, without antialiasing. Later patches replace earlier ones where they overlap.

use kurbo::{CubicBez, ParamCurve};

use crate::foundation::core::{Point, RectI};
use crate::foundation::math::unit_to_u8;
use crate::render::surface::{CompositeOp, RasterSurface};

/// Straight (non-premultiplied) RGBA, each channel in `[0, 1]`.
pub type Rgba = [f64; 4];

/// Four boundary curves joined corner to corner: side `k` runs from `corners[k]` to
/// `corners[(k + 1) % 4]` through `controls[k]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoonsPatch {
    pub corners: [Point; 4],
    pub controls: [[Point; 2]; 4],
    pub colors: [Rgba; 4],
}

impl CoonsPatch {
    pub fn new(corners: [Point; 4], controls: [[Point; 2]; 4], colors: [Rgba; 4]) -> Self {
        Self {
            corners,
            controls,
            colors,
        }
    }

    /// Patch whose four sides are straight lines.
    pub fn lines(corners: [Point; 4], colors: [Rgba; 4]) -> Self {
        let mut controls = [[Point::ZERO; 2]; 4];
        for (k, c) in controls.iter_mut().enumerate() {
            *c = line_controls(corners[k], corners[(k + 1) % 4]);
        }
        Self::new(corners, controls, colors)
    }

    /// Degenerate patch covering the triangle `a, b, c` (corner 1 is repeated).
    pub fn triangle(a: Point, b: Point, c: Point, color: Rgba) -> Self {
        Self::lines([a, b, b, c], [color; 4])
    }

    pub fn side(&self, k: usize) -> CubicBez {
        let k = k % 4;
        let [c1, c2] = self.controls[k];
        CubicBez::new(self.corners[k], c1, c2, self.corners[(k + 1) % 4])
    }

    /// Point of the bilinearly blended Coons surface. `u` runs along side 0 (corner 0 to 1),
    /// `v` along side 3 reversed (corner 0 to 3).
    pub fn eval(&self, u: f64, v: f64) -> Point {
        let c0 = self.side(0).eval(u).to_vec2();
        let c1 = self.side(2).eval(1.0 - u).to_vec2();
        let d0 = self.side(3).eval(1.0 - v).to_vec2();
        let d1 = self.side(1).eval(v).to_vec2();
        let [p0, p1, p2, p3] = self.corners.map(|p| p.to_vec2());
        let ruled = c0 * (1.0 - v) + c1 * v + d0 * (1.0 - u) + d1 * u;
        let bilinear = p0 * ((1.0 - u) * (1.0 - v))
            + p1 * (u * (1.0 - v))
            + p2 * (u * v)
            + p3 * ((1.0 - u) * v);
        (ruled - bilinear).to_point()
    }

    pub fn color_at(&self, u: f64, v: f64) -> Rgba {
        let w = [
            (1.0 - u) * (1.0 - v),
            u * (1.0 - v),
            u * v,
            (1.0 - u) * v,
        ];
        let mut out = [0.0; 4];
        for (k, c) in self.colors.iter().enumerate() {
            for i in 0..4 {
                out[i] += c[i] * w[k];
            }
        }
        out
    }

    fn control_polygon_extent(&self) -> f64 {
        (0..4)
            .map(|k| {
                let s = self.side(k);
                (s.p1 - s.p0).hypot() + (s.p2 - s.p1).hypot() + (s.p3 - s.p2).hypot()
            })
            .fold(0.0, f64::max)
    }
}

pub(crate) fn line_controls(a: Point, b: Point) -> [Point; 2] {
    [a.lerp(b, 1.0 / 3.0), a.lerp(b, 2.0 / 3.0)]
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshPattern {
    patches: Vec<CoonsPatch>,
}

impl MeshPattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_patch(&mut self, patch: CoonsPatch) {
        self.patches.push(patch);
    }

    pub fn extend(&mut self, patches: impl IntoIterator<Item = CoonsPatch>) {
        self.patches.extend(patches);
    }

    pub fn patches(&self) -> &[CoonsPatch] {
        &self.patches
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Rasterize the mesh over `roi` into premultiplied float RGBA, row-major.
    pub fn rasterize(&self, roi: RectI, max_subdivisions: usize) -> MeshRaster {
        let mut raster = MeshRaster::new(roi);
        for patch in &self.patches {
            raster.fill_patch(patch, max_subdivisions.max(1));
        }
        raster
    }
}

/// Premultiplied float RGBA covering a region of interest.
#[derive(Clone, Debug)]
pub struct MeshRaster {
    roi: RectI,
    pixels: Vec<Rgba>,
}

impl MeshRaster {
    fn new(roi: RectI) -> Self {
        Self {
            roi,
            pixels: vec![[0.0; 4]; roi.width() as usize * roi.height() as usize],
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        if !self.roi.contains_point(x, y) {
            return None;
        }
        let i = (y - self.roi.y1) as usize * self.roi.width() as usize + (x - self.roi.x1) as usize;
        Some(self.pixels[i])
    }

    fn fill_patch(&mut self, patch: &CoonsPatch, max_subdivisions: usize) {
        let n = ((patch.control_polygon_extent() / 2.0).ceil() as usize).clamp(1, max_subdivisions);
        let step = 1.0 / n as f64;
        let mut grid = Vec::with_capacity((n + 1) * (n + 1));
        for j in 0..=n {
            let v = j as f64 * step;
            for i in 0..=n {
                let u = i as f64 * step;
                grid.push((patch.eval(u, v), patch.color_at(u, v)));
            }
        }
        let at = |i: usize, j: usize| grid[j * (n + 1) + i];
        for j in 0..n {
            for i in 0..n {
                let (a, b, c, d) = (at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1));
                self.fill_triangle([a, b, c]);
                self.fill_triangle([a, c, d]);
            }
        }
    }

    fn fill_triangle(&mut self, mut tri: [(Point, Rgba); 3]) {
        let area = (tri[1].0 - tri[0].0).cross(tri[2].0 - tri[0].0);
        if area.abs() < 1e-12 || !area.is_finite() {
            return;
        }
        if area < 0.0 {
            tri.swap(1, 2);
        }
        let area = area.abs();
        let [(p0, c0), (p1, c1), (p2, c2)] = tri;

        let x_min = p0.x.min(p1.x).min(p2.x).floor() as i32;
        let y_min = p0.y.min(p1.y).min(p2.y).floor() as i32;
        let x_max = p0.x.max(p1.x).max(p2.x).ceil() as i32;
        let y_max = p0.y.max(p1.y).max(p2.y).ceil() as i32;
        let Some(bounds) = RectI {
            x1: x_min,
            y1: y_min,
            x2: x_max + 1,
            y2: y_max + 1,
        }
        .intersect(self.roi) else {
            return;
        };

        let width = self.roi.width() as usize;
        for y in bounds.y1..bounds.y2 {
            for x in bounds.x1..bounds.x2 {
                let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                let w0 = edge_weight(p1, p2, p);
                let w1 = edge_weight(p2, p0, p);
                let w2 = edge_weight(p0, p1, p);
                if !(inside(w0, p1, p2) && inside(w1, p2, p0) && inside(w2, p0, p1)) {
                    continue;
                }
                let (b0, b1, b2) = (w0 / area, w1 / area, w2 / area);
                let mut rgba = [0.0; 4];
                for i in 0..4 {
                    rgba[i] = c0[i] * b0 + c1[i] * b1 + c2[i] * b2;
                }
                let a = rgba[3].clamp(0.0, 1.0);
                let idx = (y - self.roi.y1) as usize * width + (x - self.roi.x1) as usize;
                self.pixels[idx] = [rgba[0] * a, rgba[1] * a, rgba[2] * a, a];
            }
        }
    }
}

/// Evaluated in a canonical endpoint order so that a shared edge yields exactly opposite
/// weights in its two triangles.
fn edge_weight(a: Point, b: Point, p: Point) -> f64 {
    if (a.x, a.y) > (b.x, b.y) {
        return -edge_weight(b, a, p);
    }
    (b - a).cross(p - a)
}

/// Pixel centers exactly on a shared edge belong to only one of the two triangles.
fn inside(w: f64, a: Point, b: Point) -> bool {
    if w > 0.0 {
        return true;
    }
    if w < 0.0 {
        return false;
    }
    let d = b - a;
    d.y < 0.0 || (d.y == 0.0 && d.x > 0.0)
}

/// Paint `mesh` onto `surface` using the mesh itself as the mask: each pixel's premultiplied
/// color is scaled by its own alpha and composited OVER.
pub fn apply_mesh_mask(surface: &mut RasterSurface, mesh: &MeshPattern, max_subdivisions: usize) {
    if mesh.is_empty() {
        return;
    }
    let roi = surface.roi();
    let raster = mesh.rasterize(roi, max_subdivisions);
    for y in roi.y1..roi.y2 {
        for x in roi.x1..roi.x2 {
            let Some(px) = raster.get(x, y) else {
                continue;
            };
            let m = px[3];
            if m <= 0.0 {
                continue;
            }
            let src = [
                unit_to_u8(px[0] * m),
                unit_to_u8(px[1] * m),
                unit_to_u8(px[2] * m),
                unit_to_u8(px[3] * m),
            ];
            surface.composite_pixel(x, y, src, CompositeOp::Over);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/mesh.rs"]
mod tests;
