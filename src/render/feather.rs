//! Feather band and interior patch builders.
//!
//! The feather band joins the flattened shape boundary (inner) to the flattened feather curve
//! pushed outward by the feather distance (outer). Inner corners carry the shape color at full
//! alpha, outer corners the same color at zero alpha.

use crate::foundation::core::{Point, Rgb, Vec2};
use crate::geometry::bezier::{CpSample, flatten};
use crate::geometry::polygon::{is_clockwise, is_convex, signed_area2};
use crate::render::bezulate::bezulate;
use crate::render::mesh::{CoonsPatch, Rgba, line_controls};

/// Flattened contours of one shape at one instant, in pixel space.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatherPolygons {
    pub inner: Vec<Point>,
    pub feather: Vec<Point>,
    pub outer: Vec<Point>,
    pub clockwise: bool,
}

impl FeatherPolygons {
    pub fn compute(
        cps: &[CpSample],
        feather_cps: &[CpSample],
        feather_distance: f64,
        steps: usize,
    ) -> Self {
        let inner = flatten(cps, true, steps);
        let feather = flatten(feather_cps, true, steps);
        let clockwise = is_clockwise(&inner);
        let outer = offset_contour(&feather, feather_distance.abs(), clockwise);
        debug_assert_eq!(inner.len(), outer.len());
        Self {
            inner,
            feather,
            outer,
            clockwise,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len().min(self.outer.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Push every point outward along the normal of `next - prev`. A zero-length normal leaves the
/// point in place.
fn offset_contour(points: &[Point], distance: f64, clockwise: bool) -> Vec<Point> {
    let n = points.len();
    if n < 2 || distance == 0.0 {
        return points.to_vec();
    }
    (0..n)
        .map(|i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            let d = next - prev;
            let norm = d.hypot();
            if norm == 0.0 {
                return points[i];
            }
            let normal = Vec2::new(-d.y / norm, d.x / norm);
            if clockwise {
                points[i] - normal * distance
            } else {
                points[i] + normal * distance
            }
        })
        .collect()
}

/// Falloff-weighted tangent controls for the inner-to-outer side of a feather patch.
///
/// Returns `(p0p1, p1p0)` for the side `p0 -> p1`.
pub fn falloff_controls(p0: Point, p1: Point, fall_off: f64) -> (Point, Point) {
    let f = fall_off;
    let a = (p0.to_vec2() * (f * 2.0) + p1.to_vec2() / f) / (f * 2.0 + 1.0 / f);
    let b = (p0.to_vec2() * f + p1.to_vec2() * (2.0 / f)) / (f + 2.0 / f);
    (a.to_point(), b.to_point())
}

/// Feather patch with inner corners `p0`, `p3` and outer corners `p1`, `p2`.
pub fn feather_patch(p0: Point, p1: Point, p2: Point, p3: Point, color: Rgb, fall_off: f64) -> CoonsPatch {
    let (p0p1, p1p0) = falloff_controls(p0, p1, fall_off);
    let (p3p2, p2p3) = falloff_controls(p3, p2, fall_off);
    let [r, g, b] = color.to_array();
    let solid = [r, g, b, 1.0];
    let clear = [r, g, b, 0.0];
    CoonsPatch::new(
        [p0, p1, p2, p3],
        [
            [p0p1, p1p0],
            line_controls(p1, p2),
            [p2p3, p3p2],
            line_controls(p3, p0),
        ],
        [solid, clear, clear, solid],
    )
}

/// One patch per consecutive pair of feather samples, closing back on the first sample.
pub fn discretized_feather(polys: &FeatherPolygons, color: Rgb, fall_off: f64) -> Vec<CoonsPatch> {
    let n = polys.len();
    if n < 2 {
        return Vec::new();
    }
    let mut patches = Vec::with_capacity(n);
    for i in 1..=n {
        let cur = i % n;
        let prev = i - 1;
        if polys.feather[cur] == polys.feather[prev] {
            continue;
        }
        patches.push(feather_patch(
            polys.inner[prev],
            polys.outer[prev],
            polys.outer[cur],
            polys.inner[cur],
            color,
            fall_off,
        ));
    }
    patches
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatherVertex {
    pub pos: Point,
    pub inner: bool,
}

/// Two triangles per pair of samples across the feather band.
pub fn feather_triangles(polys: &FeatherPolygons) -> Vec<[FeatherVertex; 3]> {
    let n = polys.len();
    if n < 2 {
        return Vec::new();
    }
    let inner = |i: usize| FeatherVertex {
        pos: polys.inner[i % n],
        inner: true,
    };
    let outer = |i: usize| FeatherVertex {
        pos: polys.outer[i % n],
        inner: false,
    };
    let mut tris = Vec::with_capacity(n * 2);
    for i in 0..n {
        tris.push([inner(i), outer(i), outer(i + 1)]);
        tris.push([inner(i), outer(i + 1), inner(i + 1)]);
    }
    tris
}

/// Degenerate feather patch for one triangle: `p0 = inner0, p1 = outer0`, then
/// `p2 = outer1` or `p1`, `p3 = inner1` or `p0`.
pub fn triangle_feather_patch(tri: &[FeatherVertex; 3], color: Rgb, fall_off: f64) -> Option<CoonsPatch> {
    let inners: Vec<Point> = tri.iter().filter(|v| v.inner).map(|v| v.pos).collect();
    let outers: Vec<Point> = tri.iter().filter(|v| !v.inner).map(|v| v.pos).collect();
    let (p0, p1, p2, p3) = match (inners.as_slice(), outers.as_slice()) {
        ([i0], [o0, o1]) => (*i0, *o0, *o1, *i0),
        ([i0, i1], [o0]) => (*i0, *o0, *o0, *i1),
        _ => return None,
    };
    Some(feather_patch(p0, p1, p2, p3, color, fall_off))
}

pub fn triangulated_feather(polys: &FeatherPolygons, color: Rgb, fall_off: f64) -> Vec<CoonsPatch> {
    feather_triangles(polys)
        .iter()
        .filter_map(|tri| triangle_feather_patch(tri, color, fall_off))
        .collect()
}

/// Interior primitive emitted for one bezulated sub-curve.
#[derive(Clone, Debug, PartialEq)]
pub enum InteriorPrimitive {
    Triangles(Vec<[Point; 3]>),
    Fan(Vec<Point>),
    Strip(Vec<Point>),
}

/// Convex polygons with at least this many vertices are emitted as strips rather than fans.
const STRIP_MIN_VERTICES: usize = 6;

impl InteriorPrimitive {
    pub fn triangles(&self) -> Vec<[Point; 3]> {
        match self {
            Self::Triangles(t) => t.clone(),
            Self::Fan(pts) => (1..pts.len().saturating_sub(1))
                .map(|k| [pts[0], pts[k], pts[k + 1]])
                .collect(),
            Self::Strip(pts) => (0..pts.len().saturating_sub(2))
                .map(|k| [pts[k], pts[k + 1], pts[k + 2]])
                .collect(),
        }
    }
}

/// Triangulate one flattened polygon.
pub fn triangulate_polygon(points: &[Point]) -> Option<InteriorPrimitive> {
    let mut pts: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if pts.last().is_none_or(|q: &Point| (*q - p).hypot() > 1e-9) {
            pts.push(p);
        }
    }
    while pts.len() > 1 && (pts[0] - pts[pts.len() - 1]).hypot() <= 1e-9 {
        pts.pop();
    }
    let pts = drop_collinear(&pts);
    if pts.len() < 3 {
        return None;
    }
    if is_convex(&pts) {
        if pts.len() >= STRIP_MIN_VERTICES {
            return Some(InteriorPrimitive::Strip(strip_order(&pts)));
        }
        return Some(InteriorPrimitive::Fan(pts));
    }
    Some(InteriorPrimitive::Triangles(ear_clip(&pts)))
}

fn drop_collinear(pts: &[Point]) -> Vec<Point> {
    let n = pts.len();
    if n < 4 {
        return pts.to_vec();
    }
    (0..n)
        .filter(|&i| {
            let prev = pts[(i + n - 1) % n];
            let next = pts[(i + 1) % n];
            let cur = pts[i];
            let scale = (cur - prev).hypot() * (next - cur).hypot();
            (cur - prev).cross(next - cur).abs() > 1e-9 * scale
        })
        .map(|i| pts[i])
        .collect()
}

/// Zig-zag ordering of a convex polygon: `0, 1, n-1, 2, n-2, ...`.
fn strip_order(pts: &[Point]) -> Vec<Point> {
    let n = pts.len();
    let mut out = Vec::with_capacity(n);
    out.push(pts[0]);
    let (mut lo, mut hi) = (1usize, n - 1);
    let mut take_lo = true;
    while lo <= hi {
        if take_lo {
            out.push(pts[lo]);
            lo += 1;
        } else {
            out.push(pts[hi]);
            hi -= 1;
        }
        take_lo = !take_lo;
    }
    out
}

fn ear_clip(pts: &[Point]) -> Vec<[Point; 3]> {
    let orientation = signed_area2(pts).signum();
    let mut idx: Vec<usize> = (0..pts.len()).collect();
    let mut tris = Vec::with_capacity(pts.len().saturating_sub(2));
    while idx.len() > 3 {
        let m = idx.len();
        let ear = (0..m).find(|&k| {
            let a = pts[idx[(k + m - 1) % m]];
            let b = pts[idx[k]];
            let c = pts[idx[(k + 1) % m]];
            let turn = (b - a).cross(c - b);
            if turn * orientation <= 0.0 {
                return false;
            }
            !idx.iter().any(|&j| {
                let p = pts[j];
                p != a && p != b && p != c && in_triangle(p, a, b, c)
            })
        });
        let Some(k) = ear else {
            // Self-intersecting remainder: emit it as a fan.
            tris.extend((1..m - 1).map(|j| [pts[idx[0]], pts[idx[j]], pts[idx[j + 1]]]));
            return tris;
        };
        tris.push([
            pts[idx[(k + m - 1) % m]],
            pts[idx[k]],
            pts[idx[(k + 1) % m]],
        ]);
        idx.remove(k);
    }
    tris.push([pts[idx[0]], pts[idx[1]], pts[idx[2]]]);
    tris
}

fn in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let d1 = (b - a).cross(p - a);
    let d2 = (c - b).cross(p - b);
    let d3 = (a - c).cross(p - c);
    (d1 > 0.0 && d2 > 0.0 && d3 > 0.0) || (d1 < 0.0 && d2 < 0.0 && d3 < 0.0)
}

/// Bezulate a closed curve, flatten each sub-curve and triangulate it.
pub fn interior_primitives(cps: &[CpSample], max_rounds: usize, steps: usize) -> Vec<InteriorPrimitive> {
    bezulate(cps, max_rounds)
        .iter()
        .filter_map(|sub| triangulate_polygon(&flatten(sub, true, steps)))
        .collect()
}

pub fn interior_patches(primitives: &[InteriorPrimitive], color: Rgb) -> Vec<CoonsPatch> {
    let [r, g, b] = color.to_array();
    let solid: Rgba = [r, g, b, 1.0];
    primitives
        .iter()
        .flat_map(|p| p.triangles())
        .map(|[a, b, c]| CoonsPatch::triangle(a, b, c, solid))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/feather.rs"]
mod tests;
