use kurbo::{CubicBez, ParamCurve};

use crate::foundation::core::{Affine, Point};
use crate::foundation::math::mip_scale;

/// A control point sampled at a fixed time: position plus absolute tangent handles.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CpSample {
    pub pos: Point,
    pub left: Point,
    pub right: Point,
}

impl CpSample {
    pub fn new(pos: Point, left: Point, right: Point) -> Self {
        Self { pos, left, right }
    }

    /// A corner point whose handles sit on the point itself.
    pub fn corner(pos: Point) -> Self {
        Self {
            pos,
            left: pos,
            right: pos,
        }
    }

    pub fn transformed(self, t: Affine) -> Self {
        Self {
            pos: t * self.pos,
            left: t * self.left,
            right: t * self.right,
        }
    }
}

/// The cubic running from `a` to `b`.
pub fn segment(a: &CpSample, b: &CpSample) -> CubicBez {
    CubicBez::new(a.pos, a.right, b.left, b.pos)
}

/// Split the segment `a -> b` at its parametric midpoint.
///
/// Returns the updated right handle of `a`, the inserted midpoint control point, and the
/// updated left handle of `b`; the curve is unchanged.
pub fn split_segment(a: &CpSample, b: &CpSample) -> (Point, CpSample, Point) {
    let (l, r) = segment(a, b).subdivide();
    (l.p1, CpSample::new(l.p3, l.p2, r.p1), r.p2)
}

/// Apply the shape transform and the mip scale to every control point.
pub fn to_pixel_space(cps: &[CpSample], transform: Affine, mip_level: u32) -> Vec<CpSample> {
    let t = Affine::scale(mip_scale(mip_level)) * transform;
    cps.iter().map(|cp| cp.transformed(t)).collect()
}

/// Flatten the curve into a polyline with `steps` samples per segment.
///
/// For closed curves the segment end points are not repeated (the closing segment returns
/// to the first point implicitly); open curves end with their last control point.
pub fn flatten(cps: &[CpSample], closed: bool, steps: usize) -> Vec<Point> {
    let steps = steps.max(1);
    match cps.len() {
        0 => return Vec::new(),
        1 => return vec![cps[0].pos],
        _ => {}
    }
    let segs = if closed { cps.len() } else { cps.len() - 1 };
    let mut out = Vec::with_capacity(segs * steps + 1);
    for i in 0..segs {
        let c = segment(&cps[i], &cps[(i + 1) % cps.len()]);
        for s in 0..steps {
            out.push(c.eval(s as f64 / steps as f64));
        }
    }
    if !closed {
        out.push(cps[cps.len() - 1].pos);
    }
    out
}

/// Closed cubic path through the control points, for path filling.
pub fn to_bez_path(cps: &[CpSample], closed: bool) -> kurbo::BezPath {
    let mut path = kurbo::BezPath::new();
    let Some(first) = cps.first() else {
        return path;
    };
    path.move_to(first.pos);
    let segs = if closed { cps.len() } else { cps.len() - 1 };
    for i in 0..segs {
        let a = &cps[i];
        let b = &cps[(i + 1) % cps.len()];
        path.curve_to(a.right, b.left, b.pos);
    }
    if closed {
        path.close_path();
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/bezier.rs"]
mod tests;
