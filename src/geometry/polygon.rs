use crate::foundation::core::{Point, Rect};

/// Fill rule used for polygon membership and path filling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FillRule {
    /// Non-zero winding number.
    #[default]
    Winding,
    /// Odd crossing count.
    EvenOdd,
}

/// Accumulate the crossing of the edge `a -> b` with the horizontal ray going left from `pos`.
///
/// Horizontal edges are ignored and each edge is treated as half-open in `y`, which is the
/// usual scan conversion rule and keeps vertices from being counted twice.
pub(crate) fn accumulate_crossing(a: Point, b: Point, pos: Point, winding: &mut i32) {
    let (mut x1, mut y1, mut x2, mut y2) = (a.x, a.y, b.x, b.y);
    if (y1 - y2).abs() <= f64::EPSILON * y1.abs().max(y2.abs()).max(1.0) {
        return;
    }
    let mut dir = 1;
    if y2 < y1 {
        std::mem::swap(&mut x1, &mut x2);
        std::mem::swap(&mut y1, &mut y2);
        dir = -1;
    }
    if pos.y >= y1 && pos.y < y2 {
        let x = x1 + ((x2 - x1) / (y2 - y1)) * (pos.y - y1);
        if x <= pos.x {
            *winding += dir;
        }
    }
}

/// Winding number of `pos` against the closed polygon (the closing edge is implicit).
pub fn winding_number(pos: Point, polygon: &[Point]) -> i32 {
    let mut winding = 0;
    let Some(&first) = polygon.first() else {
        return 0;
    };
    for w in polygon.windows(2) {
        accumulate_crossing(w[0], w[1], pos, &mut winding);
    }
    if polygon.len() > 1 {
        accumulate_crossing(polygon[polygon.len() - 1], first, pos, &mut winding);
    }
    winding
}

/// Polygon membership test with a precomputed bounding box.
///
/// The box rejection uses half-open intervals, so points on the right or bottom edge of
/// `bbox` are outside.
pub fn point_in_polygon(p: Point, polygon: &[Point], bbox: Rect, rule: FillRule) -> bool {
    if p.x < bbox.x0 || p.x >= bbox.x1 || p.y < bbox.y0 || p.y >= bbox.y1 || polygon.is_empty() {
        return false;
    }
    let wn = winding_number(p, polygon);
    match rule {
        FillRule::Winding => wn != 0,
        FillRule::EvenOdd => wn % 2 != 0,
    }
}

/// Bounding box of a point list; an empty list yields an empty rect at the origin.
pub fn polygon_bbox(points: &[Point]) -> Rect {
    let Some(&first) = points.first() else {
        return Rect::ZERO;
    };
    let mut r = Rect::from_points(first, first);
    for &p in &points[1..] {
        r = r.union_pt(p);
    }
    r
}

/// Twice the signed area (shoelace). Positive when the polygon turns clockwise on a y-down
/// pixel grid.
pub fn signed_area2(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        acc += a.x * b.y - b.x * a.y;
    }
    acc
}

pub fn is_clockwise(points: &[Point]) -> bool {
    signed_area2(points) > 0.0
}

/// True when every turn of the closed polygon has the same sign (collinear turns allowed).
pub fn is_convex(points: &[Point]) -> bool {
    let n = points.len();
    if n < 4 {
        return n == 3;
    }
    let mut sign = 0.0f64;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let cross = (b - a).cross(c - b);
        if cross.abs() < 1e-12 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    sign != 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/polygon.rs"]
mod tests;
