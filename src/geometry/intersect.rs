use std::cmp::Ordering;

use crate::foundation::core::Point;

/// Tolerance used when comparing intersection points.
pub const POINT_EPSILON: f64 = 1e-6;

/// Intersection of the segments `a0-a1` and `b0-b1`, if it lies within both segments.
///
/// Parallel (including collinear) segments report no intersection.
pub fn segment_intersection(a0: Point, a1: Point, b0: Point, b1: Point) -> Option<Point> {
    let da = a1 - a0;
    let db = b1 - b0;
    let denom = da.cross(db);
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    let w = b0 - a0;
    let ta = w.cross(db) / denom;
    let tb = w.cross(da) / denom;
    if (0.0..=1.0).contains(&ta) && (0.0..=1.0).contains(&tb) {
        Some(a0 + da * ta)
    } else {
        None
    }
}

/// Epsilon-tolerant lexicographic order: `x` first, then `y`; coordinates closer than
/// [`POINT_EPSILON`] compare equal.
pub fn cmp_points_eps(a: Point, b: Point) -> Ordering {
    if (a.x - b.x).abs() < POINT_EPSILON {
        if (a.y - b.y).abs() < POINT_EPSILON {
            Ordering::Equal
        } else if a.y < b.y {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    } else if a.x < b.x {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Small sorted set of points deduplicated with [`cmp_points_eps`].
#[derive(Clone, Debug, Default)]
pub struct PointSet {
    points: smallvec::SmallVec<[Point; 4]>,
}

impl PointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `p`; returns `false` when an equal point is already present.
    pub fn insert(&mut self, p: Point) -> bool {
        match self
            .points
            .binary_search_by(|probe| cmp_points_eps(*probe, p))
        {
            Ok(_) => false,
            Err(idx) => {
                self.points.insert(idx, p);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/intersect.rs"]
mod tests;
