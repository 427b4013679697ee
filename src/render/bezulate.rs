//! Convex decomposition of a closed bezier ("bezulation").
//!
//! The working curve is cut into ears of 3 or 4 control points along chords that stay inside
//! the control polygon. When no chord qualifies every segment is split at its midpoint and the
//! scan restarts. Cut edges are straight: the handles on both sides of a chord are collapsed
//! onto their anchor, so the emitted sub-curves tile the original interior.

use crate::foundation::core::Point;
use crate::geometry::bezier::{CpSample, split_segment};
use crate::geometry::intersect::{PointSet, segment_intersection};
use crate::geometry::polygon::{FillRule, point_in_polygon, polygon_bbox};

/// Decompose `cps` into sub-curves of 2..=4 control points.
///
/// After `max_rounds` subdivision rounds without reaching 4 points, the remainder is emitted
/// as a fan of 3-point sub-curves anchored at its first vertex.
pub fn bezulate(cps: &[CpSample], max_rounds: usize) -> Vec<Vec<CpSample>> {
    debug_assert!(cps.len() >= 2, "bezulation needs at least two control points");
    if cps.len() < 2 {
        return Vec::new();
    }

    let mut work = cps.to_vec();
    let mut patches = Vec::new();
    let mut rounds = 0usize;

    while work.len() > 4 {
        if let Some((start, n)) = find_ear(&work) {
            patches.push(cut_ear(&mut work, start, n));
            continue;
        }
        if rounds >= max_rounds {
            tracing::warn!(
                rounds,
                remaining = work.len(),
                "bezulation did not converge, falling back to a fan"
            );
            patches.extend(fan(&work));
            return patches;
        }
        rounds += 1;
        work = subdivide(&work);
    }

    tracing::debug!(patches = patches.len() + 1, rounds, "bezulated closed curve");
    patches.push(work);
    patches
}

/// First chord `start -> start + n` (n = 3, then 2) that meets the control polygon only at its
/// two endpoints and whose midpoint lies inside.
fn find_ear(work: &[CpSample]) -> Option<(usize, usize)> {
    let polygon: Vec<Point> = work.iter().map(|cp| cp.pos).collect();
    let bbox = polygon_bbox(&polygon);
    let len = polygon.len();
    for n in [3usize, 2] {
        for i in 0..len {
            let a = polygon[i];
            let b = polygon[(i + n) % len];
            let mut hits = PointSet::new();
            for k in 0..len {
                if let Some(p) = segment_intersection(a, b, polygon[k], polygon[(k + 1) % len]) {
                    hits.insert(p);
                }
            }
            if hits.len() != 2 {
                continue;
            }
            if point_in_polygon(a.midpoint(b), &polygon, bbox, FillRule::Winding) {
                return Some((i, n));
            }
        }
    }
    None
}

fn cut_ear(work: &mut Vec<CpSample>, start: usize, n: usize) -> Vec<CpSample> {
    let len = work.len();
    let end = (start + n) % len;

    let mut ear: Vec<CpSample> = (0..=n).map(|k| work[(start + k) % len]).collect();
    if let Some(first) = ear.first_mut() {
        first.left = first.pos;
    }
    if let Some(last) = ear.last_mut() {
        last.right = last.pos;
    }

    work[start].right = work[start].pos;
    work[end].left = work[end].pos;

    let mut interior: Vec<usize> = (1..n).map(|k| (start + k) % len).collect();
    interior.sort_unstable_by(|a, b| b.cmp(a));
    for idx in interior {
        work.remove(idx);
    }
    ear
}

/// Split every segment of the closed curve at `t = 0.5`, keeping the curve unchanged.
pub(crate) fn subdivide(work: &[CpSample]) -> Vec<CpSample> {
    let len = work.len();
    let mut cps = work.to_vec();
    let mut mids = Vec::with_capacity(len);
    for i in 0..len {
        let j = (i + 1) % len;
        let (a_right, mid, b_left) = split_segment(&work[i], &work[j]);
        cps[i].right = a_right;
        cps[j].left = b_left;
        mids.push(mid);
    }
    let mut out = Vec::with_capacity(len * 2);
    for (cp, mid) in cps.into_iter().zip(mids) {
        out.push(cp);
        out.push(mid);
    }
    out
}

fn fan(work: &[CpSample]) -> Vec<Vec<CpSample>> {
    let last = work.len() - 2;
    (1..=last)
        .map(|k| {
            let mut anchor = CpSample::corner(work[0].pos);
            let mut a = work[k];
            let mut b = work[k + 1];
            if k == 1 {
                anchor.right = work[0].right;
            } else {
                a.left = a.pos;
            }
            if k == last {
                anchor.left = work[0].left;
            } else {
                b.right = b.pos;
            }
            vec![anchor, a, b]
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/bezulate.rs"]
mod tests;
