use super::*;

#[test]
fn crossing_segments_intersect() {
    let p = segment_intersection(
        Point::new(0.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
        Point::new(10.0, 0.0),
    )
    .unwrap();
    assert!((p.x - 5.0).abs() < 1e-12 && (p.y - 5.0).abs() < 1e-12);
}

#[test]
fn intersection_must_be_bounded_on_both_segments() {
    // Lines cross at (5,5) but the second segment stops at x=4.
    assert!(
        segment_intersection(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(4.0, 6.0),
        )
        .is_none()
    );
    // Parallel segments never intersect.
    assert!(
        segment_intersection(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(10.0, 1.0),
        )
        .is_none()
    );
}

#[test]
fn shared_endpoint_counts_as_intersection() {
    let p = segment_intersection(
        Point::new(0.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(4.0, 3.0),
    )
    .unwrap();
    assert_eq!(cmp_points_eps(p, Point::new(4.0, 0.0)), Ordering::Equal);
}

#[test]
fn point_set_dedups_within_epsilon() {
    let mut set = PointSet::new();
    assert!(set.insert(Point::new(1.0, 2.0)));
    assert!(!set.insert(Point::new(1.0 + 1e-8, 2.0 - 1e-8)));
    assert!(set.insert(Point::new(1.0, 3.0)));
    assert!(set.insert(Point::new(-1.0, 3.0)));
    assert_eq!(set.len(), 3);
    let xs: Vec<f64> = set.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![-1.0, 1.0, 1.0]);
}
