use super::*;

#[test]
fn circle_points_lie_on_radius() {
    let c = BezierShape::circle(Point::new(3.0, -2.0), 50.0);
    let frame = c.at(0.0).unwrap();
    assert_eq!(frame.cps.len(), 4);
    for cp in &frame.cps {
        assert!(((cp.pos - Point::new(3.0, -2.0)).hypot() - 50.0).abs() < 1e-9);
    }
    assert!(crate::geometry::polygon::is_clockwise(
        &frame.cps.iter().map(|c| c.pos).collect::<Vec<_>>()
    ));
}

#[test]
fn feather_points_default_to_shape() {
    let frame = BezierShape::circle(Point::ZERO, 10.0).at(0.0).unwrap();
    assert_eq!(frame.cps, frame.feather_cps);
}

#[test]
fn mismatched_feather_points_fail_validation() {
    let mut s = BezierShape::polygon(&[
        Point::new(0.0, 0.0),
        Point::new(5.0, 0.0),
        Point::new(5.0, 5.0),
    ]);
    assert!(s.validate().is_ok());
    s.feather_points = Some(vec![ControlPoint::corner(Point::ZERO)]);
    assert!(s.validate().is_err());
    assert!(BezierShape::polygon(&[]).validate().is_err());
}

#[test]
fn fillable_requires_closed_activated_and_two_points() {
    let mut s = BezierShape::polygon(&[Point::new(0.0, 0.0), Point::new(5.0, 0.0)]);
    assert!(s.is_fillable());
    s.closed = false;
    assert!(!s.is_fillable());
    s.closed = true;
    s.activated = false;
    assert!(!s.is_fillable());
    assert!(!BezierShape::polygon(&[Point::ZERO]).is_fillable());
}

#[test]
fn transform_is_applied_to_samples() {
    let mut s = BezierShape::polygon(&[Point::new(1.0, 1.0), Point::new(2.0, 1.0)]);
    s.transform = Anim::constant(Affine::scale(2.0));
    let f = s.at(0.0).unwrap();
    assert_eq!(f.cps[1].pos, Point::new(4.0, 2.0));
    assert_eq!(f.feather_cps[1].pos, Point::new(4.0, 2.0));
}

#[test]
fn non_positive_falloff_is_neutralized() {
    let mut s = BezierShape::circle(Point::ZERO, 4.0);
    s.feather_falloff = Anim::constant(0.0);
    assert_eq!(s.at(0.0).unwrap().feather_falloff, 1.0);
}
