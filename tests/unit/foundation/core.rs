use super::*;

#[test]
fn rect_rejects_inverted_bounds() {
    assert!(RectI::new(0, 0, 10, 10).is_ok());
    assert!(RectI::new(5, 0, 4, 10).is_err());
    assert!(RectI::new(0, 5, 10, 4).is_err());
}

#[test]
fn rect_contains_is_half_open() {
    let r = RectI::new(-60, -60, 61, 61).unwrap();
    assert_eq!(r.width(), 121);
    assert!(r.contains_point(-60, -60));
    assert!(r.contains_point(60, 60));
    assert!(!r.contains_point(61, 0));
}

#[test]
fn rect_intersection_and_enclosing() {
    let a = RectI::new(0, 0, 10, 10).unwrap();
    let b = RectI::new(5, -5, 20, 3).unwrap();
    assert_eq!(a.intersect(b), Some(RectI::new(5, 0, 10, 3).unwrap()));
    assert_eq!(a.intersect(RectI::new(10, 0, 12, 2).unwrap()), None);

    let e = RectI::enclosing(Rect::new(-0.5, 1.2, 3.1, 4.0));
    assert_eq!(e, RectI::new(-1, 1, 4, 4).unwrap());
}
