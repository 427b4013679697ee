use super::*;

#[test]
fn brush_defaults_sample_cleanly() {
    let b = BrushParams::default().at(0.0).unwrap();
    assert_eq!(b.size, 25.0);
    assert_eq!(b.write_on_end, 1.0);
    assert!(b.pressure_affects_opacity);
    assert!(!b.build_up);
}

#[test]
fn hardness_and_write_on_are_clamped() {
    let brush = BrushParams {
        hardness: Anim::constant(3.0),
        write_on_start: Anim::constant(-1.0),
        ..BrushParams::default()
    };
    let b = brush.at(0.0).unwrap();
    assert_eq!(b.hardness, 1.0);
    assert_eq!(b.write_on_start, 0.0);
}

#[test]
fn empty_strokes_are_rejected() {
    let s = StrokeItem::new(vec![Vec::new()], BrushParams::default());
    assert!(s.validate().is_err());
    let s = StrokeItem::new(
        vec![vec![StrokePoint::new(1.0, 2.0, 0.5)]],
        BrushParams::default(),
    );
    assert!(s.validate().is_ok());
}

#[test]
fn segments_follow_transform() {
    let mut s = StrokeItem::new(
        vec![vec![StrokePoint::new(1.0, 2.0, 0.5)]],
        BrushParams::default(),
    );
    s.transform = Anim::constant(Affine::translate((10.0, 0.0)));
    let segs = s.segments_at(0.0).unwrap();
    assert_eq!(segs[0][0].pos, Point::new(11.0, 2.0));
    assert_eq!(segs[0][0].pressure, 0.5);
}

#[test]
fn stroke_json_uses_defaults() {
    let s: StrokeItem =
        serde_json::from_str(r#"{"segments":[[{"pos":{"x":1.0,"y":2.0}}]]}"#).unwrap();
    assert_eq!(s.segments[0][0].pressure, 1.0);
    assert_eq!(s.opacity.sample(0.0).unwrap(), 1.0);
}
