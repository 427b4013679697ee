use super::*;
use crate::imaging::image::BitDepth;
use crate::model::stroke::{BrushParams, StrokePoint};
use crate::animation::anim::Anim;

fn half_lit_image() -> Image {
    let mut img = Image::new(RectI::new(0, 0, 20, 10).unwrap(), 1, BitDepth::Float).unwrap();
    for y in 0..10 {
        for x in 0..10 {
            img.set(x, y, 0, 1.0);
        }
    }
    img
}

fn stroke(points: &[(f64, f64)]) -> StrokeItem {
    let brush = BrushParams {
        size: Anim::constant(4.0),
        hardness: Anim::constant(1.0),
        spacing: Anim::constant(0.25),
        ..BrushParams::default()
    };
    StrokeItem::new(
        vec![points.iter().map(|&(x, y)| StrokePoint::new(x, y, 1.0)).collect()],
        brush,
    )
}

#[test]
fn damping_limits_the_drag_distance() {
    let next = Point::new(10.0, 0.0);
    assert_eq!(dampen_smear_effect(Point::new(0.0, 0.0), next, 4.0), Point::new(6.0, 0.0));
    assert_eq!(dampen_smear_effect(Point::new(8.0, 0.0), next, 4.0), Point::new(8.0, 0.0));
    assert_eq!(dampen_smear_effect(next, next, 4.0), next);
}

#[test]
fn unset_previous_center_is_a_no_op() {
    let mut img = half_lit_image();
    let before = img.clone();
    let item = stroke(&[(5.0, 5.0)]);
    let (rendered, carry) = render_smear(
        0.0,
        0,
        &item,
        img.bounds(),
        &mut img,
        StrokeCarry::default(),
        &RenderOpts::default(),
    )
    .unwrap();
    assert!(!rendered);
    assert_eq!(img, before);
    assert_eq!(carry.last_center, Some(Point::new(5.0, 5.0)));
}

#[test]
fn identical_previous_center_is_a_no_op() {
    let mut img = half_lit_image();
    let before = img.clone();
    let item = stroke(&[(9.0, 5.0)]);
    let carry = StrokeCarry {
        dist_to_next: 0.0,
        last_center: Some(Point::new(9.0, 5.0)),
    };
    let (rendered, _) =
        render_smear(0.0, 0, &item, img.bounds(), &mut img, carry, &RenderOpts::default()).unwrap();
    assert!(!rendered);
    assert_eq!(img, before);
}

#[test]
fn smear_drags_pixels_along_the_stroke() {
    let mut img = half_lit_image();
    let item = stroke(&[(5.0, 5.0), (15.0, 5.0)]);
    let (rendered, carry) = render_smear(
        0.0,
        0,
        &item,
        img.bounds(),
        &mut img,
        StrokeCarry::default(),
        &RenderOpts::default(),
    )
    .unwrap();
    assert!(rendered);
    assert_eq!(carry.last_center, Some(Point::new(15.0, 5.0)));
    assert!(img.get(12, 5, 0).unwrap() > 0.5);
    assert_eq!(img.get(0, 5, 0), Some(1.0));
    assert_eq!(img.get(15, 0, 0), Some(0.0));
    assert!(!img.has_nan());
}

#[test]
fn writes_stay_inside_the_region_of_interest() {
    let mut img = half_lit_image();
    let item = stroke(&[(5.0, 5.0), (15.0, 5.0)]);
    let roi = RectI::new(0, 0, 10, 10).unwrap();
    render_smear(0.0, 0, &item, roi, &mut img, StrokeCarry::default(), &RenderOpts::default())
        .unwrap();
    for y in 0..10 {
        for x in 10..20 {
            assert_eq!(img.get(x, y, 0), Some(0.0), "({x}, {y})");
        }
    }
}
