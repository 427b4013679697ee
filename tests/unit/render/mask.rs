use super::*;
use crate::animation::anim::Anim;
use crate::foundation::core::Point;
use crate::model::stroke::{BrushParams, StrokeItem};

fn image(depth: BitDepth, comps: usize) -> Image {
    Image::new(RectI::new(0, 0, 16, 16).unwrap(), comps, depth).unwrap()
}

fn soft_stroke(build_up: bool) -> RotoItem {
    let brush = BrushParams {
        size: Anim::constant(6.0),
        build_up,
        ..BrushParams::default()
    };
    RotoItem::Paint(StrokeItem::new(
        vec![vec![StrokePoint::new(3.0, 8.0, 1.0), StrokePoint::new(12.0, 8.0, 0.5)]],
        brush,
    ))
}

#[test]
fn default_opts_are_valid_and_round_trip_through_json() {
    let opts = RenderOpts::default();
    opts.validate().unwrap();
    assert_eq!(opts.pressure_levels, 512);
    assert_eq!(opts.interior, InteriorMode::PathFill);
    assert_eq!(opts.feather, FeatherMode::Triangulated);

    let json = serde_json::to_string(&opts).unwrap();
    assert!(json.contains("\"path_fill\""));
    let back: RenderOpts = serde_json::from_str(&json).unwrap();
    assert_eq!(back, opts);

    let partial: RenderOpts = serde_json::from_str(r#"{"interior":"triangulated"}"#).unwrap();
    assert_eq!(partial.interior, InteriorMode::Triangulated);
    assert_eq!(partial.flatten_steps, 20);
}

#[test]
fn invalid_opts_are_rejected() {
    for opts in [
        RenderOpts {
            pressure_levels: 1,
            ..RenderOpts::default()
        },
        RenderOpts {
            flatten_steps: 0,
            ..RenderOpts::default()
        },
        RenderOpts {
            patch_subdivisions: 0,
            ..RenderOpts::default()
        },
    ] {
        assert!(matches!(opts.validate(), Err(RotoError::Validation(_))));
    }
}

#[test]
fn motion_blur_samples_cover_the_range() {
    assert_eq!(MotionBlurRange::single(3.0).samples(), vec![3.0]);
    let r = MotionBlurRange {
        start: 1.0,
        end: 2.0,
        step: 0.25,
    };
    assert_eq!(r.samples(), vec![1.0, 1.25, 1.5, 1.75, 2.0]);
    let r = MotionBlurRange {
        start: 1.0,
        end: 2.0,
        step: 0.0,
    };
    assert_eq!(r.samples(), vec![1.0]);
    let bad = MotionBlurRange {
        start: 2.0,
        end: 1.0,
        step: 0.5,
    };
    assert!(bad.validate().is_err());
}

#[test]
fn motion_blur_sub_frames_are_capped() {
    let dense = MotionBlurRange {
        start: 0.0,
        end: 1.0,
        step: 1e-300,
    };
    assert!(matches!(dense.validate(), Err(RotoError::Validation(_))));
    assert_eq!(dense.samples().len(), MAX_MOTION_BLUR_SAMPLES);

    let at_cap = MotionBlurRange {
        start: 0.0,
        end: 1023.0,
        step: 1.0,
    };
    at_cap.validate().unwrap();
    assert_eq!(at_cap.samples().len(), MAX_MOTION_BLUR_SAMPLES);

    let item = RotoItem::Bezier(BezierShape::circle(Point::new(8.0, 8.0), 5.0));
    let mut dest = image(BitDepth::Float, 1);
    let before = dest.clone();
    let roi = dest.bounds();
    let err = render_mask(
        &item, roi, 1, dense, 0.0, BitDepth::Float, 0, false, StrokeCarry::default(), None,
        &mut dest, &RenderOpts::default(),
    )
    .unwrap_err();
    assert!(matches!(err, RotoError::Validation(_)));
    assert_eq!(dest, before);
}

#[test]
fn surface_format_follows_build_up_and_components() {
    assert_eq!(surface_format(&soft_stroke(true), 1, 0.0).unwrap(), SurfaceFormat::A8);
    assert_eq!(surface_format(&soft_stroke(true), 4, 0.0).unwrap(), SurfaceFormat::Argb32);
    assert_eq!(surface_format(&soft_stroke(false), 1, 0.0).unwrap(), SurfaceFormat::Argb32);
    let circle = RotoItem::Bezier(BezierShape::circle(Point::new(0.0, 0.0), 4.0));
    assert_eq!(surface_format(&circle, 4, 0.0).unwrap(), SurfaceFormat::A8);
}

#[test]
fn mismatched_requests_leave_dest_untouched() {
    let item = RotoItem::Bezier(BezierShape::circle(Point::new(8.0, 8.0), 5.0));
    let mut dest = image(BitDepth::Float, 1);
    let before = dest.clone();
    let roi = dest.bounds();
    let range = MotionBlurRange::single(0.0);
    let opts = RenderOpts::default();

    let err = render_mask(
        &item, roi, 3, range, 0.0, BitDepth::Float, 0, false, StrokeCarry::default(), None,
        &mut dest, &opts,
    )
    .unwrap_err();
    assert!(matches!(err, RotoError::Validation(_)));

    let err = render_mask(
        &item, roi, 1, range, 0.0, BitDepth::Byte, 0, false, StrokeCarry::default(), None,
        &mut dest, &opts,
    )
    .unwrap_err();
    assert!(matches!(err, RotoError::Validation(_)));

    let outside = RectI::new(8, 8, 40, 40).unwrap();
    let err = render_mask(
        &item, outside, 1, range, 0.0, BitDepth::Float, 0, false, StrokeCarry::default(), None,
        &mut dest, &opts,
    )
    .unwrap_err();
    assert!(matches!(err, RotoError::Evaluation(_)));
    assert_eq!(dest, before);
}

#[test]
fn oversized_surface_fails_before_writing() {
    let item = RotoItem::Bezier(BezierShape::circle(Point::new(8.0, 8.0), 5.0));
    let bounds = RectI::new(0, 0, 70_000, 1).unwrap();
    let mut dest = Image::new(bounds, 1, BitDepth::Byte).unwrap();
    let before = dest.clone();
    let err = render_mask(
        &item,
        bounds,
        1,
        MotionBlurRange::single(0.0),
        0.0,
        BitDepth::Byte,
        0,
        false,
        StrokeCarry::default(),
        None,
        &mut dest,
        &RenderOpts::default(),
    )
    .unwrap_err();
    assert!(matches!(err, RotoError::Surface(_)));
    assert_eq!(dest, before);
}

#[test]
fn caller_cache_is_used_only_while_painting() {
    let item = soft_stroke(true);
    let roi = RectI::new(0, 0, 16, 16).unwrap();
    let opts = RenderOpts {
        pressure_levels: 8,
        ..RenderOpts::default()
    };
    let mut cache = DotPatternCache::new(8);

    let mut dest = image(BitDepth::Float, 1);
    render_mask(
        &item, roi, 1, MotionBlurRange::single(0.0), 0.0, BitDepth::Float, 0, false,
        StrokeCarry::default(), Some(&mut cache), &mut dest, &opts,
    )
    .unwrap();
    assert!(cache.is_empty());
    assert!(dest.get(8, 8, 0).unwrap() > 0.0);

    let mut dest = image(BitDepth::Float, 1);
    let carry = render_mask(
        &item, roi, 1, MotionBlurRange::single(0.0), 0.0, BitDepth::Float, 0, true,
        StrokeCarry::default(), Some(&mut cache), &mut dest, &opts,
    )
    .unwrap();
    assert!(!cache.is_empty());
    assert!(carry.last_center.is_some());

    purge_dot_pattern_cache(&mut cache);
    assert!(cache.is_empty());
}

#[test]
fn closed_but_inactive_shapes_render_nothing() {
    let mut shape = BezierShape::circle(Point::new(8.0, 8.0), 5.0);
    shape.activated = false;
    let mut dest = image(BitDepth::Float, 1);
    let roi = dest.bounds();
    render_mask(
        &RotoItem::Bezier(shape), roi, 1, MotionBlurRange::single(0.0), 0.0, BitDepth::Float, 0,
        false, StrokeCarry::default(), None, &mut dest, &RenderOpts::default(),
    )
    .unwrap();
    assert!(!dest.has_nan());
    assert_eq!(dest.get(8, 8, 0), Some(0.0));
}

#[test]
fn open_beziers_are_stroked_with_their_brush() {
    let mut shape = BezierShape::polygon(&[Point::new(2.0, 8.0), Point::new(14.0, 8.0)]);
    shape.closed = false;
    shape.brush = BrushParams {
        size: Anim::constant(4.0),
        hardness: Anim::constant(1.0),
        ..BrushParams::default()
    };
    let mut dest = image(BitDepth::Float, 1);
    let roi = dest.bounds();
    let carry = render_mask(
        &RotoItem::Bezier(shape), roi, 1, MotionBlurRange::single(0.0), 0.0, BitDepth::Float, 0,
        false, StrokeCarry::default(), None, &mut dest, &RenderOpts::default(),
    )
    .unwrap();
    assert!(carry.last_center.is_some());
    assert!(dest.get(8, 8, 0).unwrap() > 0.9);
    assert_eq!(dest.get(8, 1, 0), Some(0.0));
}
