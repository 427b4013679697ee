use super::*;
use crate::foundation::core::{Point, Rect};
use crate::render::surface::SurfaceFormat;
use kurbo::Shape;

fn surface(format: SurfaceFormat) -> RasterSurface {
    RasterSurface::new(format, RectI::new(-5, -5, 15, 15).unwrap()).unwrap()
}

#[test]
fn solid_fill_is_not_antialiased() {
    let mut s = surface(SurfaceFormat::A8);
    let mut painter = Painter::new();
    let path = Rect::new(2.0, 2.0, 6.0, 6.0).to_path(0.1);
    painter
        .fill_path(&mut s, &path, &FillPaint::white(), FillRule::Winding, CompositeOp::Over)
        .unwrap();
    assert_eq!(s.intensity(2, 2), Some(255));
    assert_eq!(s.intensity(5, 5), Some(255));
    assert_eq!(s.intensity(6, 6), Some(0));
    assert_eq!(s.intensity(1, 3), Some(0));
    assert_eq!(s.intensity(-5, -5), Some(0));
}

#[test]
fn fill_is_clipped_to_the_surface_region() {
    let mut s = surface(SurfaceFormat::A8);
    let mut painter = Painter::new();
    let path = Rect::new(10.0, 10.0, 40.0, 40.0).to_path(0.1);
    painter
        .fill_path(&mut s, &path, &FillPaint::white(), FillRule::Winding, CompositeOp::Over)
        .unwrap();
    assert_eq!(s.intensity(14, 14), Some(255));
    assert_eq!(s.intensity(9, 14), Some(0));

    let outside = Rect::new(30.0, 30.0, 40.0, 40.0).to_path(0.1);
    let mut empty = surface(SurfaceFormat::A8);
    painter
        .fill_path(&mut empty, &outside, &FillPaint::white(), FillRule::Winding, CompositeOp::Over)
        .unwrap();
    assert!(empty.data().iter().all(|b| *b == 0));
}

#[test]
fn negative_origin_is_honored() {
    let mut s = surface(SurfaceFormat::A8);
    let mut painter = Painter::new();
    let path = Rect::new(-4.0, -4.0, -2.0, -2.0).to_path(0.1);
    painter
        .fill_path(&mut s, &path, &FillPaint::white(), FillRule::Winding, CompositeOp::Over)
        .unwrap();
    assert_eq!(s.intensity(-4, -4), Some(255));
    assert_eq!(s.intensity(-3, -3), Some(255));
    assert_eq!(s.intensity(-2, -2), Some(0));
}

#[test]
fn even_odd_leaves_a_hole() {
    let mut path = Rect::new(0.0, 0.0, 10.0, 10.0).to_path(0.1);
    path.extend(Rect::new(3.0, 3.0, 7.0, 7.0).to_path(0.1));

    let mut nz = surface(SurfaceFormat::A8);
    let mut eo = surface(SurfaceFormat::A8);
    let mut painter = Painter::new();
    painter
        .fill_path(&mut nz, &path, &FillPaint::white(), FillRule::Winding, CompositeOp::Over)
        .unwrap();
    painter
        .fill_path(&mut eo, &path, &FillPaint::white(), FillRule::EvenOdd, CompositeOp::Over)
        .unwrap();
    assert_eq!(nz.intensity(5, 5), Some(255));
    assert_eq!(eo.intensity(5, 5), Some(0));
    assert_eq!(eo.intensity(1, 1), Some(255));
}

#[test]
fn fills_outside_the_surface_are_ignored() {
    let mut s = surface(SurfaceFormat::Argb32);
    let mut painter = Painter::new();
    let path = Rect::new(100.0, 100.0, 120.0, 120.0).to_path(0.1);
    painter
        .fill_path(&mut s, &path, &FillPaint::white(), FillRule::Winding, CompositeOp::Over)
        .unwrap();
    assert!(s.data().iter().all(|b| *b == 0));
}

#[test]
fn radial_gradient_fades_outward() {
    let mut s = surface(SurfaceFormat::A8);
    let mut painter = Painter::new();
    let gradient = peniko::Gradient::new_two_point_radial((0.0, 0.0), 1.0, (0.0, 0.0), 8.0)
        .with_stops([
            (0.0f32, peniko::Color::new([1.0, 1.0, 1.0, 1.0])),
            (1.0f32, peniko::Color::new([1.0, 1.0, 1.0, 0.0])),
        ]);
    let paint = FillPaint::Gradient {
        gradient,
        transform: Affine::translate((5.0, 5.0)),
    };
    let disk = kurbo::Circle::new(Point::new(5.0, 5.0), 8.0).to_path(0.1);
    painter
        .fill_path(&mut s, &disk, &paint, FillRule::Winding, CompositeOp::Over)
        .unwrap();
    let center = s.intensity(5, 5).unwrap();
    let mid = s.intensity(9, 5).unwrap();
    let edge = s.intensity(11, 5).unwrap();
    assert!(center > 240, "center {center}");
    assert!(center > mid && mid > edge, "{center} {mid} {edge}");
}

#[test]
fn context_is_reused_for_same_size() {
    let mut s = surface(SurfaceFormat::A8);
    let mut painter = Painter::new();
    let path = Rect::new(0.0, 0.0, 4.0, 4.0).to_path(0.1);
    for _ in 0..3 {
        painter
            .fill_path(&mut s, &path, &FillPaint::white(), FillRule::Winding, CompositeOp::Over)
            .unwrap();
    }
    assert!(painter.ctx.is_some());
    assert_eq!(s.intensity(1, 1), Some(255));
}
